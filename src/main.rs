use clap::Parser;
use tracing::error;

use arbfeed::cli::{self, Cli};
use arbfeed::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config: {e}");
            std::process::exit(1);
        }
    };
    config.init_logging();

    if let Err(e) = cli::run(cli, config).await {
        error!(error = %e, "fatal error");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
