//! Command-line surface: a thin presentation layer over the services.

mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tokio::signal;
use tracing::info;

use crate::api::ApiClient;
use crate::app::{
    AuthEvent, FeedStore, SessionCoordinator, SessionEvent, SubscriptionReconciler,
    TokenEvent, TokenLifecycleManager,
};
use crate::config::Config;
use crate::domain::{catalog, project, FilterCriteria, SortKey, SubscriptionSet};
use crate::error::{Error, SubscriptionError};
use crate::port::KeyValueStore;
use crate::store::FileStore;
use crate::Result;

#[derive(Parser, Debug)]
#[command(name = "arbfeed")]
#[command(version, about = "Watch a sports arbitrage feed and manage notification subscriptions")]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Poll the feed and print the filtered view.
    Watch {
        /// League filter ("All" or an exact league name).
        #[arg(long, default_value = catalog::ALL)]
        league: String,

        /// Book lens ("All", a primary book, or a profitable-books key).
        #[arg(long, default_value = catalog::ALL)]
        book: String,

        #[arg(long, value_enum, default_value = "arb")]
        sort: SortArg,

        /// Fetch once and exit instead of polling.
        #[arg(long)]
        once: bool,
    },

    /// Show or replace push-notification subscriptions.
    Subscriptions {
        #[command(subcommand)]
        action: SubscriptionsAction,
    },

    /// Record a push token issuance and register it if signed in.
    RegisterToken { token: String },

    /// Record the authenticated user id from the identity provider.
    SignIn { user_id: String },

    /// Clear the recorded user id.
    SignOut,
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionsAction {
    /// Print the current subscription set.
    Show,
    /// Replace the subscription set with the given books.
    Set { books: Vec<String> },
    /// List the books available for subscription.
    Books,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Highest edge first.
    Arb,
    /// Most recent first.
    Timestamp,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Arb => SortKey::ByArbDescending,
            SortArg::Timestamp => SortKey::ByTimestampDescending,
        }
    }
}

/// Dispatch the parsed command.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let client = Arc::new(ApiClient::new(config.network.api_url.clone()));
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(FileStore::default_path())?);

    match cli.command {
        Command::Watch {
            league,
            book,
            sort,
            once,
        } => {
            let criteria = FilterCriteria::new(league, book, sort.into());
            watch(client, &config, criteria, once).await
        }
        Command::Subscriptions { action } => subscriptions(client, store, action).await,
        Command::RegisterToken { token } => {
            let coordinator = coordinator(client, store)?;
            coordinator
                .handle(SessionEvent::Token(TokenEvent { token }))
                .await;
            Ok(())
        }
        Command::SignIn { user_id } => {
            let coordinator = coordinator(client, store)?;
            coordinator
                .handle(SessionEvent::Auth(AuthEvent {
                    signed_in: true,
                    user_id: Some(user_id),
                }))
                .await;
            Ok(())
        }
        Command::SignOut => {
            let coordinator = coordinator(client, store)?;
            coordinator
                .handle(SessionEvent::Auth(AuthEvent {
                    signed_in: false,
                    user_id: None,
                }))
                .await;
            Ok(())
        }
    }
}

fn coordinator(
    client: Arc<ApiClient>,
    store: Arc<dyn KeyValueStore>,
) -> Result<SessionCoordinator> {
    let tokens = Arc::new(TokenLifecycleManager::new(client, store.clone())?);
    Ok(SessionCoordinator::new(store, tokens)?)
}

async fn watch(
    client: Arc<ApiClient>,
    config: &Config,
    criteria: FilterCriteria,
    once: bool,
) -> Result<()> {
    let feed = FeedStore::with_min_loading(
        client,
        Duration::from_millis(config.feed.min_loading_ms),
    );
    let interval = Duration::from_secs(config.feed.poll_interval_secs);

    loop {
        feed.refresh().await;
        let view = project(&feed.records(), &criteria);
        render::feed_table(&view, &criteria);

        if once {
            return Ok(());
        }
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = signal::ctrl_c() => {
                info!("shutdown signal received");
                return Ok(());
            }
        }
    }
}

async fn subscriptions(
    client: Arc<ApiClient>,
    store: Arc<dyn KeyValueStore>,
    action: SubscriptionsAction,
) -> Result<()> {
    if let SubscriptionsAction::Books = action {
        for book in catalog::subscribable_books() {
            println!("{book}");
        }
        return Ok(());
    }

    let user_id = store
        .get(crate::app::KEY_USER_ID)?
        .ok_or(Error::Subscription(SubscriptionError::MissingUserId))?;
    let reconciler = SubscriptionReconciler::new(client);

    match action {
        SubscriptionsAction::Show => {
            let set = reconciler.load(&user_id).await;
            if set.is_empty() {
                println!("no subscriptions");
            } else {
                for book in set.iter() {
                    println!("{book}");
                }
            }
            Ok(())
        }
        SubscriptionsAction::Set { books } => {
            let set = SubscriptionSet::from_books(books);
            // Surface save failures so the user can retry; nothing is
            // discarded silently.
            reconciler.save(&user_id, &set).await?;
            println!("saved {} subscription(s)", set.len());
            Ok(())
        }
        SubscriptionsAction::Books => unreachable!("handled above"),
    }
}
