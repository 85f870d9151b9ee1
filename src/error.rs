use thiserror::Error;

/// Failures while fetching or decoding the bet feed.
///
/// These never reach the presentation layer as hard failures: the feed store
/// absorbs them, keeps its last-good records, and logs through the diagnostic
/// channel.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed endpoint unreachable: {0}")]
    Network(String),

    #[error("feed endpoint returned status {status}")]
    Status { status: u16 },

    #[error("failed to decode feed payload: {0}")]
    Decode(String),
}

/// Failures while reading or writing the per-user subscription set.
///
/// `save` failures are surfaced to the caller so the edit session can stay
/// open; `load` failures are swallowed into an empty set by the reconciler.
#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("missing user id")]
    MissingUserId,

    #[error("failed to encode subscription payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode subscription payload: {0}")]
    Decode(String),

    #[error("subscription endpoint returned status {status}")]
    Rejected { status: u16 },

    #[error("subscription endpoint unreachable: {0}")]
    Network(String),
}

/// Failures while registering the push token with the backend.
///
/// Never user-visible: registration failures are logged and retried on the
/// next opportunity.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("registration endpoint returned status {status}")]
    Rejected { status: u16 },

    #[error("registration endpoint unreachable: {0}")]
    Network(String),
}

/// Failures of the durable local key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read session store: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write session store: {0}")]
    Write(#[source] std::io::Error),

    #[error("malformed session store: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
