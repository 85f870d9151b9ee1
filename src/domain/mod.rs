//! Feed-agnostic value types and the pure filter/sort projector.

pub mod bet;
pub mod catalog;
pub mod criteria;
pub mod projector;
pub mod subscription;
pub mod timestamp;

pub use bet::{BetRecord, BookQuote};
pub use criteria::{FilterCriteria, SortKey};
pub use projector::{project, MIN_ARB_PERCENT};
pub use subscription::SubscriptionSet;
