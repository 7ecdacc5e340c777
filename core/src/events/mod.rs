pub mod bus;
pub mod signal;

pub use bus::{EventBus, SubscriptionId};
pub use signal::{MatchEvent, MatchEventKind};
