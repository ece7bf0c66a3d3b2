mod refresh;

pub use refresh::{RefreshOutcome, RefreshScheduler};
