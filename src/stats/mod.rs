//! Pure derivations from raw Riot API payloads to the metrics shown on the overlay.

mod match_fact;
mod rank;
mod session;

pub use match_fact::MatchFact;
pub use rank::{RankRecord, SeasonSummary, Tier, percent_int};
pub use session::{SessionSummary, current_session, format_kda, summarize_session};
