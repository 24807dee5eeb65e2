//! Search history invariants:
//!
//! 1. History is the only persisted state of the bot
//! 2. Statistics are derived from history on every request
//! 3. Only resolved searches contribute to statistics

pub mod entity;
pub mod invariants;

pub use entity::{rank_user_stats, NewSearchRecord, SearchRecord, UserStat};
pub use invariants::validate_search_record;
