//! Domain types.

mod presence;
mod sync;

pub use presence::PresenceReport;
pub use sync::{Counts, OutcomeResult, SyncOutcome, SyncReport, SyncRequest};
