//! Rating conditions.
//!
//! Each condition is one independent rule evaluated against a ledger
//! snapshot; the engine prompts only when every configured condition is
//! satisfied. The built-in variants cover usage thresholds and re-prompt
//! schedules; hosts can supply custom conditions alongside them.

mod backoff;
mod recurrence;
mod usage;

pub use backoff::wait_days;
pub use recurrence::{
    NotDeclinedToRateAnyVersion, NotDeclinedToRateCurrentVersion, NotPostponedDueToReminder,
    NotRatedAnyVersion, NotRatedCurrentVersion,
};
pub use usage::{EnoughAppSessions, EnoughDaysUsed, EnoughSignificantEvents};

use crate::ledger::UsageLedger;

/// One rule the ledger must satisfy before the user may be prompted.
///
/// Implementations are pure functions of the snapshot plus their own
/// configuration -- no hidden state, no side effects.
pub trait RatingCondition {
    /// Short identifier used in evaluation verdicts and debug output.
    fn name(&self) -> &'static str;

    fn is_satisfied(&self, ledger: &UsageLedger) -> bool;
}
