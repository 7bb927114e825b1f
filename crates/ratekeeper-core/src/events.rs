use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every ledger mutation and prompt transition produces an Event.
/// Hosts poll the engine for them after each operation
/// ([`PromptEngine::drain_events`](crate::engine::PromptEngine::drain_events)).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The first counted usage event stamped the first-use date.
    FirstUseRecorded {
        at: DateTime<Utc>,
    },
    AppSessionRecorded {
        count: u64,
        at: DateTime<Utc>,
    },
    SignificantEventRecorded {
        count: u64,
        at: DateTime<Utc>,
    },
    /// The stored app version differed from the provider's and was refreshed.
    TrackedVersionChanged {
        previous: Option<String>,
        current: String,
        at: DateTime<Utc>,
    },
    ConditionsEvaluated {
        satisfied: bool,
        unsatisfied: Vec<String>,
        at: DateTime<Utc>,
    },
    PromptRequested {
        at: DateTime<Utc>,
    },
    /// Recorded optimistically; the native surface gives no confirmation.
    UserRated {
        app_version: String,
        at: DateTime<Utc>,
    },
    ReminderOptedIn {
        app_version: String,
        at: DateTime<Utc>,
    },
    DeclinedToRate {
        app_version: String,
        at: DateTime<Utc>,
    },
    /// The prompt was torn down without a choice; nothing was recorded.
    PromptDismissed {
        at: DateTime<Utc>,
    },
    UsageTrackersReset {
        at: DateTime<Utc>,
    },
    UserActionsReset {
        at: DateTime<Utc>,
    },
}
