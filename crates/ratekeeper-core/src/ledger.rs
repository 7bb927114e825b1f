//! Usage ledger data model.
//!
//! The ledger is the persisted usage state that the rating conditions
//! evaluate against: the usage counters, the first-use date, the last
//! observed app version and the append-only user-action histories.
//! It is pure data -- mutation happens through the engine, persistence
//! through a [`DataStore`](crate::store::DataStore).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded user response to the request prompt.
///
/// Tagged with the app version that was active at the moment of the action,
/// not the version at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAction {
    pub app_version: String,
    pub date: DateTime<Utc>,
}

impl UserAction {
    pub fn new(app_version: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            app_version: app_version.into(),
            date,
        }
    }
}

/// The three user-action histories kept by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserActionKind {
    OptedInForReminder,
    Rated,
    Declined,
}

/// In-memory snapshot of the persisted usage state.
///
/// A fresh ledger has zeroed counters, empty histories and neither a
/// first-use date nor a tracked app version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageLedger {
    /// Set once, on the first counted usage event; cleared only by a reset.
    pub first_use_date: Option<DateTime<Utc>>,
    pub app_sessions_count: u64,
    pub significant_event_count: u64,
    /// The previous or current app version, refreshed on every counted
    /// usage event. Used by hosts to detect version changes.
    pub tracked_app_version: Option<String>,
    pub opted_in_for_reminder_actions: Vec<UserAction>,
    pub rated_actions: Vec<UserAction>,
    pub declined_actions: Vec<UserAction>,
}

impl UsageLedger {
    pub fn actions(&self, kind: UserActionKind) -> &[UserAction] {
        match kind {
            UserActionKind::OptedInForReminder => &self.opted_in_for_reminder_actions,
            UserActionKind::Rated => &self.rated_actions,
            UserActionKind::Declined => &self.declined_actions,
        }
    }

    /// The entry with the maximum timestamp in the given history.
    /// Ties are broken arbitrarily.
    pub fn most_recent_action(&self, kind: UserActionKind) -> Option<&UserAction> {
        self.actions(kind).iter().max_by_key(|action| action.date)
    }
}

/// Whole-day difference between two instants on the calendar.
///
/// Counts crossed day boundaries, not elapsed 24-hour blocks: several hours
/// within the same day is 0, a gap just past midnight is 1. Negative when
/// `to` precedes `from`.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to.date_naive() - from.date_naive()).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn days_between_same_day_is_zero() {
        let morning = Utc.with_ymd_and_hms(2026, 8, 7, 1, 30, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2026, 8, 7, 23, 45, 0).unwrap();
        assert_eq!(days_between(morning, evening), 0);
    }

    #[test]
    fn days_between_counts_midnight_crossings() {
        let before_midnight = Utc.with_ymd_and_hms(2026, 8, 7, 23, 59, 0).unwrap();
        let after_midnight = Utc.with_ymd_and_hms(2026, 8, 8, 0, 1, 0).unwrap();
        assert_eq!(days_between(before_midnight, after_midnight), 1);
    }

    #[test]
    fn days_between_is_negative_when_reversed() {
        let earlier = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        assert_eq!(days_between(later, earlier), -6);
    }

    #[test]
    fn most_recent_action_picks_max_by_date() {
        let mut ledger = UsageLedger::default();
        ledger.declined_actions = vec![
            UserAction::new("1.0.0", Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()),
            UserAction::new("1.2.0", Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()),
            UserAction::new("1.1.0", Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap()),
        ];

        let most_recent = ledger
            .most_recent_action(UserActionKind::Declined)
            .expect("history is non-empty");
        assert_eq!(most_recent.app_version, "1.2.0");
    }

    #[test]
    fn most_recent_action_is_none_for_empty_history() {
        let ledger = UsageLedger::default();
        assert!(ledger.most_recent_action(UserActionKind::Rated).is_none());
    }
}
