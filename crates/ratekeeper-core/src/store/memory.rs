//! In-memory data store.

use chrono::{DateTime, Utc};

use super::DataStore;
use crate::ledger::{UserAction, UserActionKind};

/// Volatile store backed by plain fields.
///
/// Useful for tests and for hosts that persist the ledger themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    first_use_date: Option<DateTime<Utc>>,
    app_sessions_count: u64,
    significant_event_count: u64,
    tracked_app_version: Option<String>,
    opted_in_for_reminder_actions: Vec<UserAction>,
    rated_actions: Vec<UserAction>,
    declined_actions: Vec<UserAction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn history_mut(&mut self, kind: UserActionKind) -> &mut Vec<UserAction> {
        match kind {
            UserActionKind::OptedInForReminder => &mut self.opted_in_for_reminder_actions,
            UserActionKind::Rated => &mut self.rated_actions,
            UserActionKind::Declined => &mut self.declined_actions,
        }
    }
}

impl DataStore for MemoryStore {
    fn first_use_date(&self) -> Option<DateTime<Utc>> {
        self.first_use_date
    }

    fn set_first_use_date(&mut self, date: Option<DateTime<Utc>>) {
        self.first_use_date = date;
    }

    fn app_sessions_count(&self) -> u64 {
        self.app_sessions_count
    }

    fn set_app_sessions_count(&mut self, count: u64) {
        self.app_sessions_count = count;
    }

    fn significant_event_count(&self) -> u64 {
        self.significant_event_count
    }

    fn set_significant_event_count(&mut self, count: u64) {
        self.significant_event_count = count;
    }

    fn tracked_app_version(&self) -> Option<String> {
        self.tracked_app_version.clone()
    }

    fn set_tracked_app_version(&mut self, version: Option<&str>) {
        self.tracked_app_version = version.map(str::to_string);
    }

    fn actions(&self, kind: UserActionKind) -> Vec<UserAction> {
        match kind {
            UserActionKind::OptedInForReminder => self.opted_in_for_reminder_actions.clone(),
            UserActionKind::Rated => self.rated_actions.clone(),
            UserActionKind::Declined => self.declined_actions.clone(),
        }
    }

    fn append_action(&mut self, kind: UserActionKind, action: UserAction) {
        self.history_mut(kind).push(action);
    }

    fn clear_actions(&mut self, kind: UserActionKind) {
        self.history_mut(kind).clear();
    }
}
