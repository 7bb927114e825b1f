//! SQLite-backed data store.
//!
//! All tracked values live in a single key-value table. The action
//! histories are JSON blobs, timestamps RFC 3339. Reads degrade to
//! defaults on missing or malformed rows; writes are best-effort so a
//! read-only or broken store never takes the engine down.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, DataStore};
use crate::error::StoreError;
use crate::ledger::{UserAction, UserActionKind};

const FIRST_USE_DATE: &str = "first_use_date";
const APP_SESSIONS_COUNT: &str = "app_sessions_count";
const SIGNIFICANT_EVENT_COUNT: &str = "significant_event_count";
const TRACKED_APP_VERSION: &str = "tracked_app_version";

fn actions_key(kind: UserActionKind) -> &'static str {
    match kind {
        UserActionKind::OptedInForReminder => "opted_in_for_reminder_actions",
        UserActionKind::Rated => "rated_actions",
        UserActionKind::Declined => "declined_actions",
    }
}

/// SQLite key-value store for the usage ledger.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `~/.config/ratekeeper/ratekeeper.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("ratekeeper.db");
        Self::open_at(path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let conn =
            Connection::open(&path).map_err(|source| StoreError::OpenFailed { path, source })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Raw read; `None` for missing rows or any query failure.
    fn get(&self, key: &str) -> Option<String> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .ok()
            .flatten()
    }

    /// Best-effort write; a failed write leaves the previous value behind.
    fn set(&self, key: &str, value: &str) {
        let _ = self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        );
    }

    fn remove(&self, key: &str) {
        let _ = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key]);
    }

    fn get_count(&self, key: &str) -> u64 {
        self.get(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }
}

impl DataStore for SqliteStore {
    fn first_use_date(&self) -> Option<DateTime<Utc>> {
        self.get(FIRST_USE_DATE)?.parse().ok()
    }

    fn set_first_use_date(&mut self, date: Option<DateTime<Utc>>) {
        match date {
            Some(date) => self.set(FIRST_USE_DATE, &date.to_rfc3339()),
            None => self.remove(FIRST_USE_DATE),
        }
    }

    fn app_sessions_count(&self) -> u64 {
        self.get_count(APP_SESSIONS_COUNT)
    }

    fn set_app_sessions_count(&mut self, count: u64) {
        self.set(APP_SESSIONS_COUNT, &count.to_string());
    }

    fn significant_event_count(&self) -> u64 {
        self.get_count(SIGNIFICANT_EVENT_COUNT)
    }

    fn set_significant_event_count(&mut self, count: u64) {
        self.set(SIGNIFICANT_EVENT_COUNT, &count.to_string());
    }

    fn tracked_app_version(&self) -> Option<String> {
        self.get(TRACKED_APP_VERSION)
    }

    fn set_tracked_app_version(&mut self, version: Option<&str>) {
        match version {
            Some(version) => self.set(TRACKED_APP_VERSION, version),
            None => self.remove(TRACKED_APP_VERSION),
        }
    }

    fn actions(&self, kind: UserActionKind) -> Vec<UserAction> {
        self.get(actions_key(kind))
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    fn append_action(&mut self, kind: UserActionKind, action: UserAction) {
        let mut actions = self.actions(kind);
        actions.push(action);
        if let Ok(json) = serde_json::to_string(&actions) {
            self.set(actions_key(kind), &json);
        }
    }

    fn clear_actions(&mut self, kind: UserActionKind) {
        self.remove(actions_key(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_reads_as_defaults() {
        let store = SqliteStore::open_memory().unwrap();

        assert_eq!(store.first_use_date(), None);
        assert_eq!(store.app_sessions_count(), 0);
        assert_eq!(store.significant_event_count(), 0);
        assert_eq!(store.tracked_app_version(), None);
        assert!(store.actions(UserActionKind::Declined).is_empty());
    }

    #[test]
    fn values_round_trip() {
        let mut store = SqliteStore::open_memory().unwrap();
        let now = Utc::now();

        store.set_first_use_date(Some(now));
        store.set_app_sessions_count(42);
        store.set_significant_event_count(7);
        store.set_tracked_app_version(Some("1.2.3"));

        assert_eq!(store.first_use_date(), Some(now));
        assert_eq!(store.app_sessions_count(), 42);
        assert_eq!(store.significant_event_count(), 7);
        assert_eq!(store.tracked_app_version(), Some("1.2.3".to_string()));
    }

    #[test]
    fn actions_round_trip_with_sub_second_precision() {
        let mut store = SqliteStore::open_memory().unwrap();
        let action = UserAction::new("1.2.3", Utc::now());

        store.append_action(UserActionKind::Rated, action.clone());
        store.append_action(UserActionKind::Rated, UserAction::new("1.2.4", Utc::now()));

        let actions = store.actions(UserActionKind::Rated);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], action);
    }

    #[test]
    fn clearing_a_history_leaves_the_others() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.append_action(UserActionKind::Rated, UserAction::new("1.0.0", Utc::now()));
        store.append_action(UserActionKind::Declined, UserAction::new("1.0.0", Utc::now()));

        store.clear_actions(UserActionKind::Rated);

        assert!(store.actions(UserActionKind::Rated).is_empty());
        assert_eq!(store.actions(UserActionKind::Declined).len(), 1);
    }

    #[test]
    fn malformed_rows_degrade_to_defaults() {
        let store = SqliteStore::open_memory().unwrap();
        store.set(FIRST_USE_DATE, "not-a-date");
        store.set(APP_SESSIONS_COUNT, "not-a-number");
        store.set(actions_key(UserActionKind::Declined), "{broken json");

        assert_eq!(store.first_use_date(), None);
        assert_eq!(store.app_sessions_count(), 0);
        assert!(store.actions(UserActionKind::Declined).is_empty());
    }

    #[test]
    fn unset_first_use_date_removes_the_row() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.set_first_use_date(Some(Utc::now()));
        store.set_first_use_date(None);

        assert_eq!(store.first_use_date(), None);
    }

    #[test]
    fn reopening_a_file_store_preserves_the_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ratekeeper.db");

        {
            let mut store = SqliteStore::open_at(path.clone()).unwrap();
            store.set_app_sessions_count(3);
            store.append_action(UserActionKind::Declined, UserAction::new("2.0.0", Utc::now()));
        }

        let store = SqliteStore::open_at(path).unwrap();
        assert_eq!(store.app_sessions_count(), 3);
        assert_eq!(store.actions(UserActionKind::Declined).len(), 1);
    }
}
