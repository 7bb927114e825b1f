//! Ledger persistence.
//!
//! The engine reads and writes the usage ledger through the [`DataStore`]
//! trait. Reads never fail: missing or malformed values degrade to the
//! fresh-ledger defaults, so a corrupted store behaves as if the app was
//! never used.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::ledger::{UsageLedger, UserAction, UserActionKind};

/// Key-value persistence for the usage ledger.
///
/// Implementations may serialize the action histories however they like
/// (the built-in stores use JSON blobs) as long as `{app_version, date}`
/// pairs round-trip exactly, including sub-second timestamp precision.
pub trait DataStore {
    fn first_use_date(&self) -> Option<DateTime<Utc>>;
    fn set_first_use_date(&mut self, date: Option<DateTime<Utc>>);

    fn app_sessions_count(&self) -> u64;
    fn set_app_sessions_count(&mut self, count: u64);

    fn significant_event_count(&self) -> u64;
    fn set_significant_event_count(&mut self, count: u64);

    fn tracked_app_version(&self) -> Option<String>;
    fn set_tracked_app_version(&mut self, version: Option<&str>);

    fn actions(&self, kind: UserActionKind) -> Vec<UserAction>;
    fn append_action(&mut self, kind: UserActionKind, action: UserAction);
    fn clear_actions(&mut self, kind: UserActionKind);

    /// Full snapshot for condition evaluation and host display.
    fn ledger(&self) -> UsageLedger {
        UsageLedger {
            first_use_date: self.first_use_date(),
            app_sessions_count: self.app_sessions_count(),
            significant_event_count: self.significant_event_count(),
            tracked_app_version: self.tracked_app_version(),
            opted_in_for_reminder_actions: self.actions(UserActionKind::OptedInForReminder),
            rated_actions: self.actions(UserActionKind::Rated),
            declined_actions: self.actions(UserActionKind::Declined),
        }
    }
}

/// Returns `~/.config/ratekeeper[-dev]/` based on RATEKEEPER_ENV.
///
/// Set RATEKEEPER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RATEKEEPER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ratekeeper-dev")
    } else {
        base_dir.join("ratekeeper")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StoreError::DataDir(e.to_string()))?;
    Ok(dir)
}
