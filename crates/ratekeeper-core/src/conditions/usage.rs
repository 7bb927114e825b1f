//! Conditions over the usage counters and the first-use date.

use chrono::Utc;

use super::RatingCondition;
use crate::ledger::{days_between, UsageLedger};

/// Satisfied once the app has been used for enough whole days since the
/// first counted usage event. Unsatisfied while no first-use date is set.
#[derive(Debug, Clone, Copy)]
pub struct EnoughDaysUsed {
    required_days: u64,
}

impl EnoughDaysUsed {
    pub fn new(required_days: u64) -> Self {
        Self { required_days }
    }
}

impl RatingCondition for EnoughDaysUsed {
    fn name(&self) -> &'static str {
        "enough_days_used"
    }

    fn is_satisfied(&self, ledger: &UsageLedger) -> bool {
        match ledger.first_use_date {
            Some(first_use) => days_between(first_use, Utc::now()) >= self.required_days as i64,
            None => false,
        }
    }
}

/// Satisfied once the app has been launched or foregrounded enough times.
#[derive(Debug, Clone, Copy)]
pub struct EnoughAppSessions {
    required_sessions: u64,
}

impl EnoughAppSessions {
    pub fn new(required_sessions: u64) -> Self {
        Self { required_sessions }
    }
}

impl RatingCondition for EnoughAppSessions {
    fn name(&self) -> &'static str {
        "enough_app_sessions"
    }

    fn is_satisfied(&self, ledger: &UsageLedger) -> bool {
        ledger.app_sessions_count >= self.required_sessions
    }
}

/// Satisfied once the user has performed enough significant events.
#[derive(Debug, Clone, Copy)]
pub struct EnoughSignificantEvents {
    required_events: u64,
}

impl EnoughSignificantEvents {
    pub fn new(required_events: u64) -> Self {
        Self { required_events }
    }
}

impl RatingCondition for EnoughSignificantEvents {
    fn name(&self) -> &'static str {
        "enough_significant_events"
    }

    fn is_satisfied(&self, ledger: &UsageLedger) -> bool {
        ledger.significant_event_count >= self.required_events
    }
}
