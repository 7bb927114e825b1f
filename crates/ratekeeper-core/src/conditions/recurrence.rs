//! Conditions over the recorded user actions: reminders, declines, ratings.
//!
//! The any-version variants share the same shape: a cap on recurring
//! prompts, then an (optionally backed-off) wait measured from the most
//! recent action. The current-version variants block re-prompting for an
//! app version the user already responded on.

use std::sync::Arc;

use chrono::Utc;

use super::backoff::wait_days;
use super::RatingCondition;
use crate::ledger::{days_between, UsageLedger, UserAction, UserActionKind};
use crate::providers::AppVersionProvider;

/// Satisfied when the user never opted in for a reminder, or when enough
/// whole days have passed since the most recent opt-in.
#[derive(Debug, Clone, Copy)]
pub struct NotPostponedDueToReminder {
    days_before_reminding: u64,
}

impl NotPostponedDueToReminder {
    pub fn new(days_before_reminding: u64) -> Self {
        Self {
            days_before_reminding,
        }
    }
}

impl RatingCondition for NotPostponedDueToReminder {
    fn name(&self) -> &'static str {
        "not_postponed_due_to_reminder"
    }

    fn is_satisfied(&self, ledger: &UsageLedger) -> bool {
        match ledger.most_recent_action(UserActionKind::OptedInForReminder) {
            Some(action) => {
                days_between(action.date, Utc::now()) >= self.days_before_reminding as i64
            }
            None => true,
        }
    }
}

/// Shared check for the any-version variants: empty history passes, the
/// recurring-prompt cap blocks, otherwise the (optionally backed-off) wait
/// since the most recent action must have elapsed.
fn recurrence_elapsed(
    actions: &[UserAction],
    base_days: u64,
    backoff_factor: Option<f64>,
    max_recurring_prompts: u64,
) -> bool {
    let most_recent = match actions.iter().max_by_key(|action| action.date) {
        Some(action) => action,
        None => return true,
    };

    // The cap counts prompts after the first recorded action, hence the
    // minus one: with a cap of 2, the third recorded action blocks forever.
    if (actions.len() as u64).saturating_sub(1) >= max_recurring_prompts {
        return false;
    }

    let required_days = wait_days(base_days, backoff_factor, actions.len() as u64);
    days_between(most_recent.date, Utc::now()) >= required_days as i64
}

/// Satisfied when the user never declined to rate, or when the configured
/// wait since the most recent decline has elapsed and the recurring-prompt
/// cap has not been reached.
#[derive(Debug, Clone, Copy)]
pub struct NotDeclinedToRateAnyVersion {
    days_after_declining: u64,
    backoff_factor: Option<f64>,
    max_recurring_prompts: u64,
}

impl NotDeclinedToRateAnyVersion {
    pub fn new(days_after_declining: u64, max_recurring_prompts: u64) -> Self {
        Self {
            days_after_declining,
            backoff_factor: None,
            max_recurring_prompts,
        }
    }

    /// Grow the wait multiplicatively per recorded decline.
    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = Some(factor);
        self
    }
}

impl RatingCondition for NotDeclinedToRateAnyVersion {
    fn name(&self) -> &'static str {
        "not_declined_to_rate_any_version"
    }

    fn is_satisfied(&self, ledger: &UsageLedger) -> bool {
        recurrence_elapsed(
            &ledger.declined_actions,
            self.days_after_declining,
            self.backoff_factor,
            self.max_recurring_prompts,
        )
    }
}

/// Satisfied unless the user declined to rate the current app version.
#[derive(Clone)]
pub struct NotDeclinedToRateCurrentVersion {
    version_provider: Arc<dyn AppVersionProvider>,
}

impl NotDeclinedToRateCurrentVersion {
    pub fn new(version_provider: Arc<dyn AppVersionProvider>) -> Self {
        Self { version_provider }
    }
}

impl RatingCondition for NotDeclinedToRateCurrentVersion {
    fn name(&self) -> &'static str {
        "not_declined_to_rate_current_version"
    }

    fn is_satisfied(&self, ledger: &UsageLedger) -> bool {
        let current = self.version_provider.app_version();
        !ledger
            .declined_actions
            .iter()
            .any(|action| action.app_version == current)
    }
}

/// Satisfied when the user never rated, or when the configured wait since
/// the most recent rating has elapsed and the recurring-prompt cap has not
/// been reached.
#[derive(Debug, Clone, Copy)]
pub struct NotRatedAnyVersion {
    days_after_rating: u64,
    backoff_factor: Option<f64>,
    max_recurring_prompts: u64,
}

impl NotRatedAnyVersion {
    pub fn new(days_after_rating: u64, max_recurring_prompts: u64) -> Self {
        Self {
            days_after_rating,
            backoff_factor: None,
            max_recurring_prompts,
        }
    }

    /// Grow the wait multiplicatively per recorded rating.
    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = Some(factor);
        self
    }
}

impl RatingCondition for NotRatedAnyVersion {
    fn name(&self) -> &'static str {
        "not_rated_any_version"
    }

    fn is_satisfied(&self, ledger: &UsageLedger) -> bool {
        recurrence_elapsed(
            &ledger.rated_actions,
            self.days_after_rating,
            self.backoff_factor,
            self.max_recurring_prompts,
        )
    }
}

/// Satisfied unless the user already rated the current app version.
#[derive(Clone)]
pub struct NotRatedCurrentVersion {
    version_provider: Arc<dyn AppVersionProvider>,
}

impl NotRatedCurrentVersion {
    pub fn new(version_provider: Arc<dyn AppVersionProvider>) -> Self {
        Self { version_provider }
    }
}

impl RatingCondition for NotRatedCurrentVersion {
    fn name(&self) -> &'static str {
        "not_rated_current_version"
    }

    fn is_satisfied(&self, ledger: &UsageLedger) -> bool {
        let current = self.version_provider.app_version();
        !ledger
            .rated_actions
            .iter()
            .any(|action| action.app_version == current)
    }
}
