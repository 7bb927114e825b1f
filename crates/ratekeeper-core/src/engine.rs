//! Prompt engine: the controller owning the ledger, the condition set and
//! the presenters.
//!
//! ## Flow
//!
//! ```text
//! record_app_session / record_significant_event
//!     -> housekeeping (reset predicate, version stamp, first-use stamp)
//!     -> counter increment
//!     -> all conditions satisfied? -> request prompt -> record outcome
//! ```
//!
//! The engine is single-threaded by design: presenting blocks until the
//! user responds, and a multi-threaded host must serialize calls itself.
//! It is an explicit instance owned by the host's composition root; there
//! is no process-wide singleton.

use std::sync::Arc;

use chrono::Utc;

use crate::conditions::RatingCondition;
use crate::error::ConfigError;
use crate::evaluator::{ConditionEvaluator, Evaluation};
use crate::events::Event;
use crate::ledger::{UsageLedger, UserAction, UserActionKind};
use crate::policy::PromptPolicy;
use crate::prompt::{PromptResponse, RatePromptPresenter, RequestPromptPresenter};
use crate::providers::AppVersionProvider;
use crate::store::DataStore;

/// How a prompt flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The user agreed to rate; a rated action was recorded optimistically.
    Rated,
    OptedInForReminder,
    Declined,
    /// The prompt was torn down without a choice; nothing was recorded.
    Dismissed,
}

/// Predicate deciding whether all trackers must be cleared before the next
/// counter increment, e.g. on a new major app version.
pub type NeedsResetFn = Box<dyn Fn(&UsageLedger, &dyn AppVersionProvider) -> bool>;

/// The rating-prompt decision engine.
///
/// Build one through [`PromptEngine::builder`]. The engine never resets
/// the trackers on its own; a host that wants per-version resets supplies
/// a `needs_reset` predicate, though condition-based limits usually age
/// prompts out more gracefully than clearing history.
pub struct PromptEngine {
    store: Box<dyn DataStore>,
    version_provider: Arc<dyn AppVersionProvider>,
    request_presenter: Box<dyn RequestPromptPresenter>,
    rate_presenter: Box<dyn RatePromptPresenter>,
    evaluator: ConditionEvaluator,
    can_prompt_on_launch: bool,
    debug: bool,
    needs_reset: NeedsResetFn,
    events: Vec<Event>,
}

impl PromptEngine {
    pub fn builder() -> PromptEngineBuilder {
        PromptEngineBuilder::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Snapshot of the persisted usage state, for host display.
    pub fn ledger(&self) -> UsageLedger {
        self.store.ledger()
    }

    /// Evaluate the configured conditions without side effects.
    pub fn evaluate(&self) -> Evaluation {
        self.evaluator.evaluate(&self.store.ledger())
    }

    /// Drain the buffered events. Hosts poll after each operation.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ── Recording ────────────────────────────────────────────────────

    /// Record one significant event: a host-defined meaningful user action,
    /// like completing a task.
    ///
    /// Pass `false` for `can_prompt_user_to_rate` to suppress the prompt
    /// check for this event; the counter still increments and the prompt is
    /// simply postponed until a later eligible trigger.
    pub fn record_significant_event(
        &mut self,
        can_prompt_user_to_rate: bool,
    ) -> Option<PromptOutcome> {
        self.before_incrementing_usage_counter();

        let count = self.store.significant_event_count() + 1;
        self.store.set_significant_event_count(count);
        self.push_event(Event::SignificantEventRecorded {
            count,
            at: Utc::now(),
        });
        self.debug_log(&format!("incremented significant event count to {count}"));

        if can_prompt_user_to_rate {
            self.prompt_if_conditions_met()
        } else {
            None
        }
    }

    /// Record one app session: a launch or foreground-resume, reported by
    /// the host's own lifecycle hook.
    ///
    /// Prompts only when the engine was built with `can_prompt_on_launch`.
    pub fn record_app_session(&mut self) -> Option<PromptOutcome> {
        self.before_incrementing_usage_counter();

        let count = self.store.app_sessions_count() + 1;
        self.store.set_app_sessions_count(count);
        self.push_event(Event::AppSessionRecorded {
            count,
            at: Utc::now(),
        });
        self.debug_log(&format!("incremented app session count to {count}"));

        if self.can_prompt_on_launch {
            self.prompt_if_conditions_met()
        } else {
            None
        }
    }

    // ── Prompt flow ──────────────────────────────────────────────────

    /// Run the two-stage prompt flow unconditionally (the manual trigger).
    ///
    /// Returns `None` when no prompt surface is available -- the prompt is
    /// silently skipped and the next eligible trigger retries. A prompt
    /// torn down without a choice yields [`PromptOutcome::Dismissed`] and
    /// records nothing.
    pub fn request_prompt_flow(&mut self) -> Option<PromptOutcome> {
        if !self.request_presenter.can_present() {
            self.debug_log("no prompt surface available, skipping request prompt");
            return None;
        }

        self.push_event(Event::PromptRequested { at: Utc::now() });

        let response = match self.request_presenter.present() {
            Some(response) => response,
            None => {
                self.debug_log("request prompt dismissed without a choice");
                self.push_event(Event::PromptDismissed { at: Utc::now() });
                return Some(PromptOutcome::Dismissed);
            }
        };

        let app_version = self.version_provider.app_version();
        let action = UserAction::new(app_version.clone(), Utc::now());

        match response {
            PromptResponse::AgreedToRate => {
                self.rate_presenter.present();
                // Assume this version is rated; the native surface gives no
                // signal either way.
                self.store.append_action(UserActionKind::Rated, action);
                self.push_event(Event::UserRated {
                    app_version,
                    at: Utc::now(),
                });
                Some(PromptOutcome::Rated)
            }
            PromptResponse::OptInForReminder => {
                self.store
                    .append_action(UserActionKind::OptedInForReminder, action);
                self.push_event(Event::ReminderOptedIn {
                    app_version,
                    at: Utc::now(),
                });
                Some(PromptOutcome::OptedInForReminder)
            }
            PromptResponse::Declined => {
                self.store.append_action(UserActionKind::Declined, action);
                self.push_event(Event::DeclinedToRate {
                    app_version,
                    at: Utc::now(),
                });
                Some(PromptOutcome::Declined)
            }
        }
    }

    // ── Resets ───────────────────────────────────────────────────────

    /// Clear the first-use date and both usage counters.
    pub fn reset_usage_trackers(&mut self) {
        self.store.set_first_use_date(None);
        self.store.set_app_sessions_count(0);
        self.store.set_significant_event_count(0);
        self.push_event(Event::UsageTrackersReset { at: Utc::now() });
        self.debug_log("reset usage trackers");
    }

    /// Clear all three user-action histories.
    pub fn reset_user_actions(&mut self) {
        self.store.clear_actions(UserActionKind::OptedInForReminder);
        self.store.clear_actions(UserActionKind::Rated);
        self.store.clear_actions(UserActionKind::Declined);
        self.push_event(Event::UserActionsReset { at: Utc::now() });
        self.debug_log("reset user actions");
    }

    /// Return every tracked value to its fresh-ledger default.
    pub fn reset_all(&mut self) {
        self.reset_usage_trackers();
        self.reset_user_actions();
        self.store.set_tracked_app_version(None);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn prompt_if_conditions_met(&mut self) -> Option<PromptOutcome> {
        let evaluation = self.evaluator.evaluate(&self.store.ledger());
        let unsatisfied: Vec<String> = evaluation
            .unsatisfied()
            .iter()
            .map(|name| name.to_string())
            .collect();
        self.push_event(Event::ConditionsEvaluated {
            satisfied: evaluation.satisfied,
            unsatisfied: unsatisfied.clone(),
            at: Utc::now(),
        });

        if !evaluation.satisfied {
            for name in &unsatisfied {
                self.debug_log(&format!("condition not satisfied: {name}"));
            }
            return None;
        }

        self.debug_log("all rating conditions satisfied, requesting prompt");
        self.request_prompt_flow()
    }

    /// Housekeeping before every counter increment: the host's reset
    /// predicate, the version stamp, the first-use stamp -- in that order.
    fn before_incrementing_usage_counter(&mut self) {
        if (self.needs_reset)(&self.store.ledger(), self.version_provider.as_ref()) {
            self.debug_log("host requested a tracker reset");
            self.reset_all();
        }

        let current = self.version_provider.app_version();
        let previous = self.store.tracked_app_version();
        if previous.as_deref() != Some(current.as_str()) {
            self.store.set_tracked_app_version(Some(&current));
            self.push_event(Event::TrackedVersionChanged {
                previous,
                current,
                at: Utc::now(),
            });
        }

        if self.store.first_use_date().is_none() {
            let now = Utc::now();
            self.store.set_first_use_date(Some(now));
            self.push_event(Event::FirstUseRecorded { at: now });
        }
    }

    fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    fn debug_log(&self, message: &str) {
        if self.debug {
            eprintln!("[ratekeeper] {message}");
        }
    }
}

/// One-time assembly point for the engine.
///
/// Construction fails with [`ConfigError::MissingDependency`] when a
/// required collaborator is absent; misuse surfaces as an error value, not
/// a panic.
#[derive(Default)]
pub struct PromptEngineBuilder {
    store: Option<Box<dyn DataStore>>,
    version_provider: Option<Arc<dyn AppVersionProvider>>,
    request_presenter: Option<Box<dyn RequestPromptPresenter>>,
    rate_presenter: Option<Box<dyn RatePromptPresenter>>,
    conditions: Option<Vec<Box<dyn RatingCondition>>>,
    policy: Option<PromptPolicy>,
    can_prompt_on_launch: bool,
    debug: bool,
    needs_reset: Option<NeedsResetFn>,
}

impl PromptEngineBuilder {
    pub fn store(mut self, store: impl DataStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn version_provider(mut self, provider: impl AppVersionProvider + 'static) -> Self {
        self.version_provider = Some(Arc::new(provider));
        self
    }

    pub fn request_presenter(mut self, presenter: impl RequestPromptPresenter + 'static) -> Self {
        self.request_presenter = Some(Box::new(presenter));
        self
    }

    pub fn rate_presenter(mut self, presenter: impl RatePromptPresenter + 'static) -> Self {
        self.rate_presenter = Some(Box::new(presenter));
        self
    }

    /// Explicit ordered condition list. Takes precedence over `policy`.
    pub fn conditions(mut self, conditions: Vec<Box<dyn RatingCondition>>) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Build the condition list from a [`PromptPolicy`] instead of the
    /// built-in defaults.
    pub fn policy(mut self, policy: PromptPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Allow prompting from `record_app_session`. Default: off.
    pub fn can_prompt_on_launch(mut self, value: bool) -> Self {
        self.can_prompt_on_launch = value;
        self
    }

    /// Log engine decisions to stderr. Default: off.
    pub fn debug(mut self, value: bool) -> Self {
        self.debug = value;
        self
    }

    /// Clear all trackers whenever the predicate returns true, checked
    /// before every counter increment. Default: never.
    pub fn needs_reset(
        mut self,
        predicate: impl Fn(&UsageLedger, &dyn AppVersionProvider) -> bool + 'static,
    ) -> Self {
        self.needs_reset = Some(Box::new(predicate));
        self
    }

    pub fn build(self) -> Result<PromptEngine, ConfigError> {
        let store = self
            .store
            .ok_or(ConfigError::MissingDependency("data store"))?;
        let version_provider = self
            .version_provider
            .ok_or(ConfigError::MissingDependency("app version provider"))?;
        let request_presenter = self
            .request_presenter
            .ok_or(ConfigError::MissingDependency("request prompt presenter"))?;
        let rate_presenter = self
            .rate_presenter
            .ok_or(ConfigError::MissingDependency("rate prompt presenter"))?;

        let conditions = match self.conditions {
            Some(conditions) => conditions,
            None => self
                .policy
                .unwrap_or_default()
                .conditions(version_provider.clone()),
        };

        Ok(PromptEngine {
            store,
            version_provider,
            request_presenter,
            rate_presenter,
            evaluator: ConditionEvaluator::new(conditions),
            can_prompt_on_launch: self.can_prompt_on_launch,
            debug: self.debug,
            needs_reset: self.needs_reset.unwrap_or_else(|| Box::new(|_, _| false)),
            events: Vec::new(),
        })
    }
}
