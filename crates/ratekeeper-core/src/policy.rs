//! TOML-based prompt policy.
//!
//! The policy holds the thresholds behind the default condition stack and
//! materializes the ordered condition list the engine evaluates. Hosts can
//! ship their own file or rely on the built-in defaults.
//!
//! Stored at `~/.config/ratekeeper/policy.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::conditions::{
    EnoughAppSessions, EnoughDaysUsed, EnoughSignificantEvents, NotDeclinedToRateAnyVersion,
    NotPostponedDueToReminder, NotRatedAnyVersion, NotRatedCurrentVersion, RatingCondition,
};
use crate::error::ConfigError;
use crate::providers::AppVersionProvider;
use crate::store::data_dir;

/// Re-prompt schedule after a recorded decline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclinePolicy {
    #[serde(default = "default_days_after_declining")]
    pub days_after_declining: u64,
    /// Multiplicative growth of the wait per recorded decline.
    #[serde(default = "default_decline_backoff_factor")]
    pub backoff_factor: Option<f64>,
    #[serde(default = "default_max_recurring_after_declining")]
    pub max_recurring_prompts: u64,
}

impl Default for DeclinePolicy {
    fn default() -> Self {
        Self {
            days_after_declining: default_days_after_declining(),
            backoff_factor: default_decline_backoff_factor(),
            max_recurring_prompts: default_max_recurring_after_declining(),
        }
    }
}

/// Re-prompt schedule after a recorded rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingPolicy {
    #[serde(default = "default_days_after_rating")]
    pub days_after_rating: u64,
    #[serde(default)]
    pub backoff_factor: Option<f64>,
    #[serde(default = "default_max_recurring_after_rating")]
    pub max_recurring_prompts: u64,
}

impl Default for RatingPolicy {
    fn default() -> Self {
        Self {
            days_after_rating: default_days_after_rating(),
            backoff_factor: None,
            max_recurring_prompts: default_max_recurring_after_rating(),
        }
    }
}

/// Thresholds behind the default condition stack.
///
/// Serialized to/from TOML at `~/.config/ratekeeper/policy.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptPolicy {
    #[serde(default = "default_required_days_used")]
    pub required_days_used: u64,
    #[serde(default = "default_required_app_sessions")]
    pub required_app_sessions: u64,
    #[serde(default = "default_required_significant_events")]
    pub required_significant_events: u64,
    #[serde(default = "default_days_before_reminding")]
    pub days_before_reminding: u64,
    #[serde(default)]
    pub decline: DeclinePolicy,
    #[serde(default)]
    pub rating: RatingPolicy,
}

impl Default for PromptPolicy {
    fn default() -> Self {
        Self {
            required_days_used: default_required_days_used(),
            required_app_sessions: default_required_app_sessions(),
            required_significant_events: default_required_significant_events(),
            days_before_reminding: default_days_before_reminding(),
            decline: DeclinePolicy::default(),
            rating: RatingPolicy::default(),
        }
    }
}

// Default functions
fn default_required_days_used() -> u64 {
    30
}
fn default_required_app_sessions() -> u64 {
    15
}
fn default_required_significant_events() -> u64 {
    20
}
fn default_days_before_reminding() -> u64 {
    7
}
fn default_days_after_declining() -> u64 {
    30
}
fn default_decline_backoff_factor() -> Option<f64> {
    Some(2.0)
}
fn default_max_recurring_after_declining() -> u64 {
    2
}
fn default_days_after_rating() -> u64 {
    240
}
fn default_max_recurring_after_rating() -> u64 {
    // Effectively unbounded; TOML integers are i64.
    i64::MAX as u64
}

impl PromptPolicy {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("policy.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("policy.toml"))
    }

    /// Load the policy, falling back to the defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Write the policy back out, creating the file if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("policy.toml"),
            message: e.to_string(),
        })?;

        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The ordered condition stack the policy describes.
    pub fn conditions(
        &self,
        version_provider: Arc<dyn AppVersionProvider>,
    ) -> Vec<Box<dyn RatingCondition>> {
        let mut declined_any = NotDeclinedToRateAnyVersion::new(
            self.decline.days_after_declining,
            self.decline.max_recurring_prompts,
        );
        if let Some(factor) = self.decline.backoff_factor {
            declined_any = declined_any.with_backoff_factor(factor);
        }

        let mut rated_any = NotRatedAnyVersion::new(
            self.rating.days_after_rating,
            self.rating.max_recurring_prompts,
        );
        if let Some(factor) = self.rating.backoff_factor {
            rated_any = rated_any.with_backoff_factor(factor);
        }

        vec![
            Box::new(EnoughDaysUsed::new(self.required_days_used)),
            Box::new(EnoughAppSessions::new(self.required_app_sessions)),
            Box::new(EnoughSignificantEvents::new(self.required_significant_events)),
            Box::new(NotPostponedDueToReminder::new(self.days_before_reminding)),
            Box::new(declined_any),
            Box::new(NotRatedCurrentVersion::new(version_provider)),
            Box::new(rated_any),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::StaticAppVersionProvider;

    #[test]
    fn empty_toml_yields_the_defaults() {
        let policy: PromptPolicy = toml::from_str("").unwrap();

        assert_eq!(policy.required_days_used, 30);
        assert_eq!(policy.required_app_sessions, 15);
        assert_eq!(policy.required_significant_events, 20);
        assert_eq!(policy.days_before_reminding, 7);
        assert_eq!(policy.decline.days_after_declining, 30);
        assert_eq!(policy.decline.backoff_factor, Some(2.0));
        assert_eq!(policy.decline.max_recurring_prompts, 2);
        assert_eq!(policy.rating.days_after_rating, 240);
    }

    #[test]
    fn partial_toml_overrides_selected_fields() {
        let policy: PromptPolicy = toml::from_str(
            "required_significant_events = 5\n\n[decline]\ndays_after_declining = 60\n",
        )
        .unwrap();

        assert_eq!(policy.required_significant_events, 5);
        assert_eq!(policy.decline.days_after_declining, 60);
        // Untouched fields keep their defaults.
        assert_eq!(policy.required_days_used, 30);
        assert_eq!(policy.decline.max_recurring_prompts, 2);
    }

    #[test]
    fn policy_serializes_and_parses_back() {
        let policy = PromptPolicy::default();
        let raw = toml::to_string_pretty(&policy).unwrap();
        let parsed: PromptPolicy = toml::from_str(&raw).unwrap();

        assert_eq!(parsed.required_days_used, policy.required_days_used);
        assert_eq!(parsed.rating.max_recurring_prompts, policy.rating.max_recurring_prompts);
    }

    #[test]
    fn default_stack_has_seven_conditions_in_order() {
        let provider: Arc<dyn AppVersionProvider> =
            Arc::new(StaticAppVersionProvider::new("1.0.0"));
        let conditions = PromptPolicy::default().conditions(provider);

        let names: Vec<&'static str> = conditions.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "enough_days_used",
                "enough_app_sessions",
                "enough_significant_events",
                "not_postponed_due_to_reminder",
                "not_declined_to_rate_any_version",
                "not_rated_current_version",
                "not_rated_any_version",
            ]
        );
    }
}
