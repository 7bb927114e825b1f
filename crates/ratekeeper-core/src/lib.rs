//! # Ratekeeper Core Library
//!
//! This library decides, from accumulated usage telemetry, whether an
//! application should ask its user for a store rating, and records the
//! outcome of such an ask. Hosts wire their own UI and lifecycle hooks to
//! it; the engine itself renders nothing and calls no network.
//!
//! ## Architecture
//!
//! - **Conditions**: independent predicates over the persisted usage
//!   ledger, combined with AND semantics; re-prompt waits grow through a
//!   shared backoff calculation
//! - **Engine**: owns the ledger and the presenters, runs the two-stage
//!   prompt flow (ask-to-rate, then the native rating surface) and appends
//!   the outcome to the ledger
//! - **Storage**: SQLite key-value store or an in-memory store, behind a
//!   narrow trait where reads degrade to defaults
//!
//! ## Key Components
//!
//! - [`PromptEngine`]: the decision engine and its builder
//! - [`RatingCondition`]: the predicate seam, with eight built-in variants
//! - [`PromptPolicy`]: TOML-backed thresholds for the default conditions
//! - [`DataStore`]: ledger persistence

pub mod conditions;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod ledger;
pub mod policy;
pub mod prompt;
pub mod providers;
pub mod store;

pub use conditions::RatingCondition;
pub use engine::{NeedsResetFn, PromptEngine, PromptEngineBuilder, PromptOutcome};
pub use error::{ConfigError, CoreError, StoreError};
pub use evaluator::{ConditionEvaluator, Evaluation, Verdict};
pub use events::Event;
pub use ledger::{UsageLedger, UserAction, UserActionKind};
pub use policy::PromptPolicy;
pub use prompt::{PromptResponse, RatePromptPresenter, RequestPromptPresenter};
pub use providers::{AppVersionProvider, StaticAppVersionProvider};
pub use store::{DataStore, MemoryStore, SqliteStore};
