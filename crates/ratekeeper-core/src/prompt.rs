//! Prompt presentation seams.
//!
//! The engine decides *when* to ask; the host decides *how*. Presenters are
//! the narrow interface to the host's UI layer and the only place the flow
//! blocks on the user.

use serde::{Deserialize, Serialize};

/// The user's choice on the request prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptResponse {
    AgreedToRate,
    OptInForReminder,
    Declined,
}

/// First-stage prompt: asks whether the user wants to rate the app.
pub trait RequestPromptPresenter {
    /// Whether a prompt surface is currently available. Must report `false`
    /// while a prompt is already on screen so flows cannot stack.
    fn can_present(&self) -> bool {
        true
    }

    /// Present the prompt and block until the user chooses or the prompt is
    /// torn down. `None` means no choice was made and nothing is recorded.
    fn present(&mut self) -> Option<PromptResponse>;
}

/// Second-stage prompt: the platform's store rating surface.
///
/// Fire-and-forget; platforms give no confirmation that a rating was
/// actually submitted.
pub trait RatePromptPresenter {
    fn present(&mut self);
}
