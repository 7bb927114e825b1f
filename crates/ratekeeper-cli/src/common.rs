//! Shared CLI plumbing: terminal presenters and engine assembly.

use std::io::{self, BufRead, Write};

use ratekeeper_core::{
    PromptEngine, PromptPolicy, PromptResponse, RatePromptPresenter, RequestPromptPresenter,
    SqliteStore, StaticAppVersionProvider,
};

/// Request prompt on the terminal: one line read from stdin.
pub struct TerminalRequestPresenter;

impl RequestPromptPresenter for TerminalRequestPresenter {
    fn present(&mut self) -> Option<PromptResponse> {
        println!("Enjoying Ratekeeper? [y] rate now  [l] remind me later  [n] no thanks");
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return None;
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(PromptResponse::AgreedToRate),
            "l" | "later" => Some(PromptResponse::OptInForReminder),
            "n" | "no" => Some(PromptResponse::Declined),
            // Anything else counts as closing the prompt without a choice.
            _ => None,
        }
    }
}

/// Rate prompt on the terminal: prints where to leave the review.
pub struct TerminalRatePresenter;

impl RatePromptPresenter for TerminalRatePresenter {
    fn present(&mut self) {
        println!("Thank you! Leave a review at https://example.com/ratekeeper/reviews");
    }
}

/// Build the engine from the on-disk store and policy.
pub fn engine(debug: bool) -> Result<PromptEngine, Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let policy = PromptPolicy::load()?;

    let engine = PromptEngine::builder()
        .store(store)
        .version_provider(StaticAppVersionProvider::new(env!("CARGO_PKG_VERSION")))
        .request_presenter(TerminalRequestPresenter)
        .rate_presenter(TerminalRatePresenter)
        .policy(policy)
        .debug(debug)
        .build()?;

    Ok(engine)
}
