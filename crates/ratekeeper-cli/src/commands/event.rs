use ratekeeper_core::PromptOutcome;

use crate::common;

pub fn run(count: u32, no_prompt: bool, debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::engine(debug)?;

    let mut outcome = None;
    for _ in 0..count {
        outcome = engine.record_significant_event(!no_prompt);
    }

    println!(
        "significant events: {}",
        engine.ledger().significant_event_count
    );
    report_outcome(outcome);
    Ok(())
}

pub(crate) fn report_outcome(outcome: Option<PromptOutcome>) {
    match outcome {
        Some(PromptOutcome::Rated) => println!("outcome: rated"),
        Some(PromptOutcome::OptedInForReminder) => println!("outcome: remind later"),
        Some(PromptOutcome::Declined) => println!("outcome: declined"),
        Some(PromptOutcome::Dismissed) => println!("outcome: dismissed"),
        None => {}
    }
}
