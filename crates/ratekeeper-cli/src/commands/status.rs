use serde::Serialize;

use ratekeeper_core::{Evaluation, UsageLedger};

use crate::common;

#[derive(Serialize)]
struct Status {
    ledger: UsageLedger,
    evaluation: Evaluation,
}

pub fn run(debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = common::engine(debug)?;

    let status = Status {
        ledger: engine.ledger(),
        evaluation: engine.evaluate(),
    };
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
