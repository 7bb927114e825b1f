use crate::common;

pub fn run(debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::engine(debug)?;

    let outcome = engine.record_app_session();

    println!("app sessions: {}", engine.ledger().app_sessions_count);
    super::event::report_outcome(outcome);
    Ok(())
}
