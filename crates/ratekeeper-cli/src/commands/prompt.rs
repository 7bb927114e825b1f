use crate::common;

pub fn run(debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::engine(debug)?;

    match engine.request_prompt_flow() {
        Some(outcome) => super::event::report_outcome(Some(outcome)),
        None => println!("no prompt surface available"),
    }
    Ok(())
}
