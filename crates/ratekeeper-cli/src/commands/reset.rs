use clap::Subcommand;

use crate::common;

#[derive(Subcommand)]
pub enum ResetAction {
    /// Clear the first-use date and the usage counters
    Usage,
    /// Clear the recorded user actions
    Actions,
    /// Clear everything, returning to the fresh-ledger state
    All,
}

pub fn run(action: ResetAction, debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::engine(debug)?;

    match action {
        ResetAction::Usage => {
            engine.reset_usage_trackers();
            println!("usage trackers cleared");
        }
        ResetAction::Actions => {
            engine.reset_user_actions();
            println!("user actions cleared");
        }
        ResetAction::All => {
            engine.reset_all();
            println!("all trackers cleared");
        }
    }
    Ok(())
}
