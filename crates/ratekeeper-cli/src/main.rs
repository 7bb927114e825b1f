use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "ratekeeper-cli", version, about = "Ratekeeper CLI")]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a significant event
    Event {
        /// Number of events to record
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Record without checking the rating conditions
        #[arg(long)]
        no_prompt: bool,
    },
    /// Record an app session (launch or foreground)
    Session,
    /// Show the ledger and per-condition verdicts
    Status,
    /// Force the request-prompt flow, ignoring the conditions
    Prompt,
    /// Reset tracked state
    Reset {
        #[command(subcommand)]
        action: commands::reset::ResetAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { count, no_prompt } => commands::event::run(count, no_prompt, cli.debug),
        Commands::Session => commands::session::run(cli.debug),
        Commands::Status => commands::status::run(cli.debug),
        Commands::Prompt => commands::prompt::run(cli.debug),
        Commands::Reset { action } => commands::reset::run(action, cli.debug),
        Commands::Completions { shell } => commands::completions::run(shell, Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
