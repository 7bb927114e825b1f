use std::io;

use clap_complete::Shell;

pub fn run(shell: Shell, mut command: clap::Command) -> Result<(), Box<dyn std::error::Error>> {
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
