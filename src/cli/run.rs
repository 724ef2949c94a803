use anyhow::Result;

use super::{
    args::Command,
    commands::{CommandResult, init::init, list::list, merge::merge},
};

/// Dispatches to the handler for the parsed command.
///
/// # Returns
/// - `Ok(CommandResult)` with the summary, scan warnings and merge events
/// - `Err` if the command fails (invalid config, output not writable, etc.)
pub fn run(command: Command) -> Result<CommandResult> {
    match command {
        Command::Merge(args) => merge(args),
        Command::List(args) => list(args),
        Command::Init => init(),
    }
}
