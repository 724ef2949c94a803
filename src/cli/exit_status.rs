use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// Files that fail to merge are reported inside the output and do not change
/// the exit status.
///
/// - `Success` (0): Command completed
/// - `Error` (2): Command failed (invalid config, output not writable, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed.
    Success,
    /// Command failed due to an error outside a single input file.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
