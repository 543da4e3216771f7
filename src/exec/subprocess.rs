//! Blocking subprocess execution with inherited stdio

use std::ffi::OsStr;
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

/// Exit code reported when a child was terminated without one (e.g. by a signal)
pub const NO_EXIT_CODE: i32 = -1;

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code
    pub exit_code: i32,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code().unwrap_or(NO_EXIT_CODE),
            duration,
        }
    }
}

/// Run a command to completion, sharing this process's stdin/stdout/stderr.
///
/// `envs` are added on top of the inherited environment. A spawn failure is
/// returned as an error whose root cause is the [`io::Error`], so callers
/// can tell "not found" apart from a non-zero exit.
pub fn run_command<S: AsRef<OsStr>>(
    program: S,
    args: &[String],
    envs: &[(String, String)],
) -> Result<CommandResult> {
    let program = program.as_ref();
    let start = Instant::now();

    let status = Command::new(program)
        .args(args)
        .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to execute {}", program.to_string_lossy()))?;

    Ok(CommandResult::from_status(status, start.elapsed()))
}

/// Whether an error from [`run_command`] means the program does not exist
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.root_cause()
        .downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
