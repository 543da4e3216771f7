//! Command implementations
//!
//! Each command module provides a clap-derived struct and an execute method
//! returning the exit code the process should end with.

pub mod build;
pub mod clean;
pub mod dispatch;
pub mod run;

/// Flags shared by every command and forwarded to child invocations
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions {
    pub verbose: bool,
    pub no_color: bool,
}

impl GlobalOptions {
    /// Arguments that reproduce these options on a child `fast` invocation
    pub fn forwarded_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.verbose {
            args.push("--verbose".to_string());
        }
        if self.no_color {
            args.push("--no-color".to_string());
        }
        args
    }
}
