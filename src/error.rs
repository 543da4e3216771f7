//! Error types and helpers for user-friendly error messages
//!
//! Every variant knows the process exit code it maps to, so commands can
//! bail out with `?` and `main` turns the error into the right status.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for a missing or unrecognized target
pub const EXIT_BAD_TARGET: i32 = -1;

/// Exit code for more than one run mode requested at once
pub const EXIT_CONFLICTING_RUN_MODES: i32 = -2;

/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum FastError {
    /// A run mode was requested without `--target`
    #[error("No target specified")]
    NoTarget,

    /// The target name is not one of server, client or common
    #[error("Wrong target specified: '{name}'")]
    UnknownTarget { name: String },

    /// More than one of run, run-all and test-executable was set
    #[error("You can specify only one of run commands")]
    ConflictingRunModes,

    /// Tool/executable not found on PATH
    #[error("'{tool}' command not found. Is {display_name} installed and in PATH?")]
    MissingTool {
        tool: String,
        display_name: String,
        hint: String,
    },

    /// CMake configure or build step exited non-zero
    #[error("{step} failed with exit code: {code}")]
    StepFailed {
        step: String,
        code: i32,
        diagnostics: Vec<String>,
    },

    /// A test executable name that is not a plain file name
    #[error("Invalid test executable name: '{name}'")]
    InvalidTestExecutable { name: String },

    /// The compiled artifact for a target is not on disk
    #[error("Executable {} not found. Did you compile it?", .path.display())]
    MissingExecutable { path: PathBuf },

    /// fast.toml could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },
}

impl FastError {
    /// Create an unknown target error
    pub fn unknown_target(name: impl Into<String>) -> Self {
        Self::UnknownTarget { name: name.into() }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        display_name: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            display_name: display_name.into(),
            hint: hint.into(),
        }
    }

    /// Create a failed step error with diagnostics
    pub fn step_failed(step: impl Into<String>, code: i32, diagnostics: Vec<String>) -> Self {
        Self::StepFailed {
            step: step.into(),
            code,
            diagnostics,
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FastError::NoTarget | FastError::UnknownTarget { .. } => EXIT_BAD_TARGET,
            FastError::ConflictingRunModes => EXIT_CONFLICTING_RUN_MODES,
            FastError::MissingTool { .. }
            | FastError::StepFailed { .. }
            | FastError::InvalidTestExecutable { .. }
            | FastError::MissingExecutable { .. }
            | FastError::Config { .. } => EXIT_FAILURE,
        }
    }

    /// Whether the error is reported on stdout rather than stderr
    fn reports_to_stdout(&self) -> bool {
        matches!(
            self,
            FastError::NoTarget
                | FastError::UnknownTarget { .. }
                | FastError::ConflictingRunModes
                | FastError::InvalidTestExecutable { .. }
                | FastError::MissingExecutable { .. }
        )
    }

    /// Underlying error chain of a configuration error, e.g. the TOML parse location
    pub fn cause(&self) -> Option<String> {
        match self {
            FastError::Config {
                source: Some(source),
                ..
            } => Some(format!("{:#}", source)),
            _ => None,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        if self.reports_to_stdout() {
            println!("{} {}", style("Error:").red().bold(), self);
            return;
        }

        eprintln!("{} {}", style("ERROR:").red().bold(), self);
        if let Some(cause) = self.cause() {
            eprintln!("\n{} {}", style("CAUSE:").red().bold(), cause.trim_end());
        }

        match self {
            FastError::MissingTool { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            FastError::Config { hint: Some(h), .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
            }
            FastError::StepFailed { diagnostics, .. } if !diagnostics.is_empty() => {
                eprintln!("\n{}", style("DIAGNOSTICS:").cyan().bold());
                for diag in diagnostics {
                    eprintln!("  • {}", diag);
                }
            }
            _ => {}
        }
    }
}

/// Report an error from a command and pick the exit code for it
pub fn report(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<FastError>() {
        Some(fast_err) => {
            fast_err.display_with_hints();
            fast_err.exit_code()
        }
        None => {
            crate::utils::terminal::print_error(&format!("{:#}", err));
            EXIT_FAILURE
        }
    }
}

/// Common error hints for missing tools and bad configuration
pub mod hints {
    /// Get hint for missing CMake
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager:\n\
         • macOS: brew install cmake\n\
         • Ubuntu: sudo apt install cmake\n\
         • Windows: winget install Kitware.CMake"
    }

    /// Get hint for missing Ninja
    pub fn ninja() -> &'static str {
        "Install Ninja from https://ninja-build.org/ or use your package manager:\n\
         • macOS: brew install ninja\n\
         • Ubuntu: sudo apt install ninja-build\n\
         • Windows: winget install Ninja-build.Ninja"
    }

    /// Get hint for invalid fast.toml
    pub fn invalid_fast_toml() -> &'static str {
        "fast.toml is invalid. Common issues:\n\
         • Keys outside the [build] section\n\
         • Unknown keys (allowed: dir, source, generator, prefix_path)\n\
         • Invalid TOML syntax (check quotes, brackets, commas)"
    }
}
