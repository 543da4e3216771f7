//! CLI argument parsing using clap derive macros

use std::ffi::OsString;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    build::BuildCommand, clean::CleanCommand, dispatch::DispatchCommand, run::RunCommand,
    GlobalOptions,
};
use crate::utils::terminal::disable_colors;

/// Single-dash multi-letter flags and the long flags they stand for
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-cl", "--clean"),
    ("-dbg", "--debug"),
    ("-gt", "--googletest"),
];

/// fast - build and run the SynergyStudio targets
///
/// Without a subcommand, the flags drive the clean, build and run steps in
/// that order, each as a child process.
#[derive(Parser, Debug)]
#[command(name = "fast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub dispatch: DispatchCommand,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure and build the project with CMake
    Build(BuildCommand),

    /// Run a compiled target
    Run(RunCommand),

    /// Remove the build directory
    Clean(CleanCommand),
}

impl Cli {
    /// Parse the process arguments, accepting the single-dash aliases
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Execute the CLI command, returning the process exit code
    pub fn execute(self) -> Result<i32> {
        // Set up terminal colors
        if self.no_color {
            disable_colors();
        }

        let opts = GlobalOptions {
            verbose: self.verbose,
            no_color: self.no_color,
        };

        // Execute the subcommand
        match self.command {
            Some(Commands::Build(cmd)) => cmd.execute(&opts),
            Some(Commands::Run(cmd)) => cmd.execute(&opts),
            Some(Commands::Clean(cmd)) => cmd.execute(&opts),
            None => self.dispatch.execute(&opts),
        }
    }
}

/// Rewrite `-cl`, `-dbg` and `-gt` to their long forms.
///
/// Clap would otherwise read them as clusters of single-letter flags.
/// Nothing after a bare `--` is touched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            LEGACY_FLAGS
                .iter()
                .find(|(short, _)| arg == *short)
                .map(|(_, long)| OsString::from(*long))
                .unwrap_or(arg)
        })
        .collect()
}
