//! Top-level dispatcher
//!
//! Turns the high-level flags into child invocations of this same binary
//! (`fast clean`, `fast build`, `fast run`), one at a time, forwarding exit
//! codes. A plain `--build` stops after the build; `--all` goes on to run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use super::GlobalOptions;
use crate::error::FastError;
use crate::exec::{run_command, CommandResult};
use crate::utils::terminal::{print_running, print_warning};

/// Dispatcher flags, accepted when no subcommand is given
#[derive(Args, Debug, Default)]
pub struct DispatchCommand {
    /// Run the clean step first (also accepted as -cl)
    #[arg(long)]
    pub clean: bool,

    /// Build the whole project (common, client, server)
    #[arg(short, long)]
    pub build: bool,

    /// Run the target. Needs --target
    #[arg(short, long)]
    pub run: bool,

    /// Build and run the target. Needs --target
    #[arg(short, long)]
    pub all: bool,

    /// Target to run: server, client or common
    #[arg(short, long)]
    pub target: Option<String>,

    /// Compile definition for the project (repeatable)
    #[arg(short = 'd', long = "define", value_name = "KEY=VAL")]
    pub definitions: Vec<String>,

    /// Debug build with verbose makefiles (also accepted as -dbg)
    #[arg(long)]
    pub debug: bool,

    /// Run the named GoogleTest executable. Needs --target (also accepted as -gt)
    #[arg(long, value_name = "NAME")]
    pub googletest: Option<String>,
}

/// Validated request for the run stage
#[derive(Debug, PartialEq, Eq)]
pub struct RunRequest<'a> {
    pub target: &'a str,
    pub googletest: Option<&'a str>,
}

impl DispatchCommand {
    /// Execute the dispatcher
    pub fn execute(self, opts: &GlobalOptions) -> Result<i32> {
        let exe = std::env::current_exe().context("Failed to locate the fast executable")?;

        if self.clean {
            let result = spawn("Running clean script", &exe, &self.clean_args(opts))?;
            if !result.success {
                print_warning(&format!(
                    "Clean step exited with code {}, continuing",
                    result.exit_code
                ));
            }
        }

        if self.build || self.all {
            let result = spawn("Running build script", &exe, &self.build_args(opts))?;
            if !result.success {
                println!("Build failed. Aborting run.");
                return Ok(result.exit_code);
            }
            if self.build {
                return Ok(result.exit_code);
            }
        }

        let Some(request) = self.run_request()? else {
            return Ok(0);
        };
        let result = spawn("Running run script", &exe, &run_args(&request, opts))?;
        Ok(result.exit_code)
    }

    /// Arguments of the clean child
    fn clean_args(&self, opts: &GlobalOptions) -> Vec<String> {
        let mut args = vec!["clean".to_string()];
        args.extend(opts.forwarded_args());
        args
    }

    /// Arguments of the build child
    fn build_args(&self, opts: &GlobalOptions) -> Vec<String> {
        let mut args = vec!["build".to_string()];
        for definition in &self.definitions {
            args.push("-d".to_string());
            args.push(definition.clone());
        }
        if self.debug {
            args.push("--debug".to_string());
        }
        if self.googletest.is_some() {
            args.push("--googletest".to_string());
        }
        args.extend(opts.forwarded_args());
        args
    }

    /// Decide whether the run stage happens, and with what.
    ///
    /// The target is checked before the run modes; at most one of run,
    /// all and googletest may be set.
    pub fn run_request(&self) -> Result<Option<RunRequest<'_>>, FastError> {
        let modes = [self.run, self.all, self.googletest.is_some()];
        let requested = modes.iter().filter(|set| **set).count();
        if requested == 0 {
            return Ok(None);
        }

        let target = self.target.as_deref().ok_or(FastError::NoTarget)?;
        if requested > 1 {
            return Err(FastError::ConflictingRunModes);
        }

        Ok(Some(RunRequest {
            target,
            googletest: self.googletest.as_deref(),
        }))
    }
}

/// Arguments of the run child
fn run_args(request: &RunRequest<'_>, opts: &GlobalOptions) -> Vec<String> {
    let mut args = vec!["run".to_string(), "-t".to_string(), request.target.to_string()];
    if let Some(name) = request.googletest {
        args.push("--googletest".to_string());
        args.push(name.to_string());
    }
    args.extend(opts.forwarded_args());
    args
}

fn spawn(label: &str, exe: &Path, args: &[String]) -> Result<CommandResult> {
    print_running(label, &display_exe(exe), args);
    run_command(exe, args, &[])
}

fn display_exe(exe: &Path) -> String {
    exe.file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| exe.to_path_buf())
        .display()
        .to_string()
}
