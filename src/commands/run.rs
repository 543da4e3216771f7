//! Run command implementation
//!
//! Launches a compiled target from the build directory and returns its
//! exit code unchanged.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use super::GlobalOptions;
use crate::config::load_settings;
use crate::error::FastError;
use crate::exec::run_command;
use crate::exec::subprocess::is_not_found;
use crate::target::Target;
use crate::utils::paths::project_root;
use crate::utils::terminal::{print_info, print_running};

/// Run a compiled target
#[derive(Args, Debug, Default)]
pub struct RunCommand {
    /// Target to run: server, client or common
    #[arg(short, long)]
    pub target: Option<String>,

    /// Run this GoogleTest executable from the target's directory instead
    /// (also accepted as -gt)
    #[arg(long, value_name = "NAME")]
    pub googletest: Option<String>,
}

impl RunCommand {
    /// Execute the run command
    pub fn execute(self, opts: &GlobalOptions) -> Result<i32> {
        let target = self.resolve_target()?;

        let settings = load_settings(&project_root()?)?;
        let executable = self.executable_path(target, &settings.build_dir)?;
        if opts.verbose {
            print_info(&format!("Target {} resolved to {}", target, executable.display()));
        }

        run_executable(&executable)
    }

    /// Parse the requested target name
    fn resolve_target(&self) -> Result<Target, FastError> {
        self.target
            .as_deref()
            .ok_or(FastError::NoTarget)?
            .parse()
    }

    /// Path of the binary this invocation launches
    fn executable_path(&self, target: Target, build_dir: &Path) -> Result<PathBuf, FastError> {
        match &self.googletest {
            Some(name) => target.test_executable_path(build_dir, name),
            None => Ok(target.executable_path(build_dir)),
        }
    }
}

/// Launch an executable if it exists and hand back its exit code
fn run_executable(executable: &Path) -> Result<i32> {
    if !executable.is_file() {
        return Err(FastError::MissingExecutable {
            path: executable.to_path_buf(),
        }
        .into());
    }

    print_running("Running", &executable.display().to_string(), &[]);
    match run_command(executable, &[], &[]) {
        Ok(result) => Ok(result.exit_code),
        Err(err) if is_not_found(&err) => Err(FastError::MissingExecutable {
            path: executable.to_path_buf(),
        }
        .into()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run_cmd(target: Option<&str>, googletest: Option<&str>) -> RunCommand {
        RunCommand {
            target: target.map(str::to_string),
            googletest: googletest.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_target() {
        let err = run_cmd(None, None).resolve_target().unwrap_err();
        assert!(matches!(err, FastError::NoTarget));
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn test_wrong_target() {
        let err = run_cmd(Some("main"), None).resolve_target().unwrap_err();
        assert!(matches!(err, FastError::UnknownTarget { .. }));
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn test_googletest_swaps_the_executable() {
        let build = Path::new("build");
        let cmd = run_cmd(Some("client"), Some("client_tests"));
        let target = cmd.resolve_target().unwrap();

        assert_eq!(
            cmd.executable_path(target, build).unwrap(),
            Target::Client
                .test_executable_path(build, "client_tests")
                .unwrap()
        );
        assert_eq!(
            run_cmd(Some("client"), None)
                .executable_path(target, build)
                .unwrap(),
            Target::Client.executable_path(build)
        );
    }

    #[test]
    fn test_googletest_name_with_path_rejected() {
        let cmd = run_cmd(Some("server"), Some("../../bin/true"));
        let target = cmd.resolve_target().unwrap();
        let err = cmd.executable_path(target, Path::new("build")).unwrap_err();
        assert!(matches!(err, FastError::InvalidTestExecutable { .. }));
    }

    #[test]
    fn test_absent_executable_is_not_launched() {
        let temp_dir = TempDir::new().unwrap();
        let executable = Target::Server.executable_path(temp_dir.path());

        let err = run_executable(&executable).unwrap_err();
        let fast_err = err.downcast_ref::<FastError>().unwrap();
        assert!(matches!(fast_err, FastError::MissingExecutable { .. }));
        assert_eq!(fast_err.exit_code(), 1);
    }
}
