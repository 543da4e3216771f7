//! Clean command implementation

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;

use super::GlobalOptions;
use crate::config::load_settings;
use crate::utils::paths::{dir_size, format_size, project_root};
use crate::utils::terminal::{print_info, print_success};

/// Remove the build directory
#[derive(Args, Debug, Default)]
pub struct CleanCommand {
    /// Show what would be deleted
    #[arg(long)]
    pub dry_run: bool,
}

/// What a clean pass did
#[derive(Debug, PartialEq, Eq)]
enum CleanOutcome {
    Absent,
    WouldRemove(u64),
    Removed(u64),
}

impl CleanCommand {
    /// Execute the clean command
    pub fn execute(self, opts: &GlobalOptions) -> Result<i32> {
        let settings = load_settings(&project_root()?)?;
        let build_dir = &settings.build_dir;
        let name = format!("{}/", build_dir.display());

        if opts.verbose {
            print_info(&format!("Cleaning {}", name));
        }

        match self.clean(build_dir)? {
            CleanOutcome::Absent => print_info(&format!("{} does not exist", name)),
            CleanOutcome::WouldRemove(size) => {
                println!("  [DRY RUN] Would remove: {} ({})", name, format_size(size))
            }
            CleanOutcome::Removed(size) => {
                print_success(&format!("Removed: {} ({})", name, format_size(size)))
            }
        }
        Ok(0)
    }

    fn clean(&self, build_dir: &Path) -> Result<CleanOutcome> {
        if !build_dir.exists() {
            return Ok(CleanOutcome::Absent);
        }
        if !build_dir.is_dir() {
            bail!("{} exists but is not a directory", build_dir.display());
        }

        let size = dir_size(build_dir);
        if self.dry_run {
            return Ok(CleanOutcome::WouldRemove(size));
        }

        fs::remove_dir_all(build_dir)
            .with_context(|| format!("Failed to remove {}", build_dir.display()))?;
        Ok(CleanOutcome::Removed(size))
    }
}
