//! fast - build and run orchestration for the SynergyStudio native project
//!
//! Drives CMake/Ninja for the client, server and common targets and launches
//! the resulting executables, forwarding every child's exit code.
//!
//! ## Architecture
//!
//! ```text
//! fast [flags] → fast clean → fast build → fast run
//!                              └ cmake      └ build/<target>/<executable>
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod target;
mod utils;

use cli::Cli;

fn main() {
    let cli = Cli::parse_args();
    let code = match cli.execute() {
        Ok(code) => code,
        Err(err) => error::report(&err),
    };
    std::process::exit(code);
}
