//! Tool detection for the external build system
//!
//! `cmake` is mandatory for the builder; the generator backend (Ninja) is
//! only recommended, since CMake reports a clearer error if it is missing.

use std::path::PathBuf;
use std::process::Command;

use anyhow::Result;
use which::which;

use crate::error::{hints, FastError};

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Path to the tool executable
    pub path: PathBuf,
}

impl ToolInfo {
    /// First line of `tool --version`, if the tool answers it
    pub fn version(&self) -> Option<String> {
        let output = Command::new(&self.path).arg("--version").output().ok()?;
        if !output.status.success() {
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout.lines().next().map(|line| line.trim().to_string())
    }
}

/// Check if a tool exists and return its information
pub fn check_tool(tool_name: &str) -> Option<ToolInfo> {
    which(tool_name).ok().map(|path| ToolInfo {
        name: tool_name.to_string(),
        path,
    })
}

/// Look up a recommended tool, warning with an install hint if it is missing
pub fn warn_if_missing(tool_name: &str) -> Option<ToolInfo> {
    let info = check_tool(tool_name);
    if info.is_none() {
        crate::utils::terminal::print_warning(&format!(
            "Recommended tool '{}' not found.\n{}",
            tool_name,
            get_tool_hint(tool_name)
        ));
    }
    info
}

/// Require a tool to exist, return error with hint if missing
pub fn require_tool(tool_name: &str) -> Result<ToolInfo> {
    check_tool(tool_name).ok_or_else(|| {
        FastError::missing_tool(tool_name, display_name(tool_name), get_tool_hint(tool_name)).into()
    })
}

/// Executable that backs a CMake generator, if it is one we know
pub fn generator_tool(generator: &str) -> Option<&'static str> {
    match generator {
        "Ninja" | "Ninja Multi-Config" => Some("ninja"),
        "Unix Makefiles" => Some("make"),
        _ => None,
    }
}

fn display_name(tool_name: &str) -> &str {
    match tool_name {
        "cmake" => "CMake",
        "ninja" => "Ninja",
        other => other,
    }
}

/// Get installation hint for a tool
fn get_tool_hint(tool_name: &str) -> &'static str {
    match tool_name {
        "cmake" => hints::cmake(),
        "ninja" => hints::ninja(),
        _ => "Install this tool and ensure it's in your PATH",
    }
}
