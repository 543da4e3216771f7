//! fast.toml configuration parsing
//!
//! The file is optional. When present in the project root it may override
//! the build layout and the prefix path handed to CMake:
//!
//! ```toml
//! [build]
//! dir = "build"
//! source = "."
//! generator = "Ninja"
//! prefix_path = "/opt/Qt/6.9.0/gcc_64/"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use super::validation::validate_settings;
use crate::error::{hints, FastError};

/// Name of the optional configuration file
pub const CONFIG_FILE_NAME: &str = "fast.toml";

/// Default build output directory
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Default CMake source directory
pub const DEFAULT_SOURCE_DIR: &str = ".";

/// Default CMake generator
pub const DEFAULT_GENERATOR: &str = "Ninja";

/// Default third-party prefix exported as CMAKE_PREFIX_PATH
pub const DEFAULT_PREFIX_PATH: &str = "/home/manojlo/Qt/6.9.0/gcc_64/";

/// Root of fast.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FastConfig {
    /// Build layout and CMake settings
    #[serde(default)]
    pub build: BuildSection,
}

/// The `[build]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Build output directory, a subdirectory of the project root
    pub dir: Option<PathBuf>,

    /// CMake source directory, relative to the project root
    pub source: Option<PathBuf>,

    /// CMake generator name
    pub generator: Option<String>,

    /// Value injected as CMAKE_PREFIX_PATH
    pub prefix_path: Option<String>,
}

/// Effective settings after applying defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub build_dir: PathBuf,
    pub source_dir: PathBuf,
    pub generator: String,
    pub prefix_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            generator: DEFAULT_GENERATOR.to_string(),
            prefix_path: DEFAULT_PREFIX_PATH.to_string(),
        }
    }
}

impl FastConfig {
    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            anyhow::Error::from(FastError::config_error_with_hint(
                format!("Failed to parse {}", CONFIG_FILE_NAME),
                Some(e.into()),
                hints::invalid_fast_toml(),
            ))
        })
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FastError::config_error_with_hint(
                format!("Failed to read configuration from {}", path.display()),
                Some(e.into()),
                hints::invalid_fast_toml(),
            )
        })?;

        Self::parse(&content)
    }

    /// Load fast.toml from the project root, or the empty config if absent
    pub fn load_or_default(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load_from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply defaults to whatever the file left unset
    pub fn settings(&self) -> Result<Settings> {
        let defaults = Settings::default();
        let build = &self.build;
        let settings = Settings {
            build_dir: build.dir.clone().unwrap_or(defaults.build_dir),
            source_dir: build.source.clone().unwrap_or(defaults.source_dir),
            generator: build.generator.clone().unwrap_or(defaults.generator),
            prefix_path: build.prefix_path.clone().unwrap_or(defaults.prefix_path),
        };
        validate_settings(&settings)?;
        Ok(settings)
    }
}

/// Load the effective settings for a project root
pub fn load_settings(project_root: &Path) -> Result<Settings> {
    FastConfig::load_or_default(project_root)?.settings()
}
