//! Validation of the effective settings

use std::path::{Component, Path};

use anyhow::Result;

use super::Settings;
use crate::error::{hints, FastError};

/// Validate settings before anything touches the filesystem
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.generator.trim().is_empty() {
        return Err(invalid("build.generator must not be empty"));
    }

    // The build directory is deleted by `fast clean`
    if !is_inside_project(&settings.build_dir) {
        return Err(invalid(format!(
            "build.dir '{}' must be a subdirectory of the project root",
            settings.build_dir.display()
        )));
    }

    if settings.build_dir == settings.source_dir {
        return Err(invalid("build.dir and build.source must differ"));
    }

    Ok(())
}

/// Relative, no `..`, and names at least one directory below the root
fn is_inside_project(path: &Path) -> bool {
    let mut has_name = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    has_name
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    FastError::config_error_with_hint(message, None, hints::invalid_fast_toml()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_build_dir_cannot_be_project_root() {
        for dir in ["", ".", "./.", "..", "build/..", "build/../..", "/", "/tmp/build"] {
            let settings = Settings {
                build_dir: PathBuf::from(dir),
                ..Settings::default()
            };
            assert!(validate_settings(&settings).is_err(), "accepted {:?}", dir);
        }
    }

    #[test]
    fn test_nested_build_dirs_accepted() {
        for dir in ["build", "./out", "out/debug"] {
            let settings = Settings {
                build_dir: PathBuf::from(dir),
                ..Settings::default()
            };
            assert!(validate_settings(&settings).is_ok(), "rejected {:?}", dir);
        }
    }

    #[test]
    fn test_empty_generator_rejected() {
        let settings = Settings {
            generator: "  ".to_string(),
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("build.generator"));
    }

    #[test]
    fn test_build_dir_equal_to_source_rejected() {
        let settings = Settings {
            build_dir: PathBuf::from("src"),
            source_dir: PathBuf::from("src"),
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_err());
    }
}
