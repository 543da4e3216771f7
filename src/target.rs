//! Symbolic build targets and where their executables land

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::error::FastError;

/// One of the three CMake subprojects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Server,
    Client,
    Common,
}

impl Target {
    /// Every known target
    pub const ALL: [Target; 3] = [Target::Server, Target::Client, Target::Common];

    /// Name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Target::Server => "server",
            Target::Client => "client",
            Target::Common => "common",
        }
    }

    /// Subdirectory of the build directory holding this target's outputs
    pub fn dir_name(self) -> &'static str {
        self.name()
    }

    /// File stem of the executable CMake produces for this target
    pub fn executable_stem(self) -> &'static str {
        match self {
            Target::Server => "SynergyStudioServer",
            Target::Client => "SynergyStudioClient",
            Target::Common => "SynergyStudioCommon",
        }
    }

    /// Directory holding this target's outputs
    pub fn output_dir(self, build_dir: &Path) -> PathBuf {
        build_dir.join(self.dir_name())
    }

    /// Full path of the target's main executable
    pub fn executable_path(self, build_dir: &Path) -> PathBuf {
        self.output_dir(build_dir).join(with_exe_suffix(self.executable_stem()))
    }

    /// Full path of a named test executable built alongside the target.
    ///
    /// The name must be a bare file name so the path stays inside the
    /// target's output directory.
    pub fn test_executable_path(self, build_dir: &Path, name: &str) -> Result<PathBuf, FastError> {
        if !is_file_name(name) {
            return Err(FastError::InvalidTestExecutable {
                name: name.to_string(),
            });
        }
        Ok(self.output_dir(build_dir).join(with_exe_suffix(name)))
    }
}

fn is_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

fn with_exe_suffix(stem: &str) -> String {
    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() || stem.ends_with(suffix) {
        stem.to_string()
    } else {
        format!("{}{}", stem, suffix)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = FastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| FastError::unknown_target(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_targets_resolve() {
        let build = Path::new("build");
        let suffix = std::env::consts::EXE_SUFFIX;

        assert_eq!(
            Target::Server.executable_path(build),
            build.join("server").join(format!("SynergyStudioServer{}", suffix))
        );
        assert_eq!(
            Target::Client.executable_path(build),
            build.join("client").join(format!("SynergyStudioClient{}", suffix))
        );
        assert_eq!(
            Target::Common.executable_path(build),
            build.join("common").join(format!("SynergyStudioCommon{}", suffix))
        );
    }

    #[test]
    fn test_paths_are_distinct_and_deterministic() {
        let build = Path::new("build");
        let paths: HashSet<PathBuf> = Target::ALL
            .iter()
            .map(|t| t.executable_path(build))
            .collect();
        assert_eq!(paths.len(), Target::ALL.len());

        for target in Target::ALL {
            assert_eq!(target.executable_path(build), target.executable_path(build));
        }
    }

    #[test]
    fn test_parse_round_trips_names() {
        for target in Target::ALL {
            assert_eq!(target.name().parse::<Target>().unwrap(), target);
        }
    }

    #[test]
    fn test_unknown_target_rejected() {
        for name in ["main", "Server", "", "server "] {
            let err = name.parse::<Target>().unwrap_err();
            assert_eq!(err.exit_code(), -1);
        }
    }

    #[test]
    fn test_test_executable_lives_in_target_dir() {
        let path = Target::Server
            .test_executable_path(Path::new("build"), "server_tests")
            .unwrap();
        assert_eq!(
            path,
            Path::new("build")
                .join("server")
                .join(format!("server_tests{}", std::env::consts::EXE_SUFFIX))
        );
    }

    #[test]
    fn test_test_executable_cannot_leave_target_dir() {
        let build = Path::new("build");
        for name in ["../../bin/x", "a/b", "..", ".", "", "/bin/sh", "..\\x"] {
            let err = Target::Server.test_executable_path(build, name).unwrap_err();
            assert!(
                matches!(err, FastError::InvalidTestExecutable { .. }),
                "accepted {:?}",
                name
            );
            assert_eq!(err.exit_code(), 1);
        }
    }
}
