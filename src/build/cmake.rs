//! CMake configuration and execution
//!
//! This module handles invoking CMake for the configure and build steps.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::FastError;
use crate::exec::run_command;
use crate::utils::terminal::{print_info, print_running, print_success};

/// Environment variable CMake reads third-party package prefixes from
pub const PREFIX_PATH_ENV: &str = "CMAKE_PREFIX_PATH";

/// CMake build type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    Debug,
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildType::Debug => write!(f, "Debug"),
        }
    }
}

/// CMake configuration builder
#[derive(Debug, Default)]
pub struct CMakeConfig {
    /// Source directory (where CMakeLists.txt is located)
    source_dir: PathBuf,
    /// Build directory
    build_dir: PathBuf,
    /// Build type, left to the project default when unset
    build_type: Option<BuildType>,
    /// Compile definitions, folded into CMAKE_CXX_FLAGS
    definitions: Vec<String>,
    /// CMake cache variables (-D with type)
    cache_variables: Vec<(String, String, String)>,
    /// CMake variables (-D options)
    variables: Vec<(String, String)>,
    /// Generator (e.g., "Ninja", "Unix Makefiles")
    generator: Option<String>,
    /// Value exported as CMAKE_PREFIX_PATH to the configure step
    prefix_path: Option<String>,
}

impl CMakeConfig {
    /// Create a new CMake configuration
    pub fn new(source_dir: PathBuf, build_dir: PathBuf) -> Self {
        Self {
            source_dir,
            build_dir,
            ..Default::default()
        }
    }

    /// Set the build type
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = Some(build_type);
        self
    }

    /// Add compile definitions (`KEY=VAL`)
    pub fn definitions<I, S>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definitions
            .extend(definitions.into_iter().map(Into::into));
        self
    }

    /// Set a CMake variable
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((name.into(), value.into()));
        self
    }

    /// Set a cache variable with type
    pub fn cache_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        var_type: impl Into<String>,
    ) -> Self {
        self.cache_variables
            .push((name.into(), value.into(), var_type.into()));
        self
    }

    /// Set the generator
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    /// Set the prefix path exported to the configure step
    pub fn prefix_path(mut self, prefix_path: impl Into<String>) -> Self {
        self.prefix_path = Some(prefix_path.into());
        self
    }

    /// Debug build with the verbose makefile and without rule messages
    pub fn debug(self) -> Self {
        self.build_type(BuildType::Debug)
            .cache_variable("CMAKE_RULE_MESSAGES", "OFF", "BOOL")
            .cache_variable("CMAKE_VERBOSE_MAKEFILE", "ON", "BOOL")
    }

    /// Turn on the project's GoogleTest targets
    pub fn testing(self) -> Self {
        self.variable("BUILD_TESTING", "ON")
    }

    /// Single `CMAKE_CXX_FLAGS` value carrying every definition
    pub fn cxx_flags(&self) -> Option<String> {
        if self.definitions.is_empty() {
            return None;
        }
        Some(
            self.definitions
                .iter()
                .map(|definition| format!("-D{}", definition))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Arguments of the configure step
    pub fn configure_args(&self) -> Vec<String> {
        let mut args = vec![
            "-B".to_string(),
            self.build_dir.display().to_string(),
            "-S".to_string(),
            self.source_dir.display().to_string(),
        ];

        // Generator
        if let Some(generator) = &self.generator {
            args.push("-G".to_string());
            args.push(generator.clone());
        }

        if let Some(flags) = self.cxx_flags() {
            args.push(format!("-DCMAKE_CXX_FLAGS={}", flags));
        }

        if let Some(build_type) = self.build_type {
            args.push(format!("-DCMAKE_BUILD_TYPE={}", build_type));
        }

        // Cache variables with type
        for (name, value, var_type) in &self.cache_variables {
            args.push(format!("-D{}:{}={}", name, var_type, value));
        }

        // Variables
        for (name, value) in &self.variables {
            args.push(format!("-D{}={}", name, value));
        }

        args
    }

    /// Environment added to the configure step
    pub fn configure_env(&self) -> Vec<(String, String)> {
        self.prefix_path
            .iter()
            .map(|prefix| (PREFIX_PATH_ENV.to_string(), prefix.clone()))
            .collect()
    }

    /// Arguments of the build step
    pub fn build_args(&self) -> Vec<String> {
        vec!["--build".to_string(), self.build_dir.display().to_string()]
    }

    /// Run CMake configure step
    pub fn configure(&self, cmake: &Path) -> Result<()> {
        let args = self.configure_args();
        let envs = self.configure_env();

        print_running("Running CMake Command", "cmake", &args);
        for (key, value) in &envs {
            print_info(&format!("With Environment {}={}", key, value));
        }

        let result = run_command(cmake, &args, &envs)?;
        if !result.success {
            return Err(FastError::step_failed(
                "CMake configure",
                result.exit_code,
                vec![
                    "Check the CMake output above for the first error".to_string(),
                    format!(
                        "A stale cache in {} can break a reconfigure; run `fast clean` and retry",
                        self.build_dir.display()
                    ),
                ],
            )
            .into());
        }

        print_success("CMake configuration successful!");
        Ok(())
    }

    /// Run CMake build step
    pub fn build(&self, cmake: &Path) -> Result<()> {
        let args = self.build_args();
        print_running("Running Build Command", "cmake", &args);

        let result = run_command(cmake, &args, &[])?;
        if !result.success {
            return Err(FastError::step_failed(
                "CMake build",
                result.exit_code,
                vec!["Check the compiler output above for the first error".to_string()],
            )
            .into());
        }

        print_success(&format!(
            "Build successful! ({:.1}s)",
            result.duration.as_secs_f64()
        ));
        Ok(())
    }
}
