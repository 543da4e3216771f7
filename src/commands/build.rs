//! Build command implementation
//!
//! Configures the project with CMake and runs the build step.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::GlobalOptions;
use crate::build::cmake::CMakeConfig;
use crate::config::load_settings;
use crate::utils::paths::{ensure_dir, project_root};
use crate::utils::terminal::{print_info, print_success};
use crate::utils::tools::{generator_tool, require_tool, warn_if_missing};

/// Configure and build the whole project (common, client, server)
#[derive(Args, Debug, Default)]
pub struct BuildCommand {
    /// Compile definition forwarded through CMAKE_CXX_FLAGS (repeatable)
    #[arg(short = 'd', long = "define", value_name = "KEY=VAL")]
    pub definitions: Vec<String>,

    /// Debug build with verbose makefiles (also accepted as -dbg)
    #[arg(long)]
    pub debug: bool,

    /// Enable the GoogleTest targets (also accepted as -gt)
    #[arg(long)]
    pub googletest: bool,

    /// Prefix path exported as CMAKE_PREFIX_PATH to the configure step
    #[arg(long, env = "FAST_PREFIX_PATH", value_name = "PATH")]
    pub prefix_path: Option<String>,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, opts: &GlobalOptions) -> Result<i32> {
        let root = project_root()?;
        let settings = load_settings(&root)?;

        // The build directory exists even when the toolchain is missing
        ensure_dir(&settings.build_dir)?;

        let cmake = require_tool("cmake")?;
        if opts.verbose {
            print_info(&format!(
                "Using {} at {} ({})",
                cmake.name,
                cmake.path.display(),
                cmake.version().unwrap_or_else(|| "unknown version".to_string())
            ));
            print_info(&format!(
                "Build directory: {}, source directory: {}, generator: {}",
                settings.build_dir.display(),
                settings.source_dir.display(),
                settings.generator
            ));
        }
        if let Some(tool) = generator_tool(&settings.generator) {
            warn_if_missing(tool);
        }

        let prefix_path = self
            .prefix_path
            .clone()
            .unwrap_or_else(|| settings.prefix_path.clone());
        let config = self.cmake_config(
            settings.source_dir,
            settings.build_dir,
            &settings.generator,
            prefix_path,
        );

        config.configure(&cmake.path)?;
        config.build(&cmake.path)?;

        print_success("Build complete!");
        Ok(0)
    }

    fn cmake_config(
        &self,
        source_dir: PathBuf,
        build_dir: PathBuf,
        generator: &str,
        prefix_path: String,
    ) -> CMakeConfig {
        let mut config = CMakeConfig::new(source_dir, build_dir)
            .generator(generator)
            .prefix_path(prefix_path)
            .definitions(self.definitions.iter().cloned());

        if self.debug {
            config = config.debug();
        }
        if self.googletest {
            config = config.testing();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(cmd: &BuildCommand) -> CMakeConfig {
        cmd.cmake_config(
            PathBuf::from("."),
            PathBuf::from("build"),
            "Ninja",
            "/opt/Qt/6.9.0/gcc_64/".to_string(),
        )
    }

    #[test]
    fn test_definitions_become_single_flags_argument() {
        let cmd = BuildCommand {
            definitions: vec!["X=1".to_string(), "Y=2".to_string()],
            ..Default::default()
        };
        let args = config_for(&cmd).configure_args();
        assert!(args.contains(&"-DCMAKE_CXX_FLAGS=-DX=1 -DY=2".to_string()));
        assert!(!args.contains(&"-DCMAKE_BUILD_TYPE=Debug".to_string()));
        assert!(!args.contains(&"-DBUILD_TESTING=ON".to_string()));
    }

    #[test]
    fn test_debug_and_googletest_toggles() {
        let cmd = BuildCommand {
            debug: true,
            googletest: true,
            ..Default::default()
        };
        let args = config_for(&cmd).configure_args();
        assert!(args.contains(&"-DCMAKE_BUILD_TYPE=Debug".to_string()));
        assert!(args.contains(&"-DCMAKE_VERBOSE_MAKEFILE:BOOL=ON".to_string()));
        assert!(args.contains(&"-DBUILD_TESTING=ON".to_string()));
    }

    #[test]
    fn test_prefix_path_reaches_configure_env() {
        let config = config_for(&BuildCommand::default());
        assert_eq!(
            config.configure_env(),
            vec![(
                "CMAKE_PREFIX_PATH".to_string(),
                "/opt/Qt/6.9.0/gcc_64/".to_string()
            )]
        );
    }
}
