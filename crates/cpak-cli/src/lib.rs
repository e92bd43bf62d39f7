//! cpak - recipe-driven build and packaging for C++ components
//!
//! # Overview
//!
//! A `cpak.toml` recipe declares a package's identity, the build
//! settings its environment must resolve, consumer options, and an
//! ordered list of opaque dependency coordinates. The CLI evaluates the
//! recipe and drives the two lifecycle hooks in their fixed order:
//! `build` (configure and invoke CMake) then `package` (copy artifacts
//! into the package layout).
//!
//! # Architecture
//!
//! - **Explicit lifecycle**: `Unbuilt -> Built -> Packaged`; packaging
//!   before building is a reported error, not undefined behavior.
//! - **Injected settings**: platform defaults are computed once at
//!   startup and merged with flags; nothing downstream reads the
//!   process environment.
//! - **Newtypes**: `PackageName`, `Version`, and `DependencyRef` keep
//!   coordinates opaque and well-formed.

pub mod cmd;
pub mod ui;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cpak_schema::{BuildType, Settings};

/// Command-line interface for `cpak`.
#[derive(Debug, Parser)]
#[command(name = "cpak")]
#[command(author, version, about = "cpak - recipe-driven build and packaging for C++ components")]
pub struct Cli {
    /// Project root containing cpak.toml
    #[arg(long, global = true, default_value = ".")]
    pub path: PathBuf,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the build hook (configure + invoke CMake)
    Build {
        /// Settings and option overrides.
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Run build then package in their fixed order
    Package {
        /// Settings and option overrides.
        #[command(flatten)]
        profile: ProfileArgs,

        /// Package an existing build tree without rebuilding
        #[arg(long)]
        existing: bool,
    },
    /// Stage the recipe's exported sources
    Export,
    /// Validate a recipe and print its surface
    Check,
}

/// Settings and option overrides shared by the build-driving commands.
///
/// Unset settings fall back to values derived from the host platform,
/// derived once here and passed down explicitly.
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Operating system identifier (defaults to the host)
    #[arg(long)]
    pub os: Option<String>,

    /// Compiler identifier (defaults per host OS)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Build configuration: Debug, Release, RelWithDebInfo, MinSizeRel
    #[arg(long)]
    pub build_type: Option<String>,

    /// CPU architecture identifier (defaults to the host)
    #[arg(long)]
    pub arch: Option<String>,

    /// C++ standard level (defaults to 17)
    #[arg(long)]
    pub cppstd: Option<String>,

    /// Option override, e.g. -o shared=true (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,
}

impl ProfileArgs {
    /// Resolve the build matrix: flags first, host defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error for an unparseable `--build-type`.
    pub fn settings(&self) -> Result<Settings> {
        let host = Settings::host();
        let build_type = match &self.build_type {
            Some(raw) => BuildType::from_str(raw).map_err(|e| anyhow::anyhow!(e))?,
            None => host.build_type,
        };

        Ok(Settings {
            os: self.os.clone().unwrap_or(host.os),
            compiler: self.compiler.clone().unwrap_or(host.compiler),
            build_type,
            arch: self.arch.clone().unwrap_or(host.arch),
            cppstd: self.cppstd.clone().unwrap_or(host.cppstd),
        })
    }

    /// Parse `-o name=value` overrides into an option map.
    ///
    /// # Errors
    ///
    /// Returns an error for entries without `=` or with a non-boolean
    /// value.
    pub fn overrides(&self) -> Result<BTreeMap<String, bool>> {
        let mut overrides = BTreeMap::new();
        for raw in &self.options {
            let (name, value) = raw
                .split_once('=')
                .with_context(|| format!("Expected NAME=VALUE, got '{raw}'"))?;
            let value: bool = value
                .to_lowercase()
                .parse()
                .with_context(|| format!("Option '{name}' expects true or false"))?;
            overrides.insert(name.to_string(), value);
        }
        Ok(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(options: &[&str]) -> ProfileArgs {
        ProfileArgs {
            os: None,
            compiler: None,
            build_type: Some("Debug".to_string()),
            arch: None,
            cppstd: None,
            options: options.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_settings_merge_host_defaults() {
        let settings = profile(&[]).settings().unwrap();
        assert_eq!(settings.build_type, BuildType::Debug);
        assert!(!settings.os.is_empty());
        assert_eq!(settings.cppstd, "17");
    }

    #[test]
    fn test_option_overrides_parse() {
        let overrides = profile(&["shared=true"]).overrides().unwrap();
        assert_eq!(overrides.get("shared"), Some(&true));
    }

    #[test]
    fn test_malformed_override_rejected() {
        assert!(profile(&["shared"]).overrides().is_err());
        assert!(profile(&["shared=maybe"]).overrides().is_err());
    }
}
