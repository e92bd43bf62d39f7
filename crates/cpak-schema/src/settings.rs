//! The externally-resolved build matrix.
//!
//! A recipe names the settings it consumes (`os`, `compiler`,
//! `build_type`, `arch`, `cppstd`); the *values* are owned by the
//! invoking environment and injected once at evaluation time. Nothing in
//! the lifecycle reads the process environment ad hoc, which keeps
//! evaluation a pure function of (settings, options, recipe).

use serde::{Deserialize, Serialize};

/// The setting names a recipe may declare, in canonical order.
pub const SETTING_NAMES: [&str; 5] = ["os", "compiler", "build_type", "arch", "cppstd"];

/// Build configuration requested from the external build tool.
///
/// Variant names match the CMake `CMAKE_BUILD_TYPE` spellings so the
/// value can be passed straight through to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuildType {
    /// Unoptimized build with debug info.
    Debug,
    /// Optimized build (default).
    #[default]
    Release,
    /// Optimized build with debug info.
    RelWithDebInfo,
    /// Size-optimized build.
    MinSizeRel,
}

impl BuildType {
    /// The exact string CMake expects for `CMAKE_BUILD_TYPE`.
    pub fn cmake_name(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        }
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cmake_name())
    }
}

impl std::str::FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            "minsizerel" => Ok(Self::MinSizeRel),
            _ => Err(format!("Unknown build type: {s}")),
        }
    }
}

/// Output format a recipe asks the build tool to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generator {
    /// A CMake-compatible consumption file.
    Cmake,
    /// A Visual Studio-compatible consumption file.
    VisualStudio,
}

impl Generator {
    /// Identifier as written in recipe files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cmake => "cmake",
            Self::VisualStudio => "visual_studio",
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cmake" => Ok(Self::Cmake),
            "visual_studio" | "visualstudio" => Ok(Self::VisualStudio),
            _ => Err(format!("Unknown generator: {s}")),
        }
    }
}

/// Resolved values for the five recipe settings.
///
/// Constructed by the caller (CLI flags, CI profile) and passed into
/// recipe evaluation. `os`, `compiler`, `arch`, and `cppstd` are
/// free-form identifiers because the external build tool owns their
/// vocabularies; only `build_type` has a closed domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Operating system identifier (e.g. `linux`, `macos`, `windows`).
    pub os: String,
    /// Compiler identifier (e.g. `clang`, `gcc`, `msvc`).
    pub compiler: String,
    /// Requested build configuration.
    pub build_type: BuildType,
    /// CPU architecture identifier (e.g. `x86_64`, `aarch64`).
    pub arch: String,
    /// C++ standard level (e.g. `17`, `20`).
    pub cppstd: String,
}

impl Settings {
    /// Settings derived from the host platform, used as CLI defaults.
    ///
    /// Derivation happens once at startup; the resulting values travel
    /// explicitly through evaluation like any user-supplied profile.
    pub fn host() -> Self {
        let os = std::env::consts::OS.to_string();
        let compiler = match std::env::consts::OS {
            "windows" => "msvc",
            "macos" => "clang",
            _ => "gcc",
        }
        .to_string();

        Self {
            os,
            compiler,
            build_type: BuildType::Release,
            arch: std::env::consts::ARCH.to_string(),
            cppstd: "17".to_string(),
        }
    }
}
