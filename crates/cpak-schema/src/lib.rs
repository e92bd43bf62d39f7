//! Shared types for cpak recipes.
//!
//! A recipe declares package identity, the build settings the consuming
//! environment must resolve, consumer-selectable options, and an ordered
//! list of opaque dependency coordinates. These types are shared between
//! the core lifecycle engine (consumer) and the CLI (producer of
//! evaluation inputs).

pub mod coordinate;
pub mod options;
pub mod settings;

// Re-exports
pub use coordinate::{CoordinateError, DependencyRef, PackageName, Version};
pub use options::{OptionDecl, OptionError, OptionSet};
pub use settings::{BuildType, Generator, SETTING_NAMES, Settings};

/// File name of a recipe at a project root.
pub const RECIPE_FILE_NAME: &str = "cpak.toml";
