//! Core library for cpak.
//!
//! Loads a `cpak.toml` recipe, evaluates it against externally injected
//! settings and option overrides, and drives the two lifecycle hooks:
//! `build` (configure and invoke the external generator) and `package`
//! (copy build artifacts into the package layout).
//!
//! The lifecycle is an explicit `Unbuilt -> Built -> Packaged`
//! progression; calling `package` before `build` is a reportable error
//! rather than caller discipline.

pub mod build;
pub mod export;
pub mod layout;
pub mod lifecycle;
pub mod package;
pub mod recipe;

pub use layout::Layout;
pub use lifecycle::{Lifecycle, LifecycleError, Phase};
pub use recipe::{EvaluatedRecipe, Recipe, RecipeError};
