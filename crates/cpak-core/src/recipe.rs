//! Recipe parsing and evaluation.
//!
//! A recipe (`cpak.toml`) declares a package's identity, the settings it
//! consumes, its options, generators, source export rules, and dependency
//! coordinates. The recipe is loaded once per invocation, validated, and
//! never mutated afterwards.
//!
//! Evaluation binds the externally resolved [`Settings`] and any option
//! overrides to the recipe, producing an [`EvaluatedRecipe`]. Nothing
//! past this point reads the process environment, so the lifecycle is a
//! pure function of (recipe, settings, options).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cpak_schema::{
    DependencyRef, Generator, OptionError, OptionSet, PackageName, SETTING_NAMES, Settings, Version,
};

/// Errors that can occur when loading, parsing, or evaluating a recipe.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// An I/O error occurred while reading a recipe file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be deserialized into a valid recipe.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The recipe declared a setting name the build matrix does not know.
    #[error("Unknown setting '{0}' (expected one of: os, compiler, build_type, arch, cppstd)")]
    UnknownSetting(String),

    /// An option override failed to resolve against the declarations.
    #[error(transparent)]
    Option(#[from] OptionError),
}

/// Metadata describing a package's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Name of the package being built.
    pub name: PackageName,
    /// Semantic version string for the package release.
    pub version: Version,
    /// SPDX license identifier for the package.
    #[serde(default)]
    pub license: String,
    /// Package author, typically `Name <email>`.
    #[serde(default)]
    pub author: String,
    /// Short human-readable summary of the package.
    #[serde(default)]
    pub description: String,
}

/// A parsed, validated recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Identity metadata from the `[package]` table.
    pub package: PackageInfo,

    /// Names of the settings the consuming build must resolve, in
    /// declaration order. Values are supplied at evaluation time.
    #[serde(default = "default_settings")]
    pub settings: Vec<String>,

    /// Declared options (`[options.<name>]` tables).
    #[serde(default)]
    pub options: OptionSet,

    /// Output formats requested from the build tool, in order.
    #[serde(default)]
    pub generators: Vec<Generator>,

    /// Glob patterns selecting source files bundled with the package.
    /// A leading `!` negates a pattern.
    #[serde(default)]
    pub exports: Vec<String>,

    /// Ordered dependency coordinates, resolved externally.
    #[serde(default)]
    pub requires: Vec<DependencyRef>,
}

fn default_settings() -> Vec<String> {
    SETTING_NAMES.iter().map(ToString::to_string).collect()
}

impl Recipe {
    /// Parse a recipe from TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Parse`] for malformed TOML or unparseable
    /// dependency coordinates, and [`RecipeError::UnknownSetting`] if a
    /// declared setting name is not part of the build matrix.
    pub fn parse(content: &str) -> Result<Self, RecipeError> {
        let recipe: Recipe = toml::from_str(content)?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Load and parse a recipe from the given file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails [`parse`](Self::parse).
    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        tracing::debug!(path = %path.display(), "Loading recipe");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn validate(&self) -> Result<(), RecipeError> {
        for name in &self.settings {
            if !SETTING_NAMES.contains(&name.as_str()) {
                return Err(RecipeError::UnknownSetting(name.clone()));
            }
        }
        Ok(())
    }

    /// Bind resolved settings and option overrides to this recipe.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Option`] if an override names an undeclared
    /// option or a value outside its domain.
    pub fn evaluate(
        self,
        settings: Settings,
        overrides: &BTreeMap<String, bool>,
    ) -> Result<EvaluatedRecipe, RecipeError> {
        let options = self.options.resolve(overrides)?;
        tracing::debug!(
            package = %self.package.name,
            version = %self.package.version,
            ?options,
            "Evaluated recipe"
        );
        Ok(EvaluatedRecipe {
            recipe: self,
            settings,
            options,
        })
    }
}

/// A recipe bound to concrete settings and resolved option values.
///
/// Immutable once constructed; both lifecycle hooks consume it by
/// reference.
#[derive(Debug, Clone)]
pub struct EvaluatedRecipe {
    /// The underlying recipe declaration.
    pub recipe: Recipe,
    /// Resolved build matrix values.
    pub settings: Settings,
    /// Resolved option values (defaults plus overrides).
    pub options: BTreeMap<String, bool>,
}

impl EvaluatedRecipe {
    /// Whether the consumer selected shared linkage.
    ///
    /// Falls back to `false` when the recipe declares no `shared` option,
    /// matching the declared default.
    pub fn shared(&self) -> bool {
        self.options.get("shared").copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpak_schema::BuildType;

    const MINIMAL: &str = r#"
requires = ["vkaEngine/0.0.1@jeffw387/testing"]
generators = ["cmake"]
exports = ["!build/*", "*"]

[package]
name = "vkaTest1"
version = "0.0.1"

[options.shared]
domain = [true, false]
default = false
"#;

    fn settings() -> Settings {
        Settings {
            os: "linux".to_string(),
            compiler: "gcc".to_string(),
            build_type: BuildType::Release,
            arch: "x86_64".to_string(),
            cppstd: "17".to_string(),
        }
    }

    #[test]
    fn test_parse_minimal() {
        let recipe = Recipe::parse(MINIMAL).unwrap();
        assert_eq!(recipe.package.name, "vkaTest1");
        assert_eq!(recipe.requires.len(), 1);
        assert_eq!(recipe.requires[0].name, "vkaEngine");
        assert_eq!(recipe.generators, vec![Generator::Cmake]);
        // Settings default to the full build matrix when omitted.
        assert_eq!(recipe.settings, SETTING_NAMES.to_vec());
    }

    #[test]
    fn test_unknown_setting_rejected() {
        let content = r#"
settings = ["os", "linker"]

[package]
name = "x"
version = "0.1.0"
"#;
        let err = Recipe::parse(content).unwrap_err();
        assert!(matches!(err, RecipeError::UnknownSetting(ref s) if s == "linker"));
    }

    #[test]
    fn test_bad_coordinate_is_parse_error() {
        let content = r#"
requires = ["vkaEngine-0.0.1"]

[package]
name = "x"
version = "0.1.0"
"#;
        assert!(matches!(
            Recipe::parse(content),
            Err(RecipeError::Parse(_))
        ));
    }

    #[test]
    fn test_evaluate_defaults_and_overrides() {
        let recipe = Recipe::parse(MINIMAL).unwrap();
        let evaluated = recipe.clone().evaluate(settings(), &BTreeMap::new()).unwrap();
        assert!(!evaluated.shared());

        let overrides = BTreeMap::from([("shared".to_string(), true)]);
        let evaluated = recipe.evaluate(settings(), &overrides).unwrap();
        assert!(evaluated.shared());
    }

    #[test]
    fn test_evaluate_rejects_undeclared_option() {
        let recipe = Recipe::parse(MINIMAL).unwrap();
        let overrides = BTreeMap::from([("fPIC".to_string(), true)]);
        assert!(matches!(
            recipe.evaluate(settings(), &overrides),
            Err(RecipeError::Option(_))
        ));
    }
}
