//! Consumer-selectable options declared by a recipe.
//!
//! An option declaration names its domain of allowed values and a
//! default. Consumers may override a declared option at evaluation time;
//! overriding an undeclared option, or supplying a value outside the
//! domain, is an error rather than a silent pass-through.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors produced when resolving option overrides against declarations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum OptionError {
    /// An override named an option the recipe does not declare.
    #[error("Option '{0}' is not declared by this recipe")]
    Undeclared(String),

    /// An override supplied a value outside the declared domain.
    #[error("Value {value} is outside the domain of option '{name}'")]
    OutOfDomain {
        /// Name of the offending option.
        name: String,
        /// The rejected value.
        value: bool,
    },
}

/// A single option declaration: allowed values plus a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDecl {
    /// The values a consumer may select.
    pub domain: Vec<bool>,
    /// Value used when the consumer selects nothing.
    pub default: bool,
}

/// The full set of options a recipe declares, keyed by name.
///
/// Stored as a `BTreeMap` so iteration (and serialized output) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<String, OptionDecl>);

impl OptionSet {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration under the given name.
    pub fn declare(&mut self, name: &str, decl: OptionDecl) {
        self.0.insert(name.to_string(), decl);
    }

    /// Look up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&OptionDecl> {
        self.0.get(name)
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no options are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The default value of every declared option.
    pub fn defaults(&self) -> BTreeMap<String, bool> {
        self.0
            .iter()
            .map(|(name, decl)| (name.clone(), decl.default))
            .collect()
    }

    /// Apply consumer overrides on top of the declared defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::Undeclared`] for overrides naming unknown
    /// options and [`OptionError::OutOfDomain`] for values outside the
    /// declared domain.
    pub fn resolve(
        &self,
        overrides: &BTreeMap<String, bool>,
    ) -> Result<BTreeMap<String, bool>, OptionError> {
        let mut resolved = self.defaults();

        for (name, &value) in overrides {
            let decl = self
                .0
                .get(name)
                .ok_or_else(|| OptionError::Undeclared(name.clone()))?;
            if !decl.domain.contains(&value) {
                return Err(OptionError::OutOfDomain {
                    name: name.clone(),
                    value,
                });
            }
            resolved.insert(name.clone(), value);
        }

        Ok(resolved)
    }
}
