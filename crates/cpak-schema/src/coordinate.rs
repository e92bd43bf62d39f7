//! Dependency coordinates and the newtypes they are built from.
//!
//! A coordinate (`name/version@user/channel`) is an opaque reference to a
//! package held by an external resolution service. The recipe never
//! inspects what a coordinate points at; it only needs to parse, order,
//! and print the four fields faithfully.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Errors produced when parsing a dependency coordinate.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CoordinateError {
    /// The coordinate had no `@` separating the package part from the
    /// user/channel part.
    #[error("Missing '@' in coordinate: {0}")]
    MissingAt(String),

    /// The part before `@` was not exactly `name/version`.
    #[error("Expected name/version before '@': {0}")]
    BadPackagePart(String),

    /// The part after `@` was not exactly `user/channel`.
    #[error("Expected user/channel after '@': {0}")]
    BadChannelPart(String),

    /// One of the four fields was empty.
    #[error("Empty field in coordinate: {0}")]
    EmptyField(String),
}

/// A package name as it appears in a coordinate.
///
/// Unlike registry names elsewhere, coordinate names are case-significant
/// (`Catch2` and `catch2` are different packages to the resolver), so the
/// input is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageName(String);

impl PackageName {
    /// Create a new package name, stored as given.
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for PackageName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PackageName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PackageName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for PackageName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PackageName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A version string, stored verbatim.
///
/// Versions are opaque: placeholder tokens (`X.Y.Z`) and channel-style
/// tags (`latest`) pass through unmodified. Ordering is semantic where
/// both sides parse as semver, falling back to lexicographic otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version(String);

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (
            semver::Version::parse(&self.0),
            semver::Version::parse(&other.0),
        ) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Version {
    /// Create a new version from the given string (stored as-is).
    pub fn new(v: &str) -> Self {
        Self(v.to_string())
    }

    /// Return the version string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for Version {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for Version {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A fully-qualified dependency coordinate: `name/version@user/channel`.
///
/// Serialized as the single joined string in recipe files, parsed into
/// its four fields on load. The fields are never inspected beyond that;
/// resolution belongs to the external dependency service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DependencyRef {
    /// Package name (case-significant).
    pub name: PackageName,
    /// Version token, opaque (may be a placeholder like `X.Y.Z`).
    pub version: Version,
    /// Owning user or organization.
    pub user: String,
    /// Release channel (e.g. `testing`, `stable`).
    pub channel: String,
}

impl DependencyRef {
    /// Parse a coordinate of the form `name/version@user/channel`.
    ///
    /// # Errors
    ///
    /// Returns a [`CoordinateError`] if either side of the `@` does not
    /// split into exactly two non-empty fields.
    pub fn parse(s: &str) -> Result<Self, CoordinateError> {
        let (pkg, chan) = s
            .split_once('@')
            .ok_or_else(|| CoordinateError::MissingAt(s.to_string()))?;

        let (name, version) = pkg
            .split_once('/')
            .ok_or_else(|| CoordinateError::BadPackagePart(s.to_string()))?;
        let (user, channel) = chan
            .split_once('/')
            .ok_or_else(|| CoordinateError::BadChannelPart(s.to_string()))?;

        for (field, value) in [
            ("name", name),
            ("version", version),
            ("user", user),
            ("channel", channel),
        ] {
            if value.is_empty() {
                return Err(CoordinateError::EmptyField(field.to_string()));
            }
        }
        if version.contains('/') || channel.contains('/') {
            return Err(CoordinateError::BadChannelPart(s.to_string()));
        }

        Ok(Self {
            name: PackageName::new(name),
            version: Version::new(version),
            user: user.to_string(),
            channel: channel.to_string(),
        })
    }
}

impl std::str::FromStr for DependencyRef {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DependencyRef {
    type Error = CoordinateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DependencyRef> for String {
    fn from(d: DependencyRef) -> Self {
        d.to_string()
    }
}

impl std::fmt::Display for DependencyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}@{}/{}",
            self.name, self.version, self.user, self.channel
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let d = DependencyRef::parse("vkaEngine/0.0.1@jeffw387/testing").unwrap();
        assert_eq!(d.name, "vkaEngine");
        assert_eq!(d.version, "0.0.1");
        assert_eq!(d.user, "jeffw387");
        assert_eq!(d.channel, "testing");
        assert_eq!(d.to_string(), "vkaEngine/0.0.1@jeffw387/testing");
    }

    #[test]
    fn test_parse_preserves_case_and_placeholders() {
        let d = DependencyRef::parse("Catch2/2.5.0@catchorg/stable").unwrap();
        assert_eq!(d.name, "Catch2");

        // Placeholder versions pass through untouched.
        let d = DependencyRef::parse("filesystem/X.Y.Z@jeffw387/testing").unwrap();
        assert_eq!(d.version, "X.Y.Z");

        let d = DependencyRef::parse("json-shader/latest@jeffw387/testing").unwrap();
        assert_eq!(d.version, "latest");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            DependencyRef::parse("vkaEngine/0.0.1"),
            Err(CoordinateError::MissingAt("vkaEngine/0.0.1".to_string()))
        );
        assert!(DependencyRef::parse("vkaEngine@jeffw387/testing").is_err());
        assert!(DependencyRef::parse("vkaEngine/0.0.1@jeffw387").is_err());
        assert!(DependencyRef::parse("/0.0.1@jeffw387/testing").is_err());
    }

    #[test]
    fn test_version_ordering() {
        assert!(Version::new("0.0.1") < Version::new("0.0.2"));
        assert!(Version::new("2.5.0") < Version::new("2.10.0"));
        // Semver-parseable sorts before opaque tokens.
        assert!(Version::new("1.0.0") < Version::new("latest"));
    }
}
