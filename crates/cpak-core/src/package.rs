//! The `package` hook: copy rules from build outputs to the package layout.
//!
//! Each rule maps a glob pattern to a destination directory inside the
//! package. Rules are applied independently; a rule matching zero files
//! copies nothing and is not an error. Copies overwrite, so re-running
//! the hook with unchanged inputs leaves an identical file set.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use walkdir::WalkDir;

/// Which tree a rule searches for matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    /// The declared source root (`src/`). Used for headers.
    SourceTree,
    /// The build output directory. Used for compiled artifacts.
    BuildTree,
}

/// A single copy rule: glob pattern, destination, and path handling.
#[derive(Debug, Clone)]
pub struct CopyRule {
    /// Glob matched against candidate file names.
    pub pattern: String,
    /// Destination directory relative to the package root.
    pub dest: String,
    /// Preserve the path relative to the search root. When false the
    /// match is flattened to its file name.
    pub keep_path: bool,
    /// Tree searched for matches.
    pub source: RuleSource,
}

impl CopyRule {
    fn new(pattern: &str, dest: &str, keep_path: bool, source: RuleSource) -> Self {
        Self {
            pattern: pattern.to_string(),
            dest: dest.to_string(),
            keep_path,
            source,
        }
    }
}

/// The standard rule set for a C++ package.
///
/// Headers keep their path relative to the source root; every binary
/// artifact kind is flattened into `lib` (or `bin` for Windows runtime
/// DLLs).
pub fn default_rules() -> Vec<CopyRule> {
    vec![
        CopyRule::new("*.hpp", "include", true, RuleSource::SourceTree),
        CopyRule::new("*.lib", "lib", false, RuleSource::BuildTree),
        CopyRule::new("*.dll", "bin", false, RuleSource::BuildTree),
        CopyRule::new("*.dylib*", "lib", false, RuleSource::BuildTree),
        CopyRule::new("*.so", "lib", false, RuleSource::BuildTree),
        CopyRule::new("*.a", "lib", false, RuleSource::BuildTree),
    ]
}

/// Apply a set of copy rules, returning the destination paths written.
///
/// `source_root` is searched by [`RuleSource::SourceTree`] rules,
/// `build_root` by [`RuleSource::BuildTree`] rules. A missing search
/// root behaves like a rule with zero matches.
///
/// # Errors
///
/// Returns an error if a pattern fails to compile or a matched file
/// cannot be copied. Zero matches for a rule is not an error.
pub fn apply_rules(
    rules: &[CopyRule],
    source_root: &Path,
    build_root: &Path,
    package_root: &Path,
) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for rule in rules {
        let pattern = Pattern::new(&rule.pattern)
            .with_context(|| format!("Invalid copy pattern: {}", rule.pattern))?;

        let search_root = match rule.source {
            RuleSource::SourceTree => source_root,
            RuleSource::BuildTree => build_root,
        };
        if !search_root.is_dir() {
            tracing::debug!(pattern = %rule.pattern, "Search root missing, rule skipped");
            continue;
        }

        let dest_root = package_root.join(&rule.dest);
        let mut matches = 0usize;

        for entry in WalkDir::new(search_root)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !pattern.matches(&file_name) {
                continue;
            }

            let dest = if rule.keep_path {
                let rel = entry
                    .path()
                    .strip_prefix(search_root)
                    .context("Matched file outside its search root")?;
                dest_root.join(rel)
            } else {
                dest_root.join(entry.file_name())
            };

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied.push(dest);
            matches += 1;
        }

        tracing::debug!(pattern = %rule.pattern, dest = %rule.dest, matches, "Applied copy rule");
    }

    copied.sort();
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_headers_keep_relative_path() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        let build = tmp.path().join("build");
        let pkg = tmp.path().join("package");
        touch(&src.join("allocator/monotonic.hpp"));
        touch(&src.join("engine.hpp"));
        touch(&src.join("main.cpp"));

        let copied = apply_rules(&default_rules(), &src, &build, &pkg).unwrap();

        assert!(pkg.join("include/allocator/monotonic.hpp").exists());
        assert!(pkg.join("include/engine.hpp").exists());
        // Non-matching source files are left behind.
        assert!(!pkg.join("include/main.cpp").exists());
        assert_eq!(copied.len(), 2);
    }

    #[test]
    fn test_binaries_flattened() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        let build = tmp.path().join("build");
        let pkg = tmp.path().join("package");
        touch(&build.join("out/libengine.a"));
        touch(&build.join("out/nested/libengine.so"));
        touch(&build.join("engine.lib"));
        touch(&build.join("engine.dll"));
        touch(&build.join("libengine.dylib.0.1"));

        apply_rules(&default_rules(), &src, &build, &pkg).unwrap();

        // Flattened: no nested directories under lib/ or bin/.
        assert!(pkg.join("lib/libengine.a").exists());
        assert!(pkg.join("lib/libengine.so").exists());
        assert!(pkg.join("lib/engine.lib").exists());
        assert!(pkg.join("lib/libengine.dylib.0.1").exists());
        assert!(pkg.join("bin/engine.dll").exists());
        assert!(!pkg.join("lib/out").exists());
    }

    #[test]
    fn test_zero_matches_is_not_an_error() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        let build = tmp.path().join("build");
        let pkg = tmp.path().join("package");
        touch(&build.join("notes.txt"));

        let copied = apply_rules(&default_rules(), &src, &build, &pkg).unwrap();
        assert!(copied.is_empty());
    }

    #[test]
    fn test_reapplication_is_idempotent() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        let build = tmp.path().join("build");
        let pkg = tmp.path().join("package");
        touch(&src.join("engine.hpp"));
        touch(&build.join("libengine.a"));

        let first = apply_rules(&default_rules(), &src, &build, &pkg).unwrap();
        let second = apply_rules(&default_rules(), &src, &build, &pkg).unwrap();
        assert_eq!(first, second);
    }
}
