//! Project directory layout.
//!
//! All lifecycle paths derive from a single project root, so two
//! invocations over the same root see the same tree.

use cpak_schema::RECIPE_FILE_NAME;
use std::path::{Path, PathBuf};

/// Well-known directories under a project root.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recipe file path: `<root>/cpak.toml`
    pub fn recipe_path(&self) -> PathBuf {
        self.root.join(RECIPE_FILE_NAME)
    }

    /// Declared source root: `<root>/src`
    pub fn source_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// Build output directory: `<root>/build`
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// Package output directory: `<root>/package`
    pub fn package_dir(&self) -> PathBuf {
        self.root.join("package")
    }

    /// Source export staging directory: `<root>/export`
    pub fn export_dir(&self) -> PathBuf {
        self.root.join("export")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_root() {
        let layout = Layout::new("/tmp/project");
        assert_eq!(layout.recipe_path(), Path::new("/tmp/project/cpak.toml"));
        assert_eq!(layout.source_dir(), Path::new("/tmp/project/src"));
        assert_eq!(layout.build_dir(), Path::new("/tmp/project/build"));
        assert_eq!(layout.package_dir(), Path::new("/tmp/project/package"));
        assert_eq!(layout.export_dir(), Path::new("/tmp/project/export"));
    }
}
