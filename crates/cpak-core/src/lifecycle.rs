//! The build/package lifecycle.
//!
//! The original manifest format relied on its external caller to always
//! run `build` before `package`. Here the ordering is an explicit phase
//! progression, `Unbuilt -> Built -> Packaged`, and calling `package`
//! too early is a typed, reportable error instead of a silent one.

use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;

use crate::build::CMake;
use crate::layout::Layout;
use crate::package::{apply_rules, default_rules};
use crate::recipe::EvaluatedRecipe;

/// Lifecycle ordering violations.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// `package` was invoked without a prior successful `build`.
    #[error("package() called before build(); run the build hook first")]
    PackageBeforeBuild,

    /// An externally produced build tree was adopted but does not exist.
    #[error("Cannot adopt build output: {0} does not exist")]
    MissingBuildDir(PathBuf),
}

/// Progress of a recipe through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No build output exists yet.
    Unbuilt,
    /// `build` has completed; `package` may run.
    Built,
    /// `package` has completed.
    Packaged,
}

/// An evaluated recipe progressing through build and package.
///
/// Holds no state beyond the phase marker; both hooks are otherwise
/// stateless and communicate only through the filesystem artifacts the
/// build leaves behind.
#[derive(Debug)]
pub struct Lifecycle {
    evaluated: EvaluatedRecipe,
    layout: Layout,
    phase: Phase,
}

impl Lifecycle {
    /// Begin a lifecycle for an evaluated recipe over the given layout.
    pub fn new(evaluated: EvaluatedRecipe, layout: Layout) -> Self {
        Self {
            evaluated,
            layout,
            phase: Phase::Unbuilt,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The evaluated recipe this lifecycle drives.
    pub fn evaluated(&self) -> &EvaluatedRecipe {
        &self.evaluated
    }

    /// Run the `build` hook: configure the external generator in verbose
    /// mode, then invoke it.
    ///
    /// Re-running from any phase is allowed and moves the lifecycle back
    /// to `Built`.
    ///
    /// # Errors
    ///
    /// Propagates CMake failures unmodified; no retry or fallback.
    pub fn build(&mut self) -> Result<()> {
        let cmake = CMake::new(&self.evaluated, &self.layout)?;
        cmake.configure()?;
        cmake.build()?;
        self.phase = Phase::Built;
        Ok(())
    }

    /// Adopt a build tree produced outside this lifecycle (for example
    /// by a CI pipeline that invoked the build tool itself), so that
    /// `package` can run against it.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::MissingBuildDir`] if the layout's build
    /// directory does not exist.
    pub fn adopt_build(&mut self) -> Result<()> {
        let build_dir = self.layout.build_dir();
        if !build_dir.is_dir() {
            return Err(LifecycleError::MissingBuildDir(build_dir).into());
        }
        self.phase = Phase::Built;
        Ok(())
    }

    /// Run the `package` hook: apply the copy rules against the build
    /// and source trees.
    ///
    /// Returns the destination paths written. Rules matching zero files
    /// contribute nothing and do not fail.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::PackageBeforeBuild`] when no build has
    /// run, or a copy error from rule application.
    pub fn package(&mut self) -> Result<Vec<PathBuf>> {
        if self.phase == Phase::Unbuilt {
            return Err(LifecycleError::PackageBeforeBuild.into());
        }

        let copied = apply_rules(
            &default_rules(),
            &self.layout.source_dir(),
            &self.layout.build_dir(),
            &self.layout.package_dir(),
        )?;
        tracing::info!(files = copied.len(), "Packaged");
        self.phase = Phase::Packaged;
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Recipe;
    use cpak_schema::Settings;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn lifecycle(root: &std::path::Path) -> Lifecycle {
        let content = r#"
requires = ["vkaEngine/0.0.1@jeffw387/testing"]

[package]
name = "vkaTest1"
version = "0.0.1"

[options.shared]
domain = [true, false]
default = false
"#;
        let evaluated = Recipe::parse(content)
            .unwrap()
            .evaluate(Settings::host(), &BTreeMap::new())
            .unwrap();
        Lifecycle::new(evaluated, Layout::new(root))
    }

    #[test]
    fn test_evaluated_recipe_is_exposed() {
        let tmp = tempdir().unwrap();
        let lc = lifecycle(tmp.path());
        assert_eq!(lc.evaluated().recipe.package.name, "vkaTest1");
        assert!(!lc.evaluated().shared());
    }

    #[test]
    fn test_package_before_build_is_reported() {
        let tmp = tempdir().unwrap();
        let mut lc = lifecycle(tmp.path());
        assert_eq!(lc.phase(), Phase::Unbuilt);

        let err = lc.package().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LifecycleError>(),
            Some(LifecycleError::PackageBeforeBuild)
        ));
        // A failed package leaves the phase untouched.
        assert_eq!(lc.phase(), Phase::Unbuilt);
    }

    #[test]
    fn test_adopt_requires_existing_build_dir() {
        let tmp = tempdir().unwrap();
        let mut lc = lifecycle(tmp.path());

        let err = lc.adopt_build().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LifecycleError>(),
            Some(LifecycleError::MissingBuildDir(_))
        ));

        std::fs::create_dir_all(tmp.path().join("build")).unwrap();
        lc.adopt_build().unwrap();
        assert_eq!(lc.phase(), Phase::Built);
    }

    #[test]
    fn test_package_after_adopted_build() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("build")).unwrap();
        std::fs::write(tmp.path().join("build/libvka.a"), b"x").unwrap();
        std::fs::create_dir_all(tmp.path().join("src")).unwrap();
        std::fs::write(tmp.path().join("src/vka.hpp"), b"x").unwrap();

        let mut lc = lifecycle(tmp.path());
        lc.adopt_build().unwrap();
        let copied = lc.package().unwrap();

        assert_eq!(lc.phase(), Phase::Packaged);
        assert_eq!(copied.len(), 2);
        assert!(tmp.path().join("package/lib/libvka.a").exists());
        assert!(tmp.path().join("package/include/vka.hpp").exists());
    }
}
