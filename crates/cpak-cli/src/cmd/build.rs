//! The `build` command.

use std::path::Path;

use anyhow::{Context, Result};
use cpak_core::{Layout, Lifecycle, Recipe};

use crate::ProfileArgs;

/// Evaluate the project's recipe and run the build hook.
pub fn build(path: &Path, profile: &ProfileArgs) -> Result<()> {
    let output = crate::ui::Output::new();
    let mut lifecycle = evaluate(path, profile)?;
    let pkg = lifecycle.evaluated().recipe.package.clone();

    lifecycle.build()?;
    output.success(&format!("Built {}/{}", pkg.name, pkg.version));
    Ok(())
}

/// Load and evaluate the recipe at `path` into a fresh lifecycle.
pub(crate) fn evaluate(path: &Path, profile: &ProfileArgs) -> Result<Lifecycle> {
    let layout = Layout::new(path);
    tracing::debug!(root = %layout.root().display(), "Evaluating recipe");
    let recipe = Recipe::load(&layout.recipe_path())
        .with_context(|| format!("Failed to load {}", layout.recipe_path().display()))?;
    let evaluated = recipe.evaluate(profile.settings()?, &profile.overrides()?)?;
    Ok(Lifecycle::new(evaluated, layout))
}
