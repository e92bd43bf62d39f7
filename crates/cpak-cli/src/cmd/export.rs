//! The `export` command.

use std::path::Path;

use anyhow::{Context, Result};
use cpak_core::{Layout, Recipe, export::stage_sources};

/// Stage the recipe's exported sources into the export directory.
pub fn export(path: &Path) -> Result<()> {
    let output = crate::ui::Output::new();
    let layout = Layout::new(path);
    let recipe = Recipe::load(&layout.recipe_path())
        .with_context(|| format!("Failed to load {}", layout.recipe_path().display()))?;

    let staged = stage_sources(&recipe.exports, layout.root(), &layout.export_dir())?;
    output.success(&format!(
        "Exported {} file(s) to {}",
        staged.len(),
        layout.export_dir().display()
    ));
    Ok(())
}
