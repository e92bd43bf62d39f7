//! The `check` command: validate a recipe and print its surface.

use std::path::Path;

use anyhow::{Context, Result};
use cpak_core::{Layout, Recipe};

/// Parse the project's recipe and print identity, settings, options,
/// generators, and dependency coordinates.
pub fn check(path: &Path) -> Result<()> {
    let layout = Layout::new(path);
    let content = std::fs::read_to_string(layout.recipe_path())
        .with_context(|| format!("Failed to read {}", layout.recipe_path().display()))?;
    let output = crate::ui::Output::new();

    let recipe = Recipe::parse(&content).context("Failed to parse recipe")?;
    output.success("Recipe is valid");
    println!("  Name: {}", recipe.package.name);
    println!("  Version: {}", recipe.package.version);
    if !recipe.package.description.is_empty() {
        println!("  Description: {}", recipe.package.description);
    }
    println!("  Settings: {}", recipe.settings.join(", "));
    println!(
        "  Generators: {}",
        recipe
            .generators
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    if recipe.requires.is_empty() {
        output.warning("No dependencies declared");
    } else {
        println!("  Requires:");
        for dep in &recipe.requires {
            println!("    {dep}");
        }
    }

    Ok(())
}
