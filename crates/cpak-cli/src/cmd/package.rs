//! The `package` command.

use std::path::Path;

use anyhow::Result;

use crate::ProfileArgs;

/// Run build then package in their fixed order, or package an existing
/// build tree when `existing` is set.
pub fn package(path: &Path, profile: &ProfileArgs, existing: bool) -> Result<()> {
    let output = crate::ui::Output::new();
    let mut lifecycle = super::build::evaluate(path, profile)?;
    let pkg = lifecycle.evaluated().recipe.package.clone();

    if existing {
        lifecycle.adopt_build()?;
    } else {
        lifecycle.build()?;
        output.success(&format!("Built {}/{}", pkg.name, pkg.version));
    }

    let copied = lifecycle.package()?;
    output.success(&format!(
        "Packaged {}/{}: {} file(s)",
        pkg.name,
        pkg.version,
        copied.len()
    ));
    for file in &copied {
        output.info(&file.display().to_string());
    }
    Ok(())
}
