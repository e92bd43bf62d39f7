//! Source export staging.
//!
//! A recipe's `exports` patterns select which source-tree files are
//! bundled alongside the package. Patterns are plain globs; a leading
//! `!` negates, and negations win over includes regardless of order
//! (the original manifests list `!build/*` before the catch-all `*`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use walkdir::WalkDir;

/// Stage exported sources from `project_root` into `export_root`.
///
/// Returns the destination paths written, sorted. The export root itself
/// is always excluded so staging into a subdirectory of the project
/// cannot recurse.
///
/// # Errors
///
/// Returns an error if a pattern fails to compile or a selected file
/// cannot be copied.
pub fn stage_sources(
    patterns: &[String],
    project_root: &Path,
    export_root: &Path,
) -> Result<Vec<PathBuf>> {
    let mut includes = Vec::new();
    let mut excludes = Vec::new();
    for raw in patterns {
        if let Some(negated) = raw.strip_prefix('!') {
            excludes.push(compile(negated)?);
        } else {
            includes.push(compile(raw)?);
        }
    }

    let mut staged = Vec::new();

    for entry in WalkDir::new(project_root)
        .into_iter()
        .filter_entry(|e| e.path() != export_root)
        .filter_map(std::result::Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(project_root)
            .context("Walked file outside the project root")?;

        if excludes.iter().any(|p| p.matches_path(rel)) {
            continue;
        }
        if !includes.iter().any(|p| p.matches_path(rel)) {
            continue;
        }

        let dest = export_root.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest)
            .with_context(|| format!("Failed to export {}", rel.display()))?;
        staged.push(dest);
    }

    tracing::debug!(count = staged.len(), "Staged exported sources");
    staged.sort();
    Ok(staged)
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).with_context(|| format!("Invalid export pattern: {pattern}"))
}
