//! Plain-text output helpers for command results.

/// Prints user-facing status lines.
#[derive(Debug, Default)]
pub struct Output;

impl Output {
    /// Create a new output handle.
    pub fn new() -> Self {
        Self
    }

    /// Report a completed step.
    pub fn success(&self, msg: &str) {
        println!("✓ {msg}");
    }

    /// Report neutral information.
    pub fn info(&self, msg: &str) {
        println!("  {msg}");
    }

    /// Report a non-fatal problem.
    pub fn warning(&self, msg: &str) {
        eprintln!("⚠ {msg}");
    }
}
