//! The `build` hook: drive the external CMake generator.
//!
//! The recipe owns no build logic of its own. It configures CMake in
//! verbose mode with the evaluated settings mapped onto cache variables,
//! then invokes the build. Failures propagate unmodified: a non-zero
//! exit from CMake becomes an error carrying the exit code, with the
//! tool's own diagnostics already on the inherited stdio.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use cpak_schema::Generator;

use crate::layout::Layout;
use crate::recipe::EvaluatedRecipe;

/// Driver for the external CMake tool.
#[derive(Debug)]
pub struct CMake<'a> {
    evaluated: &'a EvaluatedRecipe,
    layout: &'a Layout,
    program: PathBuf,
    /// Ask the underlying build system to echo full command lines.
    pub verbose: bool,
}

impl<'a> CMake<'a> {
    /// Locate `cmake` on the search path and bind it to a project.
    ///
    /// # Errors
    ///
    /// Returns an error if no `cmake` executable can be found.
    pub fn new(evaluated: &'a EvaluatedRecipe, layout: &'a Layout) -> Result<Self> {
        let program = which::which("cmake").context("cmake not found on PATH")?;
        Ok(Self {
            evaluated,
            layout,
            program,
            verbose: true,
        })
    }

    /// Run the configure step, emitting any requested generator files
    /// into the build directory first.
    ///
    /// # Errors
    ///
    /// Returns an error if the build directory cannot be created or
    /// CMake exits non-zero.
    pub fn configure(&self) -> Result<()> {
        let build_dir = self.layout.build_dir();
        fs::create_dir_all(&build_dir)?;

        self.emit_generator_files()?;

        let settings = &self.evaluated.settings;
        tracing::info!(
            package = %self.evaluated.recipe.package.name,
            build_type = %settings.build_type,
            "Configuring"
        );

        let mut cmd = Command::new(&self.program);
        cmd.arg("-S")
            .arg(self.layout.root())
            .arg("-B")
            .arg(&build_dir)
            .arg(format!("-DCMAKE_BUILD_TYPE={}", settings.build_type))
            .arg(format!("-DCMAKE_CXX_STANDARD={}", settings.cppstd))
            .arg(format!(
                "-DBUILD_SHARED_LIBS={}",
                if self.evaluated.shared() { "ON" } else { "OFF" }
            ));
        if self.verbose {
            cmd.arg("-DCMAKE_VERBOSE_MAKEFILE=ON");
        }

        let status = cmd.status().context("Failed to execute cmake")?;
        if !status.success() {
            anyhow::bail!("CMake configure failed with exit code: {:?}", status.code());
        }
        Ok(())
    }

    /// Run the build step.
    ///
    /// # Errors
    ///
    /// Returns an error if CMake exits non-zero.
    pub fn build(&self) -> Result<()> {
        tracing::info!(package = %self.evaluated.recipe.package.name, "Building");

        let mut cmd = Command::new(&self.program);
        cmd.arg("--build")
            .arg(self.layout.build_dir())
            .arg("--parallel")
            .arg(num_cpus::get().to_string());
        if self.verbose {
            cmd.arg("--verbose");
        }

        let status = cmd.status().context("Failed to execute cmake --build")?;
        if !status.success() {
            anyhow::bail!("CMake build failed with exit code: {:?}", status.code());
        }
        Ok(())
    }

    /// Write one consumption file per requested generator.
    ///
    /// These expose the evaluated settings and declared dependency
    /// coordinates to the consuming build; the coordinates stay opaque,
    /// resolution is the external dependency service's job.
    fn emit_generator_files(&self) -> Result<()> {
        for generator in &self.evaluated.recipe.generators {
            let (name, content) = match generator {
                Generator::Cmake => ("cpakbuildinfo.cmake", self.render_cmake()),
                Generator::VisualStudio => ("cpakbuildinfo.props", self.render_props()),
            };
            let path = self.layout.build_dir().join(name);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::debug!(file = name, "Emitted generator file");
        }
        Ok(())
    }

    fn render_cmake(&self) -> String {
        let pkg = &self.evaluated.recipe.package;
        let settings = &self.evaluated.settings;
        let mut out = String::new();
        let _ = writeln!(out, "set(CPAK_PACKAGE_NAME \"{}\")", pkg.name);
        let _ = writeln!(out, "set(CPAK_PACKAGE_VERSION \"{}\")", pkg.version);
        let _ = writeln!(out, "set(CPAK_OS \"{}\")", settings.os);
        let _ = writeln!(out, "set(CPAK_COMPILER \"{}\")", settings.compiler);
        let _ = writeln!(out, "set(CPAK_ARCH \"{}\")", settings.arch);
        let _ = writeln!(out, "set(CPAK_CPPSTD \"{}\")", settings.cppstd);
        let requires: Vec<String> = self
            .evaluated
            .recipe
            .requires
            .iter()
            .map(ToString::to_string)
            .collect();
        let _ = writeln!(out, "set(CPAK_REQUIRES \"{}\")", requires.join(";"));
        out
    }

    fn render_props(&self) -> String {
        let pkg = &self.evaluated.recipe.package;
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        out.push_str("<Project ToolsVersion=\"4.0\" xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">\n");
        out.push_str("  <PropertyGroup>\n");
        let _ = writeln!(out, "    <CpakPackageName>{}</CpakPackageName>", pkg.name);
        let _ = writeln!(
            out,
            "    <CpakPackageVersion>{}</CpakPackageVersion>",
            pkg.version
        );
        out.push_str("  </PropertyGroup>\n");
        out.push_str("</Project>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Recipe;
    use cpak_schema::{BuildType, Settings};
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn evaluated() -> EvaluatedRecipe {
        let content = r#"
requires = ["vkaEngine/0.0.1@jeffw387/testing", "Catch2/2.5.0@catchorg/stable"]
generators = ["cmake", "visual_studio"]

[package]
name = "vkaTest1"
version = "0.0.1"

[options.shared]
domain = [true, false]
default = false
"#;
        let settings = Settings {
            os: "linux".to_string(),
            compiler: "gcc".to_string(),
            build_type: BuildType::Debug,
            arch: "x86_64".to_string(),
            cppstd: "17".to_string(),
        };
        Recipe::parse(content)
            .unwrap()
            .evaluate(settings, &BTreeMap::new())
            .unwrap()
    }

    #[test]
    fn test_generator_files_rendered() {
        let tmp = tempdir().unwrap();
        let layout = Layout::new(tmp.path());
        let evaluated = evaluated();
        fs::create_dir_all(layout.build_dir()).unwrap();

        // Render directly; running the real cmake is the binary's job.
        let cmake = CMake {
            evaluated: &evaluated,
            layout: &layout,
            program: PathBuf::from("cmake"),
            verbose: true,
        };
        cmake.emit_generator_files().unwrap();

        let info = fs::read_to_string(layout.build_dir().join("cpakbuildinfo.cmake")).unwrap();
        assert!(info.contains("set(CPAK_PACKAGE_NAME \"vkaTest1\")"));
        assert!(info.contains("vkaEngine/0.0.1@jeffw387/testing;Catch2/2.5.0@catchorg/stable"));

        let props = fs::read_to_string(layout.build_dir().join("cpakbuildinfo.props")).unwrap();
        assert!(props.contains("<CpakPackageName>vkaTest1</CpakPackageName>"));
    }
}
