//! Build system hosts that accept generated source roots

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::application::BuildHost;

/// Environment variable a `build.rs` run exports for the generated sources
pub const SOURCE_ROOT_ENV: &str = "SWAGGER_CODEGEN_SOURCE_ROOT";

/// A project rooted at a build directory, collecting its compile source roots
#[derive(Debug, Clone)]
pub struct ProjectBuildHost {
    build_dir: PathBuf,
    compile_source_roots: Vec<PathBuf>,
}

impl ProjectBuildHost {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
            compile_source_roots: Vec::new(),
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Where generated sources go unless an output directory is given
    pub fn default_output_dir(&self) -> PathBuf {
        self.build_dir.join("generated-sources").join("swagger")
    }

    /// Registered roots, in registration order
    pub fn compile_source_roots(&self) -> &[PathBuf] {
        &self.compile_source_roots
    }
}

impl Default for ProjectBuildHost {
    fn default() -> Self {
        Self::new("target")
    }
}

impl BuildHost for ProjectBuildHost {
    fn add_compile_source_root(&mut self, root: &Path) -> io::Result<()> {
        if self.compile_source_roots.iter().any(|known| known == root) {
            debug!(root = %root.display(), "Compile source root already registered");
            return Ok(());
        }
        self.compile_source_roots.push(root.to_path_buf());
        Ok(())
    }
}

/// Reports source roots to cargo from a build script
#[derive(Debug)]
pub struct CargoBuildHost<W: Write> {
    out: W,
    registered: Vec<PathBuf>,
}

impl CargoBuildHost<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CargoBuildHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            registered: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BuildHost for CargoBuildHost<W> {
    fn add_compile_source_root(&mut self, root: &Path) -> io::Result<()> {
        if self.registered.iter().any(|known| known == root) {
            return Ok(());
        }
        writeln!(self.out, "cargo:rustc-env={SOURCE_ROOT_ENV}={}", root.display())?;
        self.out.flush()?;
        self.registered.push(root.to_path_buf());
        Ok(())
    }
}
