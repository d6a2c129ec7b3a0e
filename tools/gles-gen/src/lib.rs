//! Build-time source generators for the GLES window manager backend
//!
//! Two independent pipelines share the template renderer and output writer:
//!
//! - [`shader`]: GLSL sources + `shaders.toml` -> `shaders.h` / `shaders.cc`
//! - [`stub`]: `entry_points` + `*.in` templates -> OpenGL ES stub sources
//!
//! Every output of a run is rendered in memory first; files are only written
//! once the whole run succeeded, each one atomically.

pub mod error;
pub mod manifest;
pub mod output;
pub mod shader;
pub mod stub;
pub mod template;

use std::path::{Path, PathBuf};

pub use error::{GenError, Origin, Result};
pub use manifest::ShaderManifest;
pub use output::GeneratedFile;
pub use stub::StubContext;

/// Render the shader bindings described by the manifest at `manifest_path`.
pub fn render_shaders(manifest_path: &Path) -> Result<Vec<GeneratedFile>> {
    let manifest = ShaderManifest::load(manifest_path)?;
    shader::generate(&manifest)
}

/// Render every stub template against `entry_points`.
pub fn render_stubs(entry_points: &Path, templates: &[PathBuf]) -> Result<Vec<GeneratedFile>> {
    stub::generate(entry_points, templates, &StubContext::default())
}

/// Generate and write `shaders.h` / `shaders.cc`.
pub fn generate_shaders(manifest_path: &Path) -> Result<()> {
    output::write_all(&render_shaders(manifest_path)?)
}

/// Generate and write the output of every stub template.
pub fn generate_stubs(entry_points: &Path, templates: &[PathBuf]) -> Result<()> {
    output::write_all(&render_stubs(entry_points, templates)?)
}

/// Shader outputs that are missing or differ from a fresh render.
pub fn check_shaders(manifest_path: &Path) -> Result<Vec<PathBuf>> {
    output::stale_files(&render_shaders(manifest_path)?)
}

/// Stub outputs that are missing or differ from a fresh render.
pub fn check_stubs(entry_points: &Path, templates: &[PathBuf]) -> Result<Vec<PathBuf>> {
    output::stale_files(&render_stubs(entry_points, templates)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_then_generate_stubs() {
        let dir = tempdir().unwrap();
        let entry_points = dir.path().join("entry_points");
        let template = dir.path().join("stub.c.in");
        fs::write(&entry_points, "STUB(GLenum glGetError(void))\n").unwrap();
        fs::write(&template, "$AutoStubs\n").unwrap();
        let templates = vec![template];

        assert_eq!(
            check_stubs(&entry_points, &templates).unwrap(),
            vec![dir.path().join("stub.c")]
        );

        generate_stubs(&entry_points, &templates).unwrap();
        assert!(check_stubs(&entry_points, &templates).unwrap().is_empty());
    }
}
