//! shaders.toml manifest parsing
//!
//! The manifest names every shader object, the programs linked from them and
//! where the generated header/implementation go. Paths are relative to the
//! directory containing the manifest.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GenError, Result};

/// shaders.toml manifest structure
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShaderManifest {
    pub output: OutputSection,
    /// Logical shader name -> GLSL source path.
    pub shaders: BTreeMap<String, PathBuf>,
    #[serde(default)]
    pub programs: Vec<ProgramEntry>,
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Generated file locations and the C++ names baked into them
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub header: PathBuf,
    pub implementation: PathBuf,

    /// How the implementation includes the header. Also determines the include guard.
    /// Default: the header's file name
    pub header_include: Option<String>,

    /// Header declaring the `Shader` base class.
    /// Default: "shader_base.h"
    #[serde(default = "default_base_include")]
    pub base_include: String,

    /// Default: "gles"
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_base_include() -> String {
    "shader_base.h".to_string()
}

fn default_namespace() -> String {
    "gles".to_string()
}

/// A program linked from two shader objects
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramEntry {
    pub name: String,
    pub vertex: String,
    pub fragment: String,
}

impl ShaderManifest {
    /// Read and validate a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&text, path, base_dir)
    }

    /// Parse and validate manifest text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path, base_dir: PathBuf) -> Result<Self> {
        let mut manifest: ShaderManifest = toml::from_str(text).map_err(|source| GenError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        manifest.base_dir = base_dir;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        for name in self.shaders.keys() {
            check_identifier("shader", name)?;
        }

        let mut seen = BTreeSet::new();
        for program in &self.programs {
            check_identifier("program", &program.name)?;
            if !seen.insert(program.name.as_str()) {
                return Err(GenError::DuplicateProgram {
                    name: program.name.clone(),
                });
            }
            for shader in [&program.vertex, &program.fragment] {
                if !self.shaders.contains_key(shader) {
                    return Err(GenError::UnknownShader {
                        program: program.name.clone(),
                        shader: shader.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolve a manifest-relative path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    pub fn header_path(&self) -> PathBuf {
        self.resolve(&self.output.header)
    }

    pub fn implementation_path(&self) -> PathBuf {
        self.resolve(&self.output.implementation)
    }

    /// The `#include` path of the generated header.
    pub fn header_include(&self) -> String {
        match &self.output.header_include {
            Some(include) => include.clone(),
            None => self
                .output
                .header
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Include guard derived from the header include path,
    /// e.g. `window_manager/gles/shaders.h` -> `WINDOW_MANAGER_GLES_SHADERS_H_`.
    pub fn include_guard(&self) -> String {
        let mut guard: String = self
            .header_include()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        guard.push('_');
        guard
    }
}

/// Names end up in generated C++ identifiers (`k<Name>Src`, class names).
fn check_identifier(kind: &'static str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(GenError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[output]
header = "shaders.h"
implementation = "shaders.cc"
header_include = "window_manager/gles/shaders.h"
namespace = "window_manager"

[shaders]
TexColorVertex = "tex_color.glslv"
TexColorFragment = "tex_color.glslf"

[[programs]]
name = "TexColorShader"
vertex = "TexColorVertex"
fragment = "TexColorFragment"
"#;

    fn parse(text: &str) -> Result<ShaderManifest> {
        ShaderManifest::parse(text, Path::new("shaders.toml"), PathBuf::from("gles"))
    }

    #[test]
    fn test_parse_manifest() {
        let manifest = parse(MANIFEST).unwrap();
        assert_eq!(manifest.shaders.len(), 2);
        assert_eq!(manifest.programs.len(), 1);
        assert_eq!(manifest.programs[0].vertex, "TexColorVertex");
        assert_eq!(manifest.output.base_include, "shader_base.h");
        assert_eq!(manifest.output.namespace, "window_manager");
    }

    #[test]
    fn test_paths_resolve_against_manifest_dir() {
        let manifest = parse(MANIFEST).unwrap();
        assert_eq!(manifest.header_path(), Path::new("gles").join("shaders.h"));
        assert_eq!(
            manifest.resolve(&manifest.shaders["TexColorVertex"]),
            Path::new("gles").join("tex_color.glslv")
        );
    }

    #[test]
    fn test_include_guard() {
        let manifest = parse(MANIFEST).unwrap();
        assert_eq!(manifest.include_guard(), "WINDOW_MANAGER_GLES_SHADERS_H_");
    }

    #[test]
    fn test_header_include_defaults_to_file_name() {
        let text = MANIFEST.replace("header_include = \"window_manager/gles/shaders.h\"\n", "");
        let manifest = parse(&text).unwrap();
        assert_eq!(manifest.header_include(), "shaders.h");
        assert_eq!(manifest.include_guard(), "SHADERS_H_");
    }

    #[test]
    fn test_duplicate_program_is_rejected() {
        let text = format!(
            "{MANIFEST}\n[[programs]]\nname = \"TexColorShader\"\nvertex = \"TexColorVertex\"\nfragment = \"TexColorFragment\"\n"
        );
        assert!(matches!(
            parse(&text),
            Err(GenError::DuplicateProgram { name }) if name == "TexColorShader"
        ));
    }

    #[test]
    fn test_unknown_shader_is_rejected() {
        let text = MANIFEST.replace("fragment = \"TexColorFragment\"", "fragment = \"Missing\"");
        assert!(matches!(
            parse(&text),
            Err(GenError::UnknownShader { shader, .. }) if shader == "Missing"
        ));
    }

    #[test]
    fn test_non_identifier_names_are_rejected() {
        let text = MANIFEST.replace("TexColorVertex = ", "tex-color = ");
        assert!(matches!(
            parse(&text),
            Err(GenError::InvalidName { kind: "shader", name }) if name == "tex-color"
        ));

        let text = MANIFEST.replace("name = \"TexColorShader\"", "name = \"2DShader\"");
        assert!(matches!(
            parse(&text),
            Err(GenError::InvalidName { kind: "program", name }) if name == "2DShader"
        ));
    }

    #[test]
    fn test_invalid_toml_is_a_manifest_error() {
        assert!(matches!(
            parse("[output]\nheader = 3\n"),
            Err(GenError::Manifest { .. })
        ));
    }
}
