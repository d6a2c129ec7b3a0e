//! Shader-binding generator
//!
//! Reads the GLSL sources named by a [`ShaderManifest`], links each program's
//! vertex and fragment slots, and renders `shaders.h` / `shaders.cc`:
//!
//! - one `k<Name>Src` string constant per shader object (shared by programs)
//! - one `Shader` subclass per program with a location accessor per slot
//! - one constructor per program that fetches and checks every location

pub mod generator;
pub mod linker;
pub mod parser;
pub mod templates;

use std::collections::BTreeMap;

use crate::error::{GenError, Result};
use crate::manifest::ShaderManifest;
use crate::output::GeneratedFile;
use crate::template::{Bindings, Template};

pub use linker::{Program, link};
pub use parser::{ShaderSource, Slot, SlotKind, parse_shader};

/// Render both output files for `manifest`. Nothing is written.
pub fn generate(manifest: &ShaderManifest) -> Result<Vec<GeneratedFile>> {
    let mut shaders = BTreeMap::new();
    for (name, path) in &manifest.shaders {
        let path = manifest.resolve(path);
        let text = std::fs::read_to_string(&path).map_err(|e| GenError::io(&path, e))?;
        shaders.insert(name.clone(), parse_shader(name, &text));
    }

    let class_template = Template::parse("program class", templates::PROGRAM_CLASS)?;
    let ctor_template = Template::parse("program constructor", templates::PROGRAM_CTOR)?;

    let mut headers = Vec::new();
    let mut implementations = Vec::new();
    for entry in &manifest.programs {
        let vertex = lookup(&shaders, &entry.name, &entry.vertex)?;
        let fragment = lookup(&shaders, &entry.name, &entry.fragment)?;
        let program = link(&entry.name, vertex, fragment)?;

        let bindings = generator::program_bindings(&program);
        headers.push(class_template.render(&bindings)?);
        implementations.push(ctor_template.render(&bindings)?);
    }

    let sources: Vec<String> = shaders.values().map(generator::quoted_source).collect();

    let mut bindings = Bindings::new();
    bindings
        .insert("Headers", headers.join("\n\n"))
        .insert("Implementations", implementations.join("\n\n"))
        .insert("Sources", sources.join("\n\n"))
        .insert("Guard", manifest.include_guard())
        .insert("HeaderInclude", manifest.header_include())
        .insert("BaseInclude", manifest.output.base_include.as_str())
        .insert("Namespace", manifest.output.namespace.as_str());

    let header = Template::parse("shaders header", templates::HEADER)?.render(&bindings)?;
    let implementation =
        Template::parse("shaders implementation", templates::IMPLEMENTATION)?.render(&bindings)?;

    tracing::debug!(
        shaders = shaders.len(),
        programs = manifest.programs.len(),
        "rendered shader bindings"
    );

    Ok(vec![
        GeneratedFile::new(manifest.header_path(), header),
        GeneratedFile::new(manifest.implementation_path(), implementation),
    ])
}

fn lookup<'a>(
    shaders: &'a BTreeMap<String, ShaderSource>,
    program: &str,
    shader: &str,
) -> Result<&'a ShaderSource> {
    shaders.get(shader).ok_or_else(|| GenError::UnknownShader {
        program: program.to_string(),
        shader: shader.to_string(),
    })
}
