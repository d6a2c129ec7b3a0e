//! Per-artifact renderers for shader programs

use crate::template::Bindings;

use super::linker::Program;
use super::parser::ShaderSource;

/// Render a shader's source as a C string constant named after the shader.
///
/// ```text
/// static const char* kTexColorVertexSrc =
///     "attribute vec4 pos;\n"
///     "void main() { ... }\n";
/// ```
pub fn quoted_source(shader: &ShaderSource) -> String {
    let mut out = vec![format!("static const char* {} =", shader.source_name())];

    if shader.lines.is_empty() {
        out.push("    \"\";".to_string());
    } else {
        out.extend(
            shader
                .lines
                .iter()
                .map(|line| format!("    \"{}\\n\"", escape_line(line))),
        );
        if let Some(last) = out.last_mut() {
            last.push(';');
        }
    }

    out.join("\n")
}

/// Escape a line for use inside a C string literal.
pub fn escape_line(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `tex_coord` -> `TexCoord`.
///
/// Each `_`-separated part is title-cased: letters following a non-letter are
/// upper-cased, all other letters lower-cased.
pub fn camel_case(identifier: &str) -> String {
    identifier.split('_').map(title_case).collect()
}

fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut after_letter = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

/// Private member declarations holding slot locations.
pub fn slot_storage(program: &Program<'_>) -> String {
    program
        .slots()
        .map(|slot| format!("  {} {}_;", slot.kind.storage_type(), slot.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Public read accessors, one per slot.
pub fn slot_accessors(program: &Program<'_>) -> String {
    program
        .slots()
        .map(|slot| {
            format!(
                "  {} {}Location() const {{ return {}_; }}",
                slot.kind.storage_type(),
                camel_case(&slot.name),
                slot.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Constructor statements looking up each slot's location and checking it exists.
pub fn fetch_slots(program: &Program<'_>) -> String {
    program
        .slots()
        .flat_map(|slot| {
            [
                format!(
                    "  {}_ = glGet{}Location(program(), \"{}\");",
                    slot.name,
                    slot.kind.location_fn(),
                    slot.name
                ),
                format!("  CHECK({}_ >= 0);", slot.name),
            ]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything the program class and constructor templates reference.
pub fn program_bindings(program: &Program<'_>) -> Bindings {
    let mut bindings = Bindings::new();
    bindings
        .insert("ShaderName", program.name.as_str())
        .insert("VertexSource", program.vertex.source_name())
        .insert("FragmentSource", program.fragment.source_name())
        .insert("Accessors", slot_accessors(program))
        .insert("Slots", slot_storage(program))
        .insert("FetchSlots", fetch_slots(program));
    bindings
}
