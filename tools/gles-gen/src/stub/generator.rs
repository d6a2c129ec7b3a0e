//! C stub bodies for entry points

use crate::error::{GenError, Result};
use crate::template::Bindings;

use super::classify::Sections;
use super::parser::{EntryPoint, Filter};

/// Signatures longer than this are wrapped at argument boundaries.
pub const LINE_LIMIT: usize = 79;

/// The shared GL context the generated stubs operate on.
///
/// Name allocation for `GEN` entry points goes through this context's counter,
/// never through a global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubContext {
    /// C type of the context struct.
    pub context_type: String,
    /// Expression yielding a pointer to the current context.
    pub accessor: String,
    /// Context field holding the next free object name.
    pub name_counter: String,
}

impl Default for StubContext {
    fn default() -> Self {
        Self {
            context_type: "GlContext".to_string(),
            accessor: "GL_CONTEXT()".to_string(),
            name_counter: "next_name_".to_string(),
        }
    }
}

impl StubContext {
    fn fetch(&self) -> String {
        format!("  {}* gl = {};", self.context_type, self.accessor)
    }
}

/// Render the full definition of one entry point according to its filter.
pub fn render_stub(entry: &EntryPoint, context: &StubContext) -> Result<String> {
    let mut lines = vec![signature(entry)];

    match entry.filter {
        Filter::Stub => {
            if !entry.returns_void() {
                lines.push(format!("  return ({})0;", entry.return_type));
            }
        }
        Filter::Gen => {
            let [count, names] = entry.args.as_slice() else {
                return Err(GenError::GenArity {
                    name: entry.name.clone(),
                    origin: entry.origin.clone(),
                    found: entry.args.len(),
                });
            };
            lines.push(context.fetch());
            lines.push("  GLsizei i;".to_string());
            lines.push(format!("  for (i = 0; i < {}; ++i)", count.name));
            lines.push(format!(
                "    {}[i] = gl->{}++;",
                names.name, context.name_counter
            ));
        }
        Filter::Manual => lines.push(context.fetch()),
    }

    lines.push("}".to_string());
    tracing::debug!(entry_point = %entry.name, filter = %entry.filter, "rendered stub");
    Ok(lines.join("\n"))
}

/// Bindings for `$ManualStubs` and `$AutoStubs`.
pub fn section_bindings(sections: &Sections<'_>, context: &StubContext) -> Result<Bindings> {
    let render = |entries: &[&EntryPoint]| -> Result<String> {
        let stubs = entries
            .iter()
            .map(|entry| render_stub(entry, context))
            .collect::<Result<Vec<_>>>()?;
        Ok(stubs.join("\n\n"))
    };

    let mut bindings = Bindings::new();
    bindings
        .insert("ManualStubs", render(sections.manual.as_slice())?)
        .insert("AutoStubs", render(sections.auto.as_slice())?);
    Ok(bindings)
}

fn signature(entry: &EntryPoint) -> String {
    wrap_signature(
        &format!(
            "{} {}({}) {{",
            entry.return_type,
            entry.name,
            entry.typed_args()
        ),
        LINE_LIMIT,
    )
}

/// Break `line` after commas so that each line stays under `limit` columns.
/// Continuation lines line up with the character after the last `(`.
pub fn wrap_signature(line: &str, limit: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut open_col = 0;

    for (i, part) in line.split(',').enumerate() {
        if i == 0 {
            lines.push(part.to_string());
            continue;
        }

        let part = part.trim_start();
        let last = lines.len() - 1;
        let candidate = format!("{}, {part}", lines[last]);
        if candidate.len() < limit {
            lines[last] = candidate;
        } else {
            lines[last].push(',');
            if let Some(paren) = lines[last].rfind('(') {
                open_col = paren + 1;
            }
            lines.push(format!("{}{}", " ".repeat(open_col), part));
        }
    }

    lines.join("\n")
}
