//! Parser for the `entry_points` declaration file
//!
//! Each declaration sits on one line:
//!
//! ```text
//! GEN(void glGenTextures(GLsizei n, GLuint* textures))
//! ```
//!
//! Lines without a filter marker are ignored. Argument types may not contain
//! parentheses (no function pointers).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GenError, Origin, Result};

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Z]+)\(\s*([^()]*?)\s*\(([^()]*)\)\s*\)\s*$")
        .expect("declaration pattern is valid")
});

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(STUB|GEN|MANUAL)\(").expect("marker pattern is valid"));

/// Body-generation strategy of an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Returns a zero value.
    Stub,
    /// `glGen*`-style: fills an array with fresh names.
    Gen,
    /// Implemented by hand; only the context is fetched.
    Manual,
}

impl Filter {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "STUB" => Some(Filter::Stub),
            "GEN" => Some(Filter::Gen),
            "MANUAL" => Some(Filter::Manual),
            _ => None,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Filter::Stub => "STUB",
            Filter::Gen => "GEN",
            Filter::Manual => "MANUAL",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Function argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub ty: String,
    pub name: String,
}

/// One declared API function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub filter: Filter,
    pub return_type: String,
    pub name: String,
    pub args: Vec<Arg>,
    pub origin: Origin,
}

impl EntryPoint {
    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }

    /// C parameter list, `void` when there are no arguments.
    pub fn typed_args(&self) -> String {
        if self.args.is_empty() {
            return "void".to_string();
        }
        self.args
            .iter()
            .map(|arg| format!("{} {}", arg.ty, arg.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse every declaration in `text`. `scope` names the file in errors.
///
/// # Errors
///
/// Returns `GenError::MalformedDeclaration` for a line that starts with a
/// filter marker but cannot be parsed, or that uses an unknown marker.
pub fn parse_entry_points(scope: &str, text: &str) -> Result<Vec<EntryPoint>> {
    let mut entries = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let origin = Origin {
            scope: scope.to_string(),
            line: index + 1,
        };

        let Some(caps) = DECLARATION_RE.captures(line) else {
            if MARKER_RE.is_match(line) {
                return Err(malformed(
                    origin,
                    line,
                    "expected `FILTER(ReturnType Name(args))` on a single line",
                ));
            }
            continue;
        };

        let Some(filter) = Filter::from_marker(&caps[1]) else {
            let reason = format!("unknown filter `{}`", &caps[1]);
            return Err(malformed(origin, line, &reason));
        };

        let Some((return_type, name)) = split_typed_name(&caps[2]) else {
            return Err(malformed(origin, line, "cannot parse return type and function name"));
        };

        let args = parse_args(&caps[3]).map_err(|arg| {
            let reason = format!("cannot parse argument `{}`", arg.trim());
            malformed(origin.clone(), line, &reason)
        })?;

        entries.push(EntryPoint {
            filter,
            return_type,
            name,
            args,
            origin,
        });
    }

    tracing::debug!(file = scope, entry_points = entries.len(), "parsed entry points");
    Ok(entries)
}

/// Split `void` / empty argument lists and each `type name` argument.
/// On failure returns the offending argument text.
fn parse_args(arg_string: &str) -> std::result::Result<Vec<Arg>, &str> {
    let trimmed = arg_string.trim();
    if trimmed.is_empty() || trimmed == "void" {
        return Ok(Vec::new());
    }

    trimmed
        .split(',')
        .map(|arg| {
            split_typed_name(arg)
                .map(|(ty, name)| Arg { ty, name })
                .ok_or(arg)
        })
        .collect()
}

/// `const GLchar* name` -> (`const GLchar*`, `name`).
///
/// The name is the trailing identifier; the type is everything before it and
/// must be separated from it by whitespace or end in `*`.
fn split_typed_name(text: &str) -> Option<(String, String)> {
    let text = text.trim();
    let name_start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        .last()
        .map(|(i, _)| i)?;

    let (ty, name) = text.split_at(name_start);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if !(ty.ends_with(char::is_whitespace) || ty.ends_with('*')) {
        return None;
    }

    let ty = ty.split_whitespace().collect::<Vec<_>>().join(" ");
    let valid_type = ty.chars().any(|c| c.is_ascii_alphanumeric())
        && ty
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '*' || c == ' ');
    if !valid_type {
        return None;
    }

    Some((ty, name.to_string()))
}

fn malformed(origin: Origin, line: &str, reason: &str) -> GenError {
    GenError::MalformedDeclaration {
        origin,
        text: line.trim().to_string(),
        reason: reason.to_string(),
    }
}
