//! GLSL slot extraction
//!
//! Only top-level `uniform` / `attribute` declarations are recognised. A line
//! declaring several variables yields the last one. Everything else is ordinary
//! shader text and is kept verbatim.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Origin;

static SLOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(uniform|attribute)\s+((?:[^\s;]+\s+)+)([A-Za-z_][A-Za-z0-9_]*)\s*;")
        .expect("slot pattern is valid")
});

/// Binding point category of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SlotKind {
    Uniform,
    Attribute,
}

impl SlotKind {
    /// GLSL qualifier keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            SlotKind::Uniform => "uniform",
            SlotKind::Attribute => "attribute",
        }
    }

    /// C++ type used to store the slot's location.
    pub fn storage_type(self) -> &'static str {
        match self {
            SlotKind::Uniform | SlotKind::Attribute => "GLint",
        }
    }

    /// Infix of the `glGet*Location` lookup function.
    pub fn location_fn(self) -> &'static str {
        match self {
            SlotKind::Uniform => "Uniform",
            SlotKind::Attribute => "Attrib",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "uniform" => Some(SlotKind::Uniform),
            "attribute" => Some(SlotKind::Attribute),
            _ => None,
        }
    }
}

/// A uniform or attribute declared by a shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub kind: SlotKind,
    /// Type tokens joined by single spaces, e.g. `lowp vec4`.
    pub ty: String,
    pub name: String,
    pub origin: Origin,
}

impl Slot {
    /// Whether two declarations of the same name describe the same slot.
    pub fn same_declaration(&self, other: &Slot) -> bool {
        self.kind == other.kind && self.ty == other.ty
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.keyword(), self.ty)
    }
}

/// One parsed shader object.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    /// Logical name from the manifest, e.g. `TexColorVertex`.
    pub name: String,
    /// Source lines without their line terminators.
    pub lines: Vec<String>,
    /// Slots in declaration order.
    pub slots: Vec<Slot>,
}

impl ShaderSource {
    /// Name of the C string constant holding this shader's source.
    pub fn source_name(&self) -> String {
        format!("k{}Src", self.name)
    }
}

/// Parse a shader's text. Never fails: lines that are not slot declarations are
/// simply part of the source.
pub fn parse_shader(name: &str, source: &str) -> ShaderSource {
    let mut lines = Vec::new();
    let mut slots = Vec::new();

    for (index, line) in source.lines().enumerate() {
        if let Some(slot) = parse_slot(name, index + 1, line) {
            slots.push(slot);
        }
        lines.push(line.to_string());
    }

    tracing::debug!(shader = name, slots = slots.len(), lines = lines.len(), "parsed shader");

    ShaderSource {
        name: name.to_string(),
        lines,
        slots,
    }
}

fn parse_slot(scope: &str, line_number: usize, line: &str) -> Option<Slot> {
    let caps = SLOT_RE.captures(line)?;
    let kind = SlotKind::from_keyword(&caps[1])?;
    let ty = caps[2].split_whitespace().collect::<Vec<_>>().join(" ");

    Some(Slot {
        kind,
        ty,
        name: caps[3].to_string(),
        origin: Origin {
            scope: scope.to_string(),
            line: line_number,
        },
    })
}
