//! Merging vertex and fragment slots into one program

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::{GenError, Result};

use super::parser::{ShaderSource, Slot};

/// A shader program: one vertex and one fragment shader plus their merged slots.
#[derive(Debug, Clone)]
pub struct Program<'a> {
    pub name: String,
    pub vertex: &'a ShaderSource,
    pub fragment: &'a ShaderSource,
    slots: BTreeMap<String, Slot>,
}

impl Program<'_> {
    /// Slots in canonical (lexicographic name) order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Link `vertex` and `fragment` into a program.
///
/// A slot declared identically by both shaders (or twice by one) appears once.
///
/// # Errors
///
/// Returns `GenError::SlotConflict` when the same name is declared with a
/// different kind or type.
pub fn link<'a>(
    name: &str,
    vertex: &'a ShaderSource,
    fragment: &'a ShaderSource,
) -> Result<Program<'a>> {
    let mut slots: BTreeMap<String, Slot> = BTreeMap::new();

    for slot in vertex.slots.iter().chain(&fragment.slots) {
        match slots.entry(slot.name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(slot.clone());
            }
            Entry::Occupied(entry) => {
                let existing = entry.get();
                if !existing.same_declaration(slot) {
                    return Err(GenError::SlotConflict {
                        program: name.to_string(),
                        name: slot.name.clone(),
                        first: existing.to_string(),
                        first_origin: existing.origin.clone(),
                        second: slot.to_string(),
                        second_origin: slot.origin.clone(),
                    });
                }
            }
        }
    }

    tracing::debug!(program = name, slots = slots.len(), "linked program");

    Ok(Program {
        name: name.to_string(),
        vertex,
        fragment,
        slots,
    })
}
