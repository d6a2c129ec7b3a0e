//! Grouping entry points into the manual and autogenerated template sections

use std::collections::HashMap;

use crate::error::{GenError, Result};

use super::parser::{EntryPoint, Filter};

/// Entry points split by template section, each in declaration order.
#[derive(Debug, Default)]
pub struct Sections<'a> {
    /// `MANUAL` entry points.
    pub manual: Vec<&'a EntryPoint>,
    /// `STUB` and `GEN` entry points.
    pub auto: Vec<&'a EntryPoint>,
}

impl Sections<'_> {
    pub fn len(&self) -> usize {
        self.manual.len() + self.auto.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify entry points by filter.
///
/// # Errors
///
/// Returns `GenError::DuplicateEntryPoint` if a function is declared twice.
pub fn classify(entries: &[EntryPoint]) -> Result<Sections<'_>> {
    let mut seen: HashMap<&str, &EntryPoint> = HashMap::new();
    let mut sections = Sections::default();

    for entry in entries {
        if let Some(first) = seen.insert(entry.name.as_str(), entry) {
            return Err(GenError::DuplicateEntryPoint {
                name: entry.name.clone(),
                first: first.origin.clone(),
                second: entry.origin.clone(),
            });
        }

        match entry.filter {
            Filter::Manual => sections.manual.push(entry),
            Filter::Stub | Filter::Gen => sections.auto.push(entry),
        }
    }

    tracing::debug!(
        manual = sections.manual.len(),
        auto = sections.auto.len(),
        "classified entry points"
    );
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::parser::parse_entry_points;

    const ENTRY_POINTS: &str = "\
STUB(void glFlush(void))
GEN(void glGenBuffers(GLsizei n, GLuint* buffers))
MANUAL(void glBindTexture(GLenum target, GLuint texture))
STUB(GLenum glGetError(void))
MANUAL(void glDeleteTextures(GLsizei n, const GLuint* textures))
";

    #[test]
    fn test_sections_keep_input_order() {
        let entries = parse_entry_points("entry_points", ENTRY_POINTS).unwrap();
        let sections = classify(&entries).unwrap();

        let manual: Vec<_> = sections.manual.iter().map(|e| e.name.as_str()).collect();
        let auto: Vec<_> = sections.auto.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(manual, ["glBindTexture", "glDeleteTextures"]);
        assert_eq!(auto, ["glFlush", "glGenBuffers", "glGetError"]);
        assert_eq!(sections.len(), 5);
    }

    #[test]
    fn test_duplicate_entry_point() {
        let text = "STUB(void glFlush(void))\n\nMANUAL(void glFlush(void))\n";
        let entries = parse_entry_points("entry_points", text).unwrap();

        match classify(&entries).unwrap_err() {
            GenError::DuplicateEntryPoint {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "glFlush");
                assert_eq!(first.line, 1);
                assert_eq!(second.line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let sections = classify(&[]).unwrap();
        assert!(sections.is_empty());
    }
}
