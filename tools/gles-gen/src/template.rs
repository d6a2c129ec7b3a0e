//! Named-placeholder templates
//!
//! Placeholders are written `$Name` or `${Name}`; `$$` is a literal dollar sign.
//! Substitution is a single, non-recursive pass: bound values are inserted as-is
//! even if they contain `$` themselves.

use std::collections::BTreeMap;

use crate::error::{GenError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

/// A parsed output document.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

/// Placeholder name -> pre-rendered substitution text.
///
/// Ordered so that anything iterating the bindings stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: BTreeMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl Template {
    /// Parse `text` into literal and placeholder segments.
    ///
    /// `name` is only used in error messages.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(pos) = rest.find('$') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(tail) = after.strip_prefix('$') {
                literal.push('$');
                rest = tail;
                continue;
            }

            let braced = after
                .strip_prefix('{')
                .and_then(|inner| inner.find('}').map(|end| &inner[..end]));
            let (ident, consumed) = match braced {
                Some(ident) if identifier_len(ident) == ident.len() && !ident.is_empty() => {
                    (ident, ident.len() + 2)
                }
                Some(_) => return Err(invalid_placeholder(&name, text, rest, pos)),
                None if after.starts_with('{') => {
                    return Err(invalid_placeholder(&name, text, rest, pos));
                }
                None => match identifier_len(after) {
                    0 => return Err(invalid_placeholder(&name, text, rest, pos)),
                    len => (&after[..len], len),
                },
            };

            if !literal.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(ident.to_string()));
            rest = &after[consumed..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Text(literal));
        }

        Ok(Self { name, segments })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placeholder names in document order (repeats included).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Substitute every placeholder.
    ///
    /// # Errors
    ///
    /// Returns `GenError::MissingBinding` for the first placeholder without a value.
    pub fn render(&self, bindings: &Bindings) -> Result<String> {
        let mut output = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Placeholder(name) => {
                    let value = bindings.get(name).ok_or_else(|| GenError::MissingBinding {
                        template: self.name.clone(),
                        placeholder: name.clone(),
                    })?;
                    output.push_str(value);
                }
            }
        }

        for unused in bindings
            .names()
            .filter(|name| !self.placeholders().any(|p| p == *name))
        {
            tracing::debug!(template = %self.name, binding = unused, "binding not referenced");
        }

        Ok(output)
    }
}

/// Length in bytes of the identifier at the start of `s` (0 if none).
fn identifier_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let ok = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !ok {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}

fn invalid_placeholder(name: &str, text: &str, rest: &str, pos: usize) -> GenError {
    let offset = text.len() - rest.len() + pos;
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;

    GenError::InvalidPlaceholder {
        template: name.to_string(),
        line,
        column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> Bindings {
        let mut b = Bindings::new();
        for (k, v) in pairs {
            b.insert(*k, *v);
        }
        b
    }

    #[test]
    fn test_simple_and_braced_placeholders() {
        let template = Template::parse("t", "class $Name {\n  ${Name}Impl x;\n};\n").unwrap();
        let out = template.render(&bindings(&[("Name", "Foo")])).unwrap();
        assert_eq!(out, "class Foo {\n  FooImpl x;\n};\n");
    }

    #[test]
    fn test_dollar_escape() {
        let template = Template::parse("t", "cost: $$5 $X").unwrap();
        assert_eq!(template.render(&bindings(&[("X", "!")])).unwrap(), "cost: $5 !");
    }

    #[test]
    fn test_placeholders_in_order() {
        let template = Template::parse("t", "$ManualStubs\n\n$AutoStubs\n$ManualStubs").unwrap();
        let names: Vec<_> = template.placeholders().collect();
        assert_eq!(names, ["ManualStubs", "AutoStubs", "ManualStubs"]);
    }

    #[test]
    fn test_substitution_is_not_recursive() {
        let template = Template::parse("t", "$A").unwrap();
        let out = template
            .render(&bindings(&[("A", "$B"), ("B", "never")]))
            .unwrap();
        assert_eq!(out, "$B");
    }

    #[test]
    fn test_missing_binding_is_fatal() {
        let template = Template::parse("shaders.h", "$Headers $Sources").unwrap();
        assert_eq!(template.name(), "shaders.h");
        let err = template
            .render(&bindings(&[("Headers", "")]))
            .unwrap_err();
        match err {
            GenError::MissingBinding {
                template,
                placeholder,
            } => {
                assert_eq!(template, "shaders.h");
                assert_eq!(placeholder, "Sources");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unused_bindings_are_tolerated() {
        let template = Template::parse("t", "plain text").unwrap();
        let out = template.render(&bindings(&[("Extra", "x")])).unwrap();
        assert_eq!(out, "plain text");
    }

    #[test]
    fn test_invalid_placeholder_reports_position() {
        let err = Template::parse("t", "ok\n  cost $5").unwrap_err();
        match err {
            GenError::InvalidPlaceholder { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 8);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(Template::parse("t", "${unterminated").is_err());
        assert!(Template::parse("t", "${1bad}").is_err());
        assert!(Template::parse("t", "trailing $").is_err());
    }

    #[test]
    fn test_identifier_stops_at_punctuation() {
        let template = Template::parse("t", "$Name::$Name()").unwrap();
        let out = template.render(&bindings(&[("Name", "Shader")])).unwrap();
        assert_eq!(out, "Shader::Shader()");
    }
}
