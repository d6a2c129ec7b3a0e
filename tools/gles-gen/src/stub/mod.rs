//! OpenGL ES stub generator
//!
//! Parses the `entry_points` declaration file and fills `*.in` templates:
//! `$ManualStubs` receives the `MANUAL` entry points, `$AutoStubs` everything
//! else. The output of `foo.c.in` is `foo.c` next to it.

pub mod classify;
pub mod generator;
pub mod parser;

use std::path::{Path, PathBuf};

use crate::error::{GenError, Result};
use crate::output::GeneratedFile;
use crate::template::{Bindings, Template};

pub use classify::{Sections, classify};
pub use generator::{StubContext, render_stub};
pub use parser::{Arg, EntryPoint, Filter, parse_entry_points};

/// Suffix marking a file as a template.
pub const TEMPLATE_SUFFIX: &str = ".in";

/// Render every template against the declarations in `entry_points`. Nothing is written.
pub fn generate(
    entry_points: &Path,
    templates: &[PathBuf],
    context: &StubContext,
) -> Result<Vec<GeneratedFile>> {
    let text = read(entry_points)?;
    let entries = parse_entry_points(&display_name(entry_points), &text)?;
    let sections = classify(&entries)?;
    let bindings = generator::section_bindings(&sections, context)?;

    templates
        .iter()
        .map(|template| render_template(template, &bindings))
        .collect()
}

/// `gles2_stub.c.in` -> `gles2_stub.c`.
///
/// # Errors
///
/// Returns `GenError::NotATemplate` if the file name lacks the `.in` suffix.
pub fn output_path(template: &Path) -> Result<PathBuf> {
    template
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX))
        .filter(|stem| !stem.is_empty())
        .map(|stem| template.with_file_name(stem))
        .ok_or_else(|| GenError::NotATemplate {
            path: template.to_path_buf(),
        })
}

fn render_template(path: &Path, bindings: &Bindings) -> Result<GeneratedFile> {
    let output = output_path(path)?;
    let name = display_name(path);
    let template = Template::parse(name.as_str(), &read(path)?)?;

    let mut contents = format!("/* Auto-Generated from \"{name}\".  DO NOT EDIT! */\n");
    contents.push_str(&template.render(bindings)?);

    tracing::debug!(template = template.name(), output = %output.display(), "rendered stub template");
    Ok(GeneratedFile::new(output, contents))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))
}

/// File name only, so generated banners don't depend on the invocation directory.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("khronos/gles2_stub.c.in")).unwrap(),
            Path::new("khronos/gles2_stub.c")
        );
        assert!(matches!(
            output_path(Path::new("khronos/gles2_stub.c")),
            Err(GenError::NotATemplate { .. })
        ));
        assert!(output_path(Path::new(".in")).is_err());
    }

    #[test]
    fn test_generate_single_template() {
        let dir = tempdir().unwrap();
        let entry_points = dir.path().join("entry_points");
        let template = dir.path().join("stub.c.in");
        fs::write(&entry_points, "STUB(void glFlush(void))\n").unwrap();
        fs::write(&template, "// manual\n$ManualStubs\n// auto\n$AutoStubs\n").unwrap();

        let files = generate(&entry_points, &[template], &StubContext::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, dir.path().join("stub.c"));
        assert_eq!(
            files[0].contents,
            "/* Auto-Generated from \"stub.c.in\".  DO NOT EDIT! */\n\
             // manual\n\n// auto\nvoid glFlush(void) {\n}\n"
        );
    }

    #[test]
    fn test_unknown_placeholder_fails() {
        let dir = tempdir().unwrap();
        let entry_points = dir.path().join("entry_points");
        let template = dir.path().join("stub.c.in");
        fs::write(&entry_points, "").unwrap();
        fs::write(&template, "$ManualStubs $ExtraStubs\n").unwrap();

        let err = generate(&entry_points, &[template], &StubContext::default()).unwrap_err();
        assert!(matches!(
            err,
            GenError::MissingBinding { placeholder, .. } if placeholder == "ExtraStubs"
        ));
    }
}
