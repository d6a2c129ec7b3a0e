//! Error type shared by both generator pipelines

use std::fmt;
use std::path::PathBuf;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, GenError>;

/// Where a declaration came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Shader name or declaration file name.
    pub scope: String,
    /// 1-based line number.
    pub line: usize,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope, self.line)
    }
}

/// Every way a generation run can fail.
///
/// All variants are fatal: the run aborts before any output file is written.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid shader manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{origin}: malformed declaration `{text}`: {reason}")]
    MalformedDeclaration {
        origin: Origin,
        text: String,
        reason: String,
    },

    #[error(
        "program {program}: slot `{name}` declared as `{first}` ({first_origin}) and as `{second}` ({second_origin})"
    )]
    SlotConflict {
        program: String,
        name: String,
        first: String,
        first_origin: Origin,
        second: String,
        second_origin: Origin,
    },

    #[error("entry point `{name}` declared twice ({first} and {second})")]
    DuplicateEntryPoint {
        name: String,
        first: Origin,
        second: Origin,
    },

    #[error("{origin}: GEN entry point `{name}` takes {found} arguments, expected 2 (count, names)")]
    GenArity {
        name: String,
        origin: Origin,
        found: usize,
    },

    #[error("template {template}: no value bound for placeholder `${placeholder}`")]
    MissingBinding { template: String, placeholder: String },

    #[error("template {template}:{line}:{column}: invalid placeholder")]
    InvalidPlaceholder {
        template: String,
        line: usize,
        column: usize,
    },

    #[error("{} is not a template (expected a `.in` suffix)", path.display())]
    NotATemplate { path: PathBuf },

    #[error("program {program} references unknown shader `{shader}`")]
    UnknownShader { program: String, shader: String },

    #[error("program {name} is registered more than once")]
    DuplicateProgram { name: String },

    #[error("{kind} name `{name}` is not a C identifier")]
    InvalidName { kind: &'static str, name: String },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}
