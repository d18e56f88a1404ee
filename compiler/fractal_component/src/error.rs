//! Errors raised while building, resolving and emitting the component tree.
//!
//! Every error is fatal for the compilation that raised it; callers treat a
//! failed compile as producing no trustworthy output.

use std::io;
use std::path::PathBuf;

use fractal_ir::Language;

pub type Result<T, E = ComponentError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// A dotted name could not be resolved.
    #[error("`{path}` not found")]
    NotFound {
        /// Dotted path up to and including the failing segment.
        path: String,
    },

    #[error("path `{}` does not exist", .path.display())]
    BadPath { path: PathBuf },

    #[error("no language handles `{}`", .path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("no frontend registered for {language}")]
    MissingFrontend { language: Language },

    #[error("frontend produced no Linear for `{}`", .path.display())]
    Frontend { path: PathBuf },

    #[error("cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid type for `{subject}`")]
    InvalidType { subject: String },

    #[error("type mismatch for `{subject}`: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        subject: String,
        expected: String,
        found: String,
    },

    #[error("emission of {what} `{name}` is not implemented")]
    Unimplemented { what: &'static str, name: String },

    #[error("operation `{op}` not permitted in {container} `{name}`")]
    OperationNotPermitted {
        op: String,
        container: &'static str,
        name: String,
    },

    #[error("`{name}` is a native function, not a component")]
    NativeNotComponent { name: String },

    #[error("`{name}` does not belong to any project")]
    NoProject { name: String },
}

impl ComponentError {
    #[cold]
    pub fn not_found(path: impl Into<String>) -> Self {
        ComponentError::NotFound { path: path.into() }
    }

    #[cold]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ComponentError::Io {
            path: path.into(),
            source,
        }
    }

    #[cold]
    pub fn mismatch(
        subject: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        ComponentError::TypeMismatch {
            subject: subject.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}
