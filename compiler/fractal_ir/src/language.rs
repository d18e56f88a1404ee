//! Source languages understood by the translator.

use std::fmt;
use std::path::Path;

/// Language a source file is written in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Language {
    /// Light sources (`.light`), translated to C++ headers.
    Light,
    /// Native C++ headers (`.h`, `.hpp`), consumed as-is.
    Cpp,
}

impl Language {
    /// Extension used for Light sources.
    pub const LIGHT_EXTENSION: &'static str = "light";

    /// Select the language for a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            Self::LIGHT_EXTENSION => Some(Language::Light),
            "h" | "hpp" => Some(Language::Cpp),
            _ => None,
        }
    }

    /// Select the language for a path by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether `path` names a source file some language claims.
    pub fn is_source_file(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Light => write!(f, "Light"),
            Language::Cpp => write!(f, "C++"),
        }
    }
}
