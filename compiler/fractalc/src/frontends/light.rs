//! Light sources in the textual Linear format.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fractal_ir::{text, AttributeType, Frontend, Language, LinearArena, LinearId, Script, TypeDef, TypeTable};

use super::literal::{self, BOOL, CHAR, FLOAT, INT, STRING};

/// Built-in types of Light and their C++ spelling.
#[derive(Clone, Copy, Debug, Default)]
pub struct LightTypes;

impl TypeTable for LightTypes {
    fn get(&self, name: &str) -> Option<TypeDef> {
        let (reference, native) = match name {
            "int" => (Some(INT), "int"),
            "float" => (Some(FLOAT), "float"),
            "double" => (Some(FLOAT), "double"),
            "string" => (Some(STRING), "std::string"),
            "bool" => (Some(BOOL), "bool"),
            "char" => (Some(CHAR), "char"),
            "void" => (None, "void"),
            _ => return None,
        };
        Some(TypeDef::new(name, reference, native))
    }

    fn attribute_type(&self, text: &str) -> AttributeType {
        literal::classify(text)
    }

    fn string_format(&self, text: &str) -> String {
        literal::escape(text)
    }

    fn convert_literal(&self, text: &str, from: &AttributeType, to: &TypeDef) -> String {
        literal::convert(text, from.reference.as_deref(), to.attribute_reference.as_deref())
    }
}

/// Reads `.light` files written in the textual Linear format.
#[derive(Clone, Debug, Default)]
pub struct LinearTextFrontend {
    types: Arc<LightTypes>,
}

impl LinearTextFrontend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontend for LinearTextFrontend {
    fn language(&self) -> Language {
        Language::Light
    }

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Script>> {
        let source = fs::read_to_string(path)?;
        Ok(Box::new(LinearTextScript {
            path: path.to_path_buf(),
            source,
        }))
    }

    fn types(&self) -> Arc<dyn TypeTable> {
        self.types.clone()
    }
}

struct LinearTextScript {
    path: PathBuf,
    source: String,
}

impl Script for LinearTextScript {
    fn linear(&mut self, arena: &mut LinearArena) -> Option<LinearId> {
        match text::parse(&self.source, arena) {
            Ok(root) => Some(root),
            Err(error) => {
                tracing::error!(file = %self.path.display(), %error, "malformed Linear text");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
