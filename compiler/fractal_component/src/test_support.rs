//! Fixtures shared by the unit tests: a frontend reading the textual
//! Linear format for both languages and a small type table.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fractal_ir::{
    text, AttributeType, Frontend, Language, LinearArena, LinearId, Script, TypeDef, TypeTable,
};

use crate::{Frontends, SymbolTree};

pub(crate) struct TestTypes;

impl TypeTable for TestTypes {
    fn get(&self, name: &str) -> Option<TypeDef> {
        let def = match name {
            "int" => TypeDef::new("int", Some("int"), "int"),
            "float" => TypeDef::new("float", Some("float"), "float"),
            "string" => TypeDef::new("string", Some("string"), "std::string"),
            "bool" => TypeDef::new("bool", Some("bool"), "bool"),
            "void" => TypeDef::new("void", None, "void"),
            _ => return None,
        };
        Some(def)
    }

    fn attribute_type(&self, text: &str) -> AttributeType {
        if text.starts_with('"') {
            AttributeType::value("string")
        } else if text == "true" || text == "false" {
            AttributeType::value("bool")
        } else if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
            AttributeType::value("int")
        } else if text.contains('.') && text.chars().all(|c| c.is_ascii_digit() || c == '.') {
            AttributeType::value("float")
        } else if text.starts_with(|c: char| c.is_alphabetic() || c == '_')
            && text.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            AttributeType::name()
        } else {
            AttributeType::invalid()
        }
    }

    fn string_format(&self, text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }

    fn convert_literal(&self, text: &str, _from: &AttributeType, to: &TypeDef) -> String {
        match to.name.as_str() {
            "string" => format!("\"{text}\""),
            "float" => format!("{text}.0"),
            "int" => text.split('.').next().unwrap_or(text).to_string(),
            _ => text.to_string(),
        }
    }
}

pub(crate) struct TextFrontend(pub(crate) Language);

struct TextScript(String);

impl Script for TextScript {
    fn linear(&mut self, arena: &mut LinearArena) -> Option<LinearId> {
        text::parse(&self.0, arena).ok()
    }
}

impl Frontend for TextFrontend {
    fn language(&self) -> Language {
        self.0
    }

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Script>> {
        Ok(Box::new(TextScript(fs::read_to_string(path)?)))
    }

    fn types(&self) -> Arc<dyn TypeTable> {
        Arc::new(TestTypes)
    }
}

pub(crate) fn frontends() -> Frontends {
    Frontends::new()
        .with(Arc::new(TextFrontend(Language::Light)))
        .with(Arc::new(TextFrontend(Language::Cpp)))
}

pub(crate) fn tree() -> SymbolTree {
    SymbolTree::new(frontends())
}

/// Write `contents` to `root/relative`, creating directories.
pub(crate) fn put(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}
