//! C/C++ headers.
//!
//! Only plain function prototypes are understood:
//!
//! ```text
//! int add(int a, int b);
//! const char* name(void);
//! ```
//!
//! Each becomes a `function` instruction with one `param` per argument.
//! Preprocessor lines, comments, type declarations and bodies are skipped.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use fractal_ir::{
    text, AttributeType, Frontend, Language, Linear, LinearArena, LinearId, Script, TypeDef,
    TypeTable,
};

use super::literal::{self, BOOL, CHAR, FLOAT, INT, STRING};

/// Specifiers that carry no type information.
const IGNORED_SPECIFIERS: &[&str] = &["extern", "static", "inline"];

/// Built-in C/C++ types; each is spelled as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct CppTypes;

impl TypeTable for CppTypes {
    fn get(&self, name: &str) -> Option<TypeDef> {
        let reference = match name {
            "int" | "long" | "short" | "unsigned" | "unsigned int" | "long long" | "size_t" => {
                Some(INT)
            }
            "float" | "double" => Some(FLOAT),
            "char" => Some(CHAR),
            "bool" => Some(BOOL),
            "const char*" | "char*" | "std::string" => Some(STRING),
            "void" => None,
            _ => return None,
        };
        Some(TypeDef::new(name, reference, name))
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

/// Reads `.h`/`.hpp` files as lists of function prototypes.
#[derive(Clone, Debug, Default)]
pub struct HeaderFrontend {
    types: Arc<CppTypes>,
}

impl HeaderFrontend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontend for HeaderFrontend {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Script>> {
        Ok(Box::new(HeaderScript {
            source: fs::read_to_string(path)?,
        }))
    }

    fn types(&self) -> Arc<dyn TypeTable> {
        self.types.clone()
    }
}

struct HeaderScript {
    source: String,
}

impl Script for HeaderScript {
    fn linear(&mut self, arena: &mut LinearArena) -> Option<LinearId> {
        let root = arena.alloc(Linear::new(text::ROOT_OP, ""));
        for statement in statements(&self.source) {
            if let Some(prototype) = Prototype::parse(&statement) {
                prototype.lower(arena, root);
            }
        }
        Some(root)
    }
}

/// `;`-terminated statements with comments and preprocessor lines removed.
fn statements(source: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_block_comment = false;

    for line in source.lines() {
        let mut line = line.trim();
        if in_block_comment {
            match line.find("*/") {
                Some(end) => {
                    in_block_comment = false;
                    line = line[end + 2..].trim();
                }
                None => continue,
            }
        }
        if line.starts_with('#') {
            continue;
        }
        let mut code = line;
        if let Some(start) = code.find("//") {
            code = &code[..start];
        }
        if let Some(start) = code.find("/*") {
            if !code[start..].contains("*/") {
                in_block_comment = true;
            }
            code = &code[..start];
        }

        for c in code.chars() {
            if c == ';' {
                out.push(std::mem::take(&mut current).trim().to_string());
            } else {
                current.push(c);
            }
        }
        current.push(' ');
    }
    out
}

/// A parsed `ret name(params)` prototype.
#[derive(Debug, PartialEq)]
struct Prototype {
    name: String,
    ret: String,
    params: Vec<(String, String)>,
}

impl Prototype {
    fn parse(statement: &str) -> Option<Self> {
        if statement.contains('{') || statement.contains('}') {
            return None;
        }
        let open = statement.find('(')?;
        let close = statement.rfind(')')?;
        if close < open || !statement[close + 1..].trim().is_empty() {
            return None;
        }

        let (ret, name) = split_declarator(&statement[..open])?;
        let mut params = Vec::new();
        let list = statement[open + 1..close].trim();
        if !list.is_empty() && list != "void" {
            for (index, param) in list.split(',').enumerate() {
                let param = param.trim();
                let (ty, name) = match split_declarator(param) {
                    Some(pair) => pair,
                    None if !param.is_empty() => (param.to_string(), format!("arg{index}")),
                    None => return None,
                };
                params.push((name, ty));
            }
        }
        Some(Prototype { name, ret, params })
    }

    fn lower(&self, arena: &mut LinearArena, root: LinearId) {
        let function = arena.push_child(root, Linear::new("function", &self.name).with_ret(&self.ret));
        for (name, ty) in &self.params {
            arena.push_child(function, Linear::new("param", name).with_ret(ty));
        }
    }
}

/// Split `const char *name` into (`const char*`, `name`).
///
/// `None` when there is no type before the name.
fn split_declarator(text: &str) -> Option<(String, String)> {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|word| !IGNORED_SPECIFIERS.contains(word))
        .collect();
    let (last, rest) = words.split_last()?;
    if rest.is_empty() {
        return None;
    }

    let name = last.trim_start_matches(['*', '&']);
    if name.is_empty() {
        return None;
    }
    let stars = &last[..last.len() - name.len()];
    let ty = format!("{}{stars}", rest.join(" ")).replace(" *", "*").replace(" &", "&");
    Some((ty, name.to_string()))
}
