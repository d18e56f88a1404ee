//! Textual form of Linear.
//!
//! One instruction per line, children indented deeper than their parent:
//!
//! ```text
//! # comment
//! function add : int @inline=true
//!     param a : int
//!     param b : int
//!     return
//!         value a
//! ```
//!
//! A line reads `op [name] [: ret] [@key[=value] ...]`. Names may be quoted
//! string or character literals; quotes are kept verbatim. [`parse`] wraps
//! the top-level instructions in a root node with op [`ROOT_OP`].

use std::fmt::Write as _;

use crate::{Linear, LinearArena, LinearId};

/// Operation of the synthetic root node returned by [`parse`].
pub const ROOT_OP: &str = "file";

/// Error while reading the textual form.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct TextError {
    /// 1-based source line.
    pub line: usize,
    pub message: String,
}

/// Parse `source` into `arena`, returning the root node.
pub fn parse(source: &str, arena: &mut LinearArena) -> Result<LinearId, TextError> {
    let root = arena.alloc(Linear::new(ROOT_OP, ""));
    // (indentation, node) of the currently open instructions
    let mut open: Vec<(usize, LinearId)> = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let indent = indentation(raw);
        while open.last().is_some_and(|&(level, _)| level >= indent) {
            open.pop();
        }
        let parent = open.last().map_or(root, |&(_, id)| id);

        let node = parse_instruction(content).map_err(|message| TextError {
            line: index + 1,
            message,
        })?;
        let id = arena.push_child(parent, node);
        open.push((indent, id));
    }

    Ok(root)
}

/// Render the children of `root` back into the textual form.
pub fn dump(arena: &LinearArena, root: LinearId) -> String {
    let mut out = String::new();
    for &child in &arena.get(root).children {
        dump_node(arena, child, 0, &mut out);
    }
    out
}

fn dump_node(arena: &LinearArena, id: LinearId, depth: usize, out: &mut String) {
    let node = arena.get(id);
    for _ in 0..depth {
        out.push_str("    ");
    }
    out.push_str(&node.op);
    if !node.name.is_empty() {
        out.push(' ');
        out.push_str(&node.name);
    }
    if let Some(ret) = &node.ret {
        let _ = write!(out, " : {ret}");
    }
    for (key, value) in &node.attributes {
        let _ = write!(out, " @{key}={value}");
    }
    out.push('\n');

    for &child in &node.children {
        dump_node(arena, child, depth + 1, out);
    }
}

fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn parse_instruction(content: &str) -> Result<Linear, String> {
    let mut cursor = Cursor::new(content);

    let op = cursor.word();
    let mut node = Linear::new(op, "");
    cursor.skip_whitespace();

    match cursor.peek() {
        Some(quote @ ('"' | '\'')) => node.name = cursor.quoted(quote)?.to_string(),
        Some(':' | '@') | None => {}
        Some(_) => node.name = cursor.word().to_string(),
    }
    cursor.skip_whitespace();

    if cursor.eat(':') {
        cursor.skip_whitespace();
        let ret = cursor.word();
        if ret.is_empty() {
            return Err("missing type after `:`".to_string());
        }
        node.ret = Some(ret.to_string());
        cursor.skip_whitespace();
    }

    while cursor.eat('@') {
        let attribute = cursor.word();
        let (key, value) = attribute.split_once('=').unwrap_or((attribute, "true"));
        if key.is_empty() {
            return Err("empty attribute name".to_string());
        }
        node.attributes.push((key.to_string(), value.to_string()));
        cursor.skip_whitespace();
    }

    if !cursor.rest().is_empty() {
        return Err(format!("unexpected `{}`", cursor.rest()));
    }
    Ok(node)
}

/// Byte cursor over one instruction line.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn word(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Consume a literal delimited by `quote`, honoring backslash escapes.
    fn quoted(&mut self, quote: char) -> Result<&'a str, String> {
        let rest = self.rest();
        let mut escaped = false;
        for (offset, c) in rest.char_indices().skip(1) {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                let end = offset + c.len_utf8();
                self.pos += end;
                return Ok(&rest[..end]);
            }
        }
        Err(format!("unterminated literal `{rest}`"))
    }
}
