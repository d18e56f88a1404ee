//! Literal classification shared by the Light and C++ type tables.

use fractal_ir::AttributeType;

pub(super) const INT: &str = "int";
pub(super) const FLOAT: &str = "float";
pub(super) const STRING: &str = "string";
pub(super) const CHAR: &str = "char";
pub(super) const BOOL: &str = "bool";

/// Classify attribute text as a literal, a (dotted) name, or neither.
pub(super) fn classify(text: &str) -> AttributeType {
    if is_quoted(text, '"') {
        AttributeType::value(STRING)
    } else if is_quoted(text, '\'') {
        AttributeType::value(CHAR)
    } else if text == "true" || text == "false" {
        AttributeType::value(BOOL)
    } else if is_integer(text) {
        AttributeType::value(INT)
    } else if is_float(text) {
        AttributeType::value(FLOAT)
    } else if is_name(text) {
        AttributeType::name()
    } else {
        AttributeType::invalid()
    }
}

fn is_quoted(text: &str, quote: char) -> bool {
    text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote)
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_float(text: &str) -> bool {
    let body = text.strip_suffix('f').unwrap_or(text);
    let body = body.strip_prefix('-').unwrap_or(body);
    match body.split_once('.') {
        Some((whole, fraction)) => {
            !(whole.is_empty() && fraction.is_empty())
                && whole.chars().all(|c| c.is_ascii_digit())
                && fraction.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

fn is_name(text: &str) -> bool {
    !text.is_empty()
        && text.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        })
}

/// Escape `text` for use between double quotes.
pub(super) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Rewrite literal `text` (of kind `from`) as a literal of kind `to`.
pub(super) fn convert(text: &str, from: Option<&str>, to: Option<&str>) -> String {
    match (from, to) {
        (Some(STRING), Some(STRING)) => text.to_string(),
        (_, Some(STRING)) => format!("\"{}\"", escape(text)),
        (Some(INT), Some(FLOAT)) => format!("{text}.0"),
        (Some(BOOL), Some(FLOAT)) => (if text == "true" { "1.0" } else { "0.0" }).to_string(),
        (Some(FLOAT), Some(INT)) => {
            let body = text.strip_suffix('f').unwrap_or(text);
            let whole = body.split('.').next().unwrap_or(body);
            match whole {
                "" | "-" => format!("{whole}0"),
                _ => whole.to_string(),
            }
        }
        (Some(BOOL), Some(INT)) => (if text == "true" { "1" } else { "0" }).to_string(),
        (Some(INT | FLOAT), Some(BOOL)) => {
            let zero = text.trim_start_matches('-').chars().all(|c| matches!(c, '0' | '.' | 'f'));
            (!zero).to_string()
        }
        _ => text.to_string(),
    }
}
