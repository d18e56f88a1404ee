//! Type-table interface supplied by each language frontend.
//!
//! The table classifies attribute text (literals vs. names), knows the
//! built-in types of its language and how to rewrite a literal into the
//! textual form of another type.

/// How a piece of attribute text was classified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Classification {
    /// Not a valid attribute in this language.
    Invalid,
    /// A symbolic name to be resolved in the component tree.
    Name,
    /// A literal value.
    Value,
}

/// Classification of an attribute plus the built-in type it refers to.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct AttributeType {
    pub classification: Classification,
    /// Name of the built-in type a literal belongs to (`int`, `string`, ...).
    pub reference: Option<String>,
}

impl AttributeType {
    pub fn invalid() -> Self {
        AttributeType {
            classification: Classification::Invalid,
            reference: None,
        }
    }

    pub fn name() -> Self {
        AttributeType {
            classification: Classification::Name,
            reference: None,
        }
    }

    pub fn value(reference: impl Into<String>) -> Self {
        AttributeType {
            classification: Classification::Value,
            reference: Some(reference.into()),
        }
    }
}

/// A built-in type of a language.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeDef {
    /// Name in the source language.
    pub name: String,
    /// Literal kind values of this type are written as, if any.
    pub attribute_reference: Option<String>,
    /// Spelling in generated C++.
    pub native: String,
}

impl TypeDef {
    pub fn new(
        name: impl Into<String>,
        attribute_reference: Option<&str>,
        native: impl Into<String>,
    ) -> Self {
        TypeDef {
            name: name.into(),
            attribute_reference: attribute_reference.map(str::to_string),
            native: native.into(),
        }
    }
}

/// Type table of one language.
pub trait TypeTable {
    /// Look up a built-in type by name.
    fn get(&self, name: &str) -> Option<TypeDef>;

    /// Classify attribute text.
    fn attribute_type(&self, text: &str) -> AttributeType;

    /// Format a string so it can sit between double quotes in output.
    fn string_format(&self, text: &str) -> String;

    /// Rewrite literal `text` of attribute type `from` into the form of `to`.
    fn convert_literal(&self, text: &str, from: &AttributeType, to: &TypeDef) -> String;
}
