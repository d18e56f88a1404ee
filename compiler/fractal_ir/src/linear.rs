//! Linear nodes and their arena.
//!
//! A frontend lowers a source file into a tree of `Linear` instructions.
//! Every node carries an operation name, an optional return-type annotation,
//! positional children and a debug line that emission fills in once the
//! generated text for the node has been produced.

use std::fmt;

/// Index into a [`LinearArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct LinearId(u32);

impl LinearId {
    /// Invalid node ID (sentinel value).
    pub const INVALID: LinearId = LinearId(u32::MAX);

    /// Create a new `LinearId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        LinearId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a valid ID.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for LinearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "LinearId({})", self.0)
        } else {
            write!(f, "LinearId::INVALID")
        }
    }
}

impl Default for LinearId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// A single Linear instruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Linear {
    /// Operation name (`function`, `declare`, `call`, ...).
    pub op: String,
    /// Operand name. For value nodes this is the literal text.
    pub name: String,
    /// Return-type annotation.
    pub ret: Option<String>,
    /// `key=value` settings attached to the instruction.
    pub attributes: Vec<(String, String)>,
    /// Positional children.
    pub children: Vec<LinearId>,
    /// 1-based line of the generated output this node ended up on.
    pub debug_line: Option<u32>,
}

impl Linear {
    pub fn new(op: impl Into<String>, name: impl Into<String>) -> Self {
        Linear {
            op: op.into(),
            name: name.into(),
            ..Linear::default()
        }
    }

    #[must_use]
    pub fn with_ret(mut self, ret: impl Into<String>) -> Self {
        self.ret = Some(ret.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Look up an attribute by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Flat storage for every Linear node of a compilation.
///
/// All loaded files share one arena, so a `LinearId` is unique across the
/// whole component tree.
#[derive(Clone, Debug, Default)]
pub struct LinearArena {
    nodes: Vec<Linear>,
}

impl LinearArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and return its id.
    pub fn alloc(&mut self, node: Linear) -> LinearId {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1);
        self.nodes.push(node);
        LinearId::new(index)
    }

    /// Store `node` and append it to `parent`'s children.
    pub fn push_child(&mut self, parent: LinearId, node: Linear) -> LinearId {
        let id = self.alloc(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    #[inline]
    pub fn get(&self, id: LinearId) -> &Linear {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: LinearId) -> &mut Linear {
        &mut self.nodes[id.index()]
    }

    /// The `pos`-th child of `id`, if it exists.
    pub fn child(&self, id: LinearId, pos: usize) -> Option<&Linear> {
        self.get(id)
            .children
            .get(pos)
            .map(|&child| self.get(child))
    }

    /// Mutable access to the `pos`-th child of `id`.
    pub fn child_mut(&mut self, id: LinearId, pos: usize) -> Option<&mut Linear> {
        let child = *self.get(id).children.get(pos)?;
        Some(self.get_mut(child))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
