//! Component IDs.

use std::fmt;

/// Index into the component arena of a [`SymbolTree`](crate::SymbolTree).
///
/// Parent links are stored as `ComponentId`s, so a child never owns its
/// parent and the tree has no ownership cycles.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct ComponentId(u32);

impl ComponentId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ComponentId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({})", self.0)
    }
}
