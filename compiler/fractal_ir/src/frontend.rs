//! Interfaces a language frontend implements.

use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::{Language, LinearArena, LinearId, TypeTable};

/// A language frontend.
///
/// Frontends are registered per [`Language`]; the component tree opens a
/// file through the frontend of the language its extension selects.
pub trait Frontend {
    fn language(&self) -> Language;

    /// Open a source file for lowering.
    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Script>>;

    /// Type table of this language.
    fn types(&self) -> Arc<dyn TypeTable>;
}

/// An opened source file.
pub trait Script {
    /// Lower the file into `arena`, returning the root node.
    ///
    /// `None` means the frontend could not produce any Linear for the file.
    fn linear(&mut self, arena: &mut LinearArena) -> Option<LinearId>;
}
