//! Frontend registry.

use std::fmt;
use std::sync::Arc;

use fractal_ir::{Frontend, Language, TypeTable};
use rustc_hash::FxHashMap;

use crate::{ComponentError, Result};

/// Frontends keyed by the language they handle.
#[derive(Clone, Default)]
pub struct Frontends {
    by_language: FxHashMap<Language, Arc<dyn Frontend>>,
}

impl Frontends {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `frontend`, replacing any frontend of the same language.
    pub fn register(&mut self, frontend: Arc<dyn Frontend>) -> Option<Arc<dyn Frontend>> {
        self.by_language.insert(frontend.language(), frontend)
    }

    #[must_use]
    pub fn with(mut self, frontend: Arc<dyn Frontend>) -> Self {
        self.register(frontend);
        self
    }

    pub fn get(&self, language: Language) -> Result<Arc<dyn Frontend>> {
        self.by_language
            .get(&language)
            .cloned()
            .ok_or(ComponentError::MissingFrontend { language })
    }

    pub fn types(&self, language: Language) -> Result<Arc<dyn TypeTable>> {
        Ok(self.get(language)?.types())
    }
}

impl fmt::Debug for Frontends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_language.keys()).finish()
    }
}
