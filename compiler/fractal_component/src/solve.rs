//! Name resolution.
//!
//! A dotted name is resolved in two phases. The first segment is looked up
//! in the starting component and then in each ancestor in turn (the scope
//! chain). Every further segment must be a direct child of the previous
//! match; Files met on the way are loaded first so their contents exist.
//!
//! Single-segment names of the form `__c_<library>_<function>` bypass the
//! tree: they name a function of a native C library and register
//! `<library>` as a default include of the requesting File.

use smallvec::SmallVec;

use crate::{ComponentError, ComponentId, Result, SymbolTree};

/// Prefix shared by every native function reference.
pub const NATIVE_FUNCTION_PREFIX: &str = "__";

/// Marker after [`NATIVE_FUNCTION_PREFIX`] selecting a C library.
pub const NATIVE_C_MARKER: &str = "c_";

/// A function from a native library, referenced by name only.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NativeFunction {
    /// Library header base name (`stdio` for `<stdio>`).
    pub library: String,
    /// Function name as spelled in C.
    pub name: String,
}

impl NativeFunction {
    /// Parse `__c_<library>_<function>`; the library ends at the first `_`.
    pub fn parse(name: &str) -> Option<Self> {
        let rest = name
            .strip_prefix(NATIVE_FUNCTION_PREFIX)?
            .strip_prefix(NATIVE_C_MARKER)?;
        let (library, function) = rest.split_once('_')?;
        if library.is_empty() || function.is_empty() {
            return None;
        }
        Some(NativeFunction {
            library: library.to_string(),
            name: function.to_string(),
        })
    }
}

/// Outcome of resolving a name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolved {
    Component(ComponentId),
    Native(NativeFunction),
}

impl Resolved {
    pub fn component(&self) -> Option<ComponentId> {
        match self {
            Resolved::Component(id) => Some(*id),
            Resolved::Native(_) => None,
        }
    }
}

impl SymbolTree {
    /// Resolve `name` starting at `from`.
    pub fn solve(&mut self, from: ComponentId, name: &str) -> Result<Resolved> {
        match self.solve_segments(from, name, false)? {
            Some(resolved) => Ok(resolved),
            None => Err(ComponentError::not_found(name)),
        }
    }

    /// Like [`solve`](Self::solve), but a missing name is `Ok(None)`.
    ///
    /// Failures while loading a File on the way are still errors.
    pub fn try_solve(&mut self, from: ComponentId, name: &str) -> Result<Option<Resolved>> {
        self.solve_segments(from, name, true)
    }

    /// Resolve `name` to a component; native functions are an error.
    pub fn solve_component(&mut self, from: ComponentId, name: &str) -> Result<ComponentId> {
        match self.solve(from, name)? {
            Resolved::Component(id) => Ok(id),
            Resolved::Native(native) => Err(ComponentError::NativeNotComponent { name: native.name }),
        }
    }

    fn solve_segments(
        &mut self,
        from: ComponentId,
        name: &str,
        dont_panic: bool,
    ) -> Result<Option<Resolved>> {
        let segments: SmallVec<[&str; 4]> = name.split('.').collect();
        let miss = |path: String| {
            if dont_panic {
                Ok(None)
            } else {
                Err(ComponentError::not_found(path))
            }
        };

        if let [single] = segments.as_slice() {
            if let Some(native) = NativeFunction::parse(single) {
                if let Some(file) = self.top_file(from) {
                    self.include_default(file, &native.library);
                }
                tracing::trace!(name, library = %native.library, "native function");
                return Ok(Some(Resolved::Native(native)));
            }
        }

        let first = segments[0];
        let Some(mut found) = self
            .ancestors(from)
            .find_map(|scope| self.get(scope).child(first))
        else {
            return miss(first.to_string());
        };

        for (index, segment) in segments.iter().enumerate().skip(1) {
            if self.get(found).kind.is_file() {
                self.load(found)?;
            }
            match self.get(found).child(segment) {
                Some(child) => found = child,
                None => return miss(segments[..=index].join(".")),
            }
        }

        tracing::trace!(name, ?found, "solved");
        Ok(Some(Resolved::Component(found)))
    }
}
