//! Local type compatibility checks.
//!
//! A subject is either a literal (classified by the language's type table)
//! or the name of a component. Literals of the wrong kind are rewritten
//! into the requested type; names must declare exactly the requested type.

use std::sync::Arc;

use fractal_ir::{Classification, Language, LinearId, TypeTable};

use crate::{ComponentError, ComponentId, Result, SymbolTree};

/// Outcome of a successful check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeVerdict {
    Compatible,
    /// The literal must be replaced by this text.
    Coerce(String),
}

/// What a type name denotes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeIdentity {
    /// A built-in type of the language, by name.
    Builtin(String),
    /// A user type declared in the tree.
    Component(ComponentId),
}

impl SymbolTree {
    /// Type table of the language of the File enclosing `scope`.
    ///
    /// Components outside any loaded source File use the Light table.
    pub fn types_for(&self, scope: ComponentId) -> Result<Arc<dyn TypeTable>> {
        self.frontends.types(self.language_of(scope))
    }

    pub fn language_of(&self, scope: ComponentId) -> Language {
        self.top_file(scope)
            .and_then(|file| self.get(file).file())
            .and_then(|data| data.language)
            .unwrap_or(Language::Light)
    }

    /// Resolve a type name as seen from `scope`.
    pub fn solve_type(&mut self, scope: ComponentId, name: &str) -> Result<TypeIdentity> {
        let types = self.types_for(scope)?;
        self.identify(types.as_ref(), scope, name)
    }

    fn identify(&mut self, types: &dyn TypeTable, scope: ComponentId, name: &str) -> Result<TypeIdentity> {
        match types.get(name) {
            Some(def) => Ok(TypeIdentity::Builtin(def.name)),
            None => Ok(TypeIdentity::Component(self.solve_component(scope, name)?)),
        }
    }

    /// Check that `subject` can stand where a `request` is expected.
    pub fn check_type(&mut self, scope: ComponentId, subject: &str, request: &str) -> Result<TypeVerdict> {
        let types = self.types_for(scope)?;
        let attribute = types.attribute_type(subject);
        match attribute.classification {
            Classification::Invalid => Err(ComponentError::InvalidType {
                subject: subject.to_string(),
            }),
            Classification::Name => {
                let component = self.solve_component(scope, subject)?;
                let declared = self
                    .get(component)
                    .linear
                    .and_then(|linear| self.linears.get(linear).ret.clone())
                    .ok_or_else(|| ComponentError::mismatch(subject, request, ""))?;
                let found = self.identify(types.as_ref(), component, &declared)?;
                let expected = self.identify(types.as_ref(), scope, request)?;
                if found == expected {
                    Ok(TypeVerdict::Compatible)
                } else {
                    Err(ComponentError::mismatch(subject, request, declared))
                }
            }
            Classification::Value => {
                let required = types.get(request).filter(|def| def.attribute_reference.is_some());
                let Some(required) = required else {
                    return Err(ComponentError::mismatch(
                        subject,
                        request,
                        attribute.reference.unwrap_or_default(),
                    ));
                };
                if attribute.reference == required.attribute_reference {
                    Ok(TypeVerdict::Compatible)
                } else {
                    Ok(TypeVerdict::Coerce(types.convert_literal(subject, &attribute, &required)))
                }
            }
        }
    }

    /// Replace the text of child `pos` of `linear`.
    pub fn coerce(&mut self, linear: LinearId, pos: usize, text: String) {
        if let Some(node) = self.linears.child_mut(linear, pos) {
            node.name = text;
        }
    }

    /// Check child `pos` of `linear` against `request`, rewriting it in
    /// place when a literal needs coercion.
    pub fn check_and_coerce(
        &mut self,
        scope: ComponentId,
        request: &str,
        linear: LinearId,
        pos: usize,
    ) -> Result<()> {
        let Some(subject) = self.linears.child(linear, pos).map(|node| node.name.clone()) else {
            return Ok(());
        };
        if let TypeVerdict::Coerce(text) = self.check_type(scope, &subject, request)? {
            tracing::trace!(%subject, %text, request, "coerced literal");
            self.coerce(linear, pos, text);
        }
        Ok(())
    }
}
