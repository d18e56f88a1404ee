//! Reference linking.
//!
//! After a File is loaded, every symbolic reference in its own content is
//! resolved once: call targets, assignment targets, names used as values
//! and declared user types. Referenced components are marked called,
//! values are checked against the type they flow into, and every other
//! File referred to is recorded as a dependency of the linked File.

use fractal_ir::{Classification, LinearId};

use crate::component::{ComponentKind, OperationKind};
use crate::solve::Resolved;
use crate::{ComponentId, Result, SymbolTree};

impl SymbolTree {
    /// Load `file` and resolve its references. Runs once per File.
    #[tracing::instrument(level = "debug", skip(self), fields(file = %self.get(file).name()))]
    pub fn link(&mut self, file: ComponentId) -> Result<()> {
        self.load(file)?;
        let Some(data) = self.get_mut(file).file_mut() else {
            return Ok(());
        };
        if data.linked {
            return Ok(());
        }
        data.linked = true;
        let children = self.get(file).ordered.clone();
        for child in children {
            self.link_component(child)?;
        }
        Ok(())
    }

    fn link_component(&mut self, id: ComponentId) -> Result<()> {
        match &self.get(id).kind {
            ComponentKind::File(_) => return Ok(()),
            ComponentKind::Member(member) => {
                let ty = member.ty.clone();
                let has_value = member.value.is_some();
                self.link_type(id, &ty)?;
                if has_value {
                    if let Some(linear) = self.get(id).linear {
                        self.link_value(id, linear, 0, Some(&ty))?;
                    }
                }
            }
            ComponentKind::Function(function) => {
                if let Some(ret) = function.ret.clone() {
                    self.link_type(id, &ret)?;
                }
            }
            ComponentKind::Operation(_) => self.link_operation(id)?,
            _ => {}
        }
        let children = self.get(id).ordered.clone();
        for child in children {
            self.link_component(child)?;
        }
        Ok(())
    }

    fn link_operation(&mut self, id: ComponentId) -> Result<()> {
        let ComponentKind::Operation(data) = &self.get(id).kind else {
            return Ok(());
        };
        let op = data.op.clone();
        let Some(linear) = self.get(id).linear else {
            return Ok(());
        };

        let target = match op {
            OperationKind::Call { callee } => {
                let target = self.solve(id, &callee)?;
                let params = match &target {
                    Resolved::Component(callee) => {
                        self.mark_called(*callee);
                        self.depend(id, *callee);
                        if self.language_of(*callee) == self.language_of(id) {
                            self.param_types(*callee)
                        } else {
                            Vec::new()
                        }
                    }
                    Resolved::Native(_) => Vec::new(),
                };
                let args = self.linears.get(linear).children.len();
                for pos in 0..args {
                    self.link_value(id, linear, pos, params.get(pos).map(String::as_str))?;
                }
                Some(target)
            }
            OperationKind::Assign { target } => {
                let member = self.solve_component(id, &target)?;
                self.mark_called(member);
                self.depend(id, member);
                let ty = match &self.get(member).kind {
                    ComponentKind::Member(data) => Some(data.ty.clone()),
                    _ => None,
                };
                self.link_value(id, linear, 0, ty.as_deref())?;
                Some(Resolved::Component(member))
            }
            OperationKind::Return => {
                let ret = self
                    .get(id)
                    .parent
                    .and_then(|parent| match &self.get(parent).kind {
                        ComponentKind::Function(function) => function.ret.clone(),
                        _ => None,
                    })
                    .filter(|ret| ret != "void");
                self.link_value(id, linear, 0, ret.as_deref())?;
                None
            }
        };

        if let ComponentKind::Operation(data) = &mut self.get_mut(id).kind {
            data.target = target;
        }
        Ok(())
    }

    /// Resolve child `pos` of `linear` if it names a component, then check
    /// it against `expected`.
    fn link_value(
        &mut self,
        scope: ComponentId,
        linear: LinearId,
        pos: usize,
        expected: Option<&str>,
    ) -> Result<()> {
        let Some(value) = self.linears.child(linear, pos).map(|node| node.name.clone()) else {
            return Ok(());
        };
        let types = self.types_for(scope)?;
        if types.attribute_type(&value).classification == Classification::Name {
            let target = self.solve_component(scope, &value)?;
            self.mark_called(target);
            self.depend(scope, target);
        }
        if let Some(expected) = expected {
            self.check_and_coerce(scope, expected, linear, pos)?;
        }
        Ok(())
    }

    /// Resolve a declared type that is not built into the language.
    fn link_type(&mut self, scope: ComponentId, ty: &str) -> Result<()> {
        if self.types_for(scope)?.get(ty).is_some() {
            return Ok(());
        }
        let target = self.solve_component(scope, ty)?;
        self.depend(scope, target);
        Ok(())
    }

    /// Record the File of `target` as a dependency of the File of `scope`.
    fn depend(&mut self, scope: ComponentId, target: ComponentId) {
        let (Some(here), Some(there)) = (self.top_file(scope), self.top_file(target)) else {
            return;
        };
        if here == there {
            return;
        }
        if let Some(data) = self.get_mut(here).file_mut() {
            if !data.dependencies.contains(&there) {
                data.dependencies.push(there);
            }
        }
    }

    fn param_types(&self, function: ComponentId) -> Vec<String> {
        let ComponentKind::Function(data) = &self.get(function).kind else {
            return Vec::new();
        };
        data.params
            .iter()
            .filter_map(|&param| match &self.get(param).kind {
                ComponentKind::Member(member) => Some(member.ty.clone()),
                _ => None,
            })
            .collect()
    }
}
