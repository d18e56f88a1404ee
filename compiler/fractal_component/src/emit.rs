//! C++ emission.
//!
//! `write_to` renders a component and its subtree into the component's
//! buffer and returns the text (or hands it to the redirect target).

use fractal_ir::{Classification, LinearId};

use crate::component::{ComponentFlags, ComponentKind, DataStructureKind, OperationKind};
use crate::solve::Resolved;
use crate::stack::ensure_sufficient_stack;
use crate::{ComponentError, ComponentId, Result, SymbolTree};

/// Four spaces per nesting level.
const INDENT: &str = "    ";

/// Switches for emission.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EmitOptions {
    /// Skip declarations that are not live (never referenced).
    pub omit_uncalled: bool,
}

impl EmitOptions {
    #[must_use]
    pub fn with_omit_uncalled(mut self, omit_uncalled: bool) -> Self {
        self.omit_uncalled = omit_uncalled;
        self
    }
}

#[derive(Copy, Clone)]
enum Shape {
    File,
    Namespace,
    Unsupported(&'static str),
    Function,
    Member,
    Operation,
}

impl SymbolTree {
    /// Render `id` and its subtree.
    pub fn write_to(&mut self, id: ComponentId) -> Result<String> {
        ensure_sufficient_stack(|| self.write_component(id))
    }

    fn write_component(&mut self, id: ComponentId) -> Result<String> {
        let shape = match &self.get(id).kind {
            ComponentKind::File(_) => Shape::File,
            ComponentKind::Namespace => Shape::Namespace,
            ComponentKind::Class => Shape::Unsupported("class"),
            ComponentKind::DataStructure(DataStructureKind::Struct) => Shape::Unsupported("struct"),
            ComponentKind::Function(_) => Shape::Function,
            ComponentKind::Member(_) => Shape::Member,
            ComponentKind::Operation(_) => Shape::Operation,
        };
        self.get_mut(id).flags.insert(ComponentFlags::WRITTEN);
        match shape {
            Shape::File => self.write_file(id)?,
            Shape::Namespace => self.write_namespace(id)?,
            Shape::Unsupported(what) => {
                return Err(ComponentError::Unimplemented {
                    what,
                    name: self.get(id).name.clone(),
                });
            }
            Shape::Function => self.write_function(id)?,
            Shape::Member => self.write_member(id)?,
            Shape::Operation => self.write_operation(id)?,
        }
        Ok(self.write_return(id))
    }

    /// Angle includes, then quoted includes, then functions hoisted out of
    /// other functions, then the body. Text is produced in the order it
    /// appears, so line stamps match the output.
    fn write_file(&mut self, id: ComponentId) -> Result<()> {
        self.link(id)?;
        let (defaults, dependencies) = self
            .get(id)
            .file()
            .map(|data| (data.include_defaults.clone(), data.dependencies.clone()))
            .unwrap_or_default();
        for library in defaults {
            self.write_to_cont(id, &format!("#include <{library}>"));
            self.write_line_break(id);
        }
        for dependency in dependencies {
            self.include(id, dependency)?;
        }
        let mut hoisted = Vec::new();
        self.collect_hoisted(id, true, &mut hoisted);
        for function in hoisted {
            self.write_to(function)?;
        }
        self.write_children(id, true)
    }

    fn write_namespace(&mut self, id: ComponentId) -> Result<()> {
        self.write_indent(id);
        let header = format!("namespace {} {{", self.get(id).name);
        self.write_to_cont(id, &header);
        self.write_new_line(id);
        self.write_children(id, true)?;
        self.write_closing(id);
        Ok(())
    }

    fn write_function(&mut self, id: ComponentId) -> Result<()> {
        let ComponentKind::Function(data) = &self.get(id).kind else {
            return Ok(());
        };
        let ret = data.ret.clone();
        let params = data.params.clone();

        let mut header = String::new();
        for prefix in ["static", "inline"] {
            if self.get(id).parameter(prefix) == Some("true") {
                header.push_str(prefix);
                header.push(' ');
            }
        }
        header.push_str(&self.spell_type(id, ret.as_deref())?);
        header.push(' ');
        header.push_str(&self.get(id).name);
        header.push('(');
        for (index, param) in params.iter().enumerate() {
            if index > 0 {
                header.push_str(", ");
            }
            let ty = match &self.get(*param).kind {
                ComponentKind::Member(member) => Some(member.ty.clone()),
                _ => None,
            };
            header.push_str(&self.spell_type(id, ty.as_deref())?);
            header.push(' ');
            header.push_str(&self.get(*param).name);
        }
        header.push_str(") {");

        self.write_indent(id);
        self.write_to_cont(id, &header);
        self.write_new_line(id);
        self.write_children(id, false)?;
        self.write_closing(id);
        Ok(())
    }

    fn write_member(&mut self, id: ComponentId) -> Result<()> {
        let ComponentKind::Member(member) = &self.get(id).kind else {
            return Ok(());
        };
        let ty = member.ty.clone();
        let has_value = member.value.is_some();

        let mut line = self.spell_type(id, Some(&ty))?;
        line.push(' ');
        line.push_str(&self.get(id).name);
        if has_value {
            if let Some(linear) = self.get(id).linear {
                line.push_str(" = ");
                line.push_str(&self.value_text(id, linear, 0)?);
            }
        }
        line.push(';');

        self.write_indent(id);
        self.write_to_cont(id, &line);
        self.write_new_line(id);
        Ok(())
    }

    fn write_operation(&mut self, id: ComponentId) -> Result<()> {
        let ComponentKind::Operation(data) = &self.get(id).kind else {
            return Ok(());
        };
        let op = data.op.clone();
        let target = data.target.clone();
        let Some(linear) = self.get(id).linear else {
            return Ok(());
        };

        let line = match op {
            OperationKind::Call { callee } => {
                let target = match target {
                    Some(target) => target,
                    None => self.solve(id, &callee)?,
                };
                let mut line = self.reference_name(&target);
                line.push('(');
                let args = self.linears.get(linear).children.len();
                for pos in 0..args {
                    if pos > 0 {
                        line.push_str(", ");
                    }
                    line.push_str(&self.value_text(id, linear, pos)?);
                }
                line.push_str(");");
                line
            }
            OperationKind::Assign { target: name } => {
                let target = match target {
                    Some(target) => target,
                    None => self.solve(id, &name)?,
                };
                format!(
                    "{} = {};",
                    self.reference_name(&target),
                    self.value_text(id, linear, 0)?
                )
            }
            OperationKind::Return => {
                if self.linears.child(linear, 0).is_some() {
                    format!("return {};", self.value_text(id, linear, 0)?)
                } else {
                    "return;".to_string()
                }
            }
        };

        self.write_indent(id);
        self.write_to_cont(id, &line);
        self.write_new_line(id);
        Ok(())
    }

    /// Emit the children of `id` in declaration order.
    ///
    /// Nested Files, function parameters and redirected components are
    /// never emitted inline.
    fn write_children(&mut self, id: ComponentId, prune: bool) -> Result<()> {
        for child in self.emitted_children(id, prune) {
            if self.get(child).redirect.is_some() {
                continue;
            }
            let text = self.write_to(child)?;
            self.write_to_cont(id, &text);
        }
        Ok(())
    }

    /// Children of `id` that emission visits. With `prune`, dead
    /// declarations are dropped when the options ask for it.
    fn emitted_children(&self, id: ComponentId, prune: bool) -> Vec<ComponentId> {
        self.get(id)
            .ordered
            .iter()
            .copied()
            .filter(|&child| {
                let skip = match &self.get(child).kind {
                    ComponentKind::File(_) => true,
                    ComponentKind::Member(member) => member.param,
                    _ => false,
                };
                !skip && !(prune && self.options.omit_uncalled && !self.is_live(child))
            })
            .collect()
    }

    /// Redirected components below `id` that emission will visit, inner
    /// ones before the component enclosing them.
    fn collect_hoisted(&self, id: ComponentId, prune: bool, out: &mut Vec<ComponentId>) {
        for child in self.emitted_children(id, prune) {
            let node = self.get(child);
            self.collect_hoisted(child, matches!(node.kind, ComponentKind::Namespace), out);
            if node.redirect.is_some() {
                out.push(child);
            }
        }
    }

    fn write_closing(&mut self, id: ComponentId) {
        self.write_indent(id);
        self.write_to_cont(id, "}");
        self.write_line_break(id);
    }

    fn write_indent(&mut self, id: ComponentId) {
        let level = self.indent_level(id);
        self.write_to_cont(id, &INDENT.repeat(level));
    }

    /// Enclosing levels between `id` and file scope. A redirected
    /// component sits at file scope.
    fn indent_level(&self, id: ComponentId) -> usize {
        let mut level = 0;
        let mut current = id;
        while self.get(current).redirect.is_none() {
            match self.get(current).parent {
                Some(parent) if !self.get(parent).kind.is_file() => {
                    level += 1;
                    current = parent;
                }
                _ => break,
            }
        }
        level
    }

    /// C++ spelling of a source type name; `void` when absent.
    fn spell_type(&mut self, scope: ComponentId, ty: Option<&str>) -> Result<String> {
        let Some(ty) = ty else {
            return Ok("void".to_string());
        };
        let types = self.types_for(scope)?;
        if let Some(def) = types.get(ty) {
            return Ok(def.native);
        }
        let component = self.solve_component(scope, ty)?;
        Ok(self.reference_name(&Resolved::Component(component)))
    }

    /// Text of value child `pos` of `linear`: literals verbatim, names as
    /// references.
    fn value_text(&mut self, scope: ComponentId, linear: LinearId, pos: usize) -> Result<String> {
        let Some(text) = self.linears.child(linear, pos).map(|node| node.name.clone()) else {
            return Ok(String::new());
        };
        let types = self.types_for(scope)?;
        if types.attribute_type(&text).classification != Classification::Name {
            return Ok(text);
        }
        let target = self.solve(scope, &text)?;
        Ok(self.reference_name(&target))
    }

    /// C++ spelling of a reference to `target`. Files of targets elsewhere
    /// were already included when the File was linked.
    fn reference_name(&self, target: &Resolved) -> String {
        match target {
            Resolved::Native(native) => native.name.clone(),
            Resolved::Component(target) => self.qualified_name(*target),
        }
    }
}
