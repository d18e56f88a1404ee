//! Building components from Linear instructions.

use fractal_ir::LinearId;

use crate::component::{
    ComponentKind, DataStructureKind, FunctionData, MemberData, OperationData, OperationKind,
};
use crate::{ComponentError, ComponentId, Result, SymbolTree};

impl SymbolTree {
    /// Turn every child instruction of the Linear node of `id` into
    /// components under `id`.
    pub(crate) fn read_linear(&mut self, id: ComponentId) -> Result<()> {
        let Some(linear) = self.get(id).linear else {
            return Ok(());
        };
        let instructions = self.linears.get(linear).children.clone();
        for instruction in instructions {
            self.read_instruction(id, instruction)?;
        }
        Ok(())
    }

    fn read_instruction(&mut self, id: ComponentId, instruction: LinearId) -> Result<()> {
        let op = self.linears.get(instruction).op.clone();
        match self.get(id).kind {
            ComponentKind::File(_) | ComponentKind::Namespace | ComponentKind::Class => {
                self.read_container_instruction(id, instruction, &op)
            }
            ComponentKind::DataStructure(DataStructureKind::Struct) => match op.as_str() {
                "declare" => self.read_declare(id, instruction, false).map(drop),
                _ => Err(self.not_permitted(id, op)),
            },
            ComponentKind::Function(_) => self.read_function_instruction(id, instruction, &op),
            ComponentKind::Member(_) | ComponentKind::Operation(_) => {
                Err(self.not_permitted(id, op))
            }
        }
    }

    fn read_container_instruction(
        &mut self,
        id: ComponentId,
        instruction: LinearId,
        op: &str,
    ) -> Result<()> {
        let kind = match op {
            "namespace" => ComponentKind::Namespace,
            "class" => ComponentKind::Class,
            "struct" => ComponentKind::DataStructure(DataStructureKind::Struct),
            "function" => return self.read_function(id, instruction).map(drop),
            "declare" => return self.read_declare(id, instruction, false).map(drop),
            _ => return Err(self.not_permitted(id, op.to_string())),
        };
        let child = self.add_from_linear(id, instruction, kind)?;
        self.read_linear(child)
    }

    fn read_function_instruction(
        &mut self,
        id: ComponentId,
        instruction: LinearId,
        op: &str,
    ) -> Result<()> {
        let operation = match op {
            "param" => {
                let param = self.read_declare(id, instruction, true)?;
                if let ComponentKind::Function(function) = &mut self.get_mut(id).kind {
                    function.params.push(param);
                }
                return Ok(());
            }
            "declare" => return self.read_declare(id, instruction, false).map(drop),
            "function" => {
                // C++ has no nested functions; the body goes to file scope.
                let nested = self.read_function(id, instruction)?;
                if let Some(file) = self.top_file(id) {
                    self.write_redirect(nested, file);
                }
                return Ok(());
            }
            "call" => OperationKind::Call {
                callee: self.linears.get(instruction).name.clone(),
            },
            "assign" => OperationKind::Assign {
                target: self.linears.get(instruction).name.clone(),
            },
            "return" => OperationKind::Return,
            _ => return Err(self.not_permitted(id, op.to_string())),
        };

        let name = format!("{op}#{}", self.get(id).ordered.len());
        let kind = ComponentKind::Operation(OperationData {
            op: operation,
            target: None,
        });
        let child = self.insert_child(id, &name, kind, Some(instruction));
        self.copy_attributes(child, instruction);
        Ok(())
    }

    fn read_function(&mut self, id: ComponentId, instruction: LinearId) -> Result<ComponentId> {
        let ret = self.linears.get(instruction).ret.clone();
        let kind = ComponentKind::Function(FunctionData {
            ret,
            params: Vec::new(),
        });
        let function = self.add_from_linear(id, instruction, kind)?;
        self.read_linear(function)?;
        Ok(function)
    }

    /// `declare name : type` (or `param`), with an optional first child
    /// holding the initial value.
    fn read_declare(&mut self, id: ComponentId, instruction: LinearId, param: bool) -> Result<ComponentId> {
        let node = self.linears.get(instruction);
        let Some(ty) = node.ret.clone() else {
            return Err(ComponentError::InvalidType {
                subject: node.name.clone(),
            });
        };
        let value = node.children.first().copied();
        let kind = ComponentKind::Member(MemberData { ty, param, value });
        self.add_from_linear(id, instruction, kind)
    }

    fn add_from_linear(
        &mut self,
        id: ComponentId,
        instruction: LinearId,
        kind: ComponentKind,
    ) -> Result<ComponentId> {
        let name = self.linears.get(instruction).name.clone();
        let child = self.add_component(id, &name, kind, Some(instruction))?;
        self.copy_attributes(child, instruction);
        Ok(child)
    }

    fn copy_attributes(&mut self, id: ComponentId, instruction: LinearId) {
        let attributes = self.linears.get(instruction).attributes.clone();
        self.get_mut(id).parameters.extend(attributes);
    }

    #[cold]
    fn not_permitted(&self, id: ComponentId, op: String) -> ComponentError {
        let node = self.get(id);
        ComponentError::OperationNotPermitted {
            op,
            container: node.kind.describe(),
            name: node.name.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
