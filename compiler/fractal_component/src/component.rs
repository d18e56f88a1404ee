//! Component nodes.
//!
//! A component is one node of the symbol/definition tree. The variant set is
//! closed: emission and sub-instruction dispatch match on [`ComponentKind`]
//! exhaustively.

use bitflags::bitflags;
use fractal_ir::LinearId;
use rustc_hash::FxHashMap;

use crate::file::FileData;
use crate::solve::Resolved;
use crate::writer::WriteBuffer;
use crate::ComponentId;

bitflags! {
    /// Per-component state bits.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct ComponentFlags: u8 {
        /// Explicitly marked as referenced.
        const CALLED = 1 << 0;
        /// Produced output since the last reset.
        const WRITTEN = 1 << 1;
    }
}

/// Coarse component tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ComponentType {
    Container,
    Function,
    Member,
    Operation,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DataStructureKind {
    Struct,
}

/// Variant-specific data of a component.
#[derive(Debug)]
pub enum ComponentKind {
    /// Plain container (`namespace`).
    Namespace,
    Class,
    DataStructure(DataStructureKind),
    /// A source file or a directory of source files.
    File(Box<FileData>),
    Function(FunctionData),
    Member(MemberData),
    Operation(OperationData),
}

impl ComponentKind {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Namespace
            | ComponentKind::Class
            | ComponentKind::DataStructure(_)
            | ComponentKind::File(_) => ComponentType::Container,
            ComponentKind::Function(_) => ComponentType::Function,
            ComponentKind::Member(_) => ComponentType::Member,
            ComponentKind::Operation(_) => ComponentType::Operation,
        }
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.component_type() == ComponentType::Container
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self, ComponentKind::File(_))
    }

    /// Human-readable variant name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            ComponentKind::Namespace => "namespace",
            ComponentKind::Class => "class",
            ComponentKind::DataStructure(DataStructureKind::Struct) => "struct",
            ComponentKind::File(_) => "file",
            ComponentKind::Function(_) => "function",
            ComponentKind::Member(_) => "member",
            ComponentKind::Operation(_) => "operation",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FunctionData {
    /// Declared return type, `None` for no value.
    pub ret: Option<String>,
    /// Parameter members in declaration order.
    pub params: Vec<ComponentId>,
}

#[derive(Clone, Debug)]
pub struct MemberData {
    /// Declared type name.
    pub ty: String,
    /// Whether this member is a function parameter.
    pub param: bool,
    /// Initializer value node.
    pub value: Option<LinearId>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OperationKind {
    Call { callee: String },
    Assign { target: String },
    Return,
}

#[derive(Clone, Debug)]
pub struct OperationData {
    pub op: OperationKind,
    /// What the callee or assignment target resolved to, once linked.
    pub target: Option<Resolved>,
}

/// A node of the component tree.
#[derive(Debug)]
pub struct Component {
    pub(crate) name: String,
    pub(crate) kind: ComponentKind,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) children: FxHashMap<String, ComponentId>,
    /// Children in declaration order, for deterministic emission.
    pub(crate) ordered: Vec<ComponentId>,
    pub(crate) parameters: FxHashMap<String, String>,
    pub(crate) linear: Option<LinearId>,
    pub(crate) flags: ComponentFlags,
    pub(crate) buffer: WriteBuffer,
    pub(crate) redirect: Option<ComponentId>,
}

impl Component {
    pub(crate) fn new(
        name: String,
        kind: ComponentKind,
        parent: Option<ComponentId>,
        linear: Option<LinearId>,
    ) -> Self {
        Component {
            name,
            kind,
            parent,
            children: FxHashMap::default(),
            ordered: Vec::new(),
            parameters: FxHashMap::default(),
            linear,
            flags: ComponentFlags::empty(),
            buffer: WriteBuffer::default(),
            redirect: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn linear(&self) -> Option<LinearId> {
        self.linear
    }

    /// Direct child by exact name.
    pub fn child(&self, name: &str) -> Option<ComponentId> {
        self.children.get(name).copied()
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[ComponentId] {
        &self.ordered
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn is_called(&self) -> bool {
        self.flags.contains(ComponentFlags::CALLED)
    }

    pub fn is_written(&self) -> bool {
        self.flags.contains(ComponentFlags::WRITTEN)
    }

    pub fn redirect(&self) -> Option<ComponentId> {
        self.redirect
    }

    pub fn file(&self) -> Option<&FileData> {
        match &self.kind {
            ComponentKind::File(data) => Some(data.as_ref()),
            _ => None,
        }
    }

    pub(crate) fn file_mut(&mut self) -> Option<&mut FileData> {
        match &mut self.kind {
            ComponentKind::File(data) => Some(data.as_mut()),
            _ => None,
        }
    }
}
