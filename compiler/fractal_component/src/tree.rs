//! The component arena.
//!
//! `SymbolTree` owns every component of a compilation, the shared Linear
//! arena, the registered frontends and the projects. Components refer to
//! each other only through [`ComponentId`]s.

use std::path::PathBuf;

use fractal_ir::{LinearArena, LinearId};
use rustc_hash::FxHashMap;

use crate::component::{Component, ComponentFlags, ComponentKind};
use crate::emit::EmitOptions;
use crate::frontends::Frontends;
use crate::project::{PathEnv, Project, ProjectId};
use crate::{ComponentId, Result};

pub struct SymbolTree {
    nodes: Vec<Component>,
    pub(crate) linears: LinearArena,
    pub(crate) frontends: Frontends,
    pub(crate) projects: Vec<Project>,
    pub(crate) active_project: Option<ProjectId>,
    /// Generated header paths and the project that produced each.
    pub(crate) claimed_outputs: FxHashMap<PathBuf, ProjectId>,
    pub(crate) options: EmitOptions,
}

impl SymbolTree {
    pub fn new(frontends: Frontends) -> Self {
        SymbolTree {
            nodes: Vec::new(),
            linears: LinearArena::new(),
            frontends,
            projects: Vec::new(),
            active_project: None,
            claimed_outputs: FxHashMap::default(),
            options: EmitOptions::default(),
        }
    }

    pub fn set_emit_options(&mut self, options: EmitOptions) {
        self.options = options;
    }

    pub fn emit_options(&self) -> EmitOptions {
        self.options
    }

    #[inline]
    pub fn get(&self, id: ComponentId) -> &Component {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: ComponentId) -> &mut Component {
        &mut self.nodes[id.index()]
    }

    pub fn linears(&self) -> &LinearArena {
        &self.linears
    }

    pub fn linears_mut(&mut self) -> &mut LinearArena {
        &mut self.linears
    }

    pub fn frontends(&self) -> &Frontends {
        &self.frontends
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, component: Component) -> ComponentId {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(component);
        ComponentId::new(index)
    }

    /// Create a parent-less component.
    pub fn new_root(&mut self, name: &str, kind: ComponentKind) -> ComponentId {
        self.alloc(Component::new(name.to_string(), kind, None, None))
    }

    /// Create `name` directly under `parent`.
    ///
    /// A sibling of the same name is replaced, keeping its declaration slot.
    pub(crate) fn insert_child(
        &mut self,
        parent: ComponentId,
        name: &str,
        kind: ComponentKind,
        linear: Option<LinearId>,
    ) -> ComponentId {
        let id = self.alloc(Component::new(name.to_string(), kind, Some(parent), linear));
        let node = self.get_mut(parent);
        match node.children.insert(name.to_string(), id) {
            Some(previous) => {
                if let Some(slot) = node.ordered.iter_mut().find(|slot| **slot == previous) {
                    *slot = id;
                }
            }
            None => node.ordered.push(id),
        }
        id
    }

    /// Split `dotted` into the container its prefix resolves to and the
    /// last segment.
    pub fn get_base_component(
        &mut self,
        from: ComponentId,
        dotted: &str,
    ) -> Result<(ComponentId, String)> {
        match dotted.rsplit_once('.') {
            Some((prefix, last)) => {
                let base = self.solve_component(from, prefix)?;
                Ok((base, last.to_string()))
            }
            None => Ok((from, dotted.to_string())),
        }
    }

    /// Insert a new component at the position `dotted` names relative to
    /// `from`. The component is named after the last segment.
    pub fn add_component(
        &mut self,
        from: ComponentId,
        dotted: &str,
        kind: ComponentKind,
        linear: Option<LinearId>,
    ) -> Result<ComponentId> {
        let (base, name) = self.get_base_component(from, dotted)?;
        Ok(self.insert_child(base, &name, kind, linear))
    }

    /// Look up the component `dotted` names without creating it.
    pub fn get_component(&mut self, from: ComponentId, dotted: &str) -> Result<Option<ComponentId>> {
        let (base, name) = self.get_base_component(from, dotted)?;
        Ok(self.get(base).child(&name))
    }

    /// `id` followed by each of its ancestors.
    pub fn ancestors(&self, id: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        std::iter::successors(Some(id), move |&current| self.get(current).parent)
    }

    /// The root of the tree containing `id`.
    pub fn top(&self, id: ComponentId) -> ComponentId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// The nearest File enclosing `id`, `id` itself included.
    pub fn top_file(&self, id: ComponentId) -> Option<ComponentId> {
        self.ancestors(id).find(|&a| self.get(a).kind.is_file())
    }

    pub fn mark_called(&mut self, id: ComponentId) {
        self.get_mut(id).flags.insert(ComponentFlags::CALLED);
    }

    /// A container is live when it or any descendant is marked called;
    /// anything else is live when marked called.
    pub fn is_live(&self, id: ComponentId) -> bool {
        let node = self.get(id);
        if node.is_called() {
            return true;
        }
        node.kind.is_container() && node.ordered.iter().any(|&child| self.is_live(child))
    }

    /// Name of `id` as seen from file scope (`outer::inner::name`).
    pub fn qualified_name(&self, id: ComponentId) -> String {
        let mut parts: Vec<&str> = vec![self.get(id).name()];
        for ancestor in self.ancestors(id).skip(1) {
            let node = self.get(ancestor);
            if !node.kind.is_container() || node.kind.is_file() {
                break;
            }
            parts.push(node.name());
        }
        parts.reverse();
        parts.join("::")
    }

    /// Dotted path of `id` from its root, for diagnostics.
    pub fn path_of(&self, id: ComponentId) -> String {
        let mut parts: Vec<&str> = self.ancestors(id).map(|a| self.get(a).name()).collect();
        parts.reverse();
        parts.join(".")
    }

    /// Register a project rooted at `root` and build its skeleton.
    pub fn add_project(
        &mut self,
        name: &str,
        root: impl Into<PathBuf>,
        temp_dir: impl Into<PathBuf>,
        env: PathEnv,
    ) -> Result<ProjectId> {
        let root = root.into();
        let root_component = self.new_file(None, name, root.clone())?;
        let id = ProjectId::new(self.projects.len());
        self.projects.push(Project {
            name: name.to_string(),
            root,
            temp_dir: temp_dir.into(),
            env,
            root_component,
        });
        if let Some(data) = self.get_mut(root_component).file_mut() {
            data.project = Some(id);
        }
        tracing::debug!(project = name, ?root_component, "project registered");
        Ok(id)
    }

    pub fn project(&self, id: ProjectId) -> &Project {
        &self.projects[id.index()]
    }

    pub fn projects(&self) -> impl Iterator<Item = (ProjectId, &Project)> {
        self.projects
            .iter()
            .enumerate()
            .map(|(index, project)| (ProjectId::new(index), project))
    }

    /// The project whose output is being produced; other projects'
    /// libraries are prefixed with their project name, and so is a library
    /// whose plain name another project already produced.
    pub fn set_active_project(&mut self, project: Option<ProjectId>) {
        self.active_project = project;
    }

    pub fn active_project(&self) -> Option<ProjectId> {
        self.active_project
    }

    /// Project owning the tree `id` lives in.
    pub fn project_of(&self, id: ComponentId) -> Option<ProjectId> {
        self.get(self.top(id)).file().and_then(|data| data.project)
    }
}
