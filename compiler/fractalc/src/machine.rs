//! The Machine: one component tree plus the projects compiled into it.

use std::path::{Path, PathBuf};

use fractal_component::{
    absolute, ComponentError, ComponentId, Frontends, PathEnv, ProjectId, SymbolTree,
};
use fractal_ir::Language;

use crate::frontends::default_frontends;
use crate::{MachineConfig, MachineError, Result};

/// Name of the function marked called in every entry File.
pub const ENTRY_FUNCTION: &str = "main";

/// Result of compiling one entry file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOutput {
    pub project: ProjectId,
    /// Generated header, as spelled in include lines.
    pub path: String,
    /// Text written to `path`.
    pub text: String,
}

pub struct Machine {
    tree: SymbolTree,
    config: MachineConfig,
}

impl Machine {
    /// A machine with the default frontends.
    pub fn new(config: MachineConfig) -> Self {
        Self::with_frontends(config, default_frontends())
    }

    pub fn with_frontends(config: MachineConfig, frontends: Frontends) -> Self {
        let mut tree = SymbolTree::new(frontends);
        tree.set_emit_options(config.emit);
        Machine { tree, config }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn tree(&self) -> &SymbolTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SymbolTree {
        &mut self.tree
    }

    /// Register the directory `root` as project `name`.
    pub fn add_project(&mut self, name: &str, root: impl AsRef<Path>) -> Result<ProjectId> {
        let root = root.as_ref();
        let root = absolute(root).map_err(|error| MachineError::io(root, error))?;
        let env = PathEnv::new(self.config.path_style);
        let id = self
            .tree
            .add_project(name, root, self.config.temp_dir.clone(), env)?;
        Ok(id)
    }

    /// Innermost registered project containing `path`.
    pub fn find_project(&self, path: &Path) -> Option<ProjectId> {
        self.tree
            .projects()
            .filter(|(_, project)| path.starts_with(&project.root))
            .max_by_key(|(_, project)| project.root.components().count())
            .map(|(id, _)| id)
    }

    /// Compile the Light file at `entry` into its library header.
    ///
    /// The owning project is the innermost registered one containing the
    /// entry; without one, the entry's directory is registered as a new
    /// project.
    #[tracing::instrument(level = "debug", skip(self, entry), fields(entry = %entry.as_ref().display()))]
    pub fn compile(&mut self, entry: impl AsRef<Path>) -> Result<CompileOutput> {
        let entry = entry.as_ref();
        let entry = absolute(entry).map_err(|error| MachineError::io(entry, error))?;
        if !entry.is_file() {
            return Err(ComponentError::BadPath { path: entry }.into());
        }
        if Language::from_path(&entry) != Some(Language::Light) {
            return Err(ComponentError::UnsupportedExtension { path: entry }.into());
        }

        let project = match self.find_project(&entry) {
            Some(project) => project,
            None => self.add_implicit_project(&entry)?,
        };
        self.tree.set_active_project(Some(project));

        let (root, root_component, name) = {
            let project = self.tree.project(project);
            (project.root.clone(), project.root_component, project.name.clone())
        };
        let dotted = dotted_name(&root, &entry).ok_or_else(|| MachineError::EntryOutsideProject {
            path: entry.clone(),
            project: name,
        })?;

        let file = self.entry_file(root_component, &root, &dotted, &entry)?;
        self.tree.load(file)?;
        if let Some(main) = self.tree.get(file).child(ENTRY_FUNCTION) {
            self.tree.mark_called(main);
        }
        let path = self.tree.write_library(file)?;
        let text = self.tree.buffer(file).flatten();
        tracing::debug!(%path, "compiled");
        Ok(CompileOutput { project, path, text })
    }

    /// The File for `entry` below the project root.
    ///
    /// The skeleton is a snapshot taken at registration; segments created
    /// on disk since then are added to it on the way down.
    fn entry_file(
        &mut self,
        root_component: ComponentId,
        root: &Path,
        dotted: &str,
        entry: &Path,
    ) -> Result<ComponentId> {
        let segments: Vec<&str> = dotted.split('.').collect();
        let mut current = root_component;
        let mut dir = root.to_path_buf();
        for (index, segment) in segments.iter().enumerate() {
            dir.push(segment);
            if let Some(child) = self.tree.get(current).child(segment) {
                current = child;
                continue;
            }
            let path = if index + 1 == segments.len() { entry } else { dir.as_path() };
            tracing::debug!(path = %path.display(), "adding file missing from the skeleton");
            current = self.tree.new_file(Some(current), segment, path)?;
        }
        Ok(current)
    }

    fn add_implicit_project(&mut self, entry: &Path) -> Result<ProjectId> {
        let root = entry.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let name = match &self.config.project_name {
            Some(name) => name.clone(),
            None => root
                .file_name()
                .map_or_else(|| "project".to_string(), |n| n.to_string_lossy().into_owned()),
        };
        self.add_project(&name, root)
    }
}

/// `a/b/c.light` under `root` is `a.b.c`.
fn dotted_name(root: &Path, entry: &Path) -> Option<String> {
    let relative = entry.strip_prefix(root).ok()?.with_extension("");
    let segments: Vec<String> = relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("."))
}
