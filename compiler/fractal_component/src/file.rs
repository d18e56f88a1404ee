//! File components: skeleton expansion and lazy loading.
//!
//! Registering a project only walks the filesystem. Every source file and
//! subdirectory becomes an unloaded File; a File is parsed the first time
//! resolution descends into it or emission needs it.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fractal_ir::Language;

use crate::component::ComponentKind;
use crate::project::ProjectId;
use crate::{ComponentError, ComponentId, Result, SymbolTree};

/// State of a File component.
pub struct FileData {
    pub(crate) path: PathBuf,
    pub(crate) is_directory: bool,
    pub(crate) loaded: bool,
    pub(crate) linked: bool,
    pub(crate) language: Option<Language>,
    pub(crate) include_defaults: Vec<String>,
    pub(crate) included_libraries: Vec<String>,
    pub(crate) dependencies: Vec<ComponentId>,
    pub(crate) written_lines: u32,
    pub(crate) out_file_name: Option<PathBuf>,
    pub(crate) project: Option<ProjectId>,
}

impl FileData {
    pub(crate) fn new(path: PathBuf, is_directory: bool) -> Self {
        FileData {
            path,
            is_directory,
            loaded: false,
            linked: false,
            language: None,
            include_defaults: Vec::new(),
            included_libraries: Vec::new(),
            dependencies: Vec::new(),
            written_lines: 1,
            out_file_name: None,
            project: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Language of the loaded source; `None` until loaded and for directories.
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Native libraries emitted as `#include <lib>`.
    pub fn include_defaults(&self) -> &[String] {
        &self.include_defaults
    }

    /// Output paths already emitted as `#include "..."`.
    pub fn included_libraries(&self) -> &[String] {
        &self.included_libraries
    }

    /// Other Files this File refers to, in order of first reference.
    /// Filled by linking.
    pub fn dependencies(&self) -> &[ComponentId] {
        &self.dependencies
    }

    /// Next output line number (1-based).
    pub fn written_lines(&self) -> u32 {
        self.written_lines
    }

    pub fn out_file_name(&self) -> Option<&Path> {
        self.out_file_name.as_deref()
    }

    pub fn project(&self) -> Option<ProjectId> {
        self.project
    }
}

impl fmt::Debug for FileData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileData")
            .field("path", &self.path)
            .field("loaded", &self.loaded)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl SymbolTree {
    /// Create a File for `path` and expand its skeleton.
    ///
    /// A directory expands itself; a source file expands the directory of
    /// the same stem next to it, if there is one.
    pub fn new_file(
        &mut self,
        parent: Option<ComponentId>,
        name: &str,
        path: impl Into<PathBuf>,
    ) -> Result<ComponentId> {
        let path = path.into();
        let metadata = fs::metadata(&path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => ComponentError::BadPath { path: path.clone() },
            _ => ComponentError::io(path.clone(), error),
        })?;
        let is_directory = metadata.is_dir();
        let kind = ComponentKind::File(Box::new(FileData::new(path.clone(), is_directory)));
        let id = match parent {
            Some(parent) => self.insert_child(parent, name, kind, None),
            None => self.new_root(name, kind),
        };

        let family = if is_directory {
            Some(path)
        } else {
            Some(path.with_extension("")).filter(|dir| dir.is_dir())
        };
        if let Some(dir) = family {
            self.expand_directory(id, &dir)?;
        }
        Ok(id)
    }

    fn expand_directory(&mut self, id: ComponentId, dir: &Path) -> Result<()> {
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|error| ComponentError::io(dir, error))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| !name.starts_with('.'))
            })
            .collect();
        entries.sort();

        // Files first, so a `.light` file claims its directory before the
        // directory itself comes up.
        for path in entries.iter().filter(|p| p.is_file() && Language::is_source_file(p)) {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            tracing::trace!(file = %path.display(), "skeleton file");
            self.new_file(Some(id), stem, path.clone())?;
        }
        for path in entries.iter().filter(|p| p.is_dir()) {
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            if path.with_extension(Language::LIGHT_EXTENSION).is_file() {
                continue;
            }
            tracing::trace!(dir = %path.display(), "skeleton directory");
            self.new_file(Some(id), name, path.clone())?;
        }
        Ok(())
    }

    /// Parse a File into its subtree. Does nothing when already loaded or
    /// when `id` is not a File.
    #[tracing::instrument(level = "debug", skip(self), fields(file = %self.get(id).name()))]
    pub fn load(&mut self, id: ComponentId) -> Result<()> {
        let Some(data) = self.get_mut(id).file_mut() else {
            return Ok(());
        };
        if data.loaded {
            return Ok(());
        }
        // Flipped before reading so references back into this File made
        // while reading do not load it again.
        data.loaded = true;
        if data.is_directory {
            return Ok(());
        }
        let path = data.path.clone();

        let language = Language::from_path(&path)
            .ok_or_else(|| ComponentError::UnsupportedExtension { path: path.clone() })?;
        let frontend = self.frontends.get(language)?;
        let mut script = frontend
            .open_file(&path)
            .map_err(|error| ComponentError::io(path.clone(), error))?;
        let root = script
            .linear(&mut self.linears)
            .ok_or_else(|| ComponentError::Frontend { path: path.clone() })?;

        let node = self.get_mut(id);
        node.linear = Some(root);
        if let Some(data) = node.file_mut() {
            data.language = Some(language);
        }
        self.read_linear(id)?;
        tracing::debug!(file = %path.display(), %language, "loaded");
        Ok(())
    }

    pub fn is_loaded(&self, id: ComponentId) -> bool {
        self.get(id).file().is_some_and(FileData::is_loaded)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
