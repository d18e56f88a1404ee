//! Output paths and `#include` bookkeeping.

use std::fs;
use std::path::{Path, PathBuf};

use fractal_ir::Language;

use crate::project::{absolute, PathEnv};
use crate::{ComponentError, ComponentId, Result, SymbolTree};

/// Extension of generated headers.
pub const HEADER_EXTENSION: &str = "hpp";

impl SymbolTree {
    /// Output path of `file`, emitting it on first request.
    ///
    /// Light sources are rendered to a header under the temp directory of
    /// their project; native headers are their own output. The path is
    /// memoized before emission starts, so files including each other
    /// terminate.
    #[tracing::instrument(level = "debug", skip(self), fields(file = %self.get(file).name()))]
    pub fn write_library(&mut self, file: ComponentId) -> Result<String> {
        let env = self.path_env(file);
        if let Some(out) = self.get(file).file().and_then(|data| data.out_file_name.clone()) {
            return Ok(env.normalize(&out));
        }

        self.load(file)?;
        let Some(data) = self.get(file).file() else {
            return Err(ComponentError::not_found(self.path_of(file)));
        };
        let source = data.path.clone();
        let language = data
            .language
            .ok_or_else(|| ComponentError::UnsupportedExtension { path: source.clone() })?;

        let out = match language {
            Language::Cpp => source,
            Language::Light => self.light_output(file, &source)?,
        };
        if let Some(data) = self.get_mut(file).file_mut() {
            data.out_file_name = Some(out.clone());
        }

        if language == Language::Light {
            self.write_reset(file);
            let text = self.write_to(file)?;
            if let Some(dir) = out.parent() {
                fs::create_dir_all(dir).map_err(|error| ComponentError::io(dir, error))?;
            }
            fs::write(&out, text).map_err(|error| ComponentError::io(out.clone(), error))?;
            tracing::debug!(out = %out.display(), "library written");
        }
        Ok(env.normalize(&out))
    }

    /// Header path for the Light source of `file`.
    ///
    /// The plain name is `<library>.hpp` under the owning project's temp
    /// dir. It gets the `<project>_` prefix when the owner is not the
    /// active project, or when another project already produced the plain
    /// name.
    fn light_output(&mut self, file: ComponentId, source: &Path) -> Result<PathBuf> {
        let owner = self.project_of(file).ok_or_else(|| ComponentError::NoProject {
            name: self.path_of(file),
        })?;
        let project = self.project(owner);
        let plain = format!("{}.{HEADER_EXTENSION}", project.library_name(source));
        let prefixed = project.temp_dir.join(format!("{}_{plain}", project.name));
        let plain = project.temp_dir.join(plain);

        let plain = absolute(&plain).map_err(|error| ComponentError::io(plain, error))?;
        let foreign = self.active_project.is_some_and(|active| active != owner);
        let taken = self
            .claimed_outputs
            .get(&plain)
            .is_some_and(|&claimant| claimant != owner);
        let out = if foreign || taken {
            absolute(&prefixed).map_err(|error| ComponentError::io(prefixed, error))?
        } else {
            plain
        };
        if taken {
            tracing::debug!(out = %out.display(), "plain library name taken by another project");
        }
        self.claimed_outputs.entry(out.clone()).or_insert(owner);
        Ok(out)
    }

    /// Output path of the File enclosing `component`.
    pub fn project_include(&mut self, component: ComponentId) -> Result<String> {
        let file = self
            .top_file(component)
            .ok_or_else(|| ComponentError::not_found(self.path_of(component)))?;
        self.write_library(file)
    }

    /// Make the output of `component`'s File visible in `file`.
    ///
    /// Emits `#include "<path>"` into `file` once per distinct path.
    pub fn include(&mut self, file: ComponentId, component: ComponentId) -> Result<String> {
        let path = self.project_include(component)?;
        let already = self
            .get(file)
            .file()
            .is_some_and(|data| data.included_libraries.contains(&path));
        if !already {
            let target = self.frontends.types(Language::Cpp)?;
            let line = format!("#include \"{}\"", target.string_format(&path));
            self.write_to_cont(file, &line);
            self.write_line_break(file);
            if let Some(data) = self.get_mut(file).file_mut() {
                data.included_libraries.push(path.clone());
            }
        }
        Ok(path)
    }

    /// Record native library `library` for `#include <library>` in `file`.
    pub fn include_default(&mut self, file: ComponentId, library: &str) {
        if let Some(data) = self.get_mut(file).file_mut() {
            if !data.include_defaults.iter().any(|known| known == library) {
                data.include_defaults.push(library.to_string());
            }
        }
    }

    fn path_env(&self, file: ComponentId) -> PathEnv {
        self.project_of(file)
            .map(|id| self.project(id).env)
            .unwrap_or_default()
    }
}
