//! Projects and path formatting.

use std::io;
use std::path::{Component as PathPart, Path, PathBuf};

use crate::ComponentId;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ProjectId(u32);

impl ProjectId {
    pub(crate) fn new(index: usize) -> Self {
        ProjectId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How paths are spelled in generated `#include` lines.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PathStyle {
    /// Whatever the host produces.
    #[default]
    Native,
    /// Forward slashes only.
    Posix,
}

/// Platform path formatting for emitted include paths.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PathEnv {
    pub style: PathStyle,
}

impl PathEnv {
    pub fn new(style: PathStyle) -> Self {
        PathEnv { style }
    }

    /// Spell `path` for an include line.
    pub fn normalize(&self, path: &Path) -> String {
        let text = lexical_normalize(path).to_string_lossy().into_owned();
        match self.style {
            PathStyle::Native => text,
            PathStyle::Posix => text.replace('\\', "/"),
        }
    }
}

/// Absolute, lexically normalized form of `path`.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    Ok(lexical_normalize(&std::path::absolute(path)?))
}

/// Drop `.` and fold `..` without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for part in path.components() {
        match part {
            PathPart::CurDir => {}
            PathPart::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// A root directory of Light sources compiled together.
#[derive(Clone, Debug)]
pub struct Project {
    pub name: String,
    pub root: PathBuf,
    /// Where generated headers are written.
    pub temp_dir: PathBuf,
    pub env: PathEnv,
    /// Root File of the project's skeleton.
    pub root_component: ComponentId,
}

impl Project {
    /// Library base name of `path` (a source under `root`): the relative
    /// path without extension, separators replaced by `_`.
    pub fn library_name(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(relative) => relative
                .with_extension("")
                .components()
                .map(|part| part.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("_"),
            Err(_) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}
