//! Machine errors.

use std::io;
use std::path::PathBuf;

use fractal_component::ComponentError;

pub type Result<T, E = MachineError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error("`{}` is not inside project `{project}`", .path.display())]
    EntryOutsideProject { path: PathBuf, project: String },

    #[error("`{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MachineError {
    #[cold]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MachineError::Io {
            path: path.into(),
            source,
        }
    }
}
