//! Machine configuration.

use std::path::PathBuf;

use fractal_component::{EmitOptions, PathStyle};

/// Directory for generated headers.
pub const TEMP_DIR_ENV: &str = "FRACTAL_TEMP_DIR";

/// `1`/`true` drops declarations nothing references.
pub const OMIT_UNCALLED_ENV: &str = "FRACTAL_OMIT_UNCALLED";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MachineConfig {
    /// Where every project writes its generated headers.
    pub temp_dir: PathBuf,
    /// Name for projects registered implicitly by `compile`; defaults to
    /// the directory name of the entry file.
    pub project_name: Option<String>,
    pub emit: EmitOptions,
    pub path_style: PathStyle,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            temp_dir: std::env::temp_dir().join("fractal"),
            project_name: None,
            emit: EmitOptions::default(),
            path_style: PathStyle::default(),
        }
    }
}

impl MachineConfig {
    /// Defaults overridden by `FRACTAL_TEMP_DIR` and `FRACTAL_OMIT_UNCALLED`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(TEMP_DIR_ENV).filter(|dir| !dir.is_empty()) {
            config.temp_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup(OMIT_UNCALLED_ENV) {
            config.emit.omit_uncalled = matches!(flag.trim(), "1" | "true" | "yes");
        }
        config
    }

    #[must_use]
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_emit_options(mut self, emit: EmitOptions) -> Self {
        self.emit = emit;
        self
    }

    #[must_use]
    pub fn with_path_style(mut self, path_style: PathStyle) -> Self {
        self.path_style = path_style;
        self
    }
}
