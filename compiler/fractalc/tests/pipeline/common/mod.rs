//! A source directory registered as project `app` plus an output
//! directory, both removed when the fixture drops.
//!
//! The project skeleton is a snapshot of the directory, so `app` is
//! registered on the first compile, after the sources were written.

use std::fs;
use std::path::{Path, PathBuf};

use fractal_component::ProjectId;
use fractalc::{init_tracing, CompileOutput, Machine, MachineConfig, Result};
use tempfile::TempDir;

pub const PROJECT: &str = "app";

pub struct Workspace {
    pub src: TempDir,
    pub out: TempDir,
    pub machine: Machine,
    project: Option<ProjectId>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// `config` with its temp directory replaced by the fixture's.
    pub fn with_config(config: MachineConfig) -> Self {
        init_tracing();
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let machine = Machine::new(config.with_temp_dir(out.path()));
        Workspace {
            src,
            out,
            machine,
            project: None,
        }
    }

    /// Register `app` unless already registered.
    pub fn register(&mut self) -> ProjectId {
        if let Some(project) = self.project {
            return project;
        }
        let project = self.machine.add_project(PROJECT, self.src.path()).unwrap();
        self.project = Some(project);
        project
    }

    /// Write a source file below the project root.
    pub fn put(&self, relative: &str, contents: &str) -> PathBuf {
        write(self.src.path(), relative, contents)
    }

    pub fn compile(&mut self, relative: &str) -> Result<CompileOutput> {
        self.register();
        let entry = self.src.path().join(relative);
        self.machine.compile(entry)
    }

    /// Path of a generated header, spelled as in include lines.
    pub fn out_path(&self, name: &str) -> String {
        self.out.path().join(name).display().to_string()
    }

    pub fn src_path(&self, relative: &str) -> String {
        self.src.path().join(relative).display().to_string()
    }

    pub fn read_out(&self, name: &str) -> String {
        fs::read_to_string(self.out.path().join(name)).unwrap()
    }
}

/// Write `contents` to `root/relative`, creating directories.
pub fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}
