//! Fractal Component - the translator core
//!
//! This crate turns Linear IR into a tree of components and the tree into
//! C++ source:
//! - `SymbolTree`: the component arena, with parent links as `ComponentId`s
//! - Solve: dotted-name resolution over the scope chain
//! - File skeletons built from the filesystem, loaded lazily
//! - Link: resolving and type-checking every reference of a loaded File
//! - The writer: per-component buffers with redirection
//! - Output paths, `#include` lines and projects
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: components live in one `Vec`, addressed by index
//! - **Closed variants**: every component kind is a `ComponentKind` variant
//! - **No globals**: all emission state lives on the components

mod check;
mod component;
mod emit;
mod error;
mod file;
mod frontends;
mod id;
mod library;
mod link;
mod project;
mod read;
mod solve;
mod stack;
mod tree;
mod writer;

#[cfg(test)]
mod test_support;

pub use check::{TypeIdentity, TypeVerdict};
pub use component::{
    Component, ComponentFlags, ComponentKind, ComponentType, DataStructureKind, FunctionData,
    MemberData, OperationData, OperationKind,
};
pub use emit::EmitOptions;
pub use error::{ComponentError, Result};
pub use file::FileData;
pub use frontends::Frontends;
pub use id::ComponentId;
pub use library::HEADER_EXTENSION;
pub use project::{absolute, PathEnv, PathStyle, Project, ProjectId};
pub use solve::{NativeFunction, Resolved, NATIVE_C_MARKER, NATIVE_FUNCTION_PREFIX};
pub use tree::SymbolTree;
pub use writer::WriteBuffer;
