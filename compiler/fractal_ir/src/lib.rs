//! Fractal IR - Linear Intermediate Representation
//!
//! This crate contains the data shared between language frontends and the
//! component tree:
//! - `Linear` nodes stored flat in a `LinearArena`, addressed by `LinearId`
//! - The `Language` a source file is written in
//! - The `Frontend`/`Script` interfaces a language plugs in through
//! - The `TypeTable` interface used for type compatibility checks
//! - A textual form of Linear (`text`) for pre-lowered sources and dumps
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Linear>`, children are `LinearId(u32)` indices
//! - **Frontends are plug-ins**: the core never parses source text itself

mod frontend;
mod language;
mod linear;
pub mod text;
mod types;

pub use frontend::{Frontend, Script};
pub use language::Language;
pub use linear::{Linear, LinearArena, LinearId};
pub use text::TextError;
pub use types::{AttributeType, Classification, TypeDef, TypeTable};
