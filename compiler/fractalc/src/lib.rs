//! Fractalc - the Fractal Machine
//!
//! Drives the component tree end to end:
//!
//! ```text
//! entry.light
//!     │  find or register the owning project
//!     ▼
//! SymbolTree::solve_component ──► File
//!     │  load, mark `main` called
//!     ▼
//! SymbolTree::write_library ──► <temp>/<library>.hpp
//! ```
//!
//! The default frontends read Light sources in the textual Linear format
//! and C/C++ headers as simple prototype lists.

mod config;
mod error;
pub mod frontends;
mod machine;
mod tracing_setup;

pub use config::MachineConfig;
pub use error::{MachineError, Result};
pub use machine::{CompileOutput, Machine};
pub use tracing_setup::init_tracing;
