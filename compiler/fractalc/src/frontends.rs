//! Default language frontends.
//!
//! - [`LinearTextFrontend`]: Light sources written in the textual Linear
//!   format
//! - [`HeaderFrontend`]: C/C++ headers, scanned for plain function
//!   prototypes

mod header;
mod light;
mod literal;

use std::sync::Arc;

use fractal_component::Frontends;

pub use header::{CppTypes, HeaderFrontend};
pub use light::{LightTypes, LinearTextFrontend};

/// Both default frontends.
pub fn default_frontends() -> Frontends {
    Frontends::new()
        .with(Arc::new(LinearTextFrontend::new()))
        .with(Arc::new(HeaderFrontend::new()))
}
