//! Tracing subscriber installation.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Filter variable read first; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "FRACTAL_LOG";

/// When set, events are rendered as an indented span tree.
pub const LOG_TREE_ENV: &str = "FRACTAL_LOG_TREE";

/// Install the global subscriber once.
///
/// Nothing is installed unless `FRACTAL_LOG` or `RUST_LOG` is set, e.g.
/// `FRACTAL_LOG=fractal_component=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_from_default_env());
        let Ok(filter) = filter else {
            return;
        };

        let installed = if std::env::var_os(LOG_TREE_ENV).is_some() {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init()
        };
        if let Err(error) = installed {
            tracing::debug!(%error, "subscriber already installed");
        }
    });
}
