//! Log output, enabled by `RUST_LOG`.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, so normal runs pay nothing.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let layer = HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true);
        let installed = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(layer)
            .try_init();
        if let Err(err) = installed {
            eprintln!("warning: could not install log subscriber: {err}");
        }
    });
}
