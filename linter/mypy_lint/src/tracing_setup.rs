//! Tracing initialization for the CLI.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing (safe to call multiple times).
///
/// With `debug`, every lint request is logged as a tree on stderr; `RUST_LOG`
/// still narrows the output when set. Without it, nothing is installed unless
/// `RUST_LOG` is set.
pub fn init_tracing(debug: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let from_env = std::env::var("RUST_LOG").is_ok();
        if debug {
            let filter = if from_env {
                EnvFilter::from_default_env()
            } else {
                EnvFilter::new("debug")
            };
            let _ = tracing_subscriber::registry()
                .with(HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .try_init();
        } else if from_env {
            let _ = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}
