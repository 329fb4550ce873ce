//! stderr logging whose level follows the `debug` setting.
//!
//! stdout carries the protocol, so every log line goes to stderr.

use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

const DEFAULT_FILTER: &str = "info";
const DEBUG_FILTER: &str = "debug";

/// Switches the log filter at runtime.
///
/// When `RUST_LOG` is set it wins and the `debug` setting is ignored.
#[derive(Clone)]
pub struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogControl {
    pub fn set_debug(&self, debug: bool) {
        if self.from_env {
            return;
        }
        let directives = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };
        if let Err(error) = self.handle.modify(|filter| *filter = EnvFilter::new(directives)) {
            tracing::warn!(%error, "failed to change the log filter");
        }
    }
}

pub fn init() -> LogControl {
    let from_env = std::env::var("RUST_LOG").is_ok();
    let filter = if from_env {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(DEFAULT_FILTER)
    };
    let (filter, handle) = reload::Layer::new(filter);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();

    LogControl { handle, from_env }
}
