//! Logging and profiling setup
//!
//! Log records go to stderr through a `fmt` layer filtered by `RUST_LOG`. With the
//! `profiling` feature, a Chrome trace layer can be attached as well; the trace
//! is flushed when the returned [`LoggingGuard`] is dropped.

use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Keeps trace output alive until dropped
#[must_use = "dropping the guard stops trace output"]
pub struct LoggingGuard {
    #[cfg(feature = "profiling")]
    _chrome: Option<tracing_chrome::FlushGuard>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()))
}

/// Initialize the global tracing subscriber
///
/// Must be called once, before anything is logged.
#[cfg(feature = "profiling")]
pub fn setup_logging(trace_file: Option<&Path>) -> LoggingGuard {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    let (chrome_layer, chrome_guard) = match trace_file {
        Some(path) => {
            let (layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
                .file(path)
                .build();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(chrome_layer)
        .with(fmt_layer)
        .init();

    if let Some(path) = trace_file {
        tracing::info!("Profiling enabled, writing Chrome trace to {}", path.display());
    }

    LoggingGuard {
        _chrome: chrome_guard,
    }
}

/// Initialize the global tracing subscriber
///
/// Must be called once, before anything is logged.
#[cfg(not(feature = "profiling"))]
pub fn setup_logging(trace_file: Option<&Path>) -> LoggingGuard {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    tracing_subscriber::registry().with(fmt_layer).init();

    if let Some(path) = trace_file {
        tracing::warn!(
            "Ignoring trace file {}: built without the `profiling` feature",
            path.display()
        );
    }

    LoggingGuard {}
}
