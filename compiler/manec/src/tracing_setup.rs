//! Tracing subscriber setup for the `mane` binary.
//!
//! Nothing is installed unless `RUST_LOG` is set:
//!
//! ```text
//! RUST_LOG=manec=debug mane resolve ./greet.go
//! RUST_LOG=manec::resolve=trace MANE_LOG_TREE=1 mane resolve io
//! ```

use std::sync::Once;

/// Selects the indented span-tree output instead of flat lines.
pub const LOG_TREE_ENV: &str = "MANE_LOG_TREE";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);
        let result = if std::env::var_os(LOG_TREE_ENV).is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        if let Err(error) = result {
            eprintln!("warning: tracing not initialized: {error}");
        }
    });
}
