//! mane: concurrent Go package loading and interface flattening.
//!
//! # Architecture
//!
//! ```text
//! target (file.go | import/path)
//!     │
//!     ▼
//! PackageLoader ──► PackageSource (FsSource)     at most one load per key
//!     │
//!     ▼
//! Resolver ──► Vec<Interface>                    embeds expanded in place
//!     │
//!     ▼
//! report (text | json)
//! ```
//!
//! One [`PackageLoader`] is shared by every resolution in a run, including
//! resolutions running in parallel. Foreign packages reached through
//! qualified embeds go through the same loader.

pub mod commands;
pub mod config;
pub mod loader;
pub mod locator;
pub mod report;
pub mod resolve;
pub mod sync;
pub mod testing;
pub mod tracing_setup;

pub use config::{Config, ForeignKeyMode, OutputFormat};
pub use loader::{FsSource, LoadError, PackageLoader, PackageSource, SourceError};
pub use resolve::{ErrorKind, ResolveError, Resolver};
pub use tracing_setup::init_tracing;
