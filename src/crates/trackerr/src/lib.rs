//! Trackable error chains and readable stack traces
//!
//! Errors are built bottom-up by explicit wrapping instead of call-stack
//! capture. Some errors are *tracked*: they carry an identifier issued by a
//! [`Realm`] that stays stable across wraps, which makes them easy to match in
//! tests, docs and dashboards. Some wrap points are *checkpoints*: they mark
//! interface boundaries and partition the rendered stack trace.
//!
//! # Modules
//!
//! - `node` - The [`Trackerr`] chain node and its wrapping combinators
//! - `realm` - Identifier allocation via [`Realm`] and [`IntRealm`]
//! - `global` - The process-wide default realm and the initialisation guard
//! - `chain` - Chain traversal and membership predicates
//! - `render` - Stack trace rendering and the debug printer
//! - `recover` - Converting panics into error chains
//! - `config` - Render configuration loaded from JSON or the environment
//!
//! # Example
//!
//! ```rust
//! use trackerr::{error_stack, IntRealm, Realm};
//!
//! let realm = IntRealm::new();
//! let read_failed = realm.track("Failed to read workflow");
//! let api = realm.checkpoint("Storage API");
//!
//! let e = read_failed.caused_by(api.because("disk unplugged"), "could not open file");
//! print!("{}", error_stack(Some(&e)));
//! ```

pub mod chain;
pub mod config;
pub mod global;
mod macros;
pub mod node;
pub mod realm;
pub mod recover;
pub mod render;

pub use chain::{
    all, all_ordered, any, as_stack, chain_length, has_tracked, is, is_checkpoint, is_tracked,
    linearize, linearize_bounded, root_cause,
};
pub use config::{ConfigBuilder, TrackerrConfig};
pub use global::{
    checkpoint, default_realm, err_bug, err_insane, err_todo, initialised, is_initialised,
    new_error, track, untracked,
};
pub use node::Trackerr;
pub use realm::{IntRealm, Realm};
pub use recover::{debug_panic, from_panic_payload, recover};
pub use render::{debug, debug_to, error_stack, error_stack_with, error_without_cause, StackStyle};

use thiserror::Error;

/// Errors raised by the configuration and output layers
///
/// Chain construction, traversal and rendering never fail; only loading
/// configuration and writing debug output can.
#[derive(Debug, Error)]
pub enum TrackerrError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for trackerr operations
pub type Result<T> = std::result::Result<T, TrackerrError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
