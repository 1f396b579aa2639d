//! webpen - browser playground core
//!
//! Module structure:
//! - models: file tree, language inference, path resolution
//! - preview: preview document composer, console shim, debounce
//! - console: frame-to-host console relay and log
//! - persistence: local store, wire records, seed, share client, export
//! - runtime: background tasks for the share endpoint
//! - session: top-level handle tying everything together

pub mod console;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod preview;
pub mod runtime;
pub mod session;
