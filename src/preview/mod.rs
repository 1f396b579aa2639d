//! Preview pipeline: document composition and debounced refresh.

pub mod composer;
pub mod debounce;
pub mod shim;

pub use composer::{compose, PLACEHOLDER_DOCUMENT};
pub use debounce::{DebouncedComposer, PreviewOutput, PreviewTarget, DEFAULT_DELAY};
pub use shim::CONSOLE_SHIM;
