//! Debounced recomposition: pending-work coalescing for the preview.
//!
//! Every edit re-arms a single deadline instead of stacking timers;
//! a tick past the deadline composes once. Outputs carry a growing
//! generation so a stale composition can never replace a newer one
//! on the preview target (last writer wins).

use std::time::{Duration, Instant};

use crate::models::FileView;

use super::composer::compose;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutput {
    pub generation: u64,
    pub html: String,
}

pub struct DebouncedComposer {
    delay: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl DebouncedComposer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            generation: 0,
        }
    }

    /// Schedules a recomposition, replacing any pending deadline.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Composes when the quiescence window has elapsed; otherwise
    /// returns `None` and keeps waiting.
    pub fn poll(&mut self, now: Instant, files: &[FileView]) -> Option<PreviewOutput> {
        if !self.is_due(now) {
            return None;
        }
        self.deadline = None;
        self.generation += 1;
        Some(PreviewOutput {
            generation: self.generation,
            html: compose(files),
        })
    }
}

impl Default for DebouncedComposer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

/// The host-side stand-in for the rendering surface: remembers which
/// generation it shows and refuses anything older.
#[derive(Debug, Default)]
pub struct PreviewTarget {
    generation: u64,
    html: Option<String>,
}

impl PreviewTarget {
    pub fn apply(&mut self, output: &PreviewOutput) -> bool {
        if output.generation <= self.generation {
            return false;
        }
        self.generation = output.generation;
        self.html = Some(output.html.clone());
        true
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
