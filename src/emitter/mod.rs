//! Key emitter subsystem
//!
//! Drives the timed key-press loop:
//!
//! 1. [`emitter`] - Typestate loop pressing the configured key per interval
//! 2. [`emitter_handle`] - Unified API and lifecycle management
//!
//! # Architecture
//!
//! ```text
//! EmitterHandle ──► KeyEmitter ──► Keystroke backend ──► OS input queue
//!                   (blocking task, shutdown via channel)
//! ```
//!
//! The loop runs on a blocking task so the injection backend never has to
//! cross a thread boundary.

pub mod emitter;
pub mod emitter_handle;

pub use emitter::KeyEmitter;
pub use emitter_handle::{EmitterError, EmitterHandle, EmitterSettings, PressStats};

use std::time::{Duration, Instant};

/// Spacing guard for press events
///
/// Tracks when the next press is allowed and guarantees that at least the
/// configured interval elapses between two consecutive presses, and that
/// the initial delay elapses before the first one.
#[derive(Debug, Clone)]
pub struct PressGate {
    /// Minimum spacing between presses
    min_interval: Duration,

    /// Earliest instant the next press may happen
    ready_at: Instant,
}

impl PressGate {
    /// Creates a gate that opens after `initial_delay`, then every `min_interval`
    pub fn new(min_interval: Duration, initial_delay: Duration) -> Self {
        Self {
            min_interval,
            ready_at: Instant::now() + initial_delay,
        }
    }

    /// Remaining wait until the gate opens; zero when it is already open
    pub fn time_until_ready(&self) -> Duration {
        self.ready_at.saturating_duration_since(Instant::now())
    }

    /// Records a press and closes the gate for the next interval
    pub fn mark_pressed(&mut self) {
        self.ready_at = Instant::now() + self.min_interval;
    }
}
