//! autokey - timed key-press emitter
//!
//! Repeatedly simulates pressing a key (Enter by default) at a fixed
//! interval until interrupted. The emitter runs on a background task with
//! graceful shutdown; key injection goes through a pluggable backend so
//! dry runs and headless environments work without a display server.

pub mod config;
pub mod emitter;
pub mod injection;

pub use config::AppConfig;
pub use emitter::{EmitterHandle, EmitterSettings, PressStats};
pub use injection::{detect_backend, keystroke_factory, KeyCode, Keystroke};
