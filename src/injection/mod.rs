//! Key injection backends
//!
//! Provides the seam between the emitter loop and OS-level input
//! injection. The real backend uses enigo; the no-op backend logs
//! presses instead of injecting them and is used for dry runs and
//! environments without a display server.

pub mod enigo_backend;
pub mod factory;
pub mod noop;

pub use enigo_backend::EnigoKeystroke;
pub use factory::{detect_backend, keystroke_factory, KeystrokeBackend, KeystrokeFactory};
pub use noop::NoOpKeystroke;

use serde::{Deserialize, Serialize};

/// Keys the emitter can inject
///
/// Closed set so configuration files can only name keys every backend
/// supports. Serialized in lowercase for the TOML config (`key = "enter"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCode {
    Enter,
    Space,
    Tab,
    Escape,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

// Injection errors
#[derive(Debug, thiserror::Error)]
pub enum InjectionError {
    #[error("Failed to initialize injection backend: {0}")]
    InitializationError(String),

    #[error("Failed to inject key press: {0}")]
    PressError(String),
}

/// Trait for key injection backends
///
/// A backend delivers a single key-down/key-up pair to the OS. Backends
/// are not required to be `Send`; they are constructed inside the thread
/// that uses them via [`KeystrokeFactory`].
pub trait Keystroke {
    /// Injects a single press-and-release of the given key
    fn press(&mut self, key: KeyCode) -> Result<(), InjectionError>;

    /// Short backend name for logging
    fn backend_name(&self) -> &'static str;
}
