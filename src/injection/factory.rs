//! Backend selection and deferred construction

use std::fmt::{self, Display};

use tracing::{info, warn};

use super::{EnigoKeystroke, InjectionError, Keystroke, NoOpKeystroke};

/// Constructor closure for an injection backend
///
/// Backends are not `Send`, so the emitter receives this closure and
/// builds the backend inside its own thread.
pub type KeystrokeFactory = Box<dyn FnOnce() -> Result<Box<dyn Keystroke>, InjectionError> + Send>;

/// Available injection backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystrokeBackend {
    /// Real OS injection through enigo
    Enigo,
    /// Dry run, presses are logged only
    NoOp,
}

impl Display for KeystrokeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeystrokeBackend::Enigo => write!(f, "enigo"),
            KeystrokeBackend::NoOp => write!(f, "noop"),
        }
    }
}

/// Picks the backend for this run
///
/// Dry-run configuration always wins. On Linux the enigo backend needs a
/// display server, so headless sessions degrade to the no-op backend with
/// a warning instead of failing startup.
pub fn detect_backend(dry_run: bool) -> KeystrokeBackend {
    if dry_run {
        info!("Dry run configured, key presses will be logged only");
        return KeystrokeBackend::NoOp;
    }

    #[cfg(target_os = "linux")]
    {
        let has_display = std::env::var_os("DISPLAY").is_some()
            || std::env::var_os("WAYLAND_DISPLAY").is_some();
        if !has_display {
            warn!("No display server detected, falling back to dry-run backend");
            return KeystrokeBackend::NoOp;
        }
    }

    KeystrokeBackend::Enigo
}

/// Returns a `Send` constructor for the chosen backend
pub fn keystroke_factory(backend: KeystrokeBackend) -> KeystrokeFactory {
    match backend {
        KeystrokeBackend::Enigo => Box::new(|| {
            let keystroke = EnigoKeystroke::new()?;
            Ok(Box::new(keystroke) as Box<dyn Keystroke>)
        }),
        KeystrokeBackend::NoOp => {
            Box::new(|| Ok(Box::new(NoOpKeystroke::new()) as Box<dyn Keystroke>))
        }
    }
}
