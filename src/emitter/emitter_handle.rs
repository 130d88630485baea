//! Emitter Handle - Unified API for the timed key-press loop
//!
//! Provides a high-level interface for spawning the emitter on a blocking
//! task and shutting it down gracefully. The handle owns the shutdown
//! channel and the task handle; the emitter itself runs detached until
//! shutdown is requested.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::emitter::KeyEmitter;
use crate::injection::{InjectionError, KeyCode, KeystrokeFactory};

/// Smallest accepted interval between presses
///
/// Guards against a mistyped config flooding the OS input queue.
pub const MIN_INTERVAL_MS: u64 = 50;

/// Longest accepted initial delay (one hour)
pub const MAX_INITIAL_DELAY_MS: u64 = 3_600_000;

/// Configuration settings for the key emitter
///
/// Defaults reproduce the classic auto-key behavior: Enter every three
/// seconds, starting immediately.
///
/// # Examples
///
/// ```rust
/// use autokey::emitter::EmitterSettings;
/// use autokey::injection::KeyCode;
///
/// // Slow spacebar tapper with a grace period to focus the target window
/// let settings = EmitterSettings {
///     interval_ms: 10_000,
///     initial_delay_ms: 5_000,
///     key: KeyCode::Space,
/// };
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterSettings {
    /// Interval between presses in milliseconds
    ///
    /// At least this much time elapses between two consecutive presses.
    /// Values below [`MIN_INTERVAL_MS`] are rejected by validation.
    pub interval_ms: u64,

    /// Delay before the first press in milliseconds
    ///
    /// Gives the user time to move focus to the target window before
    /// injection begins.
    pub initial_delay_ms: u64,

    /// Key to press on every iteration
    pub key: KeyCode,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            initial_delay_ms: 0,
            key: KeyCode::Enter,
        }
    }
}

impl EmitterSettings {
    /// Checks the settings against the accepted bounds
    pub fn validate(&self) -> Result<(), EmitterError> {
        if self.interval_ms < MIN_INTERVAL_MS {
            return Err(EmitterError::InvalidSettings(format!(
                "interval_ms must be at least {}, got {}",
                MIN_INTERVAL_MS, self.interval_ms
            )));
        }
        if self.initial_delay_ms > MAX_INITIAL_DELAY_MS {
            return Err(EmitterError::InvalidSettings(format!(
                "initial_delay_ms must be at most {}, got {}",
                MAX_INITIAL_DELAY_MS, self.initial_delay_ms
            )));
        }
        Ok(())
    }

    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.interval_ms)
    }

    pub fn initial_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.initial_delay_ms)
    }
}

/// Final statistics of an emitter run
#[derive(Debug, Clone)]
pub struct PressStats {
    /// Total presses delivered
    pub press_count: u64,
    /// When the loop started
    pub started_at: DateTime<Local>,
    /// When the loop exited
    pub stopped_at: DateTime<Local>,
}

/// Errors that can occur during emitter initialization or operation
#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    /// Error from the injection backend
    #[error("Injection error: {0}")]
    InjectionError(#[from] InjectionError),

    /// Settings outside the accepted bounds
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Shutdown requested on a handle that already shut down
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// The emitter task panicked or could not be joined
    #[error("Thread error: {0}")]
    ThreadError(String),
}

/// Handle for managing the emitter lifecycle
///
/// # Threading Model
///
/// Spawns the press loop on `tokio::task::spawn_blocking`. The injection
/// backend is built inside that task from a `Send` factory closure, so
/// backends themselves never need to be `Send`. Shutdown travels over a
/// `std::sync::mpsc` channel that the loop polls with `recv_timeout`,
/// which bounds interrupt latency without waking between presses.
pub struct EmitterHandle {
    shutdown_tx: Option<std::sync::mpsc::Sender<()>>,

    task_handle: Option<JoinHandle<Result<PressStats, EmitterError>>>,
}

impl EmitterHandle {
    /// Spawns the emitter loop with the given settings and backend factory
    ///
    /// Settings are validated before the task starts so configuration
    /// errors surface synchronously. The loop begins pressing after the
    /// configured initial delay and runs until [`shutdown`] is called.
    ///
    /// # Errors
    ///
    /// * [`EmitterError::InvalidSettings`] - settings outside accepted bounds
    ///
    /// Backend construction failures surface later, from [`shutdown`],
    /// because the backend is built inside the emitter task.
    ///
    /// [`shutdown`]: EmitterHandle::shutdown
    pub fn spawn(
        settings: EmitterSettings,
        factory: KeystrokeFactory,
    ) -> Result<Self, EmitterError> {
        info!("Spawning key emitter with settings: {:?}", settings);
        settings.validate()?;

        let (shutdown_tx, shutdown_rx) = std::sync::mpsc::channel();

        let task_handle = tokio::task::spawn_blocking(move || {
            let keystroke = factory()?;
            let emitter = KeyEmitter::create(settings, keystroke)?;
            let stopped = emitter.initialize().run_until_shutdown(shutdown_rx);
            Ok(stopped.stats())
        });

        debug!("Emitter task spawned");
        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            task_handle: Some(task_handle),
        })
    }

    /// Gracefully shuts down the emitter and waits for the loop to exit
    ///
    /// Returns the statistics of the completed run. Calling shutdown a
    /// second time returns a channel error.
    pub async fn shutdown(&mut self) -> Result<PressStats, EmitterError> {
        debug!("Sending shutdown signal to emitter");

        // Send shutdown signal
        if let Some(tx) = self.shutdown_tx.take() {
            if tx.send(()).is_err() {
                warn!("Emitter task already terminated");
            }
        }

        // Wait for task completion
        if let Some(handle) = self.task_handle.take() {
            match handle.await {
                Ok(result) => {
                    debug!("Emitter task completed");
                    result
                }
                Err(e) => Err(EmitterError::ThreadError(format!(
                    "Emitter task panicked: {}",
                    e
                ))),
            }
        } else {
            Err(EmitterError::ChannelError(
                "Emitter already shut down".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_the_classic_auto_key_behavior() {
        let settings = EmitterSettings::default();
        assert_eq!(settings.interval_ms, 3000);
        assert_eq!(settings.initial_delay_ms, 0);
        assert_eq!(settings.key, KeyCode::Enter);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validation_rejects_sub_floor_interval() {
        let settings = EmitterSettings {
            interval_ms: MIN_INTERVAL_MS - 1,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(EmitterError::InvalidSettings(_))
        ));
    }

    #[test]
    fn validation_rejects_excessive_initial_delay() {
        let settings = EmitterSettings {
            initial_delay_ms: MAX_INITIAL_DELAY_MS + 1,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(EmitterError::InvalidSettings(_))
        ));
    }

    #[tokio::test]
    async fn spawn_rejects_invalid_settings_synchronously() {
        let settings = EmitterSettings {
            interval_ms: 1,
            ..Default::default()
        };
        let factory = crate::injection::keystroke_factory(crate::injection::KeystrokeBackend::NoOp);
        assert!(EmitterHandle::spawn(settings, factory).is_err());
    }
}
