use chrono::{DateTime, Local};
use statum::{machine, state};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use tracing::{debug, error, info, warn};

use super::emitter_handle::{EmitterError, EmitterSettings, PressStats};
use super::PressGate;
use crate::injection::Keystroke;

// Define emitter states using statum's state macro
#[state]
#[derive(Debug, Clone)]
pub enum EmitterState {
    Initializing,
    Emitting,
    Stopped,
}

#[machine]
pub struct KeyEmitter<S: EmitterState> {
    // Settings for interval, delay and key
    settings: EmitterSettings,

    // Injection backend, constructed inside the emitter thread
    keystroke: Box<dyn Keystroke>,

    // Spacing guard between presses
    gate: PressGate,

    // Total presses delivered
    press_count: u64,

    // Loop start and stop timestamps
    started_at: Option<DateTime<Local>>,
    stopped_at: Option<DateTime<Local>>,
}

// Implementation of methods available in all states
impl<S: EmitterState> KeyEmitter<S> {
    // Get a reference to the current settings
    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }

    pub fn press_count(&self) -> u64 {
        self.press_count
    }
}

// Implementation for Initializing state
impl KeyEmitter<Initializing> {
    pub fn create(
        settings: EmitterSettings,
        keystroke: Box<dyn Keystroke>,
    ) -> Result<Self, EmitterError> {
        settings.validate()?;
        debug!("Creating KeyEmitter with settings: {:?}", settings);

        let gate = PressGate::new(settings.interval(), settings.initial_delay());

        Ok(Self::new(settings, keystroke, gate, 0, None, None))
    }

    // Transition to the Emitting state
    pub fn initialize(self) -> KeyEmitter<Emitting> {
        info!(
            "Key emitter initialized: key {:?} every {}ms via {} backend",
            self.settings.key,
            self.settings.interval_ms,
            self.keystroke.backend_name()
        );
        self.transition()
    }
}

// Implementation for the emitter in Emitting state
impl KeyEmitter<Emitting> {
    // Deliver a single press through the backend
    //
    // Press failures are logged and tolerated; one bad injection must not
    // stop the loop.
    fn press_once(&mut self) {
        match self.keystroke.press(self.settings.key) {
            Ok(()) => {
                self.press_count += 1;
                debug!("Press #{} delivered", self.press_count);
            }
            Err(e) => {
                error!("Failed to inject key press: {}", e);
            }
        }
        self.gate.mark_pressed();
    }

    /// Runs the press loop until a shutdown signal arrives
    ///
    /// The wait between presses doubles as the shutdown wait: the loop
    /// blocks on the shutdown channel with the gate's remaining time as
    /// timeout, so an interrupt wakes it immediately instead of sleeping
    /// out the current interval. A closed channel counts as shutdown.
    pub fn run_until_shutdown(mut self, shutdown_rx: Receiver<()>) -> KeyEmitter<Stopped> {
        info!("Starting key emitter loop");
        self.started_at = Some(Local::now());

        // For throughput monitoring
        let mut presses_since_log = 0u64;
        let mut last_log_time = Local::now();
        let log_interval = chrono::Duration::seconds(10);

        loop {
            let wait = self.gate.time_until_ready();

            match shutdown_rx.recv_timeout(wait) {
                Ok(()) => {
                    info!("Shutdown signal received, stopping emitter");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("Shutdown channel closed, stopping emitter");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    self.press_once();
                    presses_since_log += 1;

                    // Log throughput stats periodically
                    let now = Local::now();
                    if now - last_log_time > log_interval {
                        info!(
                            "Emitter stats: {} presses in last {} seconds ({} total)",
                            presses_since_log,
                            log_interval.num_seconds(),
                            self.press_count
                        );
                        presses_since_log = 0;
                        last_log_time = now;
                    }
                }
            }
        }

        self.stopped_at = Some(Local::now());
        info!(
            "Key emitter loop finished after {} presses",
            self.press_count
        );
        self.transition()
    }
}

// Implementation for Stopped state
impl KeyEmitter<Stopped> {
    /// Final statistics for the completed run
    pub fn stats(&self) -> PressStats {
        PressStats {
            press_count: self.press_count,
            started_at: self.started_at.unwrap_or_else(Local::now),
            stopped_at: self.stopped_at.unwrap_or_else(Local::now),
        }
    }
}
