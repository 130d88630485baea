//! No-op injection backend for dry runs

use tracing::debug;

use super::{InjectionError, KeyCode, Keystroke};

/// Logs presses instead of injecting them
///
/// Used when dry-run mode is configured and as the fallback on systems
/// without a display server.
#[derive(Debug, Default)]
pub struct NoOpKeystroke {
    pressed: u64,
}

impl NoOpKeystroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of presses swallowed so far
    pub fn press_count(&self) -> u64 {
        self.pressed
    }
}

impl Keystroke for NoOpKeystroke {
    fn press(&mut self, key: KeyCode) -> Result<(), InjectionError> {
        self.pressed += 1;
        debug!("Dry run: would press {:?} (#{})", key, self.pressed);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_presses_without_side_effects() {
        let mut keystroke = NoOpKeystroke::new();
        assert_eq!(keystroke.press_count(), 0);

        keystroke.press(KeyCode::Enter).unwrap();
        keystroke.press(KeyCode::Space).unwrap();

        assert_eq!(keystroke.press_count(), 2);
        assert_eq!(keystroke.backend_name(), "noop");
    }
}
