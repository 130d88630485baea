//! enigo-based injection backend

use enigo::{Enigo, Key, KeyboardControllable};
use tracing::{debug, info};

use super::{InjectionError, KeyCode, Keystroke};

/// Injects key presses through enigo (X11 / Windows / macOS)
pub struct EnigoKeystroke {
    enigo: Enigo,
}

impl EnigoKeystroke {
    /// Creates the backend, verifying a display server is reachable first
    ///
    /// enigo aborts the process when it cannot connect to a display on
    /// Linux, so the check happens here where it can fail cleanly.
    pub fn new() -> Result<Self, InjectionError> {
        #[cfg(target_os = "linux")]
        if std::env::var_os("DISPLAY").is_none() && std::env::var_os("WAYLAND_DISPLAY").is_none()
        {
            return Err(InjectionError::InitializationError(
                "no display server available".to_string(),
            ));
        }

        info!("Initializing enigo injection backend");
        Ok(Self {
            enigo: Enigo::new(),
        })
    }
}

impl Keystroke for EnigoKeystroke {
    fn press(&mut self, key: KeyCode) -> Result<(), InjectionError> {
        debug!("Injecting key press: {:?}", key);
        self.enigo.key_click(map_key(key));
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "enigo"
    }
}

// Helper function to map our KeyCode to enigo's Key
pub fn map_key(key: KeyCode) -> Key {
    match key {
        KeyCode::Enter => Key::Return,
        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Escape => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::UpArrow,
        KeyCode::Down => Key::DownArrow,
        KeyCode::Left => Key::LeftArrow,
        KeyCode::Right => Key::RightArrow,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_code_maps_to_an_enigo_key() {
        let keys = [
            KeyCode::Enter,
            KeyCode::Space,
            KeyCode::Tab,
            KeyCode::Escape,
            KeyCode::Backspace,
            KeyCode::Delete,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::F1,
            KeyCode::F2,
            KeyCode::F3,
            KeyCode::F4,
            KeyCode::F5,
            KeyCode::F6,
            KeyCode::F7,
            KeyCode::F8,
            KeyCode::F9,
            KeyCode::F10,
            KeyCode::F11,
            KeyCode::F12,
        ];
        for key in keys {
            // map_key is a total match; this guards against new variants
            // being added without a mapping.
            let _ = map_key(key);
        }
    }

    #[test]
    fn default_key_maps_to_return() {
        assert!(matches!(map_key(KeyCode::Enter), Key::Return));
    }
}
