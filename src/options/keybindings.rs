use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::event::Key;

/// Application actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// move_forward = "W"
/// quit = "Esc"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Move along the view direction.
    MoveForward,
    /// Move against the view direction.
    MoveBackward,
    /// Strafe left.
    StrafeLeft,
    /// Strafe right.
    StrafeRight,
    /// Move along the camera's up vector.
    Ascend,
    /// Move against the camera's up vector.
    Descend,
    /// Toggle cursor lock (and mouse look).
    ToggleCursorLock,
    /// Toggle fullscreen.
    ToggleFullscreen,
    /// Close the window.
    Quit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key names.
pub struct KeybindingOptions {
    /// Maps action → [`Key`] name (e.g. `MoveForward` → `"W"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<Key, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::MoveForward, "W".into()),
            (KeyAction::MoveBackward, "S".into()),
            (KeyAction::StrafeLeft, "A".into()),
            (KeyAction::StrafeRight, "D".into()),
            (KeyAction::Ascend, "E".into()),
            (KeyAction::Descend, "Q".into()),
            (KeyAction::ToggleCursorLock, "Space".into()),
            (KeyAction::ToggleFullscreen, "F11".into()),
            (KeyAction::Quit, "Esc".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key → action). Names that match no
    /// [`Key`] are skipped; [`invalid_bindings`](Self::invalid_bindings)
    /// lists them.
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, name) in &self.bindings {
            if let Ok(key) = name.parse::<Key>() {
                let _ = self.key_to_action.insert(key, *action);
            }
        }
    }

    /// Bindings whose key name matches no [`Key`], sorted by name.
    #[must_use]
    pub fn invalid_bindings(&self) -> Vec<(KeyAction, &str)> {
        let mut invalid: Vec<(KeyAction, &str)> = self
            .bindings
            .iter()
            .filter(|(_, name)| name.parse::<Key>().is_err())
            .map(|(action, name)| (*action, name.as_str()))
            .collect();
        invalid.sort_by(|a, b| a.1.cmp(b.1));
        invalid
    }

    /// Look up the action bound to a key.
    #[must_use]
    pub fn lookup(&self, key: Key) -> Option<KeyAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Bind `action` to `key`, replacing its previous key.
    pub fn bind(&mut self, action: KeyAction, key: Key) {
        let _ = self.bindings.insert(action, key.name().to_owned());
        self.rebuild_reverse_map();
    }
}
