//! Window, camera and keybinding options with TOML preset support.
//!
//! Options serialize to/from TOML so a setup can be stored as a preset and
//! reloaded, e.g. by the demo binary from its first argument.

mod camera;
mod keybindings;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::{KeyAction, KeybindingOptions};
use serde::{Deserialize, Serialize};
pub use window::WindowOptions;

use crate::error::CasementError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[window]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Native window parameters.
    pub window: WindowOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`CasementError::OptionsParse`] for malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, CasementError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| CasementError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`CasementError::Io`] if the file cannot be read,
    /// [`CasementError::OptionsParse`] for malformed TOML.
    pub fn load(path: &Path) -> Result<Self, CasementError> {
        let content =
            std::fs::read_to_string(path).map_err(CasementError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`CasementError::OptionsParse`] if serialization fails,
    /// [`CasementError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CasementError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CasementError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CasementError::Io)?;
        }
        std::fs::write(path, content).map_err(CasementError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event::Key, platform::BackendKind};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[window]
width = 1280
backend = "x11"

[camera]
fovy = 75.0
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.window.width, 1280);
        assert_eq!(opts.window.backend, BackendKind::X11);
        assert_eq!(opts.camera.fovy, 75.0);
        // Everything else should be default
        assert_eq!(opts.window.height, 600);
        assert_eq!(opts.camera.at, [0.0, 0.0, -1.0]);
        assert_eq!(
            opts.keybindings.lookup(Key::W),
            Some(KeyAction::MoveForward)
        );
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup(Key::Esc), Some(KeyAction::Quit));
        assert_eq!(
            opts.keybindings.lookup(Key::Space),
            Some(KeyAction::ToggleCursorLock)
        );
        assert_eq!(opts.keybindings.lookup(Key::Z), None);
    }

    #[test]
    fn loaded_bindings_rebuild_the_reverse_map() {
        let toml_str = r#"
[keybindings.bindings]
quit = "Q"
move_forward = "ArrowUp"
ascend = "NotAKey"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup(Key::Q), Some(KeyAction::Quit));
        assert_eq!(
            opts.keybindings.lookup(Key::ArrowUp),
            Some(KeyAction::MoveForward)
        );
        // replaced wholesale: default W binding is gone
        assert_eq!(opts.keybindings.lookup(Key::W), None);
        assert_eq!(
            opts.keybindings.invalid_bindings(),
            vec![(KeyAction::Ascend, "NotAKey")]
        );
    }

    #[test]
    fn bind_replaces_previous_key() {
        let mut bindings = KeybindingOptions::default();
        bindings.bind(KeyAction::Quit, Key::F10);
        assert_eq!(bindings.lookup(Key::F10), Some(KeyAction::Quit));
        assert_eq!(bindings.lookup(Key::Esc), None);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[window\nwidth = ").unwrap_err();
        assert!(matches!(err, CasementError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("casement-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.window.title = "preset".into();
        opts.save(&dir.join("b.toml")).unwrap();
        Options::default().save(&dir.join("a.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "x").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["a", "b"]);
        assert_eq!(Options::load(&dir.join("b.toml")).unwrap(), opts);
        assert!(matches!(
            Options::load(&dir.join("missing.toml")),
            Err(CasementError::Io(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
