use serde::{Deserialize, Serialize};

use crate::platform::BackendKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Native window parameters applied when the window opens.
pub struct WindowOptions {
    /// Initial drawable width in physical pixels.
    pub width: u32,
    /// Initial drawable height in physical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Start in fullscreen.
    pub fullscreen: bool,
    /// Show the pointer over the window.
    pub cursor_visible: bool,
    /// Hold the pointer at the window center.
    pub cursor_locked: bool,
    /// Which native backend to open.
    pub backend: BackendKind,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "casement".into(),
            fullscreen: false,
            cursor_visible: true,
            cursor_locked: false,
            backend: BackendKind::default(),
        }
    }
}

impl WindowOptions {
    /// Width over height, 1 for a degenerate size.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}
