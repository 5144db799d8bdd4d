//! Platform-neutral input and window events.
//!
//! Every backend translates its native notifications into [`Event`] values
//! and appends them to the window's [`EventQueue`] in delivery order.

mod keyboard;
mod mouse;
/// FIFO holding translated events until the application polls them.
pub mod queue;

pub use keyboard::{Key, UnknownKey};
pub use mouse::MouseButton;
pub use queue::EventQueue;

/// One input or window notification.
///
/// Positions are window-relative physical pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Event {
    /// Placeholder carrying no information.
    #[default]
    Invalid,
    /// Pointer moved.
    MouseMoved {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
    },
    /// Mouse button went down.
    MousePressed {
        /// Horizontal position at the time of the press.
        x: i32,
        /// Vertical position at the time of the press.
        y: i32,
        /// Which button.
        button: MouseButton,
    },
    /// Mouse button went up.
    MouseReleased {
        /// Horizontal position at the time of the release.
        x: i32,
        /// Vertical position at the time of the release.
        y: i32,
        /// Which button.
        button: MouseButton,
    },
    /// Wheel scrolled. Positive scrolls up (away from the user).
    MouseWheel {
        /// Number of notches.
        delta: i32,
    },
    /// Key went down. Auto-repeat produces repeated presses.
    KeyPressed {
        /// Which key.
        key: Key,
    },
    /// Key went up.
    KeyReleased {
        /// Which key.
        key: Key,
    },
    /// The drawable area changed size.
    WindowResized {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
    /// Keyboard focus changed.
    WindowFocus {
        /// `true` when the window gained focus.
        focused: bool,
    },
    /// The window was closed; no further events follow.
    WindowClosed,
}

/// Payload-free tag of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`Event::Invalid`].
    Invalid,
    /// [`Event::MouseMoved`].
    MouseMoved,
    /// [`Event::MousePressed`].
    MousePressed,
    /// [`Event::MouseReleased`].
    MouseReleased,
    /// [`Event::MouseWheel`].
    MouseWheel,
    /// [`Event::KeyPressed`].
    KeyPressed,
    /// [`Event::KeyReleased`].
    KeyReleased,
    /// [`Event::WindowResized`].
    WindowResized,
    /// [`Event::WindowFocus`].
    WindowFocus,
    /// [`Event::WindowClosed`].
    WindowClosed,
}

impl Event {
    /// The variant tag.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Invalid => EventKind::Invalid,
            Self::MouseMoved { .. } => EventKind::MouseMoved,
            Self::MousePressed { .. } => EventKind::MousePressed,
            Self::MouseReleased { .. } => EventKind::MouseReleased,
            Self::MouseWheel { .. } => EventKind::MouseWheel,
            Self::KeyPressed { .. } => EventKind::KeyPressed,
            Self::KeyReleased { .. } => EventKind::KeyReleased,
            Self::WindowResized { .. } => EventKind::WindowResized,
            Self::WindowFocus { .. } => EventKind::WindowFocus,
            Self::WindowClosed => EventKind::WindowClosed,
        }
    }

    // ── Factories ──

    /// [`Event::MouseMoved`] at `(x, y)`.
    #[must_use]
    pub const fn mouse_moved(x: i32, y: i32) -> Self {
        Self::MouseMoved { x, y }
    }

    /// [`Event::MousePressed`] or [`Event::MouseReleased`], picked by
    /// `pressed`.
    #[must_use]
    pub const fn mouse_button(
        x: i32,
        y: i32,
        button: MouseButton,
        pressed: bool,
    ) -> Self {
        if pressed {
            Self::MousePressed { x, y, button }
        } else {
            Self::MouseReleased { x, y, button }
        }
    }

    /// [`Event::MouseWheel`] by `delta` notches.
    #[must_use]
    pub const fn mouse_wheel(delta: i32) -> Self {
        Self::MouseWheel { delta }
    }

    /// [`Event::KeyPressed`].
    #[must_use]
    pub const fn key_pressed(key: Key) -> Self {
        Self::KeyPressed { key }
    }

    /// [`Event::KeyReleased`].
    #[must_use]
    pub const fn key_released(key: Key) -> Self {
        Self::KeyReleased { key }
    }

    /// [`Event::WindowResized`].
    #[must_use]
    pub const fn window_resized(width: u32, height: u32) -> Self {
        Self::WindowResized { width, height }
    }

    /// [`Event::WindowFocus`].
    #[must_use]
    pub const fn window_focus(focused: bool) -> Self {
        Self::WindowFocus { focused }
    }

    /// [`Event::WindowClosed`].
    #[must_use]
    pub const fn window_closed() -> Self {
        Self::WindowClosed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_invalid() {
        assert_eq!(Event::default(), Event::Invalid);
        assert_eq!(Event::default().kind(), EventKind::Invalid);
    }

    #[test]
    fn factories_produce_matching_kinds() {
        let cases = [
            (Event::mouse_moved(3, 4), EventKind::MouseMoved),
            (
                Event::mouse_button(1, 2, MouseButton::Left, true),
                EventKind::MousePressed,
            ),
            (
                Event::mouse_button(1, 2, MouseButton::X2, false),
                EventKind::MouseReleased,
            ),
            (Event::mouse_wheel(-1), EventKind::MouseWheel),
            (Event::key_pressed(Key::W), EventKind::KeyPressed),
            (Event::key_released(Key::W), EventKind::KeyReleased),
            (Event::window_resized(640, 480), EventKind::WindowResized),
            (Event::window_focus(false), EventKind::WindowFocus),
            (Event::window_closed(), EventKind::WindowClosed),
        ];
        for (event, kind) in cases {
            assert_eq!(event.kind(), kind);
        }
    }

    #[test]
    fn mouse_button_factory_keeps_payload() {
        assert_eq!(
            Event::mouse_button(10, 20, MouseButton::Right, true),
            Event::MousePressed {
                x: 10,
                y: 20,
                button: MouseButton::Right
            }
        );
    }
}
