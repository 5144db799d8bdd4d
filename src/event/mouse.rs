/// Platform-neutral mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// First extra button, usually "back".
    X1,
    /// Second extra button, usually "forward".
    X2,
}

#[cfg(feature = "winit-backend")]
impl MouseButton {
    /// Map a winit button; `Other` buttons have no neutral counterpart.
    #[must_use]
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            winit::event::MouseButton::Back => Some(Self::X1),
            winit::event::MouseButton::Forward => Some(Self::X2),
            winit::event::MouseButton::Other(_) => None,
        }
    }
}

#[cfg(all(test, feature = "winit-backend"))]
mod tests {
    use super::*;

    #[test]
    fn winit_buttons_map_to_neutral_buttons() {
        use winit::event::MouseButton as W;
        assert_eq!(MouseButton::from_winit(W::Left), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_winit(W::Back), Some(MouseButton::X1));
        assert_eq!(
            MouseButton::from_winit(W::Forward),
            Some(MouseButton::X2)
        );
        assert_eq!(MouseButton::from_winit(W::Other(7)), None);
    }
}
