use winit::keyboard::{self, KeyCode, KeyLocation, NamedKey, PhysicalKey};

use crate::event::Key;

/// Neutral key for a winit key event.
///
/// The physical scan code is authoritative. Only when winit could not
/// identify it is the logical key consulted, with the event's location
/// deciding the side of modifiers.
pub(crate) fn translate(event: &winit::event::KeyEvent) -> Option<Key> {
    match event.physical_key {
        PhysicalKey::Code(code) => from_code(code),
        PhysicalKey::Unidentified(_) => {
            from_logical(&event.logical_key, event.location)
        }
    }
}

#[allow(clippy::too_many_lines)]
pub(crate) fn from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Escape => Key::Esc,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::ScrollLock => Key::ScrollLock,
        KeyCode::NumLock => Key::NumLock,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Pause => Key::Pause,
        KeyCode::PrintScreen => Key::PrintScreen,
        KeyCode::Sleep => Key::Sleep,
        KeyCode::Space => Key::Space,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,

        KeyCode::Comma => Key::Comma,
        KeyCode::Period => Key::Period,
        KeyCode::Equal => Key::Equal,
        KeyCode::Minus => Key::Minus,
        KeyCode::Semicolon => Key::Colon,
        KeyCode::Slash => Key::Slash,
        KeyCode::Backquote => Key::Tilde,
        KeyCode::BracketLeft => Key::LBracket,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::BracketRight => Key::RBracket,
        KeyCode::Quote => Key::Apostrophe,

        KeyCode::ControlLeft => Key::LCtrl,
        KeyCode::AltLeft => Key::LAlt,
        KeyCode::ShiftLeft => Key::LShift,
        KeyCode::SuperLeft => Key::LWin,
        KeyCode::ControlRight => Key::RCtrl,
        KeyCode::AltRight => Key::RAlt,
        KeyCode::ShiftRight => Key::RShift,
        KeyCode::SuperRight => Key::RWin,

        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowUp => Key::ArrowUp,

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

        KeyCode::Numpad0 => Key::Numpad0,
        KeyCode::Numpad1 => Key::Numpad1,
        KeyCode::Numpad2 => Key::Numpad2,
        KeyCode::Numpad3 => Key::Numpad3,
        KeyCode::Numpad4 => Key::Numpad4,
        KeyCode::Numpad5 => Key::Numpad5,
        KeyCode::Numpad6 => Key::Numpad6,
        KeyCode::Numpad7 => Key::Numpad7,
        KeyCode::Numpad8 => Key::Numpad8,
        KeyCode::Numpad9 => Key::Numpad9,
        KeyCode::NumpadDecimal | KeyCode::NumpadComma => Key::NumpadDecimal,
        KeyCode::NumpadMultiply => Key::NumpadMultiply,
        KeyCode::NumpadDivide => Key::NumpadDivide,
        KeyCode::NumpadSubtract => Key::NumpadSubtract,
        KeyCode::NumpadAdd => Key::NumpadAdd,
        KeyCode::NumpadEnter => Key::NumpadEnter,

        KeyCode::Digit0 => Key::Num0,
        KeyCode::Digit1 => Key::Num1,
        KeyCode::Digit2 => Key::Num2,
        KeyCode::Digit3 => Key::Num3,
        KeyCode::Digit4 => Key::Num4,
        KeyCode::Digit5 => Key::Num5,
        KeyCode::Digit6 => Key::Num6,
        KeyCode::Digit7 => Key::Num7,
        KeyCode::Digit8 => Key::Num8,
        KeyCode::Digit9 => Key::Num9,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        _ => return None,
    };
    Some(key)
}

/// Fallback through the layout-dependent key.
pub(crate) fn from_logical(
    logical: &keyboard::Key,
    location: KeyLocation,
) -> Option<Key> {
    let sided = |left, right| {
        Some(if location == KeyLocation::Right { right } else { left })
    };
    match logical {
        keyboard::Key::Named(named) => match named {
            NamedKey::Shift => sided(Key::LShift, Key::RShift),
            NamedKey::Control => sided(Key::LCtrl, Key::RCtrl),
            NamedKey::Alt => sided(Key::LAlt, Key::RAlt),
            NamedKey::Super => sided(Key::LWin, Key::RWin),
            NamedKey::Escape => Some(Key::Esc),
            NamedKey::Enter if location == KeyLocation::Numpad => {
                Some(Key::NumpadEnter)
            }
            NamedKey::Enter => Some(Key::Enter),
            NamedKey::Tab => Some(Key::Tab),
            NamedKey::Space => Some(Key::Space),
            NamedKey::Backspace => Some(Key::Backspace),
            _ => None,
        },
        keyboard::Key::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => {
                    // single letters and digits share their names with Key
                    c.to_ascii_uppercase().to_string().parse().ok()
                }
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_codes_map_to_neutral_keys() {
        assert_eq!(from_code(KeyCode::KeyW), Some(Key::W));
        assert_eq!(from_code(KeyCode::Digit7), Some(Key::Num7));
        assert_eq!(from_code(KeyCode::Escape), Some(Key::Esc));
        assert_eq!(from_code(KeyCode::ShiftRight), Some(Key::RShift));
        assert_eq!(from_code(KeyCode::Semicolon), Some(Key::Colon));
        assert_eq!(from_code(KeyCode::NumpadEnter), Some(Key::NumpadEnter));
        assert_eq!(from_code(KeyCode::F13), None);
    }

    #[test]
    fn logical_modifiers_use_location_for_the_side() {
        let shift = keyboard::Key::Named(NamedKey::Shift);
        assert_eq!(
            from_logical(&shift, KeyLocation::Left),
            Some(Key::LShift)
        );
        assert_eq!(
            from_logical(&shift, KeyLocation::Right),
            Some(Key::RShift)
        );
        let ctrl = keyboard::Key::Named(NamedKey::Control);
        assert_eq!(
            from_logical(&ctrl, KeyLocation::Standard),
            Some(Key::LCtrl)
        );
    }

    #[test]
    fn logical_characters_fall_back_by_name() {
        let q = keyboard::Key::Character("q".into());
        assert_eq!(from_logical(&q, KeyLocation::Standard), Some(Key::Q));
        let three = keyboard::Key::Character("3".into());
        assert_eq!(
            from_logical(&three, KeyLocation::Standard),
            Some(Key::Num3)
        );
        let accent = keyboard::Key::Character("é".into());
        assert_eq!(from_logical(&accent, KeyLocation::Standard), None);
    }
}
