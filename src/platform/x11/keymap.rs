use std::os::raw::{c_uint, c_ulong};

use x11_dl::keysym;

use crate::event::Key;

/// `XF86XK_Sleep` from the XFree86 vendor keysyms.
const XF86_SLEEP: c_uint = 0x1008_FF2F;

/// Neutral key for an unshifted keysym (index 0 of the keycode).
///
/// Keysyms already tell left and right modifiers apart. Keypad keys are
/// mapped by position, so the navigation keysyms reported with NumLock off
/// land on the same numpad keys as the digits.
#[allow(clippy::too_many_lines)]
pub(crate) fn from_keysym(sym: c_ulong) -> Option<Key> {
    let sym = c_uint::try_from(sym).ok()?;
    let key = match sym {
        keysym::XK_BackSpace => Key::Backspace,
        keysym::XK_Escape => Key::Esc,
        keysym::XK_Return => Key::Enter,
        keysym::XK_Tab | keysym::XK_ISO_Left_Tab => Key::Tab,
        keysym::XK_Caps_Lock => Key::CapsLock,
        keysym::XK_Scroll_Lock => Key::ScrollLock,
        keysym::XK_Num_Lock => Key::NumLock,
        keysym::XK_Delete => Key::Delete,
        keysym::XK_Insert => Key::Insert,
        keysym::XK_Pause => Key::Pause,
        keysym::XK_Print => Key::PrintScreen,
        XF86_SLEEP => Key::Sleep,
        keysym::XK_space => Key::Space,
        keysym::XK_Prior => Key::PageUp,
        keysym::XK_Next => Key::PageDown,
        keysym::XK_Home => Key::Home,
        keysym::XK_End => Key::End,

        keysym::XK_comma => Key::Comma,
        keysym::XK_period => Key::Period,
        keysym::XK_equal => Key::Equal,
        keysym::XK_minus => Key::Minus,
        keysym::XK_semicolon => Key::Colon,
        keysym::XK_slash => Key::Slash,
        keysym::XK_grave | keysym::XK_dead_grave => Key::Tilde,
        keysym::XK_bracketleft => Key::LBracket,
        keysym::XK_backslash => Key::Backslash,
        keysym::XK_bracketright => Key::RBracket,
        keysym::XK_apostrophe | keysym::XK_dead_acute => Key::Apostrophe,

        keysym::XK_Control_L => Key::LCtrl,
        keysym::XK_Alt_L | keysym::XK_Meta_L => Key::LAlt,
        keysym::XK_Shift_L => Key::LShift,
        keysym::XK_Super_L => Key::LWin,
        keysym::XK_Control_R => Key::RCtrl,
        keysym::XK_Alt_R | keysym::XK_Meta_R | keysym::XK_ISO_Level3_Shift => {
            Key::RAlt
        }
        keysym::XK_Shift_R => Key::RShift,
        keysym::XK_Super_R => Key::RWin,

        keysym::XK_Down => Key::ArrowDown,
        keysym::XK_Right => Key::ArrowRight,
        keysym::XK_Left => Key::ArrowLeft,
        keysym::XK_Up => Key::ArrowUp,

        keysym::XK_F1 => Key::F1,
        keysym::XK_F2 => Key::F2,
        keysym::XK_F3 => Key::F3,
        keysym::XK_F4 => Key::F4,
        keysym::XK_F5 => Key::F5,
        keysym::XK_F6 => Key::F6,
        keysym::XK_F7 => Key::F7,
        keysym::XK_F8 => Key::F8,
        keysym::XK_F9 => Key::F9,
        keysym::XK_F10 => Key::F10,
        keysym::XK_F11 => Key::F11,
        keysym::XK_F12 => Key::F12,

        keysym::XK_KP_0 | keysym::XK_KP_Insert => Key::Numpad0,
        keysym::XK_KP_1 | keysym::XK_KP_End => Key::Numpad1,
        keysym::XK_KP_2 | keysym::XK_KP_Down => Key::Numpad2,
        keysym::XK_KP_3 | keysym::XK_KP_Next => Key::Numpad3,
        keysym::XK_KP_4 | keysym::XK_KP_Left => Key::Numpad4,
        keysym::XK_KP_5 | keysym::XK_KP_Begin => Key::Numpad5,
        keysym::XK_KP_6 | keysym::XK_KP_Right => Key::Numpad6,
        keysym::XK_KP_7 | keysym::XK_KP_Home => Key::Numpad7,
        keysym::XK_KP_8 | keysym::XK_KP_Up => Key::Numpad8,
        keysym::XK_KP_9 | keysym::XK_KP_Prior => Key::Numpad9,
        keysym::XK_KP_Decimal
        | keysym::XK_KP_Separator
        | keysym::XK_KP_Delete => Key::NumpadDecimal,
        keysym::XK_KP_Multiply => Key::NumpadMultiply,
        keysym::XK_KP_Divide => Key::NumpadDivide,
        keysym::XK_KP_Subtract => Key::NumpadSubtract,
        keysym::XK_KP_Add => Key::NumpadAdd,
        keysym::XK_KP_Enter => Key::NumpadEnter,

        keysym::XK_0 => Key::Num0,
        keysym::XK_1 => Key::Num1,
        keysym::XK_2 => Key::Num2,
        keysym::XK_3 => Key::Num3,
        keysym::XK_4 => Key::Num4,
        keysym::XK_5 => Key::Num5,
        keysym::XK_6 => Key::Num6,
        keysym::XK_7 => Key::Num7,
        keysym::XK_8 => Key::Num8,
        keysym::XK_9 => Key::Num9,
        keysym::XK_a | keysym::XK_A => Key::A,
        keysym::XK_b | keysym::XK_B => Key::B,
        keysym::XK_c | keysym::XK_C => Key::C,
        keysym::XK_d | keysym::XK_D => Key::D,
        keysym::XK_e | keysym::XK_E => Key::E,
        keysym::XK_f | keysym::XK_F => Key::F,
        keysym::XK_g | keysym::XK_G => Key::G,
        keysym::XK_h | keysym::XK_H => Key::H,
        keysym::XK_i | keysym::XK_I => Key::I,
        keysym::XK_j | keysym::XK_J => Key::J,
        keysym::XK_k | keysym::XK_K => Key::K,
        keysym::XK_l | keysym::XK_L => Key::L,
        keysym::XK_m | keysym::XK_M => Key::M,
        keysym::XK_n | keysym::XK_N => Key::N,
        keysym::XK_o | keysym::XK_O => Key::O,
        keysym::XK_p | keysym::XK_P => Key::P,
        keysym::XK_q | keysym::XK_Q => Key::Q,
        keysym::XK_r | keysym::XK_R => Key::R,
        keysym::XK_s | keysym::XK_S => Key::S,
        keysym::XK_t | keysym::XK_T => Key::T,
        keysym::XK_u | keysym::XK_U => Key::U,
        keysym::XK_v | keysym::XK_V => Key::V,
        keysym::XK_w | keysym::XK_W => Key::W,
        keysym::XK_x | keysym::XK_X => Key::X,
        keysym::XK_y | keysym::XK_Y => Key::Y,
        keysym::XK_z | keysym::XK_Z => Key::Z,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: c_uint) -> c_ulong {
        c_ulong::from(s)
    }

    #[test]
    fn keysyms_distinguish_modifier_sides() {
        assert_eq!(from_keysym(sym(keysym::XK_Shift_L)), Some(Key::LShift));
        assert_eq!(from_keysym(sym(keysym::XK_Shift_R)), Some(Key::RShift));
        assert_eq!(from_keysym(sym(keysym::XK_Control_R)), Some(Key::RCtrl));
        assert_eq!(from_keysym(sym(keysym::XK_Super_L)), Some(Key::LWin));
    }

    #[test]
    fn letters_and_digits() {
        assert_eq!(from_keysym(sym(keysym::XK_w)), Some(Key::W));
        assert_eq!(from_keysym(sym(keysym::XK_W)), Some(Key::W));
        assert_eq!(from_keysym(sym(keysym::XK_0)), Some(Key::Num0));
    }

    #[test]
    fn keypad_navigation_maps_by_position() {
        assert_eq!(from_keysym(sym(keysym::XK_KP_Home)), Some(Key::Numpad7));
        assert_eq!(from_keysym(sym(keysym::XK_KP_7)), Some(Key::Numpad7));
        assert_eq!(
            from_keysym(sym(keysym::XK_KP_Delete)),
            Some(Key::NumpadDecimal)
        );
    }

    #[test]
    fn unknown_keysyms_are_dropped() {
        assert_eq!(from_keysym(0), None);
        assert_eq!(from_keysym(sym(keysym::XK_F20)), None);
        assert_eq!(from_keysym(c_ulong::MAX), None);
    }
}
