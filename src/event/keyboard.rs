use std::{fmt, str::FromStr};

macro_rules! keys {
    ($($variant:ident => $name:literal,)*) => {
        /// Platform-neutral keyboard key.
        ///
        /// Modifiers come in left and right variants; every backend resolves
        /// the side before an event is queued.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Key {
            $(
                #[doc = concat!("The `", $name, "` key.")]
                $variant,
            )*
        }

        impl Key {
            /// Every key, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Stable name, as written in keybinding files.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

keys! {
    Backspace => "Backspace",
    Esc => "Esc",
    Enter => "Enter",
    Tab => "Tab",
    CapsLock => "CapsLock",
    ScrollLock => "ScrollLock",
    NumLock => "NumLock",
    Delete => "Delete",
    Insert => "Insert",
    Pause => "Pause",
    PrintScreen => "PrintScreen",
    Sleep => "Sleep",
    Space => "Space",
    PageUp => "PageUp",
    PageDown => "PageDown",
    Home => "Home",
    End => "End",

    Comma => "Comma",
    Period => "Period",
    Equal => "Equal",
    Minus => "Minus",
    Colon => "Colon",
    Slash => "Slash",
    Tilde => "Tilde",
    LBracket => "LBracket",
    Backslash => "Backslash",
    RBracket => "RBracket",
    Apostrophe => "Apostrophe",

    LCtrl => "LCtrl",
    LAlt => "LAlt",
    LShift => "LShift",
    LWin => "LWin",
    RCtrl => "RCtrl",
    RAlt => "RAlt",
    RShift => "RShift",
    RWin => "RWin",

    ArrowDown => "ArrowDown",
    ArrowRight => "ArrowRight",
    ArrowLeft => "ArrowLeft",
    ArrowUp => "ArrowUp",

    F1 => "F1",
    F2 => "F2",
    F3 => "F3",
    F4 => "F4",
    F5 => "F5",
    F6 => "F6",
    F7 => "F7",
    F8 => "F8",
    F9 => "F9",
    F10 => "F10",
    F11 => "F11",
    F12 => "F12",

    Numpad0 => "Numpad0",
    Numpad1 => "Numpad1",
    Numpad2 => "Numpad2",
    Numpad3 => "Numpad3",
    Numpad4 => "Numpad4",
    Numpad5 => "Numpad5",
    Numpad6 => "Numpad6",
    Numpad7 => "Numpad7",
    Numpad8 => "Numpad8",
    Numpad9 => "Numpad9",
    NumpadDecimal => "NumpadDecimal",
    NumpadMultiply => "NumpadMultiply",
    NumpadDivide => "NumpadDivide",
    NumpadSubtract => "NumpadSubtract",
    NumpadAdd => "NumpadAdd",
    NumpadEnter => "NumpadEnter",

    Num0 => "0",
    Num1 => "1",
    Num2 => "2",
    Num3 => "3",
    Num4 => "4",
    Num5 => "5",
    Num6 => "6",
    Num7 => "7",
    Num8 => "8",
    Num9 => "9",
    A => "A",
    B => "B",
    C => "C",
    D => "D",
    E => "E",
    F => "F",
    G => "G",
    H => "H",
    I => "I",
    J => "J",
    K => "K",
    L => "L",
    M => "M",
    N => "N",
    O => "O",
    P => "P",
    Q => "Q",
    R => "R",
    S => "S",
    T => "T",
    U => "U",
    V => "V",
    W => "W",
    X => "X",
    Y => "Y",
    Z => "Z",
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key name that matches no [`Key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key name {:?}", self.0)
    }
}

impl std::error::Error for UnknownKey {}

/// Parses a [`Key::name`], ignoring ASCII case.
impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKey(s.to_owned()))
    }
}

impl Key {
    /// Whether this is one of the Ctrl/Alt/Shift/Win modifiers.
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::LCtrl
                | Self::RCtrl
                | Self::LAlt
                | Self::RAlt
                | Self::LShift
                | Self::RShift
                | Self::LWin
                | Self::RWin
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> =
            Key::ALL.iter().copied().map(Key::name).collect();
        assert_eq!(names.len(), Key::ALL.len());
    }

    #[test]
    fn every_name_parses_back() {
        for &key in Key::ALL {
            assert_eq!(key.name().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn parsing_ignores_case_and_rejects_unknown() {
        assert_eq!("esc".parse::<Key>(), Ok(Key::Esc));
        assert_eq!(" lshift ".parse::<Key>(), Ok(Key::LShift));
        assert_eq!(
            "Hyper".parse::<Key>(),
            Err(UnknownKey("Hyper".to_owned()))
        );
    }

    #[test]
    fn modifiers_have_both_sides() {
        let modifiers: Vec<Key> =
            Key::ALL.iter().copied().filter(|k| k.is_modifier()).collect();
        assert_eq!(modifiers.len(), 8);
        assert!(!Key::A.is_modifier());
    }
}
