//! Output symbols and their USB HID usages.
//!
//! A [`Symbol`] is what the dispatch engine hands to the sink. Printable
//! characters travel as character data and the sink works out the usage and
//! whether the host needs shift for it; everything else is a [`NamedKey`]
//! referenced by identity.

use core::fmt;

/// Non-printable keys, encoded as their USB HID usage.
/// See USB HID Usage Tables, Section 10 (Keyboard/Keypad Page 0x07).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NamedKey {
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,

    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,

    // Modifiers (report modifier byte, not the keycode array)
    LeftCtrl = 0xE0,
    LeftShift = 0xE1,
    LeftAlt = 0xE2,
    LeftGui = 0xE3,
    RightCtrl = 0xE4,
    RightShift = 0xE5,
    RightAlt = 0xE6,
    RightGui = 0xE7,
}

impl NamedKey {
    /// HID usage ID on the keyboard page.
    pub const fn usage(self) -> u8 {
        self as u8
    }

    /// Check if this key is a modifier (LeftCtrl..RightGui).
    pub const fn is_modifier(self) -> bool {
        let v = self as u8;
        v >= 0xE0 && v <= 0xE7
    }

    /// Modifier byte bit (bit 0 = LeftCtrl, bit 7 = RightGui).
    pub const fn modifier_bit(self) -> Option<u8> {
        if self.is_modifier() {
            Some(1 << (self as u8 - 0xE0))
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedKey::Enter => "Enter",
            NamedKey::Escape => "Esc",
            NamedKey::Backspace => "Bksp",
            NamedKey::Tab => "Tab",
            NamedKey::F1 => "F1",
            NamedKey::F2 => "F2",
            NamedKey::F3 => "F3",
            NamedKey::F4 => "F4",
            NamedKey::F5 => "F5",
            NamedKey::F6 => "F6",
            NamedKey::F7 => "F7",
            NamedKey::F8 => "F8",
            NamedKey::F9 => "F9",
            NamedKey::F10 => "F10",
            NamedKey::F11 => "F11",
            NamedKey::F12 => "F12",
            NamedKey::Insert => "Ins",
            NamedKey::Home => "Home",
            NamedKey::PageUp => "PgUp",
            NamedKey::Delete => "Del",
            NamedKey::End => "End",
            NamedKey::PageDown => "PgDn",
            NamedKey::Right => "Right",
            NamedKey::Left => "Left",
            NamedKey::Down => "Down",
            NamedKey::Up => "Up",
            NamedKey::LeftCtrl => "LCtrl",
            NamedKey::LeftShift => "LShift",
            NamedKey::LeftAlt => "LAlt",
            NamedKey::LeftGui => "LGui",
            NamedKey::RightCtrl => "RCtrl",
            NamedKey::RightShift => "RShift",
            NamedKey::RightAlt => "RAlt",
            NamedKey::RightGui => "RGui",
        }
    }
}

/// A single key event payload for the sink.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Printable US ASCII character.
    Char(u8),
    Key(NamedKey),
}

impl Symbol {
    pub const fn is_modifier(self) -> bool {
        match self {
            Symbol::Key(key) => key.is_modifier(),
            Symbol::Char(_) => false,
        }
    }
}

impl From<NamedKey> for Symbol {
    fn from(key: NamedKey) -> Self {
        Symbol::Key(key)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::Char(b' ') => f.write_str("Space"),
            Symbol::Char(c) => write!(f, "'{}'", c as char),
            Symbol::Key(key) => f.write_str(key.name()),
        }
    }
}

/// HID usage for a printable character on a US host layout, and whether the
/// host needs shift held to produce it.
pub fn ascii_usage(c: u8) -> Option<(u8, bool)> {
    let entry = match c {
        b'a'..=b'z' => (0x04 + (c - b'a'), false),
        b'A'..=b'Z' => (0x04 + (c - b'A'), true),
        b'1'..=b'9' => (0x1E + (c - b'1'), false),
        b'0' => (0x27, false),
        b' ' => (0x2C, false),

        // Shifted digit row
        b'!' => (0x1E, true),
        b'@' => (0x1F, true),
        b'#' => (0x20, true),
        b'$' => (0x21, true),
        b'%' => (0x22, true),
        b'^' => (0x23, true),
        b'&' => (0x24, true),
        b'*' => (0x25, true),
        b'(' => (0x26, true),
        b')' => (0x27, true),

        b'-' => (0x2D, false),
        b'_' => (0x2D, true),
        b'=' => (0x2E, false),
        b'+' => (0x2E, true),
        b'[' => (0x2F, false),
        b'{' => (0x2F, true),
        b']' => (0x30, false),
        b'}' => (0x30, true),
        b'\\' => (0x31, false),
        b'|' => (0x31, true),
        b';' => (0x33, false),
        b':' => (0x33, true),
        b'\'' => (0x34, false),
        b'"' => (0x34, true),
        b'`' => (0x35, false),
        b'~' => (0x35, true),
        b',' => (0x36, false),
        b'<' => (0x36, true),
        b'.' => (0x37, false),
        b'>' => (0x37, true),
        b'/' => (0x38, false),
        b'?' => (0x38, true),
        _ => return None,
    };
    Some(entry)
}
