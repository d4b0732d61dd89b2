//! Live modifier keys and the short-lived press→release latches.

use crate::matrix::C64Key;
use crate::sink::Sink;
use crate::symbol::{NamedKey, Symbol};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub left_shift: bool,
    pub right_shift: bool,
    pub ctrl: bool,
    pub commodore: bool,

    /// F7 sent a synthesized menu sequence; its release must undo that.
    pub menu_sequence_active: bool,
    /// CRSR↓ sent Page Up/Down with the host CTRL lifted.
    pub page_scroll_active: bool,
    /// CLR/HOME sent End.
    pub home_as_end_active: bool,
}

impl ModifierState {
    pub fn is_shifted(&self) -> bool {
        self.left_shift || self.right_shift
    }

    /// Record a modifier key's physical level. Other keys are ignored.
    pub fn set(&mut self, key: C64Key, held: bool) {
        match key {
            C64Key::LeftShift => self.left_shift = held,
            C64Key::RightShift => self.right_shift = held,
            C64Key::Ctrl => self.ctrl = held,
            C64Key::Commodore => self.commodore = held,
            _ => {}
        }
    }

    pub fn is_modifier_key(key: C64Key) -> bool {
        matches!(key, C64Key::LeftShift | C64Key::RightShift | C64Key::Ctrl | C64Key::Commodore)
    }

    /// Lift both host shift keys so the next symbol is typed unshifted.
    pub fn suppress_shift<S: Sink>(&self, sink: &mut S) {
        sink.release(Symbol::Key(NamedKey::LeftShift));
        sink.release(Symbol::Key(NamedKey::RightShift));
    }

    /// Press the host shift keys that are physically held.
    pub fn restore_shift<S: Sink>(&self, sink: &mut S) {
        if self.left_shift {
            sink.press(Symbol::Key(NamedKey::LeftShift));
        }
        if self.right_shift {
            sink.press(Symbol::Key(NamedKey::RightShift));
        }
    }
}
