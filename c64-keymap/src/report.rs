//! USB HID boot keyboard report, driven through the [`Sink`] interface.
//!
//! Characters are typed the way a host-side keyboard library types them:
//! a character that needs shift on a US layout sets the left shift bit when
//! pressed and clears it again when released. Releasing such a character
//! therefore also drops a physically held shift, which is why the dispatch
//! engine re-asserts held shift keys after every release.

use crate::sink::Sink;
use crate::symbol::{ascii_usage, NamedKey, Symbol};

/// Standard USB HID keyboard report (8 bytes).
/// Byte 0: modifier keys bitmask
/// Byte 1: reserved (0x00)
/// Bytes 2-7: up to 6 simultaneous keycodes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyReport {
    pub modifiers: u8,
    pub reserved: u8,
    pub keys: [u8; 6],
}

const LEFT_SHIFT_BIT: u8 = 1 << 1;

impl KeyReport {
    pub const fn empty() -> Self {
        Self { modifiers: 0, reserved: 0, keys: [0; 6] }
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0] = self.modifiers;
        bytes[1] = self.reserved;
        bytes[2..].copy_from_slice(&self.keys);
        bytes
    }

    pub fn is_pressed(&self, key: NamedKey) -> bool {
        match key.modifier_bit() {
            Some(bit) => self.modifiers & bit != 0,
            None => self.keys.contains(&key.usage()),
        }
    }

    pub fn contains_usage(&self, usage: u8) -> bool {
        usage != 0 && self.keys.contains(&usage)
    }

    fn add_usage(&mut self, usage: u8) {
        if self.keys.contains(&usage) {
            return;
        }
        // With more than 6 keys down the extra ones are dropped.
        if let Some(slot) = self.keys.iter_mut().find(|slot| **slot == 0) {
            *slot = usage;
        }
    }

    fn remove_usage(&mut self, usage: u8) {
        for slot in self.keys.iter_mut().filter(|slot| **slot == usage) {
            *slot = 0;
        }
    }
}

impl Sink for KeyReport {
    fn press(&mut self, symbol: Symbol) {
        match symbol {
            Symbol::Key(key) => match key.modifier_bit() {
                Some(bit) => self.modifiers |= bit,
                None => self.add_usage(key.usage()),
            },
            Symbol::Char(c) => {
                if let Some((usage, shifted)) = ascii_usage(c) {
                    if shifted {
                        self.modifiers |= LEFT_SHIFT_BIT;
                    }
                    self.add_usage(usage);
                }
            }
        }
    }

    fn release(&mut self, symbol: Symbol) {
        match symbol {
            Symbol::Key(key) => match key.modifier_bit() {
                Some(bit) => self.modifiers &= !bit,
                None => self.remove_usage(key.usage()),
            },
            Symbol::Char(c) => {
                if let Some((usage, shifted)) = ascii_usage(c) {
                    if shifted {
                        self.modifiers &= !LEFT_SHIFT_BIT;
                    }
                    self.remove_usage(usage);
                }
            }
        }
    }

    fn release_all(&mut self) {
        *self = KeyReport::empty();
    }
}
