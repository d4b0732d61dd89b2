//! Position → host symbol translation, one table per target.
//!
//! Every table starts from the positional base below: each C64 key sends
//! the US key sitting in the same place, the convention VICE 3 uses. A short
//! per-target patch list then replaces the keys whose meaning differs
//! between targets.
//!
//! | key     | ASCII    | VICE2/BMC64 | VICE3    | MiSTer   |
//! |---------|----------|-------------|----------|----------|
//! | £       | `\`      | Insert      | End      | Insert   |
//! | ↑       | `^`      | Delete      | Delete   | Delete   |
//! | =       | `=`      | `\`         | `\`      | `\`      |
//! | +       | `+`      | `-`         | `-`      | `-`      |
//! | -       | `-`      | `=`         | `=`      | `=`      |
//! | CTRL    | LeftCtrl | Tab         | Tab      | LeftCtrl |
//! | C=      | LeftAlt  | LeftCtrl    | LeftCtrl | LeftAlt  |
//! | RESTORE | PageUp   | PageUp      | PageUp   | F11      |
//!
//! ASCII additionally sends `: @ * ;` as themselves.

use crate::matrix::{C64Key, MatrixPosition, ROWS};
use crate::symbol::{NamedKey, Symbol};
use crate::target::Target;

const fn ch(c: u8) -> Symbol {
    Symbol::Char(c)
}

const fn key(key: NamedKey) -> Symbol {
    Symbol::Key(key)
}

/// Shorthand aliases for readability.
const BSP: Symbol = key(NamedKey::Backspace);
const ENT: Symbol = key(NamedKey::Enter);
const ESC: Symbol = key(NamedKey::Escape);
const TAB: Symbol = key(NamedKey::Tab);
const RGHT: Symbol = key(NamedKey::Right);
const DOWN: Symbol = key(NamedKey::Down);
const HOME: Symbol = key(NamedKey::Home);
const END: Symbol = key(NamedKey::End);
const INS: Symbol = key(NamedKey::Insert);
const DEL: Symbol = key(NamedKey::Delete);
const PGUP: Symbol = key(NamedKey::PageUp);
const LSFT: Symbol = key(NamedKey::LeftShift);
const RSFT: Symbol = key(NamedKey::RightShift);
const LCTL: Symbol = key(NamedKey::LeftCtrl);
const LALT: Symbol = key(NamedKey::LeftAlt);
const F1: Symbol = key(NamedKey::F1);
const F3: Symbol = key(NamedKey::F3);
const F5: Symbol = key(NamedKey::F5);
const F7: Symbol = key(NamedKey::F7);
const F11: Symbol = key(NamedKey::F11);

/// Positional base, `BASE[row][col]` for the 8×8 matrix.
#[rustfmt::skip]
const BASE: [[Symbol; 8]; ROWS] = [
    // INST/DEL, RETURN, CRSR→, F7, F1, F3, F5, CRSR↓
    [BSP, ENT, RGHT, F7, F1, F3, F5, DOWN],
    // 3, W, A, 4, Z, S, E, L-SHIFT
    [ch(b'3'), ch(b'w'), ch(b'a'), ch(b'4'), ch(b'z'), ch(b's'), ch(b'e'), LSFT],
    // 5, R, D, 6, C, F, T, X
    [ch(b'5'), ch(b'r'), ch(b'd'), ch(b'6'), ch(b'c'), ch(b'f'), ch(b't'), ch(b'x')],
    // 7, Y, G, 8, B, H, U, V
    [ch(b'7'), ch(b'y'), ch(b'g'), ch(b'8'), ch(b'b'), ch(b'h'), ch(b'u'), ch(b'v')],
    // 9, I, J, 0, M, K, O, N
    [ch(b'9'), ch(b'i'), ch(b'j'), ch(b'0'), ch(b'm'), ch(b'k'), ch(b'o'), ch(b'n')],
    // +, P, L, -, ., :, @, ,
    [ch(b'-'), ch(b'p'), ch(b'l'), ch(b'='), ch(b'.'), ch(b';'), ch(b'['), ch(b',')],
    // £, *, ;, CLR/HOME, R-SHIFT, =, ↑, /
    [END, ch(b']'), ch(b'\''), HOME, RSFT, ch(b'\\'), DEL, ch(b'/')],
    // 1, ←, CTRL, 2, SPACE, C=, Q, RUN/STOP
    [ch(b'1'), ch(b'`'), TAB, ch(b'2'), ch(b' '), LCTL, ch(b'q'), ESC],
];

const BASE_RESTORE: Symbol = PGUP;

#[rustfmt::skip]
const ASCII_PATCH: &[(C64Key, Symbol)] = &[
    (C64Key::Pound, ch(b'\\')),
    (C64Key::UpArrow, ch(b'^')),
    (C64Key::Equals, ch(b'=')),
    (C64Key::Plus, ch(b'+')),
    (C64Key::Minus, ch(b'-')),
    (C64Key::Colon, ch(b':')),
    (C64Key::At, ch(b'@')),
    (C64Key::Asterisk, ch(b'*')),
    (C64Key::Semicolon, ch(b';')),
    (C64Key::Ctrl, LCTL),
    (C64Key::Commodore, LALT),
];

#[rustfmt::skip]
const VICE2_BMC64_PATCH: &[(C64Key, Symbol)] = &[
    (C64Key::Pound, INS),
];

const VICE3_PATCH: &[(C64Key, Symbol)] = &[];

#[rustfmt::skip]
const MISTER_PATCH: &[(C64Key, Symbol)] = &[
    (C64Key::Pound, INS),
    (C64Key::Ctrl, LCTL),
    (C64Key::Commodore, LALT),
    (C64Key::Restore, F11),
];

fn patch(target: Target) -> &'static [(C64Key, Symbol)] {
    match target {
        Target::Ascii => ASCII_PATCH,
        Target::Vice2Bmc64 => VICE2_BMC64_PATCH,
        Target::Vice3 => VICE3_PATCH,
        Target::Mister => MISTER_PATCH,
    }
}

/// Host symbol for every physical key under one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationTable {
    symbols: [Symbol; C64Key::COUNT],
}

impl TranslationTable {
    /// Build the table for `target`. Pure: the same target always yields
    /// the same table.
    pub fn build(target: Target) -> Self {
        let mut symbols = [BASE_RESTORE; C64Key::COUNT];
        for key in C64Key::all() {
            let pos = key.position();
            if key != C64Key::Restore {
                symbols[key.ordinal()] = BASE[pos.row() as usize][pos.col() as usize];
            }
        }
        for &(key, symbol) in patch(target) {
            symbols[key.ordinal()] = symbol;
        }
        Self { symbols }
    }

    pub fn symbol(&self, key: C64Key) -> Symbol {
        self.symbols[key.ordinal()]
    }

    /// Lookup by position; `None` for RESTORE-column artifacts.
    pub fn get(&self, pos: MatrixPosition) -> Option<Symbol> {
        C64Key::from_position(pos).map(|key| self.symbol(key))
    }
}
