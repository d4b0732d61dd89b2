//! C64 keyboard matrix geometry.
//!
//! The C64 has an 8×8 matrix with no isolation diodes, plus the RESTORE key
//! which is not part of the matrix at all: it is a momentary switch straight
//! to ground. Wired to a ninth input, it reads as pressed on every row while
//! it is held, so only one cell of that column is a real key.

/// Number of driven rows.
pub const ROWS: usize = 8;
/// Number of sampled columns, including the RESTORE column.
pub const COLS: usize = 9;
/// Column the RESTORE switch is wired to.
pub const RESTORE_COL: u8 = 8;
/// Row whose RESTORE-column cell stands for the Restore key.
pub const RESTORE_ROW: u8 = 0;
/// Size of a per-position array indexed by [`MatrixPosition::index`].
pub const POSITIONS: usize = ROWS * 10;

/// A (row, column) cell, identified as `row * 10 + col`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatrixPosition(u8);

impl MatrixPosition {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < ROWS && (col as usize) < COLS {
            Some(Self(row * 10 + col))
        } else {
            None
        }
    }

    pub const fn row(self) -> u8 {
        self.0 / 10
    }

    pub const fn col(self) -> u8 {
        self.0 % 10
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// A RESTORE-column cell other than the Restore key itself.
    pub const fn is_restore_ghost(self) -> bool {
        self.col() == RESTORE_COL && self.row() != RESTORE_ROW
    }

    pub const fn is_valid(self) -> bool {
        !self.is_restore_ghost()
    }

    /// Every valid position, row-major.
    pub fn all() -> impl Iterator<Item = MatrixPosition> {
        (0..ROWS as u8)
            .flat_map(|row| (0..COLS as u8).map(move |col| MatrixPosition(row * 10 + col)))
            .filter(|pos| pos.is_valid())
    }
}

/// Physical C64 keys, encoded as their matrix position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum C64Key {
    // Row 0
    InstDel = 0,
    Return = 1,
    CursorRight = 2,
    F7 = 3,
    F1 = 4,
    F3 = 5,
    F5 = 6,
    CursorDown = 7,
    Restore = 8,

    // Row 1
    N3 = 10,
    W = 11,
    A = 12,
    N4 = 13,
    Z = 14,
    S = 15,
    E = 16,
    LeftShift = 17,

    // Row 2
    N5 = 20,
    R = 21,
    D = 22,
    N6 = 23,
    C = 24,
    F = 25,
    T = 26,
    X = 27,

    // Row 3
    N7 = 30,
    Y = 31,
    G = 32,
    N8 = 33,
    B = 34,
    H = 35,
    U = 36,
    V = 37,

    // Row 4
    N9 = 40,
    I = 41,
    J = 42,
    N0 = 43,
    M = 44,
    K = 45,
    O = 46,
    N = 47,

    // Row 5
    Plus = 50,
    P = 51,
    L = 52,
    Minus = 53,
    Period = 54,
    Colon = 55,
    At = 56,
    Comma = 57,

    // Row 6
    Pound = 60,
    Asterisk = 61,
    Semicolon = 62,
    ClrHome = 63,
    RightShift = 64,
    Equals = 65,
    UpArrow = 66,
    Slash = 67,

    // Row 7
    N1 = 70,
    LeftArrow = 71,
    Ctrl = 72,
    N2 = 73,
    Space = 74,
    Commodore = 75,
    Q = 76,
    RunStop = 77,
}

use C64Key::*;

/// Matrix layout, `LAYOUT[row][col]`. The RESTORE column is handled apart.
#[rustfmt::skip]
const LAYOUT: [[C64Key; 8]; ROWS] = [
    [InstDel, Return, CursorRight, F7, F1, F3, F5, CursorDown],
    [N3, W, A, N4, Z, S, E, LeftShift],
    [N5, R, D, N6, C, F, T, X],
    [N7, Y, G, N8, B, H, U, V],
    [N9, I, J, N0, M, K, O, N],
    [Plus, P, L, Minus, Period, Colon, At, Comma],
    [Pound, Asterisk, Semicolon, ClrHome, RightShift, Equals, UpArrow, Slash],
    [N1, LeftArrow, Ctrl, N2, Space, Commodore, Q, RunStop],
];

impl C64Key {
    /// Number of physical keys.
    pub const COUNT: usize = 65;

    pub const fn position(self) -> MatrixPosition {
        MatrixPosition(self as u8)
    }

    pub fn from_position(pos: MatrixPosition) -> Option<Self> {
        let (row, col) = (pos.row() as usize, pos.col() as usize);
        if col == RESTORE_COL as usize {
            (row == RESTORE_ROW as usize).then_some(Restore)
        } else {
            LAYOUT.get(row).map(|keys| keys[col])
        }
    }

    /// Dense index in `0..COUNT`, for per-key arrays.
    pub const fn ordinal(self) -> usize {
        let pos = self.position();
        if pos.col() == RESTORE_COL {
            64
        } else {
            pos.row() as usize * 8 + pos.col() as usize
        }
    }

    /// Every key, in matrix order.
    pub fn all() -> impl Iterator<Item = C64Key> {
        MatrixPosition::all().filter_map(C64Key::from_position)
    }

    /// Legend printed on the keycap.
    pub fn label(self) -> &'static str {
        match self {
            InstDel => "INST DEL",
            Return => "RETURN",
            CursorRight => "CRSR \u{2192}",
            F7 => "F7",
            F1 => "F1",
            F3 => "F3",
            F5 => "F5",
            CursorDown => "CRSR \u{2193}",
            Restore => "RESTORE",
            N3 => "3",
            W => "W",
            A => "A",
            N4 => "4",
            Z => "Z",
            S => "S",
            E => "E",
            LeftShift => "SHIFT",
            N5 => "5",
            R => "R",
            D => "D",
            N6 => "6",
            C => "C",
            F => "F",
            T => "T",
            X => "X",
            N7 => "7",
            Y => "Y",
            G => "G",
            N8 => "8",
            B => "B",
            H => "H",
            U => "U",
            V => "V",
            N9 => "9",
            I => "I",
            J => "J",
            N0 => "0",
            M => "M",
            K => "K",
            O => "O",
            N => "N",
            Plus => "+",
            P => "P",
            L => "L",
            Minus => "-",
            Period => ".",
            Colon => ":",
            At => "@",
            Comma => ",",
            Pound => "\u{a3}",
            Asterisk => "*",
            Semicolon => ";",
            ClrHome => "CLR HOME",
            RightShift => "SHIFT",
            Equals => "=",
            UpArrow => "\u{2191}",
            Slash => "/",
            N1 => "1",
            LeftArrow => "\u{2190}",
            Ctrl => "CTRL",
            N2 => "2",
            Space => "SPACE",
            Commodore => "C=",
            Q => "Q",
            RunStop => "RUN STOP",
        }
    }

    /// ASCII identifier, used by host tooling to name keys.
    pub fn name(self) -> &'static str {
        match self {
            InstDel => "del",
            Return => "return",
            CursorRight => "crsr-right",
            F7 => "f7",
            F1 => "f1",
            F3 => "f3",
            F5 => "f5",
            CursorDown => "crsr-down",
            Restore => "restore",
            N3 => "3",
            W => "w",
            A => "a",
            N4 => "4",
            Z => "z",
            S => "s",
            E => "e",
            LeftShift => "lshift",
            N5 => "5",
            R => "r",
            D => "d",
            N6 => "6",
            C => "c",
            F => "f",
            T => "t",
            X => "x",
            N7 => "7",
            Y => "y",
            G => "g",
            N8 => "8",
            B => "b",
            H => "h",
            U => "u",
            V => "v",
            N9 => "9",
            I => "i",
            J => "j",
            N0 => "0",
            M => "m",
            K => "k",
            O => "o",
            N => "n",
            Plus => "plus",
            P => "p",
            L => "l",
            Minus => "minus",
            Period => "period",
            Colon => "colon",
            At => "at",
            Comma => "comma",
            Pound => "pound",
            Asterisk => "asterisk",
            Semicolon => "semicolon",
            ClrHome => "home",
            RightShift => "rshift",
            Equals => "equals",
            UpArrow => "up-arrow",
            Slash => "slash",
            N1 => "1",
            LeftArrow => "left-arrow",
            Ctrl => "ctrl",
            N2 => "2",
            Space => "space",
            Commodore => "commodore",
            Q => "q",
            RunStop => "run-stop",
        }
    }

    /// Inverse of [`C64Key::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        C64Key::all().find(|key| key.name() == name)
    }
}
