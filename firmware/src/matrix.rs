//! C64 keyboard matrix wiring on the Teensy 2.0.
//!
//! The 20-pin C64 keyboard connector is wired as:
//!   Rows (active-low outputs):          PB0-PB7
//!   Columns (inputs with pull-up):      PF0, PF1, PF4, PF5, PF6, PF7, PC6, PC7
//!   RESTORE (input with pull-up):       PE6
//!
//! RESTORE is not part of the matrix on the C64; it shorts straight to
//! ground, so it reads low whichever row is driven.

use avr_device::atmega32u4::{PORTB, PORTC, PORTE, PORTF};
use c64_keymap::scan::Matrix;

const PORTF_COLS: u8 = 0xF3; // PF0, PF1, PF4-PF7
const PORTC_COLS: u8 = 0xC0; // PC6, PC7
const RESTORE_PIN: u8 = 0x40; // PE6

pub struct C64Matrix {
    rows: PORTB,
    portc: PORTC,
    porte: PORTE,
    portf: PORTF,
}

impl C64Matrix {
    /// Configure the pins and leave every row inactive.
    pub fn new(rows: PORTB, portc: PORTC, porte: PORTE, portf: PORTF) -> Self {
        rows.ddrb.write(|w| unsafe { w.bits(0xFF) });
        rows.portb.write(|w| unsafe { w.bits(0xFF) });

        portf.ddrf.modify(|r, w| unsafe { w.bits(r.bits() & !PORTF_COLS) });
        portf.portf.modify(|r, w| unsafe { w.bits(r.bits() | PORTF_COLS) });

        portc.ddrc.modify(|r, w| unsafe { w.bits(r.bits() & !PORTC_COLS) });
        portc.portc.modify(|r, w| unsafe { w.bits(r.bits() | PORTC_COLS) });

        porte.ddre.modify(|r, w| unsafe { w.bits(r.bits() & !RESTORE_PIN) });
        porte.porte.modify(|r, w| unsafe { w.bits(r.bits() | RESTORE_PIN) });

        Self { rows, portc, porte, portf }
    }
}

impl Matrix for C64Matrix {
    fn activate_row(&mut self, row: u8) {
        self.rows.portb.write(|w| unsafe { w.bits(!(1 << row)) });
    }

    fn deactivate_row(&mut self, _row: u8) {
        self.rows.portb.write(|w| unsafe { w.bits(0xFF) });
    }

    fn read_column(&mut self, col: u8) -> bool {
        // Low = pressed (pulled to the active row or to ground).
        let (pins, mask) = match col {
            0 => (self.portf.pinf.read().bits(), 0x01),
            1 => (self.portf.pinf.read().bits(), 0x02),
            2 => (self.portf.pinf.read().bits(), 0x10),
            3 => (self.portf.pinf.read().bits(), 0x20),
            4 => (self.portf.pinf.read().bits(), 0x40),
            5 => (self.portf.pinf.read().bits(), 0x80),
            6 => (self.portc.pinc.read().bits(), 0x40),
            7 => (self.portc.pinc.read().bits(), 0x80),
            8 => (self.porte.pine.read().bits(), RESTORE_PIN),
            _ => return false,
        };
        pins & mask == 0
    }
}
