//! Row-by-row matrix scanning.

use embedded_hal::delay::DelayNs;

use crate::config::Timing;
use crate::keyboard::Keyboard;
use crate::matrix::{MatrixPosition, COLS, ROWS};
use crate::sink::Sink;
use crate::target::{Notifier, TargetStore};

/// The electrical matrix: 8 row lines driven one at a time and 9 column
/// lines read back (the 9th being RESTORE).
pub trait Matrix {
    /// Drive `row` active. Only one row is active at a time.
    fn activate_row(&mut self, row: u8);
    fn deactivate_row(&mut self, row: u8);
    /// `true` when the key at the active row and `col` is closed.
    fn read_column(&mut self, col: u8) -> bool;
}

/// Monotonic milliseconds, wrapping at `u32::MAX`.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
}

pub struct Scanner<M, C, D> {
    matrix: M,
    clock: C,
    delay: D,
    row_settle_us: u32,
}

impl<M: Matrix, C: Clock, D: DelayNs> Scanner<M, C, D> {
    pub fn new(matrix: M, clock: C, delay: D, timing: &Timing) -> Self {
        Self { matrix, clock, delay, row_settle_us: timing.row_settle_us }
    }

    /// Visit every row once, row-major then column-major, feeding each
    /// sample to the keyboard as it is read.
    pub fn scan_once<S, P, N, KD>(&mut self, keyboard: &mut Keyboard<S, P, N, KD>)
    where
        S: Sink,
        P: TargetStore,
        N: Notifier,
        KD: DelayNs,
    {
        for row in 0..ROWS as u8 {
            self.matrix.activate_row(row);
            let now = self.clock.now_ms();
            for col in 0..COLS as u8 {
                let raw_down = self.matrix.read_column(col);
                if let Some(pos) = MatrixPosition::new(row, col) {
                    keyboard.update(pos, raw_down, now);
                }
            }
            self.matrix.deactivate_row(row);
            self.delay.delay_us(self.row_settle_us);
        }
    }

    /// Scan forever, calling `between` after every full cycle (USB
    /// servicing on the firmware).
    pub fn run<S, P, N, KD, F>(&mut self, keyboard: &mut Keyboard<S, P, N, KD>, mut between: F) -> !
    where
        S: Sink,
        P: TargetStore,
        N: Notifier,
        KD: DelayNs,
        F: FnMut(&mut Keyboard<S, P, N, KD>),
    {
        loop {
            self.scan_once(keyboard);
            between(keyboard);
        }
    }

    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut M {
        &mut self.matrix
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}
