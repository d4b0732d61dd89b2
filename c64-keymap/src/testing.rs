//! In-memory collaborators for unit tests.

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::report::KeyReport;
use crate::scan::{Clock, Matrix};
use crate::sink::{Sink, SinkOp};
use crate::symbol::Symbol;
use crate::target::{Notifier, TargetStore};

/// Records every sink call and keeps the resulting report.
#[derive(Default)]
pub struct Recorder {
    pub ops: Vec<SinkOp>,
    pub report: KeyReport,
}

impl Recorder {
    /// Operations recorded since the last call.
    pub fn take(&mut self) -> Vec<SinkOp> {
        core::mem::take(&mut self.ops)
    }
}

impl Sink for Recorder {
    fn press(&mut self, symbol: Symbol) {
        self.ops.push(SinkOp::Press(symbol));
        self.report.press(symbol);
    }

    fn release(&mut self, symbol: Symbol) {
        self.ops.push(SinkOp::Release(symbol));
        self.report.release(symbol);
    }

    fn release_all(&mut self) {
        self.ops.push(SinkOp::ReleaseAll);
        self.report.release_all();
    }
}

pub struct MemoryStore {
    pub value: u8,
    pub writes: usize,
}

impl MemoryStore {
    pub fn new(value: u8) -> Self {
        Self { value, writes: 0 }
    }
}

impl TargetStore for MemoryStore {
    fn load(&mut self) -> u8 {
        self.value
    }

    fn store(&mut self, value: u8) {
        self.value = value;
        self.writes += 1;
    }
}

#[derive(Default)]
pub struct TallyNotifier {
    pub counts: Vec<u8>,
}

impl Notifier for TallyNotifier {
    fn notify(&mut self, count: u8) {
        self.counts.push(count);
    }
}

/// Sums requested delays instead of waiting.
#[derive(Default)]
pub struct TotalDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl DelayNs for TotalDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}

/// Matrix whose cells are set directly; a RESTORE press grounds every row.
#[derive(Default)]
pub struct FakeMatrix {
    pub keys: [[bool; crate::matrix::COLS]; crate::matrix::ROWS],
    pub restore: bool,
    pub active_row: Option<u8>,
    pub activations: Vec<u8>,
}

impl Matrix for FakeMatrix {
    fn activate_row(&mut self, row: u8) {
        assert_eq!(self.active_row, None, "two rows active at once");
        self.active_row = Some(row);
        self.activations.push(row);
    }

    fn deactivate_row(&mut self, row: u8) {
        assert_eq!(self.active_row, Some(row));
        self.active_row = None;
    }

    fn read_column(&mut self, col: u8) -> bool {
        let row = self.active_row.expect("read with no row active");
        if col == crate::matrix::RESTORE_COL {
            return self.restore;
        }
        self.keys[row as usize][col as usize]
    }
}

/// Clock advanced by hand.
#[derive(Default)]
pub struct ManualClock {
    pub now: u32,
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u32 {
        self.now
    }
}
