//! Replays a scan script through the keyboard pipeline on the host.
//!
//! The matrix, clock, delays, EEPROM slot and LED are in-memory stand-ins;
//! everything between them is the same code the firmware runs. Delays
//! advance the simulated clock, so the menu sequence and row settle time
//! show up in the timestamps.

use std::cell::Cell;
use std::rc::Rc;

use c64_keymap::matrix::{COLS, RESTORE_COL, ROWS};
use c64_keymap::scan::{Clock, Matrix, Scanner};
use c64_keymap::{Keyboard, KeyReport, Notifier, Sink, SinkOp, Symbol, Target, TargetStore, Timing};
use embedded_hal::delay::DelayNs;
use log::{info, trace};

use crate::script::Step;

/// Simulated time in nanoseconds, shared by the clock and the delays.
#[derive(Clone, Default)]
struct Timeline(Rc<Cell<u64>>);

impl Timeline {
    fn ms(&self) -> u32 {
        (self.0.get() / 1_000_000) as u32
    }

    fn set_ms(&self, ms: u32) {
        self.0.set(u64::from(ms) * 1_000_000);
    }

    fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }
}

impl Clock for Timeline {
    fn now_ms(&mut self) -> u32 {
        self.ms()
    }
}

impl DelayNs for Timeline {
    fn delay_ns(&mut self, ns: u32) {
        self.advance_ns(u64::from(ns));
    }
}

#[derive(Default)]
struct SimMatrix {
    keys: [[bool; COLS]; ROWS],
    restore: bool,
    active_row: Option<u8>,
}

impl Matrix for SimMatrix {
    fn activate_row(&mut self, row: u8) {
        self.active_row = Some(row);
    }

    fn deactivate_row(&mut self, _row: u8) {
        self.active_row = None;
    }

    fn read_column(&mut self, col: u8) -> bool {
        let Some(row) = self.active_row else {
            return false;
        };
        if col == RESTORE_COL {
            // Grounded for every row at once.
            return self.restore;
        }
        self.keys[row as usize][col as usize]
    }
}

/// One sink call as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub at_ms: u32,
    pub op: SinkOp,
    pub report: [u8; 8],
}

struct RecordingSink {
    timeline: Timeline,
    report: KeyReport,
    events: Vec<Event>,
}

impl RecordingSink {
    fn record(&mut self, op: SinkOp) {
        op.apply(&mut self.report);
        let event = Event { at_ms: self.timeline.ms(), op, report: self.report.to_bytes() };
        trace!("{:>6} ms {}", event.at_ms, op);
        self.events.push(event);
    }
}

impl Sink for RecordingSink {
    fn press(&mut self, symbol: Symbol) {
        self.record(SinkOp::Press(symbol));
    }

    fn release(&mut self, symbol: Symbol) {
        self.record(SinkOp::Release(symbol));
    }

    fn release_all(&mut self) {
        self.record(SinkOp::ReleaseAll);
    }
}

struct SimStore {
    value: u8,
    writes: usize,
}

impl TargetStore for SimStore {
    fn load(&mut self) -> u8 {
        self.value
    }

    fn store(&mut self, value: u8) {
        self.value = value;
        self.writes += 1;
    }
}

#[derive(Default)]
struct SimLed {
    blinks: Vec<u8>,
}

impl Notifier for SimLed {
    fn notify(&mut self, count: u8) {
        info!("LED blinks {} time(s)", count);
        self.blinks.push(count);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Byte initially held by the target slot.
    pub stored_target: u8,
    pub timing: Timing,
}

impl Default for Options {
    fn default() -> Self {
        Self { stored_target: Target::DEFAULT.number(), timing: Timing::default() }
    }
}

/// Everything the host and the board would have observed.
#[derive(Debug)]
pub struct Transcript {
    pub events: Vec<Event>,
    pub target: Target,
    pub stored_target: u8,
    pub store_writes: usize,
    pub blinks: Vec<u8>,
    pub scans: u32,
}

pub fn run(steps: &[Step], options: &Options) -> Transcript {
    let timeline = Timeline::default();
    let sink = RecordingSink { timeline: timeline.clone(), report: KeyReport::empty(), events: Vec::new() };
    let store = SimStore { value: options.stored_target, writes: 0 };

    let mut keyboard = Keyboard::start(sink, store, SimLed::default(), timeline.clone(), options.timing);
    let mut scanner = Scanner::new(SimMatrix::default(), timeline.clone(), timeline.clone(), &options.timing);
    let mut scans = 0;

    for step in steps {
        match *step {
            Step::At(ms) => timeline.set_ms(ms),
            Step::Wait(ms) => timeline.advance_ns(u64::from(ms) * 1_000_000),
            Step::Set { col, down, .. } if col == RESTORE_COL => {
                scanner.matrix_mut().restore = down;
            }
            Step::Set { row, col, down } => {
                scanner.matrix_mut().keys[row as usize][col as usize] = down;
            }
            Step::Scan(n) => {
                for _ in 0..n {
                    scanner.scan_once(&mut keyboard);
                    scans += 1;
                }
            }
        }
    }

    Transcript {
        events: std::mem::take(&mut keyboard.sink_mut().events),
        target: keyboard.target(),
        stored_target: keyboard.store().value,
        store_writes: keyboard.store().writes,
        blinks: keyboard.notifier().blinks.clone(),
        scans,
    }
}
