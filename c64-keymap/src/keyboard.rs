//! The keyboard controller aggregate.
//!
//! [`Keyboard`] owns everything the pipeline mutates: per-cell state, the
//! modifier tracker, the target controller (with its table, store and
//! notifier), the sink and the delay used inside synthesized sequences.
//! Nothing here is global; the scan loop drives one instance.

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::cell::{CellState, Emission};
use crate::config::Timing;
use crate::debounce::{Debounce, Transition};
use crate::matrix::{C64Key, MatrixPosition, POSITIONS};
use crate::modifiers::ModifierState;
use crate::sink::Sink;
use crate::table::TranslationTable;
use crate::target::{Notifier, Target, TargetController, TargetStore};

pub struct Keyboard<S, P, N, D> {
    pub(crate) controller: TargetController<P, N>,
    pub(crate) modifiers: ModifierState,
    pub(crate) cells: [CellState; POSITIONS],
    pub(crate) debounce: Debounce,
    pub(crate) timing: Timing,
    pub(crate) sink: S,
    pub(crate) delay: D,
}

impl<S, P, N, D> Keyboard<S, P, N, D>
where
    S: Sink,
    P: TargetStore,
    N: Notifier,
    D: DelayNs,
{
    /// Load the persisted target, build its table and announce it.
    pub fn start(sink: S, store: P, notifier: N, delay: D, timing: Timing) -> Self {
        Self {
            controller: TargetController::start(store, notifier),
            modifiers: ModifierState::default(),
            cells: [CellState::new(); POSITIONS],
            debounce: Debounce::new(timing.debounce_ms),
            timing,
            sink,
            delay,
        }
    }

    pub fn target(&self) -> Target {
        self.controller.target()
    }

    pub fn table(&self) -> &TranslationTable {
        self.controller.table()
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    pub fn cell(&self, pos: MatrixPosition) -> &CellState {
        &self.cells[pos.index()]
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn store(&self) -> &P {
        self.controller.store()
    }

    pub fn notifier(&self) -> &N {
        self.controller.notifier()
    }

    /// Feed one raw sample; a debounced edge is dispatched immediately.
    pub fn update(&mut self, pos: MatrixPosition, raw_down: bool, now_ms: u32) {
        let cell = &mut self.cells[pos.index()];
        if let Some(transition) = self.debounce.update(cell, raw_down, now_ms) {
            self.dispatch(pos, transition);
        }
    }

    /// Act on a clean edge.
    pub fn dispatch(&mut self, pos: MatrixPosition, transition: Transition) {
        let Some(key) = C64Key::from_position(pos) else {
            trace!("ignoring RESTORE column artifact at row {}", pos.row());
            return;
        };

        match transition {
            Transition::Pressed => {
                let emitted = self.press(key);
                debug!("{} down -> {:?}", key.name(), emitted);
                self.cells[pos.index()].emitted = emitted;
            }
            Transition::Released => {
                let emitted = core::mem::take(&mut self.cells[pos.index()].emitted);
                debug!("{} up, undoing {:?}", key.name(), emitted);
                self.release(key, emitted);
            }
        }
    }
}
