//! Per-key debounce logic.
//!
//! Each cell remembers when its debounced level last changed. A raw sample
//! taken inside the settle window after that change is ignored outright,
//! whichever level it shows; once the window has passed, the first sample
//! that disagrees with the debounced level is accepted as a transition.
//! Cells debounce independently of each other and of the scan pass.

use crate::cell::CellState;

/// A clean edge produced by the filter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Pressed,
    Released,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Debounce {
    window_ms: u32,
}

impl Debounce {
    pub const fn new(window_ms: u32) -> Self {
        Self { window_ms }
    }

    /// Feed one raw sample for a cell taken at `now_ms`.
    ///
    /// The clock may wrap; elapsed time is taken modulo 2^32. A sample
    /// exactly `window_ms` after the last transition counts as settled.
    pub fn update(&self, cell: &mut CellState, raw_down: bool, now_ms: u32) -> Option<Transition> {
        if let Some(last) = cell.last_transition {
            if now_ms.wrapping_sub(last) < self.window_ms {
                return None;
            }
        }

        if raw_down == cell.down {
            return None;
        }

        cell.down = raw_down;
        cell.last_transition = Some(now_ms);
        Some(if raw_down { Transition::Pressed } else { Transition::Released })
    }
}
