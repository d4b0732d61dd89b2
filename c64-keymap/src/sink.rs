//! The consumer of emitted key events.

use crate::symbol::Symbol;

/// Host-facing key event sink.
///
/// Pressing a symbol that is already down and releasing one that is not
/// down are both no-ops.
pub trait Sink {
    fn press(&mut self, symbol: Symbol);
    fn release(&mut self, symbol: Symbol);
    fn release_all(&mut self);
}

/// One sink call, for logs and recordings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SinkOp {
    Press(Symbol),
    Release(Symbol),
    ReleaseAll,
}

impl SinkOp {
    /// Replay this operation onto a sink.
    pub fn apply<S: Sink + ?Sized>(self, sink: &mut S) {
        match self {
            SinkOp::Press(symbol) => sink.press(symbol),
            SinkOp::Release(symbol) => sink.release(symbol),
            SinkOp::ReleaseAll => sink.release_all(),
        }
    }
}

impl core::fmt::Display for SinkOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SinkOp::Press(symbol) => write!(f, "press {}", symbol),
            SinkOp::Release(symbol) => write!(f, "release {}", symbol),
            SinkOp::ReleaseAll => f.write_str("release all"),
        }
    }
}
