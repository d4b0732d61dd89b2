//! Commodore 64 keyboard matrix to USB keyboard translation.
//!
//! This crate is `no_std`-compatible so it can be used by both the AVR
//! firmware and the native CLI tool. Everything that touches hardware is a
//! trait the caller implements: the matrix lines ([`scan::Matrix`]), the
//! millisecond clock ([`scan::Clock`]), the keyboard event sink
//! ([`sink::Sink`]), the target slot in non-volatile memory
//! ([`target::TargetStore`]) and the blink feedback ([`target::Notifier`]).
//!
//! One scan cycle flows strictly one way:
//! [`scan::Scanner`] → [`debounce::Debounce`] → [`keyboard::Keyboard`]
//! (dispatch, modifiers, target controller) → sink.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod cell;
pub mod config;
pub mod debounce;
mod dispatch;
pub mod keyboard;
pub mod matrix;
pub mod modifiers;
pub mod report;
pub mod scan;
pub mod sink;
pub mod symbol;
pub mod table;
pub mod target;

#[cfg(test)]
mod testing;

pub use config::Timing;
pub use keyboard::Keyboard;
pub use matrix::{C64Key, MatrixPosition};
pub use report::KeyReport;
pub use sink::{Sink, SinkOp};
pub use symbol::{NamedKey, Symbol};
pub use table::TranslationTable;
pub use target::{InvalidTarget, Notifier, Target, TargetStore};
