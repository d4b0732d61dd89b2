//! Output target profiles and the controller that switches between them.
//!
//! The active target is cycled from the keyboard itself:
//!
//! - `C=` + `CTRL` + `F1`: back to target 1
//! - `C=` + `SHIFT` + `F1`: previous target, wrapping 1 → 4
//! - `C=` + `F1`: next target, wrapping 4 → 1
//!
//! Every switch stores the new target, releases all host keys, rebuilds the
//! translation table and blinks the target number.

use log::{info, warn};

use crate::modifiers::ModifierState;
use crate::sink::Sink;
use crate::table::TranslationTable;

/// Downstream consumer profile. The discriminant is the stored byte and
/// the blink count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Target {
    /// Native OS, characters as printed on the keycaps.
    Ascii = 1,
    /// VICE 2.x positional keymap, also used by BMC64.
    Vice2Bmc64 = 2,
    /// VICE 3.x positional keymap.
    Vice3 = 3,
    /// MiSTer FPGA C64 core.
    Mister = 4,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid target number {0}, expected 1..=4")]
pub struct InvalidTarget(pub u8);

impl Target {
    pub const DEFAULT: Target = Target::Ascii;
    pub const ALL: [Target; 4] = [Target::Ascii, Target::Vice2Bmc64, Target::Vice3, Target::Mister];

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Target {
        match self {
            Target::Ascii => Target::Vice2Bmc64,
            Target::Vice2Bmc64 => Target::Vice3,
            Target::Vice3 => Target::Mister,
            Target::Mister => Target::Ascii,
        }
    }

    pub fn previous(self) -> Target {
        match self {
            Target::Ascii => Target::Mister,
            Target::Vice2Bmc64 => Target::Ascii,
            Target::Vice3 => Target::Vice2Bmc64,
            Target::Mister => Target::Vice3,
        }
    }

    /// Targets where C= is Alt on the host rather than Ctrl.
    pub const fn is_alt_target(self) -> bool {
        matches!(self, Target::Mister | Target::Ascii)
    }

    pub fn name(self) -> &'static str {
        match self {
            Target::Ascii => "ascii",
            Target::Vice2Bmc64 => "vice2-bmc64",
            Target::Vice3 => "vice3",
            Target::Mister => "mister",
        }
    }

    /// The target selected by `C=` + `F1` with the given modifiers held.
    pub fn cycled(self, modifiers: &ModifierState) -> Target {
        if modifiers.ctrl {
            Target::Ascii
        } else if modifiers.is_shifted() {
            self.previous()
        } else {
            self.next()
        }
    }
}

impl TryFrom<u8> for Target {
    type Error = InvalidTarget;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Target::Ascii),
            2 => Ok(Target::Vice2Bmc64),
            3 => Ok(Target::Vice3),
            4 => Ok(Target::Mister),
            other => Err(InvalidTarget(other)),
        }
    }
}

/// One durable byte holding the selected target. Writes wear the medium,
/// so callers only store on an actual change.
pub trait TargetStore {
    fn load(&mut self) -> u8;
    fn store(&mut self, value: u8);
}

/// Visual feedback: pulse `count` times.
pub trait Notifier {
    fn notify(&mut self, count: u8);
}

/// Read the stored target, repairing the slot if it holds garbage (for
/// example an erased EEPROM reading 0xFF).
pub fn load_target<P: TargetStore>(store: &mut P) -> Target {
    let raw = store.load();
    match Target::try_from(raw) {
        Ok(target) => {
            info!("loaded target {}", target.name());
            target
        }
        Err(err) => {
            warn!("{}; resetting to {}", err, Target::DEFAULT.name());
            store.store(Target::DEFAULT.number());
            Target::DEFAULT
        }
    }
}

/// Owns the active target, its translation table, and the persistence and
/// feedback collaborators.
pub struct TargetController<P, N> {
    target: Target,
    table: TranslationTable,
    store: P,
    notifier: N,
}

impl<P: TargetStore, N: Notifier> TargetController<P, N> {
    /// Load the persisted target, build its table and announce it.
    pub fn start(mut store: P, mut notifier: N) -> Self {
        let target = load_target(&mut store);
        notifier.notify(target.number());
        Self { target, table: TranslationTable::build(target), store, notifier }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Switch to `next`: persist, release every host key, rebuild, notify.
    /// Re-selecting the active target skips the store write.
    pub fn switch<S: Sink>(&mut self, next: Target, sink: &mut S) {
        info!("target {} -> {}", self.target.name(), next.name());
        if next != self.target {
            self.target = next;
            self.store.store(next.number());
        }
        sink.release_all();
        self.table = TranslationTable::build(next);
        self.notifier.notify(next.number());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, Recorder, TallyNotifier};
    use crate::sink::SinkOp;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::vec;

    #[rstest]
    #[case(Target::Mister, false, false, Target::Ascii)]
    #[case(Target::Ascii, false, false, Target::Vice2Bmc64)]
    #[case(Target::Ascii, true, false, Target::Mister)]
    #[case(Target::Vice3, true, false, Target::Vice2Bmc64)]
    #[case(Target::Vice3, false, true, Target::Ascii)]
    #[case(Target::Mister, true, true, Target::Ascii)]
    fn test_cycling(#[case] from: Target, #[case] shift: bool, #[case] ctrl: bool, #[case] to: Target) {
        let modifiers = ModifierState { left_shift: shift, ctrl, commodore: true, ..ModifierState::default() };
        assert_eq!(from.cycled(&modifiers), to);
    }

    #[test]
    fn test_numbers_round_trip() {
        for target in Target::ALL {
            assert_eq!(Target::try_from(target.number()), Ok(target));
        }
        assert_eq!(Target::try_from(0), Err(InvalidTarget(0)));
        assert_eq!(Target::try_from(0xFF), Err(InvalidTarget(0xFF)));
    }

    #[test]
    fn test_stored_target_survives_power_cycle() {
        let mut store = MemoryStore::new(Target::Vice3.number());
        assert_eq!(load_target(&mut store), Target::Vice3);
        assert_eq!(store.writes, 0);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(0xFF)]
    fn test_invalid_stored_target_is_repaired(#[case] raw: u8) {
        let mut store = MemoryStore::new(raw);
        assert_eq!(load_target(&mut store), Target::DEFAULT);
        assert_eq!(store.value, Target::DEFAULT.number());
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_start_announces_loaded_target() {
        let controller = TargetController::start(MemoryStore::new(4), TallyNotifier::default());
        assert_eq!(controller.target(), Target::Mister);
        assert_eq!(controller.notifier().counts, vec![4]);
        assert_eq!(controller.table(), &TranslationTable::build(Target::Mister));
    }

    #[test]
    fn test_switch_persists_resets_rebuilds_and_notifies() {
        let mut controller = TargetController::start(MemoryStore::new(1), TallyNotifier::default());
        let mut sink = Recorder::default();
        controller.switch(Target::Vice3, &mut sink);

        assert_eq!(controller.target(), Target::Vice3);
        assert_eq!(controller.store().value, 3);
        assert_eq!(controller.store().writes, 1);
        assert_eq!(sink.ops, vec![SinkOp::ReleaseAll]);
        assert_eq!(controller.table(), &TranslationTable::build(Target::Vice3));
        assert_eq!(controller.notifier().counts, vec![1, 3]);

        // Power cycle.
        let store = MemoryStore::new(controller.store().value);
        let controller = TargetController::start(store, TallyNotifier::default());
        assert_eq!(controller.target(), Target::Vice3);
    }

    #[test]
    fn test_reselecting_active_target_does_not_write() {
        let mut controller = TargetController::start(MemoryStore::new(1), TallyNotifier::default());
        let mut sink = Recorder::default();
        controller.switch(Target::Ascii, &mut sink);

        assert_eq!(controller.store().writes, 0);
        assert_eq!(sink.ops, vec![SinkOp::ReleaseAll]);
        assert_eq!(controller.notifier().counts, vec![1, 1]);
    }
}
