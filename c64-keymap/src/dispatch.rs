//! Press/release translation.
//!
//! A press is first resolved to an [`Action`] by a pure function of the
//! key, target, modifiers and table; the action is then carried out and the
//! resulting [`Emission`] is stored on the cell. A release never looks at
//! the modifiers to decide what to send: it replays the stored emission
//! backwards, then re-presses any shift key still physically held.

use embedded_hal::delay::DelayNs;

use crate::cell::Emission;
use crate::keyboard::Keyboard;
use crate::matrix::C64Key;
use crate::modifiers::ModifierState;
use crate::sink::Sink;
use crate::symbol::{NamedKey, Symbol};
use crate::table::TranslationTable;
use crate::target::{Notifier, Target, TargetStore};

/// Synthesized menu key sequences for `C=` + `F7`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MenuSequence {
    /// MiSTer OSD: Alt up, F12 down, Alt down again.
    MisterOsd,
    /// OS start menu: Alt up, left Windows down.
    StartMenu,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    SwitchTarget(Target),
    Modifier(Symbol),
    Menu(MenuSequence),
    PageScroll { ctrl: Symbol, symbol: Symbol, suppress_shift: bool },
    Alternate { symbol: Symbol, suppress_shift: bool },
    Plain(Symbol),
}

struct ShiftedDigit {
    key: C64Key,
    symbol: u8,
    /// Lift host shift first; the symbol is unshifted on a US layout.
    suppress_shift: bool,
    /// Applies on every target, not only ASCII and MiSTer.
    all_targets: bool,
}

/// C64 shifted digits, typed as the characters printed on the keycaps.
#[rustfmt::skip]
const SHIFTED_DIGITS: [ShiftedDigit; 5] = [
    ShiftedDigit { key: C64Key::N6, symbol: b'&', suppress_shift: false, all_targets: false },
    ShiftedDigit { key: C64Key::N7, symbol: b'\'', suppress_shift: true, all_targets: false },
    ShiftedDigit { key: C64Key::N8, symbol: b'(', suppress_shift: false, all_targets: false },
    ShiftedDigit { key: C64Key::N9, symbol: b')', suppress_shift: false, all_targets: false },
    ShiftedDigit { key: C64Key::N0, symbol: b'0', suppress_shift: true, all_targets: true },
];

/// Shift + F1/F3/F5/F7 on ASCII.
const SHIFTED_FUNCTION_KEYS: [(C64Key, NamedKey); 4] = [
    (C64Key::F1, NamedKey::F2),
    (C64Key::F3, NamedKey::F4),
    (C64Key::F5, NamedKey::F6),
    (C64Key::F7, NamedKey::F8),
];

/// The C64 needs shift to move the cursor left or up; send the real arrow.
const SHIFTED_CURSOR_KEYS: [(C64Key, NamedKey); 2] = [
    (C64Key::CursorRight, NamedKey::Left),
    (C64Key::CursorDown, NamedKey::Up),
];

fn shifted_override(table: &[(C64Key, NamedKey)], key: C64Key) -> Option<Symbol> {
    table.iter().find(|(k, _)| *k == key).map(|&(_, alt)| Symbol::Key(alt))
}

/// Decide what a press of `key` sends. First matching rule wins.
pub(crate) fn resolve_press(
    key: C64Key,
    target: Target,
    modifiers: &ModifierState,
    table: &TranslationTable,
) -> Action {
    let shifted = modifiers.is_shifted();

    if key == C64Key::F1 && modifiers.commodore {
        return Action::SwitchTarget(target.cycled(modifiers));
    }

    if ModifierState::is_modifier_key(key) {
        return Action::Modifier(table.symbol(key));
    }

    if key == C64Key::F7 && modifiers.commodore {
        match target {
            Target::Mister => return Action::Menu(MenuSequence::MisterOsd),
            Target::Ascii => return Action::Menu(MenuSequence::StartMenu),
            Target::Vice2Bmc64 | Target::Vice3 => {}
        }
    }

    if shifted && target == Target::Ascii {
        if let Some(symbol) = shifted_override(&SHIFTED_FUNCTION_KEYS, key) {
            return Action::Alternate { symbol, suppress_shift: true };
        }
    }

    if key == C64Key::CursorDown && modifiers.ctrl && target == Target::Ascii {
        // Shift picks the direction and is not forwarded with it.
        let page = if shifted { NamedKey::PageUp } else { NamedKey::PageDown };
        return Action::PageScroll {
            ctrl: table.symbol(C64Key::Ctrl),
            symbol: page.into(),
            suppress_shift: shifted,
        };
    }

    if shifted {
        if let Some(symbol) = shifted_override(&SHIFTED_CURSOR_KEYS, key) {
            return Action::Alternate { symbol, suppress_shift: true };
        }

        if key == C64Key::ClrHome && target == Target::Ascii {
            return Action::Alternate { symbol: NamedKey::End.into(), suppress_shift: true };
        }

        let digit = SHIFTED_DIGITS
            .iter()
            .find(|d| d.key == key && (d.all_targets || target.is_alt_target()));
        if let Some(digit) = digit {
            return Action::Alternate {
                symbol: Symbol::Char(digit.symbol),
                suppress_shift: digit.suppress_shift,
            };
        }
    }

    Action::Plain(table.symbol(key))
}

impl<S, P, N, D> Keyboard<S, P, N, D>
where
    S: Sink,
    P: TargetStore,
    N: Notifier,
    D: DelayNs,
{
    pub(crate) fn press(&mut self, key: C64Key) -> Emission {
        let action = resolve_press(key, self.target(), &self.modifiers, self.table());

        match action {
            Action::SwitchTarget(next) => {
                self.controller.switch(next, &mut self.sink);
                Emission::None
            }
            Action::Modifier(symbol) => {
                self.modifiers.set(key, true);
                self.sink.press(symbol);
                Emission::Modifier(symbol)
            }
            Action::Menu(sequence) => {
                self.modifiers.menu_sequence_active = true;
                self.run_menu_sequence(sequence)
            }
            Action::PageScroll { ctrl, symbol, suppress_shift } => {
                self.modifiers.page_scroll_active = true;
                self.sink.release(ctrl);
                if suppress_shift {
                    self.modifiers.suppress_shift(&mut self.sink);
                }
                self.sink.press(symbol);
                Emission::PageScroll(symbol)
            }
            Action::Alternate { symbol, suppress_shift } => {
                if suppress_shift {
                    self.modifiers.suppress_shift(&mut self.sink);
                }
                if key == C64Key::ClrHome {
                    self.modifiers.home_as_end_active = true;
                }
                self.sink.press(symbol);
                Emission::Alternate(symbol)
            }
            Action::Plain(symbol) => {
                self.sink.press(symbol);
                Emission::Plain(symbol)
            }
        }
    }

    fn run_menu_sequence(&mut self, sequence: MenuSequence) -> Emission {
        // C= is Alt on both targets that have a menu sequence.
        let alt = self.table().symbol(C64Key::Commodore);
        match sequence {
            MenuSequence::MisterOsd => {
                let menu = Symbol::Key(NamedKey::F12);
                self.sink.release(alt);
                self.delay.delay_ms(self.timing.menu_step_ms);
                self.sink.press(menu);
                self.delay.delay_ms(self.timing.menu_step_ms);
                self.sink.press(alt);
                Emission::Menu(menu)
            }
            MenuSequence::StartMenu => {
                let menu = Symbol::Key(NamedKey::LeftGui);
                self.sink.release(alt);
                self.sink.press(menu);
                Emission::Menu(menu)
            }
        }
    }

    /// Consume the latch that already lifted `key`'s host symbol, if any.
    fn take_lifting_latch(&mut self, key: C64Key) -> bool {
        let latch = match key {
            C64Key::Ctrl => &mut self.modifiers.page_scroll_active,
            // Only the start menu leaves Alt up; the MiSTer OSD presses it again.
            C64Key::Commodore if self.controller.target() == Target::Ascii => {
                &mut self.modifiers.menu_sequence_active
            }
            C64Key::LeftShift | C64Key::RightShift => &mut self.modifiers.home_as_end_active,
            _ => return false,
        };
        core::mem::take(latch)
    }

    pub(crate) fn release(&mut self, key: C64Key, emitted: Emission) {
        self.modifiers.set(key, false);

        match emitted {
            Emission::None => {}
            Emission::Plain(symbol) => self.sink.release(symbol),
            Emission::Modifier(symbol) => {
                // The host already saw this key go up.
                if !self.take_lifting_latch(key) {
                    self.sink.release(symbol);
                }
            }
            Emission::Alternate(symbol) => {
                self.sink.release(symbol);
                if key == C64Key::ClrHome {
                    self.modifiers.home_as_end_active = false;
                }
            }
            Emission::PageScroll(symbol) => {
                self.sink.release(symbol);
                self.modifiers.page_scroll_active = false;
                if self.modifiers.ctrl {
                    let ctrl = self.table().symbol(C64Key::Ctrl);
                    self.sink.press(ctrl);
                }
            }
            Emission::Menu(symbol) => {
                self.sink.release(symbol);
                self.modifiers.menu_sequence_active = false;
            }
        }

        self.modifiers.restore_shift(&mut self.sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timing;
    use crate::debounce::Transition;
    use crate::sink::SinkOp;
    use crate::testing::{MemoryStore, Recorder, TallyNotifier, TotalDelay};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::vec;
    use std::vec::Vec;

    type TestKeyboard = Keyboard<Recorder, MemoryStore, TallyNotifier, TotalDelay>;

    fn keyboard(target: Target) -> TestKeyboard {
        Keyboard::start(
            Recorder::default(),
            MemoryStore::new(target.number()),
            TallyNotifier::default(),
            TotalDelay::default(),
            Timing::default(),
        )
    }

    fn down(kb: &mut TestKeyboard, key: C64Key) -> Vec<SinkOp> {
        kb.dispatch(key.position(), Transition::Pressed);
        kb.sink_mut().take()
    }

    fn up(kb: &mut TestKeyboard, key: C64Key) -> Vec<SinkOp> {
        kb.dispatch(key.position(), Transition::Released);
        kb.sink_mut().take()
    }

    fn press(symbol: impl Into<Symbol>) -> SinkOp {
        SinkOp::Press(symbol.into())
    }

    fn release(symbol: impl Into<Symbol>) -> SinkOp {
        SinkOp::Release(symbol.into())
    }

    const LSHIFT: NamedKey = NamedKey::LeftShift;
    const RSHIFT: NamedKey = NamedKey::RightShift;

    #[test]
    fn test_plain_key_passes_through() {
        let mut kb = keyboard(Target::Vice3);
        assert_eq!(down(&mut kb, C64Key::A), vec![press(Symbol::Char(b'a'))]);
        assert_eq!(up(&mut kb, C64Key::A), vec![release(Symbol::Char(b'a'))]);
    }

    #[test]
    fn test_shifted_six_on_mister_releases_what_it_pressed() {
        let mut kb = keyboard(Target::Mister);
        down(&mut kb, C64Key::LeftShift);
        assert_eq!(down(&mut kb, C64Key::N6), vec![press(Symbol::Char(b'&'))]);
        assert!(kb.cell(C64Key::N6.position()).emitted_as_alternate());

        assert_eq!(up(&mut kb, C64Key::LeftShift), vec![release(LSHIFT)]);
        assert_eq!(up(&mut kb, C64Key::N6), vec![release(Symbol::Char(b'&'))]);
        assert_eq!(kb.sink().report.modifiers, 0);
    }

    #[test]
    fn test_shifted_six_on_vice_is_forwarded() {
        let mut kb = keyboard(Target::Vice2Bmc64);
        down(&mut kb, C64Key::RightShift);
        assert_eq!(down(&mut kb, C64Key::N6), vec![press(Symbol::Char(b'6'))]);
        assert_eq!(up(&mut kb, C64Key::N6), vec![release(Symbol::Char(b'6')), press(RSHIFT)]);
    }

    #[rstest]
    #[case(Target::Ascii)]
    #[case(Target::Vice2Bmc64)]
    #[case(Target::Vice3)]
    #[case(Target::Mister)]
    fn test_shifted_zero_suppresses_host_shift_everywhere(#[case] target: Target) {
        let mut kb = keyboard(target);
        down(&mut kb, C64Key::LeftShift);
        assert_eq!(
            down(&mut kb, C64Key::N0),
            vec![release(LSHIFT), release(RSHIFT), press(Symbol::Char(b'0'))]
        );
        assert!(!kb.sink().report.is_pressed(LSHIFT));

        assert_eq!(up(&mut kb, C64Key::N0), vec![release(Symbol::Char(b'0')), press(LSHIFT)]);
        assert!(kb.sink().report.is_pressed(LSHIFT));
    }

    #[test]
    fn test_shift_comes_back_after_shifted_character_release() {
        let mut kb = keyboard(Target::Ascii);
        down(&mut kb, C64Key::LeftShift);
        down(&mut kb, C64Key::N8);
        up(&mut kb, C64Key::N8);
        // Releasing '(' cleared the shared shift bit; the held key restores it.
        assert_eq!(kb.sink().report.modifiers, NamedKey::LeftShift.modifier_bit().unwrap());
    }

    #[test]
    fn test_shifted_cursor_keys_send_real_arrows() {
        let mut kb = keyboard(Target::Vice3);
        down(&mut kb, C64Key::LeftShift);
        assert_eq!(
            down(&mut kb, C64Key::CursorRight),
            vec![release(LSHIFT), release(RSHIFT), press(NamedKey::Left)]
        );
        assert_eq!(
            down(&mut kb, C64Key::CursorDown),
            vec![release(LSHIFT), release(RSHIFT), press(NamedKey::Up)]
        );
        up(&mut kb, C64Key::LeftShift);
        assert_eq!(up(&mut kb, C64Key::CursorDown), vec![release(NamedKey::Up)]);
        assert_eq!(up(&mut kb, C64Key::CursorRight), vec![release(NamedKey::Left)]);
    }

    #[test]
    fn test_ctrl_cursor_down_pages_on_ascii() {
        let mut kb = keyboard(Target::Ascii);
        assert_eq!(down(&mut kb, C64Key::Ctrl), vec![press(NamedKey::LeftCtrl)]);
        assert_eq!(
            down(&mut kb, C64Key::CursorDown),
            vec![release(NamedKey::LeftCtrl), press(NamedKey::PageDown)]
        );
        assert!(kb.modifiers().page_scroll_active);
        assert_eq!(
            up(&mut kb, C64Key::CursorDown),
            vec![release(NamedKey::PageDown), press(NamedKey::LeftCtrl)]
        );
        assert!(!kb.modifiers().page_scroll_active);
    }

    #[test]
    fn test_ctrl_shift_cursor_down_pages_up_without_shift() {
        let mut kb = keyboard(Target::Ascii);
        down(&mut kb, C64Key::Ctrl);
        down(&mut kb, C64Key::RightShift);
        assert_eq!(
            down(&mut kb, C64Key::CursorDown),
            vec![
                release(NamedKey::LeftCtrl),
                release(LSHIFT),
                release(RSHIFT),
                press(NamedKey::PageUp)
            ]
        );
        let report = kb.sink().report;
        assert!(report.is_pressed(NamedKey::PageUp));
        assert!(!report.is_pressed(RSHIFT));
        assert!(!report.is_pressed(NamedKey::LeftCtrl));

        // The host CTRL is already up; only the held shift is re-asserted.
        assert_eq!(up(&mut kb, C64Key::Ctrl), vec![press(RSHIFT)]);
        assert!(!kb.modifiers().page_scroll_active);
        assert_eq!(
            up(&mut kb, C64Key::CursorDown),
            vec![release(NamedKey::PageUp), press(RSHIFT)]
        );
        assert!(kb.sink().report.is_pressed(RSHIFT));
    }

    #[test]
    fn test_ctrl_pressed_again_during_page_scroll_is_released_normally() {
        let mut kb = keyboard(Target::Ascii);
        down(&mut kb, C64Key::Ctrl);
        down(&mut kb, C64Key::CursorDown);
        assert_eq!(up(&mut kb, C64Key::Ctrl), vec![]);
        assert_eq!(down(&mut kb, C64Key::Ctrl), vec![press(NamedKey::LeftCtrl)]);
        assert_eq!(up(&mut kb, C64Key::Ctrl), vec![release(NamedKey::LeftCtrl)]);
        assert_eq!(up(&mut kb, C64Key::CursorDown), vec![release(NamedKey::PageDown)]);
        assert_eq!(kb.sink().report, crate::report::KeyReport::empty());
    }

    #[test]
    fn test_ctrl_is_tab_on_vice() {
        let mut kb = keyboard(Target::Vice3);
        assert_eq!(down(&mut kb, C64Key::Ctrl), vec![press(NamedKey::Tab)]);
        assert!(kb.modifiers().ctrl);
        // No paging outside ASCII.
        assert_eq!(down(&mut kb, C64Key::CursorDown), vec![press(NamedKey::Down)]);
        assert_eq!(up(&mut kb, C64Key::Ctrl), vec![release(NamedKey::Tab)]);
        assert!(!kb.modifiers().ctrl);
    }

    #[test]
    fn test_shifted_function_keys_on_ascii() {
        let mut kb = keyboard(Target::Ascii);
        down(&mut kb, C64Key::LeftShift);
        assert_eq!(
            down(&mut kb, C64Key::F5),
            vec![release(LSHIFT), release(RSHIFT), press(NamedKey::F6)]
        );
        assert_eq!(up(&mut kb, C64Key::F5), vec![release(NamedKey::F6), press(LSHIFT)]);
    }

    #[test]
    fn test_shifted_function_keys_forwarded_elsewhere() {
        let mut kb = keyboard(Target::Mister);
        down(&mut kb, C64Key::LeftShift);
        assert_eq!(down(&mut kb, C64Key::F3), vec![press(NamedKey::F3)]);
    }

    #[test]
    fn test_commodore_f7_opens_mister_osd() {
        let mut kb = keyboard(Target::Mister);
        assert_eq!(down(&mut kb, C64Key::Commodore), vec![press(NamedKey::LeftAlt)]);
        assert_eq!(
            down(&mut kb, C64Key::F7),
            vec![release(NamedKey::LeftAlt), press(NamedKey::F12), press(NamedKey::LeftAlt)]
        );
        assert!(kb.modifiers().menu_sequence_active);
        assert_eq!(kb.delay.calls, 2);
        assert_eq!(kb.delay.total_ns, 2 * u64::from(kb.timing.menu_step_ms) * 1_000_000);

        // C= let go before F7: F7's release still only undoes F12.
        up(&mut kb, C64Key::Commodore);
        assert_eq!(up(&mut kb, C64Key::F7), vec![release(NamedKey::F12)]);
        assert!(!kb.modifiers().menu_sequence_active);
    }

    #[test]
    fn test_commodore_f7_opens_start_menu_on_ascii() {
        let mut kb = keyboard(Target::Ascii);
        down(&mut kb, C64Key::Commodore);
        assert_eq!(
            down(&mut kb, C64Key::F7),
            vec![release(NamedKey::LeftAlt), press(NamedKey::LeftGui)]
        );
        assert_eq!(up(&mut kb, C64Key::F7), vec![release(NamedKey::LeftGui)]);
        assert_eq!(kb.delay.calls, 0);
    }

    #[test]
    fn test_commodore_up_after_start_menu_sends_nothing() {
        let mut kb = keyboard(Target::Ascii);
        down(&mut kb, C64Key::Commodore);
        down(&mut kb, C64Key::F7);
        // Alt was lifted by the sequence.
        assert_eq!(up(&mut kb, C64Key::Commodore), vec![]);
        assert!(!kb.modifiers().menu_sequence_active);
        assert_eq!(up(&mut kb, C64Key::F7), vec![release(NamedKey::LeftGui)]);
    }

    #[test]
    fn test_commodore_up_after_mister_osd_releases_alt() {
        let mut kb = keyboard(Target::Mister);
        down(&mut kb, C64Key::Commodore);
        down(&mut kb, C64Key::F7);
        assert_eq!(up(&mut kb, C64Key::Commodore), vec![release(NamedKey::LeftAlt)]);
        assert!(kb.modifiers().menu_sequence_active);
    }

    #[test]
    fn test_commodore_f7_is_plain_on_vice() {
        let mut kb = keyboard(Target::Vice2Bmc64);
        assert_eq!(down(&mut kb, C64Key::Commodore), vec![press(NamedKey::LeftCtrl)]);
        assert_eq!(down(&mut kb, C64Key::F7), vec![press(NamedKey::F7)]);
    }

    #[test]
    fn test_shifted_home_is_end_on_ascii() {
        let mut kb = keyboard(Target::Ascii);
        down(&mut kb, C64Key::LeftShift);
        assert_eq!(
            down(&mut kb, C64Key::ClrHome),
            vec![release(LSHIFT), release(RSHIFT), press(NamedKey::End)]
        );
        assert!(kb.modifiers().home_as_end_active);
        // Host shift is already suppressed.
        assert_eq!(up(&mut kb, C64Key::LeftShift), vec![]);
        assert!(!kb.modifiers().home_as_end_active);
        assert_eq!(up(&mut kb, C64Key::ClrHome), vec![release(NamedKey::End)]);
        assert!(!kb.modifiers().home_as_end_active);
    }

    #[rstest]
    #[case(Target::Mister, false, false, Target::Ascii)]
    #[case(Target::Ascii, true, false, Target::Mister)]
    #[case(Target::Vice3, false, true, Target::Ascii)]
    #[case(Target::Vice2Bmc64, false, false, Target::Vice3)]
    fn test_commodore_f1_switches_target(
        #[case] from: Target,
        #[case] shift: bool,
        #[case] ctrl: bool,
        #[case] to: Target,
    ) {
        let mut kb = keyboard(from);
        down(&mut kb, C64Key::Commodore);
        if shift {
            down(&mut kb, C64Key::LeftShift);
        }
        if ctrl {
            down(&mut kb, C64Key::Ctrl);
        }
        assert_eq!(down(&mut kb, C64Key::F1), vec![SinkOp::ReleaseAll]);
        assert_eq!(kb.target(), to);
        assert_eq!(kb.table(), &TranslationTable::build(to));
        assert_eq!(kb.store().value, to.number());
        assert_eq!(kb.store().writes, 1);
        assert_eq!(kb.notifier().counts, vec![from.number(), to.number()]);
        assert_eq!(kb.sink().report, crate::report::KeyReport::empty());

        let expected: Vec<SinkOp> = if shift { vec![press(LSHIFT)] } else { vec![] };
        assert_eq!(up(&mut kb, C64Key::F1), expected);
    }

    #[test]
    fn test_plain_f1_never_writes_storage() {
        let mut kb = keyboard(Target::Vice3);
        down(&mut kb, C64Key::F1);
        up(&mut kb, C64Key::F1);
        assert_eq!(kb.store().writes, 0);
        assert_eq!(kb.target(), Target::Vice3);
    }

    #[test]
    fn test_restore_ghosts_are_dropped() {
        let mut kb = keyboard(Target::Mister);
        for row in 0..8 {
            let pos = crate::matrix::MatrixPosition::new(row, crate::matrix::RESTORE_COL).unwrap();
            kb.dispatch(pos, Transition::Pressed);
        }
        assert_eq!(kb.sink_mut().take(), vec![press(NamedKey::F11)]);
    }

    const MODIFIER_KEYS: [C64Key; 4] =
        [C64Key::LeftShift, C64Key::RightShift, C64Key::Ctrl, C64Key::Commodore];

    fn held(combo: u8) -> impl Iterator<Item = C64Key> {
        MODIFIER_KEYS.into_iter().enumerate().filter(move |(i, _)| combo & (1 << i) != 0).map(|(_, k)| k)
    }

    /// For every key, target and modifier combination the release first
    /// lets go of what the press sent, even when all modifiers were released
    /// in between.
    #[test]
    fn test_release_undoes_press_after_modifier_changes() {
        for target in Target::ALL {
            for combo in 0..16u8 {
                for key in C64Key::all().filter(|k| !ModifierState::is_modifier_key(*k)) {
                    let mut kb = keyboard(target);
                    for m in held(combo) {
                        down(&mut kb, m);
                    }
                    let modifiers = *kb.modifiers();
                    let action = resolve_press(key, target, &modifiers, kb.table());
                    if matches!(action, Action::SwitchTarget(_)) {
                        continue;
                    }

                    let pressed = down(&mut kb, key);
                    let symbol = kb.cell(key.position()).emitted.symbol().expect("press emits");
                    assert!(pressed.contains(&SinkOp::Press(symbol)));
                    for m in held(combo) {
                        up(&mut kb, m);
                    }
                    let released = up(&mut kb, key);

                    assert_eq!(
                        released.first(),
                        Some(&SinkOp::Release(symbol)),
                        "{:?} {:?} combo {:#06b}",
                        target,
                        key,
                        combo
                    );
                    assert!(
                        !released.contains(&SinkOp::Press(symbol)),
                        "{:?} {:?} combo {:#06b}",
                        target,
                        key,
                        combo
                    );
                }
            }
        }
    }

    /// With modifiers unchanged, press then release leaves the host report
    /// as it was. The ASCII start menu is the one sequence that leaves Alt
    /// lifted.
    #[test]
    fn test_press_release_restores_report() {
        for target in Target::ALL {
            for combo in 0..16u8 {
                for key in C64Key::all().filter(|k| !ModifierState::is_modifier_key(*k)) {
                    let mut kb = keyboard(target);
                    for m in held(combo) {
                        down(&mut kb, m);
                    }
                    let action = resolve_press(key, target, kb.modifiers(), kb.table());
                    if matches!(
                        action,
                        Action::SwitchTarget(_) | Action::Menu(MenuSequence::StartMenu)
                    ) {
                        continue;
                    }

                    let before = kb.sink().report;
                    down(&mut kb, key);
                    up(&mut kb, key);
                    assert_eq!(
                        kb.sink().report,
                        before,
                        "{:?} {:?} combo {:#06b}",
                        target,
                        key,
                        combo
                    );
                }
            }
        }
    }
}
