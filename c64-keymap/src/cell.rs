//! Per-position state: the debounced level and what the last press sent.

use crate::symbol::Symbol;

/// What a press sent to the sink, kept so the matching release can undo
/// exactly that, whatever the modifiers look like by then.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Emission {
    /// Nothing was sent (target switch, or no press recorded).
    #[default]
    None,
    /// The table symbol for the position.
    Plain(Symbol),
    /// A modifier key's own symbol (shift, CTRL, C=).
    Modifier(Symbol),
    /// A substitute for the table symbol.
    Alternate(Symbol),
    /// Page Up/Down sent with the CTRL key's host symbol lifted around it.
    PageScroll(Symbol),
    /// The last key of a synthesized menu sequence.
    Menu(Symbol),
}

impl Emission {
    /// True when the press sent something other than the table default.
    pub fn is_alternate(self) -> bool {
        !matches!(self, Emission::None | Emission::Plain(_))
    }

    /// The symbol still held down on the sink because of this press.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Emission::None => None,
            Emission::Plain(symbol)
            | Emission::Modifier(symbol)
            | Emission::Alternate(symbol)
            | Emission::PageScroll(symbol)
            | Emission::Menu(symbol) => Some(symbol),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CellState {
    /// Debounced level.
    pub down: bool,
    /// Time of the last accepted transition, `None` before the first one.
    pub last_transition: Option<u32>,
    /// Recorded at press time, consumed at release time.
    pub emitted: Emission,
}

impl CellState {
    pub const fn new() -> Self {
        Self { down: false, last_transition: None, emitted: Emission::None }
    }

    pub fn emitted_as_alternate(&self) -> bool {
        self.emitted.is_alternate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::NamedKey;

    #[test]
    fn test_alternate_classification() {
        assert!(!Emission::None.is_alternate());
        assert!(!Emission::Plain(Symbol::Char(b'6')).is_alternate());
        let alt = Emission::Alternate(Symbol::Char(b'&'));
        assert!(alt.is_alternate());
        assert!(Emission::Menu(NamedKey::F12.into()).is_alternate());
        assert_eq!(alt.symbol(), Some(Symbol::Char(b'&')));
        assert_eq!(Emission::None.symbol(), None);
    }

    #[test]
    fn test_new_cell_is_up_and_unsettled() {
        let cell = CellState::new();
        assert!(!cell.down);
        assert_eq!(cell.last_transition, None);
        assert!(!cell.emitted_as_alternate());
    }
}
