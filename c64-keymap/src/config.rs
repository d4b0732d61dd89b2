//! Timing constants.

/// Contact bounce settle window per key.
pub const DEBOUNCE_MS: u32 = 5;
/// Time for a row line to return to idle after it is deactivated.
pub const ROW_SETTLE_US: u32 = 30;
/// Pause between the steps of the menu key sequence.
pub const MENU_STEP_MS: u32 = 100;

/// Timing knobs for one keyboard instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timing {
    pub debounce_ms: u32,
    pub row_settle_us: u32,
    pub menu_step_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            row_settle_us: ROW_SETTLE_US,
            menu_step_ms: MENU_STEP_MS,
        }
    }
}
