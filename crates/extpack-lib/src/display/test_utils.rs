//! Shared helpers for display module tests

use crate::display::styling::StyleManager;
use crate::primitives::{TerminalColorCaps, TerminalUnicodeCaps};
use crate::terminal::TerminalCapabilities;

/// Styling with no color and ASCII symbols
pub fn create_test_styling() -> StyleManager {
    StyleManager::new(&create_test_capabilities())
}

pub fn create_test_capabilities() -> TerminalCapabilities {
    TerminalCapabilities::default()
}

/// Styling with color and unicode forced on
pub fn create_rich_styling() -> StyleManager {
    StyleManager::new(&TerminalCapabilities {
        color: TerminalColorCaps::TrueColor,
        unicode: TerminalUnicodeCaps::BasicUnicode,
        is_tty: true,
    })
}
