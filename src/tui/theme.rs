//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Green: success (cursor marker, code with plenty of time, copied mark)
//! - Yellow: warning (code about to rotate)
//! - Red: danger (code about to expire)
//! - Dark gray: muted (footer hints)
//! - Bold white: emphasized (focused row, query echo, seconds left)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

pub const STYLE_SUCCESS: Style = Style::new().fg(Color::Green);

pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

pub const STYLE_DANGER: Style = Style::new().fg(Color::Red);

/// De-emphasized text: hints, separators.
pub const STYLE_MUTED: Style = Style::new().fg(Color::DarkGray);

/// Important text — bold white.
pub const STYLE_EMPHASIZED: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title line.
pub const STYLE_TITLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Cursor marker in the list.
pub const STYLE_CURSOR_MARKER: Style = STYLE_SUCCESS.add_modifier(Modifier::BOLD);

/// Text of the focused row.
pub const STYLE_CURSOR_ROW: Style = STYLE_EMPHASIZED;

/// Error line in the detail view.
pub const STYLE_ERROR: Style = STYLE_DANGER.add_modifier(Modifier::BOLD);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_styles_have_expected_colors() {
        assert_eq!(STYLE_SUCCESS.fg, Some(Color::Green));
        assert_eq!(STYLE_WARNING.fg, Some(Color::Yellow));
        assert_eq!(STYLE_DANGER.fg, Some(Color::Red));
        assert_eq!(STYLE_MUTED.fg, Some(Color::DarkGray));
        assert_eq!(STYLE_EMPHASIZED.fg, Some(Color::White));
    }

    #[test]
    fn cursor_row_differs_from_plain_row() {
        assert_ne!(STYLE_CURSOR_ROW, Style::default());
        assert!(STYLE_CURSOR_ROW.add_modifier.contains(Modifier::BOLD));
    }
}
