//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Green: a friend owes you
//! - Red: you owe a friend
//! - Cyan: interactive elements (buttons, keybinding hints)
//! - Dim: de-emphasized (avatar URLs, placeholders)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Friend owes you.
pub const STYLE_OWED: Style = Style::new().fg(Color::Green);

/// You owe the friend. Also used for validation notices.
pub const STYLE_OWE: Style = Style::new().fg(Color::Red);

/// Settled balance.
pub const STYLE_EVEN: Style = Style::new();

/// Interactive element / keybinding hint — cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata — dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text — bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Row of the currently selected friend.
pub const STYLE_SELECTED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Cursor row in the friend list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Form field that owns the keyboard.
pub const STYLE_FIELD_FOCUSED: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Read-only form field.
pub const STYLE_FIELD_DISABLED: Style = Style::new().fg(Color::DarkGray);

/// Panel border when the panel has focus.
pub const STYLE_BORDER_FOCUSED: Style = Style::new().fg(Color::Cyan);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
