//! TUI state algebra: the model, semantic actions and transitions.
//!
//! The ledger owns the domain data and the panel mode. `App` adds only
//! what the terminal needs on top: a list cursor, keyboard focus, the
//! in-progress form text and a blocking notice.

use crossterm::event::KeyEvent;

use crate::form::{AddFriendForm, SplitBillForm};
use crate::ledger::Ledger;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// Terminal was resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub ledger: Ledger,

    /// Highlighted row in the friend list.
    pub cursor: usize,

    /// Which widget receives typed input.
    pub focus: Focus,

    pub add_form: AddFriendForm,

    /// Recreated whenever the selection changes.
    pub split_form: SplitBillForm,

    /// Validation message shown as a modal until dismissed.
    pub notice: Option<String>,

    pub should_quit: bool,
}

// ============================================================================
// FOCUS
// ============================================================================

/// The widget that owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Friends,
    AddName,
    AddImage,
    SplitBill,
    SplitPaid,
    SplitPayer,
}

impl Focus {
    /// True for fields that accept free text.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Focus::AddName | Focus::AddImage | Focus::SplitBill | Focus::SplitPaid
        )
    }

    pub fn in_add_form(self) -> bool {
        matches!(self, Focus::AddName | Focus::AddImage)
    }

    pub fn in_split_form(self) -> bool {
        matches!(self, Focus::SplitBill | Focus::SplitPaid | Focus::SplitPayer)
    }
}

/// How keys should be interpreted right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// A notice is up; only dismissal keys matter.
    Notice,
    /// Navigating the friend list.
    List,
    /// Typing into a text field.
    Text,
    /// On the payer selector.
    Choice,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Select or deselect the friend under the cursor.
    ToggleSelect,
    /// Open or close the add-friend form.
    ToggleAddForm,
    NextField,
    PrevField,
    /// Append a character to the focused text field.
    Input(char),
    Backspace,
    TogglePayer,
    /// Submit the focused form, or dismiss a notice.
    Submit,
    /// Return focus to the list, or dismiss a notice.
    Back,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Redraw and keep going.
    Render,
    Quit,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Create an App over `ledger`, focused on the friend list.
    pub fn new(ledger: Ledger, default_image: &str) -> Self {
        App {
            ledger,
            cursor: 0,
            focus: Focus::Friends,
            add_form: AddFriendForm::new(default_image),
            split_form: SplitBillForm::default(),
            notice: None,
            should_quit: false,
        }
    }

    pub fn key_context(&self) -> KeyContext {
        if self.notice.is_some() {
            KeyContext::Notice
        } else if self.focus.is_text() {
            KeyContext::Text
        } else if self.focus == Focus::SplitPayer {
            KeyContext::Choice
        } else {
            KeyContext::List
        }
    }

    /// Focus stops reachable with Tab, in order. Only open panels count.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Friends];
        if self.ledger.is_add_form_open() {
            order.extend([Focus::AddName, Focus::AddImage]);
        }
        if self.ledger.selected_friend().is_some() {
            order.extend([Focus::SplitBill, Focus::SplitPaid, Focus::SplitPayer]);
        }
        order
    }
}

// ============================================================================
// TESTS
// ============================================================================
