//! State transitions: apply an Action to the App in place and report
//! whether to keep rendering or quit.
//!
//! Fully testable without a terminal. All ledger mutation happens here,
//! through the ledger's own operations. Actions that do not apply to the
//! current focus are no-ops.

use tracing::debug;

use crate::form::SplitBillForm;

use super::state::{Action, App, Focus, Transition};

/// Apply one action to the app.
pub fn update(app: &mut App, action: &Action) -> Transition {
    if app.notice.is_some() {
        return update_notice(app, action);
    }

    let before = app.ledger.selected_friend_id().cloned();

    let transition = match action {
        Action::Quit => Transition::Quit,
        Action::MoveUp => {
            app.cursor = app.cursor.saturating_sub(1);
            Transition::Render
        }
        Action::MoveDown => {
            let len = app.ledger.len();
            app.cursor = if len == 0 { 0 } else { (app.cursor + 1).min(len - 1) };
            Transition::Render
        }
        Action::ToggleSelect => {
            toggle_select(app);
            Transition::Render
        }
        Action::ToggleAddForm => {
            app.ledger.toggle_add_friend_form();
            if app.ledger.is_add_form_open() {
                app.focus = Focus::AddName;
            }
            Transition::Render
        }
        Action::NextField => {
            cycle_focus(app, 1);
            Transition::Render
        }
        Action::PrevField => {
            cycle_focus(app, -1);
            Transition::Render
        }
        Action::Input(c) => {
            edit_focused(app, |text| text.push(*c));
            Transition::Render
        }
        Action::Backspace => {
            edit_focused(app, |text| {
                text.pop();
            });
            Transition::Render
        }
        Action::TogglePayer => {
            if app.focus == Focus::SplitPayer {
                app.split_form.toggle_payer();
            }
            Transition::Render
        }
        Action::Submit => {
            submit_focused(app);
            Transition::Render
        }
        Action::Back => {
            app.focus = Focus::Friends;
            Transition::Render
        }
    };

    if app.ledger.selected_friend_id() != before.as_ref() {
        app.split_form = SplitBillForm::default();
    }
    normalize_focus(app);
    transition
}

// ============================================================================
// HANDLERS
// ============================================================================

/// A notice blocks everything except dismissal and Ctrl-C.
fn update_notice(app: &mut App, action: &Action) -> Transition {
    match action {
        Action::Submit | Action::Back => {
            app.notice = None;
            Transition::Render
        }
        Action::Quit => Transition::Quit,
        _ => Transition::Render,
    }
}

fn toggle_select(app: &mut App) {
    let Some(id) = app.ledger.friends().get(app.cursor).map(|f| f.id.clone()) else {
        return;
    };
    if let Err(e) = app.ledger.select_friend(&id) {
        app.notice = Some(e.to_string());
    }
}

fn cycle_focus(app: &mut App, step: isize) {
    let order = app.focus_order();
    let len = order.len() as isize;
    let pos = order.iter().position(|f| *f == app.focus).unwrap_or(0) as isize;
    app.focus = order[(pos + step).rem_euclid(len) as usize];
}

/// Run `edit` against a copy of the focused field and write it back
/// through the form's setter, so the expense clamp applies per keystroke.
fn edit_focused(app: &mut App, edit: impl FnOnce(&mut String)) {
    match app.focus {
        Focus::AddName => edit(&mut app.add_form.name),
        Focus::AddImage => edit(&mut app.add_form.image),
        Focus::SplitBill => {
            let mut text = app.split_form.bill_value().to_string();
            edit(&mut text);
            app.split_form.set_bill_value(text);
        }
        Focus::SplitPaid => {
            let mut text = app.split_form.paid_by_user().to_string();
            edit(&mut text);
            if !app.split_form.set_paid_by_user(text) {
                debug!("expense input above bill ignored");
            }
        }
        Focus::Friends | Focus::SplitPayer => {}
    }
}

fn submit_focused(app: &mut App) {
    if app.focus.in_add_form() {
        match app.add_form.submit(&mut app.ledger) {
            Ok(_) => app.focus = Focus::Friends,
            Err(e) => app.notice = Some(e.to_string()),
        }
    } else if app.focus.in_split_form() {
        if let Err(e) = app.split_form.submit(&mut app.ledger) {
            app.notice = Some(e.to_string());
        }
    }
}

/// Keep focus and cursor pointing at things that are on screen.
fn normalize_focus(app: &mut App) {
    if !app.focus_order().contains(&app.focus) {
        app.focus = Focus::Friends;
    }
    if app.cursor >= app.ledger.len() {
        app.cursor = app.ledger.len().saturating_sub(1);
    }
}

// ============================================================================
// TESTS
// ============================================================================
