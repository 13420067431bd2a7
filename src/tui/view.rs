//! Pure rendering: map App state to ratatui widget trees.
//!
//! Three stateless projections build the panels (friend list, add-friend
//! form, split-bill form). `render()` lays them out in two panes and
//! overlays the notice when one is pending.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::form::{AddFriendForm, SplitBillForm};
use crate::ledger::Ledger;
use crate::types::{BalanceStatus, Friend, Payer};

use super::state::{App, Focus};
use super::theme;

/// Each friend occupies this many lines in the list.
const ROW_HEIGHT: usize = 3;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole app to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // panes
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(), chunks[0]);
    frame.render_widget(render_help(app), chunks[2]);

    let panes = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_sidebar(app, frame, panes[0]);

    match app.ledger.selected_friend() {
        Some(friend) => {
            let form = split_bill_form(friend, &app.split_form, app.focus);
            frame.render_widget(form, panes[1]);
        }
        None => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "  Select a friend to split a bill",
                theme::STYLE_DIM,
            )));
            frame.render_widget(hint, panes[1]);
        }
    }

    if let Some(notice) = &app.notice {
        render_notice(notice, frame, area);
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title() -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled("split-ledger", theme::STYLE_TITLE)))
}

/// Help line showing the keybindings that apply to the current focus.
fn render_help(app: &App) -> Paragraph<'static> {
    let help_text = if app.notice.is_some() {
        "[Enter/Esc] dismiss"
    } else {
        match app.focus {
            Focus::Friends => "[j/k] move  [Enter] select  [a] add friend  [Tab] next  [q] quit",
            Focus::SplitPayer => "[←/→] change payer  [Enter] split  [Tab] next  [Esc] list",
            _ => "type to edit  [Enter] submit  [Tab] next  [Esc] list",
        }
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// Left pane: friend list, optional add form, toggle button.
fn render_sidebar(app: &App, frame: &mut Frame, area: Rect) {
    let form_height = if app.ledger.is_add_form_open() { 4 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(form_height),
        Constraint::Length(1),
    ])
    .split(area);

    let list_area = chunks[0];
    let visible_rows = (list_area.height as usize / ROW_HEIGHT).max(1);
    let scroll_offset = if app.cursor >= visible_rows {
        (app.cursor - visible_rows + 1) * ROW_HEIGHT
    } else {
        0
    };
    let list = friend_list(&app.ledger, app.cursor, app.focus == Focus::Friends)
        .scroll((u16::try_from(scroll_offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(list, list_area);

    if app.ledger.is_add_form_open() {
        frame.render_widget(add_friend_form(&app.add_form, app.focus), chunks[1]);
    }

    let label = if app.ledger.is_add_form_open() { "Close" } else { "Add Friend" };
    let button = Paragraph::new(Line::from(vec![
        Span::styled("  [a] ", theme::STYLE_INTERACTIVE),
        Span::styled(label, theme::STYLE_IMPORTANT),
    ]));
    frame.render_widget(button, chunks[2]);
}

fn render_notice(message: &str, frame: &mut Frame, area: Rect) {
    let width = u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6)
        .min(area.width);
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let body = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), theme::STYLE_OWE)),
        Line::from(""),
        Line::from(Span::styled("[Enter] OK", theme::STYLE_INTERACTIVE)),
    ])
    .block(Block::bordered().title(" Notice ").border_style(theme::STYLE_OWE))
    .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(body, popup);
}

// ============================================================================
// PROJECTION: FRIEND LIST
// ============================================================================

/// One row per friend: name with a select/close button, the balance
/// message, and the avatar URL.
pub fn friend_list(ledger: &Ledger, cursor: usize, focused: bool) -> Paragraph<'static> {
    let selected = ledger.selected_friend_id();
    let mut lines: Vec<Line> = Vec::with_capacity(ledger.len() * ROW_HEIGHT);

    for (i, friend) in ledger.friends().iter().enumerate() {
        let is_selected = selected == Some(&friend.id);
        let button = if is_selected { "[Close]" } else { "[Select]" };

        let name_line = Line::from(vec![
            Span::raw("  "),
            Span::styled(friend.name.clone(), theme::STYLE_IMPORTANT),
            Span::raw("  "),
            Span::styled(button, theme::STYLE_INTERACTIVE),
        ]);
        let name_line = if focused && i == cursor {
            name_line.style(theme::STYLE_CURSOR)
        } else if is_selected {
            name_line.style(theme::STYLE_SELECTED)
        } else {
            name_line
        };

        lines.push(name_line);
        lines.push(Line::from(Span::styled(
            format!("    {}", friend.balance_message()),
            balance_style(friend),
        )));
        lines.push(Line::from(Span::styled(
            format!("    {}", friend.image),
            theme::STYLE_DIM,
        )));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("  No friends yet", theme::STYLE_DIM)));
    }

    Paragraph::new(lines)
}

fn balance_style(friend: &Friend) -> Style {
    match friend.status() {
        BalanceStatus::Owe(_) => theme::STYLE_OWE,
        BalanceStatus::Owed(_) => theme::STYLE_OWED,
        BalanceStatus::Even => theme::STYLE_EVEN,
    }
}

// ============================================================================
// PROJECTION: ADD FRIEND FORM
// ============================================================================

pub fn add_friend_form(form: &AddFriendForm, focus: Focus) -> Paragraph<'static> {
    let lines = vec![
        field_line("Friend name", &form.name, "Enter name", focus == Focus::AddName),
        field_line("Image URL", &form.image, "", focus == Focus::AddImage),
    ];
    Paragraph::new(lines).block(panel_block(" Add friend ", focus.in_add_form()))
}

// ============================================================================
// PROJECTION: SPLIT BILL FORM
// ============================================================================

pub fn split_bill_form(friend: &Friend, form: &SplitBillForm, focus: Focus) -> Paragraph<'static> {
    let friend_expense = form
        .friend_expense()
        .map(|v| v.to_string())
        .unwrap_or_default();

    let payer = match form.payer() {
        Payer::User => "You".to_string(),
        Payer::Friend => friend.name.clone(),
    };
    let payer_style = if focus == Focus::SplitPayer {
        theme::STYLE_FIELD_FOCUSED
    } else {
        Style::new()
    };

    let lines = vec![
        Line::from(""),
        field_line("Bill value", form.bill_value(), "0", focus == Focus::SplitBill),
        field_line("Your expense", form.paid_by_user(), "0", focus == Focus::SplitPaid),
        Line::from(vec![
            Span::raw(format!("  {:<22}", format!("{}'s expense", friend.name))),
            Span::styled(
                if friend_expense.is_empty() { "0".to_string() } else { friend_expense },
                theme::STYLE_FIELD_DISABLED,
            ),
        ]),
        Line::from(vec![
            Span::raw(format!("  {:<22}", "Who is paying the bill?")),
            Span::styled(format!("< {} >", payer), payer_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [Enter] ", theme::STYLE_INTERACTIVE),
            Span::styled("Split bill", theme::STYLE_IMPORTANT),
        ]),
    ];

    let title = format!(" Split a bill with {} ", friend.name);
    Paragraph::new(lines).block(panel_block(title, focus.in_split_form()))
}

// ============================================================================
// HELPERS
// ============================================================================

fn panel_block(title: impl Into<Line<'static>>, focused: bool) -> Block<'static> {
    let block = Block::bordered().title(title);
    if focused {
        block.border_style(theme::STYLE_BORDER_FOCUSED)
    } else {
        block
    }
}

/// `  Label             value▏`, with a dim placeholder when empty.
fn field_line(label: &str, value: &str, placeholder: &str, focused: bool) -> Line<'static> {
    let label = Span::raw(format!("  {:<22}", label));
    let value = if value.is_empty() {
        Span::styled(placeholder.to_string(), theme::STYLE_DIM)
    } else if focused {
        Span::styled(value.to_string(), theme::STYLE_FIELD_FOCUSED)
    } else {
        Span::raw(value.to_string())
    };

    let mut spans = vec![label, value];
    if focused {
        spans.push(Span::styled("▏", theme::STYLE_FIELD_FOCUSED));
    }
    Line::from(spans)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FriendId;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(100, 24);
        Terminal::new(backend).unwrap()
    }

    fn app() -> App {
        App::new(Ledger::with_sample_friends(), "https://i.pravatar.cc/48")
    }

    fn rendered(app: &App) -> String {
        let mut terminal = make_terminal();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn idle_screen_shows_friends_and_balances() {
        let content = rendered(&app());
        assert!(content.contains("Clark"));
        assert!(content.contains("You owe Clark 7$"));
        assert!(content.contains("Sarah owes you 20$"));
        assert!(content.contains("You and Anthony are even"));
        assert!(content.contains("Add Friend"));
        assert!(content.contains("Select a friend"));
    }

    #[test]
    fn selected_friend_shows_split_form_and_close_button() {
        let mut app = app();
        app.ledger.select_friend(&FriendId::from("933372")).unwrap();
        let content = rendered(&app);

        assert!(content.contains("Split a bill with Sarah"));
        assert!(content.contains("Sarah's expense"));
        assert!(content.contains("[Close]"));
        assert!(content.contains("< You >"));
    }

    #[test]
    fn split_form_shows_derived_friend_expense() {
        let mut app = app();
        app.ledger.select_friend(&FriendId::from("933372")).unwrap();
        app.split_form.set_bill_value("100");
        app.split_form.set_paid_by_user("40");
        app.split_form.set_payer(Payer::Friend);
        let content = rendered(&app);

        assert!(content.contains("60"));
        assert!(content.contains("< Sarah >"));
    }

    #[test]
    fn add_form_renders_with_default_image() {
        let mut app = app();
        app.ledger.toggle_add_friend_form();
        app.focus = Focus::AddName;
        let content = rendered(&app);

        assert!(content.contains("Add friend"));
        assert!(content.contains("Enter name"));
        assert!(content.contains("https://i.pravatar.cc/48"));
        assert!(content.contains("Close"));
    }

    #[test]
    fn both_panels_render_when_adding_over_selection() {
        let mut app = app();
        app.ledger.select_friend(&FriendId::from("118836")).unwrap();
        app.ledger.toggle_add_friend_form();
        let content = rendered(&app);

        assert!(content.contains("Add friend"));
        assert!(content.contains("Split a bill with Clark"));
    }

    #[test]
    fn notice_overlays_message() {
        let mut app = app();
        app.notice = Some("Please fill in all fields".into());
        let content = rendered(&app);
        assert!(content.contains("Please fill in all fields"));
        assert!(content.contains("dismiss"));
    }

    #[test]
    fn notice_wider_than_terminal_is_clipped() {
        let mut app = app();
        app.notice = Some("x".repeat(70_000));
        let content = rendered(&app);
        assert!(content.contains("Notice"));
    }

    #[test]
    fn empty_ledger_renders() {
        let app = App::new(Ledger::default(), "https://i.pravatar.cc/48");
        assert!(rendered(&app).contains("No friends yet"));
    }

    #[test]
    fn long_list_scrolls_to_cursor() {
        let mut ledger = Ledger::default();
        for i in 0..20 {
            ledger.add_friend(&format!("Friend{:02}", i), "https://x/48").unwrap();
        }
        let mut app = App::new(ledger, "https://x/48");
        app.cursor = 19;
        assert!(rendered(&app).contains("Friend19"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        let mut app = app();
        app.notice = Some("Please fill in all fields".into());
        terminal
            .draw(|frame| render(&app, frame))
            .expect("render should not panic");
    }
}
