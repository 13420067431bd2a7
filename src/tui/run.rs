//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! A key reader thread feeds an mpsc channel; the event loop consumes
//! one event at a time, so every transition runs to completion before
//! the next key is looked at.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use super::state::{Action, App, AppEvent, KeyContext, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// The same key means different things on the list and in a text field
/// (`q` quits from the list but is just a letter in a name), so the
/// caller passes the current context. Returns None for unmapped keys.
pub fn map_key(key: KeyEvent, context: KeyContext) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match context {
        KeyContext::Notice => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Back),
            _ => None,
        },
        KeyContext::List => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleSelect),
            KeyCode::Char('a') => Some(Action::ToggleAddForm),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::BackTab => Some(Action::PrevField),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        KeyContext::Text => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::BackTab => Some(Action::PrevField),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        KeyContext::Choice => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => Some(Action::TogglePayer),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::BackTab => Some(Action::PrevField),
            _ => None,
        },
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Forward key presses and resizes to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let app_event = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
pub fn run(mut app: App) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    info!(friends = app.ledger.len(), "tui started");

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);

    loop {
        terminal.draw(|frame| render(&app, frame))?;

        if app.should_quit {
            break;
        }

        // Block on next event; all senders dropped means stdin is gone
        let Ok(event) = rx.recv() else {
            break;
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key, app.key_context()) {
                    debug!(?action, "key");
                    if update(&mut app, &action) == Transition::Quit {
                        app.should_quit = true;
                    }
                }
            }
            AppEvent::Resize => {}
        }
    }

    restore_terminal()?;
    info!("tui stopped");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits_in_every_context() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for ctx in [KeyContext::Notice, KeyContext::List, KeyContext::Text, KeyContext::Choice] {
            assert_eq!(map_key(ctrl_c, ctx), Some(Action::Quit));
        }
    }

    #[test]
    fn vim_keys_move_on_list() {
        assert_eq!(map_key(key(KeyCode::Char('j')), KeyContext::List), Some(Action::MoveDown));
        assert_eq!(map_key(key(KeyCode::Char('k')), KeyContext::List), Some(Action::MoveUp));
        assert_eq!(map_key(key(KeyCode::Down), KeyContext::List), Some(Action::MoveDown));
    }

    #[test]
    fn letters_are_input_in_text_fields() {
        assert_eq!(map_key(key(KeyCode::Char('q')), KeyContext::Text), Some(Action::Input('q')));
        assert_eq!(map_key(key(KeyCode::Char('a')), KeyContext::Text), Some(Action::Input('a')));
        assert_eq!(map_key(key(KeyCode::Char('q')), KeyContext::List), Some(Action::Quit));
        assert_eq!(
            map_key(key(KeyCode::Char('a')), KeyContext::List),
            Some(Action::ToggleAddForm)
        );
    }

    #[test]
    fn enter_selects_on_list_and_submits_in_forms() {
        assert_eq!(map_key(key(KeyCode::Enter), KeyContext::List), Some(Action::ToggleSelect));
        assert_eq!(map_key(key(KeyCode::Enter), KeyContext::Text), Some(Action::Submit));
        assert_eq!(map_key(key(KeyCode::Enter), KeyContext::Choice), Some(Action::Submit));
    }

    #[test]
    fn arrows_toggle_payer_on_choice() {
        assert_eq!(map_key(key(KeyCode::Left), KeyContext::Choice), Some(Action::TogglePayer));
        assert_eq!(map_key(key(KeyCode::Right), KeyContext::Choice), Some(Action::TogglePayer));
    }

    #[test]
    fn notice_only_accepts_dismissal() {
        assert_eq!(map_key(key(KeyCode::Esc), KeyContext::Notice), Some(Action::Back));
        assert_eq!(map_key(key(KeyCode::Enter), KeyContext::Notice), Some(Action::Submit));
        assert_eq!(map_key(key(KeyCode::Char('j')), KeyContext::Notice), None);
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(key(KeyCode::Char('z')), KeyContext::List), None);
    }
}
