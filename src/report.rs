//! Report formatting for a ledger snapshot.
//!
//! Pure functions: (Ledger, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::ledger::Ledger;
use crate::types::{BalanceStatus, Friend, FriendId, OutputFormat};

/// Format a ledger for output.
pub fn format_ledger(ledger: &Ledger, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Human => Ok(format_human(ledger)),
        OutputFormat::Json => format_json(ledger),
    }
}

/// Sum of what friends owe the user and what the user owes friends.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub owed_to_you: f64,
    pub you_owe: f64,
}

impl Totals {
    pub fn of(friends: &[Friend]) -> Totals {
        friends.iter().fold(Totals::default(), |mut t, f| {
            match f.status() {
                BalanceStatus::Owed(amount) => t.owed_to_you += amount,
                BalanceStatus::Owe(amount) => t.you_owe += amount,
                BalanceStatus::Even => {}
            }
            t
        })
    }

    pub fn net(&self) -> f64 {
        self.owed_to_you - self.you_owe
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(ledger: &Ledger) -> String {
    let mut out = String::new();
    let selected = ledger.selected_friend_id();

    out.push_str("=== Friends ===\n");
    if ledger.is_empty() {
        out.push_str("  (no friends yet)\n");
    }
    for friend in ledger.friends() {
        let marker = if selected == Some(&friend.id) { '>' } else { ' ' };
        out.push_str(&format!(
            "{} {:<12} {}\n",
            marker,
            friend.name,
            friend.balance_message()
        ));
    }
    out.push('\n');

    let totals = Totals::of(ledger.friends());
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Friends:      {}\n", ledger.len()));
    out.push_str(&format!("Owed to you:  {}$\n", totals.owed_to_you));
    out.push_str(&format!("You owe:      {}$\n", totals.you_owe));
    out.push_str(&format!("Net:          {}$\n", totals.net()));

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct JsonLedger<'a> {
    friends: &'a [Friend],
    selected: Option<&'a FriendId>,
    totals: Totals,
}

fn format_json(ledger: &Ledger) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonLedger {
        friends: ledger.friends(),
        selected: ledger.selected_friend_id(),
        totals: Totals::of(ledger.friends()),
    })
}

// ============================================================================
// TESTS
// ============================================================================
