//! Domain types for split-ledger.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Stable identity of a friend in the ledger.
///
/// Seeded friends may carry any string id; friends added at runtime get
/// a UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendId(pub String);

impl FriendId {
    /// Generate a fresh, unique id.
    pub fn generate() -> Self {
        FriendId(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FriendId {
    fn from(s: &str) -> Self {
        FriendId(s.to_string())
    }
}

// ============================================================================
// ENUMS
// ============================================================================

/// Who paid the bill total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    /// The person running the ledger.
    #[default]
    User,
    /// The currently selected friend.
    Friend,
}

impl Payer {
    /// The other party.
    pub fn toggled(self) -> Self {
        match self {
            Payer::User => Payer::Friend,
            Payer::Friend => Payer::User,
        }
    }
}

/// Debt direction between the user and a friend, derived from the sign
/// of the balance. Amounts are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceStatus {
    /// The user owes the friend.
    Owe(f64),
    /// The friend owes the user.
    Owed(f64),
    /// Settled.
    Even,
}

// ============================================================================
// STRUCTS
// ============================================================================

/// A friend and their running balance with the user.
///
/// `balance > 0`: the friend owes the user. `balance < 0`: the user owes
/// the friend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    /// Avatar URL.
    pub image: String,
    #[serde(default)]
    pub balance: f64,
}

impl Friend {
    pub fn new(id: FriendId, name: impl Into<String>, image: impl Into<String>, balance: f64) -> Self {
        Friend {
            id,
            name: name.into(),
            image: image.into(),
            balance,
        }
    }

    pub fn status(&self) -> BalanceStatus {
        if self.balance < 0.0 {
            BalanceStatus::Owe(self.balance.abs())
        } else if self.balance > 0.0 {
            BalanceStatus::Owed(self.balance)
        } else {
            BalanceStatus::Even
        }
    }

    /// Human sentence describing the balance, e.g. "You owe Clark 7$".
    pub fn balance_message(&self) -> String {
        match self.status() {
            BalanceStatus::Owe(amount) => format!("You owe {} {}$", self.name, amount),
            BalanceStatus::Owed(amount) => format!("{} owes you {}$", self.name, amount),
            BalanceStatus::Even => format!("You and {} are even", self.name),
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for non-interactive reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
