//! Error types.
//!
//! Every failure in this crate is a rejected user input or a bad config
//! file. None of them leave the ledger partially mutated.

use std::path::PathBuf;

use crate::types::FriendId;

/// A form submission that cannot be applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("{field} must be a non-negative number, got {input:?}")]
    InvalidAmount { field: &'static str, input: String },

    #[error("Your expense ({paid}) cannot exceed the bill ({bill})")]
    PaidExceedsBill { paid: f64, bill: f64 },
}

/// A ledger operation that was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("No friend is selected")]
    NoSelection,

    #[error("Unknown friend: {0}")]
    UnknownFriend(FriendId),

    #[error("No friend named {0:?}")]
    NoFriendNamed(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

/// The config file could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate friend id in config: {0}")]
    DuplicateId(FriendId),
}
