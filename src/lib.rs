//! split-ledger: split bills with friends and track who owes whom.

pub mod config;
pub mod error;
pub mod form;
pub mod ledger;
pub mod report;
pub mod tui;
pub mod types;
