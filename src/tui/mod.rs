//! TUI module for the interactive terminal interface.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: model and action types
//! - `update`: transitions
//! - `view`: pure rendering
//! - `run`: effects (terminal, key reader, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
pub use state::App;
