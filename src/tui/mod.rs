//! TUI module for the interactive session.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Screen, Action, Transition)
//! - `update`: Pure transitions and tick handling
//! - `view`: Pure rendering
//! - `theme`: Style constants
//! - `run`: Effects (terminal, clock, clipboard, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::{SessionError, run};
pub use state::App;
