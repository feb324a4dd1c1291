//! totp-view: browse TOTP entries and their rotating codes in the terminal.

pub mod clipboard;
pub mod store;
pub mod totp;
pub mod tui;
pub mod types;

/// Name shown in the header and used for log paths.
pub const APP_NAME: &str = "totp-view";
