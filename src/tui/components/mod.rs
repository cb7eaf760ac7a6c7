//! Reusable TUI components

pub mod dialog;

pub use dialog::{ConfirmDialog, DialogOutcome};
