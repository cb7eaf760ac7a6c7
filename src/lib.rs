//! otpgate: terminal client for phone-number sign-in.
//!
//! The flow is the entry point of a phone-based service: enter a phone
//! number, confirm it in a dialog, request a one-time passcode, then
//! continue to passcode verification (existing account) or registration
//! (new account).

pub mod auth;
pub mod config;
pub mod i18n;
pub mod theme;
pub mod tui;
