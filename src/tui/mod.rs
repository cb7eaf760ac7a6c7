//! Terminal user interface for the sign-in flow
//!
//! Three screens bound to one navigation stack: login (phone entry with
//! a confirmation dialog), passcode verification, and registration.

pub mod app;
pub mod components;
pub mod events;
pub mod screens;
pub mod ui;

pub use app::App;
pub use events::AppEvent;

pub use screens::{
    login::LoginScreen, otp_verification::OtpVerificationScreen, register::RegisterScreen,
};
