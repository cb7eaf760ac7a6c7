//! Screens of the sign-in flow

pub mod login;
pub mod otp_verification;
pub mod register;
