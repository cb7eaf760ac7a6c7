//! Application events produced outside the key-handling path

use crate::auth::{AuthError, OtpResponse};

/// Completions of background work, drained by the main loop between
/// terminal events.
#[derive(Debug)]
pub enum AppEvent {
    /// The one-time passcode request for `phone` resolved
    OtpRequestFinished {
        phone: String,
        outcome: Result<OtpResponse, AuthError>,
    },
}
