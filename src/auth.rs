//! Authentication service client
//!
//! The backend is opaque: submit a phone number, receive a status flag.
//! Everything else (passcode generation, sessions, tokens) lives behind
//! the service and is not modeled here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Authentication client errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication service error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

/// Request body for the passcode endpoint
#[derive(Debug, Serialize)]
struct OtpRequest<'a> {
    phone: &'a str,
}

/// Wire response of the passcode endpoint.
///
/// The live service replies `{ "status": true }` for accounts it knows
/// and anything else (false, absent, extra fields) for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OtpResponse {
    #[serde(default)]
    pub status: Option<bool>,
}

/// Where a passcode request sends the user next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpRoute {
    /// Account exists, go verify the passcode
    Verify,
    /// Unknown account, go register
    Register,
}

impl OtpResponse {
    /// Routing decision for a resolved response. Only an explicit
    /// `status: true` counts as an existing account.
    pub fn route(&self) -> OtpRoute {
        match self.status {
            Some(true) => OtpRoute::Verify,
            Some(false) | None => OtpRoute::Register,
        }
    }
}

/// Capability interface to the authentication service
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Ask the service to send a one-time passcode to `phone` (digits only)
    async fn request_otp(&self, phone: &str) -> Result<OtpResponse, AuthError>;
}

/// HTTP implementation of [`AuthClient`]
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
}

impl HttpAuthClient {
    /// Build a client from application configuration
    pub fn new(config: &Config) -> Result<Self, AuthError> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn request_otp(&self, phone: &str) -> Result<OtpResponse, AuthError> {
        let url = otp_endpoint(&self.base_url);
        debug!("requesting one-time passcode via {}", url);

        let response = self
            .client
            .post(&url)
            .json(&OtpRequest { phone })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<OtpResponse>().await?)
    }
}

/// Passcode endpoint for a service base URL
fn otp_endpoint(base_url: &str) -> String {
    format!("{}/auth/otp", base_url.trim_end_matches('/'))
}
