//! Charge-processor client (Stripe-compatible payment intents API).
//!
//! The backend only ever creates an unconfirmed charge intent; confirmation
//! and capture happen client-side with the returned secret.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ChargeConfig;

/// Errors that can occur when talking to the charge processor.
#[derive(Debug, Error)]
pub enum ChargeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Processor returned an error response.
    #[error("charge API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client or parse a response.
    #[error("charge client error: {0}")]
    Parse(String),
}

/// An unconfirmed charge intent returned by the processor.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeIntent {
    /// Processor-side intent id.
    pub id: String,
    /// Client-usable secret for completing the charge.
    pub client_secret: String,
}

/// Client for the charge-authorization API.
#[derive(Clone)]
pub struct ChargeClient {
    client: reqwest::Client,
    api_base: String,
    currency: String,
}

impl ChargeClient {
    /// Create a new charge client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ChargeConfig) -> Result<Self, ChargeError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| ChargeError::Parse(format!("invalid secret key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_owned(),
            currency: config.currency.clone(),
        })
    }

    /// Request a card-payable intent for the given minor-unit amount in the
    /// configured currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the processor rejects it, or
    /// the response cannot be parsed.
    pub async fn create_card_intent(&self, amount_minor: i64) -> Result<ChargeIntent, ChargeError> {
        let url = format!("{}/payment_intents", self.api_base);
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", self.currency.clone()),
            ("payment_method_types[]", "card".to_owned()),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChargeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ChargeIntent>()
            .await
            .map_err(|e| ChargeError::Parse(e.to_string()))
    }
}
