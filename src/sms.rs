//! Outbound SMS client for the Africa's Talking messaging API.
//!
//! Used fire-and-forget: the command intake spawns a send and logs
//! failures without ever propagating them to the webhook response.

use reqwest::header::ACCEPT;
use reqwest::Client;
use thiserror::Error;

/// Africa's Talking bulk messaging endpoint.
pub const MESSAGING_URL: &str = "https://api.africastalking.com/version1/messaging";

/// Failures from the SMS gateway. Logged by callers, never surfaced.
#[derive(Debug, Error)]
pub enum SmsError {
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for sending text messages through Africa's Talking.
#[derive(Debug, Clone)]
pub struct SmsGateway {
    http_client: Client,
    username: String,
    api_key: String,
    base_url: String,
}

impl SmsGateway {
    pub fn new(username: String, api_key: String) -> Result<Self, SmsError> {
        Self::with_base_url(username, api_key, MESSAGING_URL.to_string())
    }

    /// Builds a gateway against a custom endpoint. Exists for tests.
    pub fn with_base_url(
        username: String,
        api_key: String,
        base_url: String,
    ) -> Result<Self, SmsError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http_client,
            username,
            api_key,
            base_url,
        })
    }

    /// Attempts to deliver `message` to the `to` phone number.
    pub async fn send(&self, to: &str, message: &str) -> Result<(), SmsError> {
        let params = [
            ("username", self.username.as_str()),
            ("to", to),
            ("message", message),
        ];

        let response = self
            .http_client
            .post(&self.base_url)
            .header("apiKey", &self.api_key)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(SmsError::Http {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(to, "sms dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_targets_messaging_endpoint() {
        let gateway = SmsGateway::new("sandbox".to_string(), "key".to_string()).unwrap();
        assert_eq!(gateway.base_url, MESSAGING_URL);
        assert!(gateway.base_url.contains("africastalking.com"));
        assert!(gateway.base_url.ends_with("/messaging"));
    }

    #[test]
    fn base_url_is_injectable() {
        let gateway = SmsGateway::with_base_url(
            "sandbox".to_string(),
            "key".to_string(),
            "http://127.0.0.1:9/messaging".to_string(),
        )
        .unwrap();
        assert_eq!(gateway.base_url, "http://127.0.0.1:9/messaging");
    }
}
