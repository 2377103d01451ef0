//! Outbound email dispatch through the notification relay service
//!
//! The relay is a separate microservice; we POST one message at a time
//! and authenticate with its API key. Callers treat dispatch as
//! best-effort: failures are logged at the call site, never surfaced
//! to the client.

use crate::config::NotificationConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// One email handed to the relay.
#[derive(Debug, Clone, Serialize)]
pub struct EmailPayload {
    pub subject: String,
    pub message: String,
    pub recipients: Vec<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send_email(&self, payload: &EmailPayload) -> Result<()>;
}

/// HTTP client for the email relay service
#[derive(Clone)]
pub struct EmailRelayClient {
    config: NotificationConfig,
    http_client: Client,
}

impl EmailRelayClient {
    pub fn new(config: NotificationConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl NotificationDispatcher for EmailRelayClient {
    async fn send_email(&self, payload: &EmailPayload) -> Result<()> {
        let url = format!(
            "{}/api/send-single-email/",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Api-Key {}", self.config.api_key),
            )
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::NotificationDispatch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::NotificationDispatch(format!(
                "Relay returned {} for '{}'",
                response.status(),
                payload.subject
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn relay_client(base_url: String) -> EmailRelayClient {
        EmailRelayClient::new(NotificationConfig {
            base_url,
            api_key: "relay-key".to_string(),
        })
    }

    #[tokio::test]
    async fn test_send_email_posts_expected_contract() {
        let server = MockServer::start().await;
        let payload = EmailPayload {
            subject: "You have been invited".to_string(),
            message: "Follow the link to join".to_string(),
            recipients: vec!["invitee@example.com".to_string()],
        };

        Mock::given(method("POST"))
            .and(path("/api/send-single-email/"))
            .and(header("Authorization", "Api-Key relay-key"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = relay_client(server.uri());
        client.send_email(&payload).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_email_relay_error_is_dispatch_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/send-single-email/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = relay_client(server.uri());
        let payload = EmailPayload {
            subject: "Welcome".to_string(),
            message: "Your account is ready".to_string(),
            recipients: vec!["employee@example.com".to_string()],
        };

        let err = client.send_email(&payload).await.unwrap_err();
        assert!(matches!(err, AppError::NotificationDispatch(_)));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_tolerated() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/send-single-email/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = relay_client(format!("{}/", server.uri()));
        let payload = EmailPayload {
            subject: "Test".to_string(),
            message: "Test".to_string(),
            recipients: vec!["a@example.com".to_string()],
        };
        client.send_email(&payload).await.unwrap();
    }
}
