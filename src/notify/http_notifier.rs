use crate::config::NotifyConfig;
use crate::error::{NotifyError, NotifyResult};
use crate::notify::{ConfirmationEmail, Notifier};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Request body accepted by the mail API's `/send` endpoint.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
}

/// Confirmation sender backed by an HTTP mail API.
///
/// Requests are synchronous `ureq` calls; the [`Notifier`] implementation
/// runs them on the blocking thread pool.
#[derive(Clone)]
pub struct HttpNotifier {
    /// Mail API base URL
    base_url: String,

    /// API key, sent as a bearer token
    api_key: String,

    /// Sender address
    sender: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl HttpNotifier {
    /// Create a notifier from configuration.
    pub fn new(config: &NotifyConfig, timeout_secs: u64) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();

        Self {
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            sender: config.sender.clone(),
            agent: Arc::new(agent),
        }
    }

    /// Create a notifier with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let config = NotifyConfig {
            api_url: base_url,
            api_key,
            sender: "no-reply@localhost".to_string(),
        };
        Self::new(&config, 10)
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Send a confirmation, blocking the current thread.
    pub fn send_blocking(&self, email: &ConfirmationEmail) -> NotifyResult<()> {
        let url = self.build_url("/send");
        let body = serde_json::to_value(SendRequest {
            from: &self.sender,
            to: &email.to,
            subject: &email.subject,
            text: &email.text,
        })?;

        tracing::debug!("POST {} ({} recipients)", url, email.to.len());

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(map_error)?;

        tracing::debug!("POST {} - Success (status: {})", url, response.status());
        Ok(())
    }
}

/// Map a ureq error to a NotifyError.
fn map_error(error: ureq::Error) -> NotifyError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 | 403 => NotifyError::Unauthorized,
                429 => NotifyError::RateLimited,
                _ => NotifyError::Api {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => NotifyError::Http(transport.to_string()),
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, email: &ConfirmationEmail) -> NotifyResult<()> {
        let notifier = self.clone();
        let email = email.clone();

        tokio::task::spawn_blocking(move || notifier.send_blocking(&email))
            .await
            .map_err(|e| NotifyError::Http(format!("Task join error: {}", e)))?
    }
}
