//! Confirmation emails for accepted registrations.
//!
//! The [`Notifier`] trait is the seam the registration service talks to;
//! [`HttpNotifier`] delivers through a JSON mail API using `ureq`, moved off
//! the async runtime with `tokio::task::spawn_blocking`.

mod http_notifier;

pub use http_notifier::HttpNotifier;

use crate::domain::FIELD_SEPARATOR;
use crate::error::NotifyResult;
use async_trait::async_trait;
use serde::Serialize;

/// Subject line of every confirmation email.
pub const CONFIRMATION_SUBJECT: &str =
    "[This is an auto email, no-reply] Confirmation of your submission";

/// A confirmation message ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationEmail {
    /// Recipient addresses
    pub to: Vec<String>,

    /// Subject line
    pub subject: String,

    /// Plain-text body
    pub text: String,
}

impl ConfirmationEmail {
    /// Build the confirmation for a registrant.
    ///
    /// `email` is the cleaned email field; when it holds several addresses
    /// joined by `" - "`, each one becomes a recipient.
    pub fn for_registrant(name: &str, email: &str) -> Self {
        let to = email
            .split(FIELD_SEPARATOR)
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            to,
            subject: CONFIRMATION_SUBJECT.to_string(),
            text: format!(
                "Hi {}. Thank you so much for your submission! We appreciate your interest. \
                 More information will be provided shortly.",
                name
            ),
        }
    }
}

/// Sends confirmation emails.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one confirmation. No retries are attempted.
    async fn send(&self, email: &ConfirmationEmail) -> NotifyResult<()>;
}
