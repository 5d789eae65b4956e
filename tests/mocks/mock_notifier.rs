use async_trait::async_trait;
use event_registration::error::{NotifyError, NotifyResult};
use event_registration::notify::{ConfirmationEmail, Notifier};
use std::sync::{Arc, Mutex};

/// Mock notifier for testing.
///
/// Records every confirmation it is asked to send; can be configured to
/// fail instead.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<ConfirmationEmail>>>,
    failing: bool,
}

#[allow(dead_code)]
impl MockNotifier {
    /// Create a notifier that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that rejects every message.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Messages passed to `send`, including failed attempts.
    pub fn sent(&self) -> Vec<ConfirmationEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, email: &ConfirmationEmail) -> NotifyResult<()> {
        self.sent.lock().unwrap().push(email.clone());

        if self.failing {
            return Err(NotifyError::Http("mock delivery failure".to_string()));
        }
        Ok(())
    }
}
