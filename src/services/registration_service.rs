//! Registration service layer.
//!
//! Business logic for checking, storing and confirming registrations.

use crate::domain::{validate_record, Record, ValidationError};
use crate::error::RegistrationResult;
use crate::notify::{ConfirmationEmail, Notifier};
use crate::repositories::{dated_tab_title, RegistrationRepository};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// Result of validating a record without storing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// The record with phone and email cleaned
    pub record: Record,

    /// Problems found, empty when the record is valid
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Whether the record passed every check.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// What happened to a submitted registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Required fields were absent or blank; nothing was validated or stored.
    Incomplete { missing: Vec<&'static str> },

    /// Validation failed; nothing was stored.
    Rejected {
        record: Record,
        errors: Vec<ValidationError>,
    },

    /// The cleaned record was appended to `tab`.
    Accepted { record: Record, tab: String },
}

/// Registration service trait for business operations.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Clean and validate a record without storing it.
    fn validate(&self, record: Record) -> ValidationReport;

    /// Check, store and confirm a registration.
    ///
    /// Only storage failures are errors. Incomplete or invalid records are
    /// reported through [`SubmissionOutcome`], and a failed confirmation
    /// email is logged without affecting the outcome.
    async fn submit(&self, record: Record) -> RegistrationResult<SubmissionOutcome>;
}

/// Default implementation of RegistrationService.
pub struct RegistrationServiceImpl {
    repository: Arc<dyn RegistrationRepository>,
    notifier: Option<Arc<dyn Notifier>>,
    tab_prefix: String,
}

impl RegistrationServiceImpl {
    /// Create a new registration service.
    ///
    /// Pass `None` as the notifier to skip confirmation emails.
    pub fn new(
        repository: Arc<dyn RegistrationRepository>,
        notifier: Option<Arc<dyn Notifier>>,
        tab_prefix: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            notifier,
            tab_prefix: tab_prefix.into(),
        }
    }

    /// Submit a registration as if received on `date`.
    pub async fn submit_on(
        &self,
        record: Record,
        date: NaiveDate,
    ) -> RegistrationResult<SubmissionOutcome> {
        let missing = record.missing_fields();
        if !missing.is_empty() {
            tracing::info!("Registration incomplete, missing: {:?}", missing);
            return Ok(SubmissionOutcome::Incomplete { missing });
        }

        let ValidationReport { record, errors } = self.validate(record);
        if !errors.is_empty() {
            tracing::info!("Registration rejected with {} error(s)", errors.len());
            return Ok(SubmissionOutcome::Rejected { record, errors });
        }

        let tab = dated_tab_title(&self.tab_prefix, date);
        self.repository
            .open_or_create_tab(&tab)
            .await
            .map_err(|e| {
                tracing::error!("Failed to open worksheet {}: {}", tab, e);
                e
            })?;
        self.repository
            .append_row(&tab, record.to_row())
            .await
            .map_err(|e| {
                tracing::error!("Failed to append registration to {}: {}", tab, e);
                e
            })?;

        tracing::info!("Registration stored in {}", tab);

        if let Some(notifier) = &self.notifier {
            Self::send_confirmation(notifier.as_ref(), &record).await;
        }

        Ok(SubmissionOutcome::Accepted { record, tab })
    }

    async fn send_confirmation(notifier: &dyn Notifier, record: &Record) {
        let name = record.name.as_deref().unwrap_or_default();
        let email =
            ConfirmationEmail::for_registrant(name, record.email.as_deref().unwrap_or_default());

        match notifier.send(&email).await {
            Ok(()) => tracing::info!("Confirmation email sent to {}", name),
            Err(e) => tracing::warn!("Failed to send confirmation email to {}: {}", name, e),
        }
    }
}

#[async_trait]
impl RegistrationService for RegistrationServiceImpl {
    fn validate(&self, mut record: Record) -> ValidationReport {
        let errors = validate_record(&mut record);
        ValidationReport { record, errors }
    }

    async fn submit(&self, record: Record) -> RegistrationResult<SubmissionOutcome> {
        self.submit_on(record, Local::now().date_naive()).await
    }
}
