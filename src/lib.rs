//! Event Registration - cleaning, validation and storage of event sign-ups.
//!
//! This library takes registration form submissions (name, company, role, phone,
//! email and a sentiment rating), repairs the phone and email fields, validates
//! the record, appends accepted registrations to a dated worksheet tab and sends
//! a confirmation email. The whole flow is exposed as an MCP server.
//!
//! # Architecture
//!
//! - **domain**: The record and the pure normalization/validation pipeline
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Worksheet storage for accepted registrations
//! - **notify**: Confirmation emails over an HTTP mail API
//! - **services**: Registration business logic
//! - **server**: MCP protocol server

pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod repositories;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use config::Config;
pub use domain::{Record, ValidationError};
pub use error::{ConfigError, NotifyError, RegistrationError, SheetError};
pub use notify::{ConfirmationEmail, HttpNotifier, Notifier};
pub use repositories::{MemorySheetRepository, RegistrationRepository};
pub use server::RegistrationMcpServer;
pub use services::{RegistrationService, RegistrationServiceImpl, SubmissionOutcome};
