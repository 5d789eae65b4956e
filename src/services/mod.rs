//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! the validation pipeline, the registration store and the notifier. They
//! provide a clean boundary between the MCP handlers and the collaborators.

mod registration_service;

pub use registration_service::{
    RegistrationService, RegistrationServiceImpl, SubmissionOutcome, ValidationReport,
};
