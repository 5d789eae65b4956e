//! MCP tool handlers for the registration server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! The JSON bodies are built by plain functions so they can be tested without a
//! transport.

use crate::domain::phone::{digit_count, has_valid_digit_count};
use crate::domain::{clean_emails, fix_typos, normalize_phone, Record};
use crate::services::{RegistrationService, SubmissionOutcome, ValidationReport};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes registration tools.
#[derive(Clone)]
pub struct RegistrationMcpServer {
    registration_service: Arc<dyn RegistrationService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for RegistrationMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "event-registration".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Event registration server - cleans phone numbers and email addresses, validates registration records and stores accepted registrations in dated worksheet tabs.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PhoneParams {
    /// Raw phone field, possibly several numbers separated by "/"
    pub phone: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EmailParams {
    /// Raw email field, possibly several addresses joined by " - "
    pub email: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RecordParams {
    /// The registration as submitted by the form
    pub record: Record,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn to_tool_result(body: &Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(body).map_err(to_mcp_error)?,
    )]))
}

/// Response body of the `normalize_phone` tool.
pub fn phone_response(raw: &str) -> Value {
    let normalized = normalize_phone(raw);
    json!({
        "input": raw,
        "digit_count": digit_count(&normalized),
        "valid": has_valid_digit_count(&normalized),
        "normalized": normalized,
    })
}

/// Response body of the `fix_email_typos` tool.
pub fn typo_response(raw: &str) -> Value {
    json!({
        "input": raw,
        "corrected": fix_typos(Some(raw)),
    })
}

/// Response body of the `validate_email` tool.
pub fn email_response(raw: &str) -> Value {
    let (cleaned, valid) = clean_emails(Some(raw));
    json!({
        "input": raw,
        "cleaned": cleaned,
        "valid": valid,
    })
}

/// Response body of the `validate_registration` tool.
pub fn validation_response(report: &ValidationReport) -> Value {
    json!({
        "record": report.record,
        "valid": report.is_valid(),
        "errors": errors_json(&report.errors),
    })
}

/// Response body of the `submit_registration` tool.
pub fn submission_response(outcome: &SubmissionOutcome) -> Value {
    match outcome {
        SubmissionOutcome::Incomplete { missing } => json!({
            "status": "incomplete",
            "message": "Anh/Chị vui lòng nhập đầy đủ các trường thông tin. Xin cảm ơn!",
            "missing_fields": missing,
        }),
        SubmissionOutcome::Rejected { record, errors } => json!({
            "status": "rejected",
            "record": record,
            "errors": errors_json(errors),
        }),
        SubmissionOutcome::Accepted { record, tab } => json!({
            "status": "accepted",
            "message": "Chúc mừng Anh/Chị đã đăng ký thành công.",
            "record": record,
            "worksheet": tab,
        }),
    }
}

fn errors_json(errors: &[crate::domain::ValidationError]) -> Vec<Value> {
    errors
        .iter()
        .map(|e| {
            json!({
                "field": e.field(),
                "message": e.to_string(),
                "value": e.value(),
            })
        })
        .collect()
}

// Tool router implementation
#[tool_router]
impl RegistrationMcpServer {
    /// Create a new registration MCP server.
    pub fn new(registration_service: Arc<dyn RegistrationService>) -> Self {
        Self {
            registration_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Normalize a phone field into canonical grouping.
    #[tool(
        description = "Normalize a Vietnamese phone number field into 'dddd ddd ddd[d]' grouping. Handles +84/84 country codes, punctuation and several numbers separated by '/'. Reports whether the result has a valid digit count."
    )]
    async fn normalize_phone(
        &self,
        params: Parameters<PhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(&phone_response(&params.0.phone))
    }

    /// Repair common typos in one email address.
    #[tool(
        description = "Repair common typos in a single email address (e.g. 'gmailcom', '.cm', double '@', all upper case) without validating it."
    )]
    async fn fix_email_typos(
        &self,
        params: Parameters<EmailParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(&typo_response(&params.0.email))
    }

    /// Repair and validate an email field.
    #[tool(
        description = "Repair and validate an email field. Several addresses may be joined by ' - '; the field is valid only if every address is."
    )]
    async fn validate_email(
        &self,
        params: Parameters<EmailParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(&email_response(&params.0.email))
    }

    /// Validate a registration record without storing it.
    #[tool(
        description = "Validate a registration record (name, company, role, phoneNo, email, sentiment). Returns the cleaned record and any field errors; nothing is stored."
    )]
    async fn validate_registration(
        &self,
        params: Parameters<RecordParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.registration_service.validate(params.0.record);
        to_tool_result(&validation_response(&report))
    }

    /// Submit a registration.
    #[tool(
        description = "Submit a registration. All six fields are required. Valid registrations are cleaned, appended to today's worksheet tab and confirmed by email when confirmations are enabled."
    )]
    async fn submit_registration(
        &self,
        params: Parameters<RecordParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: submit_registration called");

        let outcome = self
            .registration_service
            .submit(params.0.record)
            .await
            .map_err(|e| {
                tracing::error!("Failed to submit registration: {:?}", e);
                to_mcp_error(e)
            })?;

        to_tool_result(&submission_response(&outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    #[test]
    fn test_phone_response() {
        let body = phone_response("+84987123456");
        assert_eq!(body["normalized"], "0987 123 456");
        assert_eq!(body["digit_count"], 10);
        assert_eq!(body["valid"], true);

        let body = phone_response("0123456789/0987654321");
        assert_eq!(body["normalized"], "0123 456 789 - 0987 654 321");
        assert_eq!(body["valid"], false);
    }

    #[test]
    fn test_typo_response() {
        let body = typo_response("john@gmailcom");
        assert_eq!(body["corrected"], "john@gmail.com");
    }

    #[test]
    fn test_email_response() {
        let body = email_response("x@gmail - y@yahoocom");
        assert_eq!(body["cleaned"], "x@gmail.com - y@yahoo.com");
        assert_eq!(body["valid"], true);
    }

    #[test]
    fn test_submission_response_rejected() {
        let outcome = SubmissionOutcome::Rejected {
            record: Record {
                phone_no: Some("12345".to_string()),
                ..Default::default()
            },
            errors: vec![ValidationError::InvalidPhone("12345".to_string())],
        };

        let body = submission_response(&outcome);
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["record"]["phoneNo"], "12345");
        assert_eq!(body["errors"][0]["field"], "phoneNo");
        assert_eq!(body["errors"][0]["message"], "Số điện thoại chưa hợp lệ.");
    }

    #[test]
    fn test_submission_response_incomplete() {
        let outcome = SubmissionOutcome::Incomplete {
            missing: vec!["role", "sentiment"],
        };

        let body = submission_response(&outcome);
        assert_eq!(body["status"], "incomplete");
        assert_eq!(body["missing_fields"], json!(["role", "sentiment"]));
    }
}
