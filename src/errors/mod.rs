//! Error handling module for the mock banking backend.
//!
//! Every failure is rendered as a JSON envelope whose HTTP status equals the
//! numeric banking error code. Two envelope shapes exist; a deployment picks
//! one through [`ErrorStyle`] and uses it for every error it emits.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::format;

/// Banking error codes as published in the customer/account/transfer API catalogue.
#[allow(dead_code)]
pub mod codes {
    pub const VALIDATION_ERROR: &str = "400";
    pub const NOT_FOUND: &str = "404";
    pub const CUSTOMER_ID_NULL: &str = "453";
    pub const MOBILE_PHONE_NULL: &str = "454";
    pub const ACCOUNT_NUMBER_NULL: &str = "456";
    pub const INVALID_REQUEST: &str = "470";
    pub const UNAUTHORIZED: &str = "471";
    pub const INVALID_PARTY_NAME: &str = "473";
    pub const INVALID_PARTY_IBAN: &str = "474";
    pub const INVALID_PARTY_AGENT_BICFI: &str = "475";
    pub const INVALID_REQUESTING_AGENT_BICFI: &str = "476";
    pub const RECORD_NOT_FOUND: &str = "477";
    pub const UNSUCCESSFUL: &str = "490";
    pub const SESSION_ID_REQUIRED: &str = "495";
    pub const CHECK_CHANNEL_CODE: &str = "496";
    pub const COUNTRY_CODE_REQUIRED: &str = "497";
    pub const CHECK_USER_CODE: &str = "498";
    pub const LANG_REQUIRED: &str = "499";
    pub const SYSTEM_ERROR: &str = "500";
    pub const DATABASE_ERROR: &str = "503";
}

/// Canned message for a catalogue code.
pub fn catalogue_message(code: &str) -> Option<&'static str> {
    let message = match code {
        codes::VALIDATION_ERROR => "Validation error",
        codes::NOT_FOUND => "Not found",
        codes::CUSTOMER_ID_NULL => "Customer id is null",
        codes::MOBILE_PHONE_NULL => "Mobile phone number is null",
        codes::ACCOUNT_NUMBER_NULL => "Account number is null",
        codes::INVALID_REQUEST => "Invalid request",
        codes::UNAUTHORIZED => "Unauthorized",
        codes::INVALID_PARTY_NAME => "Invalid party name",
        codes::INVALID_PARTY_IBAN => "Invalid party account IBAN",
        codes::INVALID_PARTY_AGENT_BICFI => "Invalid party agent BICFI",
        codes::INVALID_REQUESTING_AGENT_BICFI => "Invalid requesting agent BICFI",
        codes::RECORD_NOT_FOUND => "Not found",
        codes::UNSUCCESSFUL => "unsuccessful",
        codes::SESSION_ID_REQUIRED => "Session Id is required",
        codes::CHECK_CHANNEL_CODE => "Check channel code",
        codes::COUNTRY_CODE_REQUIRED => "County code is required",
        codes::CHECK_USER_CODE => "Check user code",
        codes::LANG_REQUIRED => "Lang is required",
        codes::SYSTEM_ERROR => "System error occurred",
        codes::DATABASE_ERROR => "Error occurred when making database call",
        _ => return None,
    };
    Some(message)
}

/// HTTP status for a catalogue code; non-numeric codes fall back to 400.
pub fn status_for_code(code: &str) -> StatusCode {
    code.parse::<u16>()
        .ok()
        .and_then(|c| StatusCode::from_u16(c).ok())
        .unwrap_or(StatusCode::BAD_REQUEST)
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Request body missing a required field or malformed
    Validation(String),
    /// Lookup against a fixture table failed
    NotFound(String),
    /// Blank customer id path segment
    MissingCustomerId,
    /// Blank mobile phone number in an update
    MissingPhoneNumber,
    /// Blank account number path segment
    MissingAccountNumber,
    /// Query or body value that cannot be interpreted
    InvalidRequest(String),
    /// Payee verification without a beneficiary name
    InvalidPartyName,
    /// Payee verification without a target IBAN
    InvalidPartyIban,
    /// Stored record (e.g. a message) not found
    RecordNotFound(String),
    /// One or more of the session headers absent
    MissingHeaders(Vec<&'static str>),
    /// Unexpected processing failure
    System(String),
    /// Failure touching persisted state
    Storage(String),
}

impl AppError {
    /// Get the catalogue code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::MissingCustomerId => codes::CUSTOMER_ID_NULL,
            AppError::MissingPhoneNumber => codes::MOBILE_PHONE_NULL,
            AppError::MissingAccountNumber => codes::ACCOUNT_NUMBER_NULL,
            AppError::InvalidRequest(_) => codes::INVALID_REQUEST,
            AppError::InvalidPartyName => codes::INVALID_PARTY_NAME,
            AppError::InvalidPartyIban => codes::INVALID_PARTY_IBAN,
            AppError::RecordNotFound(_) => codes::RECORD_NOT_FOUND,
            AppError::MissingHeaders(_) => codes::SESSION_ID_REQUIRED,
            AppError::System(_) => codes::SYSTEM_ERROR,
            AppError::Storage(_) => codes::DATABASE_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        status_for_code(self.error_code())
    }

    /// Get the canned catalogue message.
    pub fn message(&self) -> String {
        catalogue_message(self.error_code())
            .unwrap_or("Unknown error")
            .to_string()
    }

    /// Get the request-specific description.
    pub fn description(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidRequest(msg)
            | AppError::RecordNotFound(msg)
            | AppError::System(msg)
            | AppError::Storage(msg) => msg.clone(),
            AppError::MissingHeaders(missing) => {
                format!("Missing required headers: {}", missing.join(", "))
            }
            AppError::MissingCustomerId
            | AppError::MissingPhoneNumber
            | AppError::MissingAccountNumber
            | AppError::InvalidPartyName
            | AppError::InvalidPartyIban => self.message(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.description())
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("JSON error: {:?}", err);
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        AppError::Validation(rejection.body_text())
    }
}

/// Envelope shape used for every error of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStyle {
    /// `{success:false, error:{code, message, description}, timestamp}`
    #[default]
    Coded,
    /// `{success:false, error:"<description>", timestamp}`
    Legacy,
}

impl ErrorStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStyle::Coded => "coded",
            ErrorStyle::Legacy => "legacy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "coded" => Some(ErrorStyle::Coded),
            "legacy" => Some(ErrorStyle::Legacy),
            _ => None,
        }
    }
}

/// Error details in the coded envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    pub description: String,
}

/// Coded error envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                description: error.description(),
            },
            timestamp: format::timestamp(),
        }
    }
}

/// Legacy error envelope carrying only the description text.
#[derive(Debug, Serialize, Deserialize)]
pub struct LegacyErrorResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
}

impl LegacyErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: error.description(),
            timestamp: format::timestamp(),
        }
    }
}

/// Wrapper type for errors that carry the deployment's envelope style.
#[derive(Debug)]
pub struct ApiFailure {
    pub error: AppError,
    pub style: ErrorStyle,
}

impl ApiFailure {
    pub fn new(error: AppError, style: ErrorStyle) -> Self {
        Self { error, style }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        match self.style {
            ErrorStyle::Coded => (status, Json(ErrorResponse::new(&self.error))).into_response(),
            ErrorStyle::Legacy => {
                (status, Json(LegacyErrorResponse::new(&self.error))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_matches_numeric_code() {
        let err = AppError::MissingHeaders(vec!["sessionId"]);
        assert_eq!(err.status_code().as_u16(), 495);
        assert_eq!(AppError::MissingCustomerId.status_code().as_u16(), 453);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Storage("disk".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_non_numeric_code_falls_back_to_bad_request() {
        assert_eq!(status_for_code("oops"), StatusCode::BAD_REQUEST);
        assert_eq!(status_for_code("477").as_u16(), 477);
    }

    #[test]
    fn test_missing_headers_description_lists_names() {
        let err = AppError::MissingHeaders(vec!["lang", "sessionId"]);
        assert_eq!(err.message(), "Session Id is required");
        assert_eq!(
            err.description(),
            "Missing required headers: lang, sessionId"
        );
    }

    #[test]
    fn test_fixed_errors_describe_themselves() {
        assert_eq!(
            AppError::MissingAccountNumber.description(),
            "Account number is null"
        );
        assert_eq!(
            AppError::InvalidPartyIban.to_string(),
            "474: Invalid party account IBAN"
        );
    }

    #[test]
    fn test_coded_envelope_shape() {
        let body = ErrorResponse::new(&AppError::RecordNotFound("Message not found".into()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "477");
        assert_eq!(json["error"]["message"], "Not found");
        assert_eq!(json["error"]["description"], "Message not found");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_legacy_envelope_shape() {
        let body = LegacyErrorResponse::new(&AppError::Validation("Password is required".into()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Password is required");
    }

    #[test]
    fn test_error_style_parse() {
        assert_eq!(ErrorStyle::parse("coded"), Some(ErrorStyle::Coded));
        assert_eq!(ErrorStyle::parse(" Legacy "), Some(ErrorStyle::Legacy));
        assert_eq!(ErrorStyle::parse("mixed"), None);
        assert_eq!(ErrorStyle::default().as_str(), "coded");
    }

    #[test]
    fn test_failure_response_uses_code_as_status() {
        let response =
            ApiFailure::new(AppError::InvalidPartyName, ErrorStyle::Legacy).into_response();
        assert_eq!(response.status().as_u16(), 473);
    }
}
