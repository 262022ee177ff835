//! REST API module.
//!
//! Two surfaces share one store. The portal surface under `/api` wraps every
//! payload in the [`ApiResponse`] envelope; the banking surface returns bare
//! JSON bodies. Failures on both render through [`ApiFailure`].

mod accounts;
mod customer;
mod dashboard;
mod documents;
mod messages;
mod personal;
mod transfers;

pub use accounts::*;
pub use customer::*;
pub use dashboard::*;
pub use documents::*;
pub use messages::*;
pub use personal::*;
pub use transfers::*;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{ApiFailure, AppError, ErrorStyle};
use crate::format;

/// Customer id assumed when a portal request carries no `customerId` header.
pub const DEFAULT_CUSTOMER_ID: &str = "CUST001";

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Top-level siblings of `data`, such as counters
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            extra: Map::new(),
            timestamp: format::timestamp(),
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Portal response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiFailure>;

/// Banking surface response type: bare JSON or error.
pub type RawResult<T> = Result<Json<T>, ApiFailure>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, style: ErrorStyle) -> ApiResult<T> {
    Err(ApiFailure::new(err, style))
}

/// Create an error response for the banking surface.
pub fn raw_error<T: Serialize>(err: AppError, style: ErrorStyle) -> RawResult<T> {
    Err(ApiFailure::new(err, style))
}

/// Customer id from the `customerId` header, else the demo customer.
pub fn customer_id_header(headers: &HeaderMap) -> String {
    headers
        .get("customerid")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_CUSTOMER_ID)
        .to_string()
}

/// Reject a blank customer id path segment.
pub fn require_customer_id(customer_id: &str) -> Result<(), AppError> {
    if customer_id.trim().is_empty() {
        return Err(AppError::MissingCustomerId);
    }
    Ok(())
}

/// Reject a blank account number path segment.
pub fn require_account_number(account_number: &str) -> Result<(), AppError> {
    if account_number.trim().is_empty() {
        return Err(AppError::MissingAccountNumber);
    }
    Ok(())
}

/// `{success:true, message, timestamp}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

impl Acknowledgement {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            timestamp: format::timestamp(),
        }
    }
}
