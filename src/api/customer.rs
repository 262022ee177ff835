//! Customer API endpoints of the banking surface.
//!
//! Every route here sits behind the session header gate.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{raw_error, require_customer_id, Acknowledgement, RawResult};
use crate::errors::AppError;
use crate::format;
use crate::AppState;

/// Entries of a profile list field, optionally filtered on one key.
fn profile_entries(state: &AppState, field: &str, filter: Option<(&str, &str)>) -> Vec<Value> {
    let entries = state.fixtures.customer_profile[field]
        .as_array()
        .cloned()
        .unwrap_or_default();
    match filter {
        Some((key, wanted)) => entries
            .into_iter()
            .filter(|entry| entry[key] == wanted)
            .collect(),
        None => entries,
    }
}

fn check_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(value)| value).map_err(AppError::from)
}

/// GET /customer/profile/phone/{customerId} - Mobile phone records.
pub async fn get_customer_phone(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Vec<Value>> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(profile_entries(&state, "phones", Some(("phoneType", "MOBILE")))))
}

/// PUT /customer/profile/phone/{customerId} - Requires `phoneNumber`.
pub async fn update_customer_phone(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RawResult<Value> {
    let style = state.config.error_style;
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, style);
    }
    let body = match check_body(body) {
        Ok(body) => body,
        Err(e) => return raw_error(e, style),
    };

    let phone_number = body["phoneNumber"]
        .as_str()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let Some(phone_number) = phone_number else {
        return raw_error(AppError::MissingPhoneNumber, style);
    };

    tracing::info!(customer_id = %customer_id, "Phone number update accepted");
    Ok(Json(json!({
        "success": true,
        "message": "Phone number updated successfully",
        "phoneNumber": phone_number,
        "timestamp": format::timestamp(),
    })))
}

/// GET /customer/profile/identification/{customerId}
pub async fn get_customer_identification(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(state.fixtures.customer.identification.clone()))
}

/// Shared body of the profile PUT endpoints that only acknowledge.
fn acknowledge_update(
    state: &AppState,
    customer_id: &str,
    body: Result<Json<Value>, JsonRejection>,
    message: &str,
) -> RawResult<Acknowledgement> {
    let style = state.config.error_style;
    if let Err(e) = require_customer_id(customer_id) {
        return raw_error(e, style);
    }
    if let Err(e) = check_body(body) {
        return raw_error(e, style);
    }
    tracing::info!(customer_id, "{}", message);
    Ok(Json(Acknowledgement::new(message)))
}

/// PUT /customer/profile/identification/{customerId}
pub async fn update_customer_identification(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RawResult<Acknowledgement> {
    acknowledge_update(&state, &customer_id, body, "Identification updated successfully")
}

/// GET /customer/profile/email/{customerId}
pub async fn get_customer_email(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Vec<Value>> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(profile_entries(&state, "emails", None)))
}

/// PUT /customer/profile/email/{customerId}
pub async fn update_customer_email(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RawResult<Acknowledgement> {
    acknowledge_update(&state, &customer_id, body, "Email updated successfully")
}

/// GET /customer/profile/address/{customerId}
pub async fn get_customer_address(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Vec<Value>> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(profile_entries(&state, "addresses", None)))
}

/// PUT /customer/profile/address/{customerId}
pub async fn update_customer_address(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RawResult<Acknowledgement> {
    acknowledge_update(&state, &customer_id, body, "Address updated successfully")
}

/// POST /customer/profile/validateNetBankingUser
pub async fn validate_net_banking_user() -> Json<Value> {
    Json(json!({
        "isValid": true,
        "message": "User validation successful",
        "timestamp": format::timestamp(),
    }))
}

/// POST /customer/profile/login - Issue a fresh session id.
pub async fn customer_login() -> Json<Value> {
    let session_id = uuid::Uuid::new_v4().to_string();
    tracing::info!("Session issued");
    Json(json!({
        "success": true,
        "sessionId": session_id,
        "message": "Login successful",
        "timestamp": format::timestamp(),
    }))
}

/// POST /customer/profile/appStatus
pub async fn get_app_status() -> Json<Value> {
    Json(json!({
        "status": "ACTIVE",
        "message": "Application is active",
        "timestamp": format::timestamp(),
    }))
}

/// GET /customer/profile/resolveAddress/{customerId}/{postCode}
pub async fn resolve_address_by_postcode(
    State(state): State<AppState>,
    Path((customer_id, post_code)): Path<(String, String)>,
) -> RawResult<Vec<Value>> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    let customer = &state.fixtures.customer;
    Ok(Json(vec![json!({
        "street": customer.street,
        "city": customer.city,
        "postCode": post_code,
        "houseNumbers": customer.house_numbers,
    })]))
}

/// GET /customer/profile/resolveAddress/{customerId}/{postCode}/{houseNo}
pub async fn resolve_address_by_house_number(
    State(state): State<AppState>,
    Path((customer_id, post_code, house_no)): Path<(String, String, String)>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    let customer = &state.fixtures.customer;
    Ok(Json(json!({
        "street": customer.street,
        "houseNumber": house_no,
        "postCode": post_code,
        "city": customer.city,
        "fullAddress": format!("{} {}, {} {}", customer.street, house_no, post_code, customer.city),
    })))
}

/// GET /customer/profile/isNetBankingUserActive/{customerId}
pub async fn is_net_banking_user_active(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "isActive": true,
        "lastLoginDate": state.fixtures.customer.last_login_date,
        "timestamp": format::timestamp(),
    })))
}

/// GET /customer/profile/fullProfile/{customerId}
pub async fn get_full_profile(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(state.fixtures.profile_for(&customer_id)))
}

/// GET /customer/downloads/financialAnnualOverview/{customerId}
pub async fn list_annual_overviews(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(state.fixtures.customer.annual_overviews.clone()))
}

/// GET /customer/downloads/financialAnnualOverview/print/{customerId}/{id}
pub async fn print_annual_overview(
    State(state): State<AppState>,
    Path((customer_id, id)): Path<(String, String)>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "success": true,
        "documentId": id,
        "downloadUrl": format!("/downloads/financial/{}.pdf", id),
        "timestamp": format::timestamp(),
    })))
}

/// GET /customer/downloads/contracts/{customerId}
pub async fn list_contracts(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(state.fixtures.customer.contracts.clone()))
}

/// GET /customer/downloads/contracts/print/{customerId}/{id}
pub async fn print_contract(
    State(state): State<AppState>,
    Path((customer_id, id)): Path<(String, String)>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "success": true,
        "contractId": id,
        "downloadUrl": format!("/downloads/contracts/{}.pdf", id),
        "timestamp": format::timestamp(),
    })))
}

/// GET /customer/campaigns/list/{customerId}
pub async fn list_campaigns(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(state.fixtures.customer.campaigns.clone()))
}
