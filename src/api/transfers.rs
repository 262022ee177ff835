//! Transfer and payee verification endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::{json, Value};

use super::{raw_error, require_account_number, require_customer_id, success, ApiResult, RawResult};
use crate::errors::AppError;
use crate::format;
use crate::models::{PayeeVerification, PayeeVerificationRequest, TransferQuery, TransferSimulation};
use crate::AppState;

fn simulate(
    customer_id: &str,
    source_account: String,
    query: Result<Query<TransferQuery>, QueryRejection>,
) -> Result<TransferSimulation, AppError> {
    require_customer_id(customer_id)?;
    require_account_number(&source_account)?;
    let Query(query) = query?;
    let amount = query.parsed_amount()?;

    Ok(TransferSimulation {
        simulation_id: uuid::Uuid::new_v4().to_string(),
        source_account,
        target_iban: query.target_iban,
        amount,
        currency_code: query.currency_code,
        description: query.description,
        payment_type: query.payment_type,
        period: query.period,
        fees: 0.0,
        total_amount: amount,
        estimated_delivery: format::iso_date(format::today()),
        status: "SIMULATED".to_string(),
    })
}

/// GET /transfers/payment/{customerId}/{sourceAccount} - Simulate a transfer.
pub async fn simulate_transfer(
    State(state): State<AppState>,
    Path((customer_id, source_account)): Path<(String, String)>,
    query: Result<Query<TransferQuery>, QueryRejection>,
) -> RawResult<TransferSimulation> {
    match simulate(&customer_id, source_account, query) {
        Ok(simulation) => Ok(Json(simulation)),
        Err(e) => raw_error(e, state.config.error_style),
    }
}

/// GET /api/transfers/payment/{customerId}/{sourceAccount} - Enveloped simulation.
pub async fn simulate_portal_transfer(
    State(state): State<AppState>,
    Path((customer_id, source_account)): Path<(String, String)>,
    query: Result<Query<TransferQuery>, QueryRejection>,
) -> ApiResult<TransferSimulation> {
    match simulate(&customer_id, source_account, query) {
        Ok(simulation) => success(simulation),
        Err(e) => super::error(e, state.config.error_style),
    }
}

/// GET /transfers/ownAccountTransfer/{customerId}/{sourceAccount}
pub async fn get_own_account_transfer(
    State(state): State<AppState>,
    Path((customer_id, source_account)): Path<(String, String)>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id).and(require_account_number(&source_account))
    {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "customerId": customer_id,
        "sourceAccount": source_account,
        "targetAccounts": state.fixtures.transfers.own_account_targets,
    })))
}

/// GET /transfers/utilities/holidays
pub async fn list_holidays(State(state): State<AppState>) -> Json<Value> {
    Json(state.fixtures.transfers.holidays.clone())
}

/// GET /transfers/utilities/bankDate
pub async fn get_bank_date() -> Json<Value> {
    Json(json!({
        "bankDate": format::iso_date(format::today()),
        "isBusinessDay": true,
    }))
}

/// GET /transfers/payment/futurePayment/list/{customerId}
pub async fn list_future_payments(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(state.fixtures.transfers.future_payments.clone()))
}

/// POST /vop/requestPayeeVerification - Verify a beneficiary against an IBAN.
pub async fn request_payee_verification(
    State(state): State<AppState>,
    body: Result<Json<PayeeVerificationRequest>, JsonRejection>,
) -> RawResult<PayeeVerification> {
    let style = state.config.error_style;
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return raw_error(rejection.into(), style),
    };

    let (target_iban, beneficiary_name) = match request.required_fields() {
        Ok(fields) => fields,
        Err(e) => return raw_error(e, style),
    };

    Ok(Json(PayeeVerification {
        vop_guid: uuid::Uuid::new_v4().to_string(),
        verification_status: "VERIFIED".to_string(),
        beneficiary_name: beneficiary_name.to_string(),
        target_iban: target_iban.to_string(),
        verification_date: format::timestamp(),
        confidence: "HIGH".to_string(),
    }))
}
