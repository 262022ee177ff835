//! Portal read endpoints over the static reference data.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{customer_id_header, error, success, ApiResponse, ApiResult};
use crate::errors::AppError;
use crate::format;
use crate::models::{
    Account, ChartSlice, CombispaarOption, CombispaarPageView, CombispaarSummary, Dashboard,
    IbanHolder, IbanOptionView, MaxispaarPageView, UserInfo,
};
use crate::AppState;

/// Query parameters for account listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTypeQuery {
    #[serde(default = "default_account_type")]
    pub account_type: String,
}

fn default_account_type() -> String {
    "saving".to_string()
}

/// Query parameters for the IBAN lookup.
#[derive(Debug, Deserialize)]
pub struct IbanQuery {
    #[serde(default)]
    pub iban: String,
}

/// A freshly issued verification code.
#[derive(Debug, Serialize)]
pub struct VerificationCode {
    pub code: String,
}

/// GET /api/accounts - Accounts of one type, keyed by that type.
pub async fn list_portal_accounts(
    State(state): State<AppState>,
    query: Result<Query<AccountTypeQuery>, QueryRejection>,
) -> ApiResult<BTreeMap<String, Vec<Value>>> {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return error(rejection.into(), state.config.error_style),
    };
    let accounts = state.fixtures.accounts_of_type(&query.account_type);
    let mut data = BTreeMap::new();
    data.insert(query.account_type, accounts);
    success(data)
}

/// GET /api/combispaar - Combispaar accounts with their total.
pub async fn list_combispaar(State(state): State<AppState>) -> ApiResult<Vec<Account>> {
    let summary = CombispaarSummary::from_accounts(&state.fixtures.combispaar_accounts);
    Ok(ApiResponse::new(summary.accounts)
        .with_extra("total_balance", summary.total_balance)
        .with_extra("count", summary.count))
}

/// GET /api/combispaar/page-data
pub async fn get_combispaar_page(State(state): State<AppState>) -> ApiResult<CombispaarPageView> {
    success(state.fixtures.combispaar_page.render(format::today()))
}

/// GET /api/combispaar/account-options
pub async fn get_combispaar_options(
    State(state): State<AppState>,
) -> ApiResult<Vec<CombispaarOption>> {
    success(crate::models::options_valid_from(
        &state.fixtures.combispaar_page.account_options,
        format::today(),
    ))
}

/// GET /api/combispaar/iban-options
pub async fn get_combispaar_iban_options(
    State(state): State<AppState>,
) -> ApiResult<Vec<IbanOptionView>> {
    let options = state
        .fixtures
        .combispaar_page
        .iban_options
        .iter()
        .map(IbanOptionView::from)
        .collect();
    success(options)
}

/// GET /api/chart-data
pub async fn get_chart_data(State(state): State<AppState>) -> ApiResult<Vec<ChartSlice>> {
    success(state.fixtures.chart_data.clone())
}

/// GET /api/user
pub async fn get_user(State(state): State<AppState>) -> ApiResult<UserInfo> {
    success(state.fixtures.user_info.clone())
}

/// GET /api/user/profile - Full profile for the `customerId` header.
pub async fn get_user_profile(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Value> {
    let customer_id = customer_id_header(&headers);
    success(state.fixtures.profile_for(&customer_id))
}

/// GET /api/maxispaar/page-data
pub async fn get_maxispaar_page(State(state): State<AppState>) -> ApiResult<MaxispaarPageView> {
    success(state.fixtures.maxispaar_page.render())
}

/// GET /api/dashboard - All dashboard widgets in one payload.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<Dashboard> {
    let fixtures = &state.fixtures;
    success(Dashboard {
        accounts: fixtures.accounts.clone(),
        combispaar: CombispaarSummary::from_accounts(&fixtures.combispaar_accounts),
        chart_data: fixtures.chart_data.clone(),
        user_info: fixtures.user_info.clone(),
    })
}

/// GET /api/verification/send-code - Issue a random 6-digit code.
pub async fn send_verification_code() -> ApiResult<VerificationCode> {
    let code = format!("{:06}", rand::rng().random_range(0..1_000_000u32));
    tracing::debug!("Verification code issued");
    Ok(ApiResponse::new(VerificationCode { code })
        .with_message("Verification code sent successfully"))
}

/// GET /api/account/by-iban - Holder details for an IBAN.
pub async fn get_account_by_iban(
    State(state): State<AppState>,
    query: Result<Query<IbanQuery>, QueryRejection>,
) -> ApiResult<IbanHolder> {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return error(rejection.into(), state.config.error_style),
    };
    match state.fixtures.iban_holder(&query.iban) {
        Some(holder) => success(holder.clone()),
        None => error(
            AppError::NotFound(format!(
                "Account not found for IBAN: {}",
                query.iban.trim().to_uppercase()
            )),
            state.config.error_style,
        ),
    }
}
