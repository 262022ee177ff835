//! Account API endpoints.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    raw_error, require_account_number, require_customer_id, success, AccountTypeQuery, ApiResult,
    RawResult,
};
use crate::errors::AppError;
use crate::format;
use crate::models::{AccountStatement, Pagination};
use crate::AppState;

/// Paging query for the portal statement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default)]
    pub page_index: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

fn build_statement(
    state: &AppState,
    account_number: String,
    page_index: u32,
    page_size: u32,
) -> AccountStatement {
    let statement = &state.fixtures.statement;
    AccountStatement {
        account_number,
        account_name: statement.account_name.clone(),
        currency_code: statement.currency_code.clone(),
        transactions: statement.transactions.clone(),
        pagination: Pagination::new(page_index, page_size, statement.transactions.len()),
    }
}

/// GET /api/accounts/statement/{accountNumber} - Statement with paging echo.
pub async fn get_portal_statement(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<AccountStatement> {
    let style = state.config.error_style;
    if let Err(e) = require_account_number(&account_number) {
        return super::error(e, style);
    }
    let Query(page) = match page {
        Ok(page) => page,
        Err(rejection) => return super::error(rejection.into(), style),
    };
    success(build_statement(
        &state,
        account_number,
        page.page_index,
        page.page_size,
    ))
}

/// GET /accounts/saving/statement/{accountNumber}/{pageIndex}/{pageSize}
pub async fn get_saving_statement(
    State(state): State<AppState>,
    Path((account_number, page_index, page_size)): Path<(String, String, String)>,
) -> RawResult<AccountStatement> {
    let style = state.config.error_style;
    if let Err(e) = require_account_number(&account_number) {
        return raw_error(e, style);
    }
    let (Ok(page_index), Ok(page_size)) = (page_index.parse::<u32>(), page_size.parse::<u32>())
    else {
        return raw_error(
            AppError::InvalidRequest(format!(
                "Invalid paging: pageIndex={}, pageSize={}",
                page_index, page_size
            )),
            style,
        );
    };
    Ok(Json(build_statement(
        &state,
        account_number,
        page_index,
        page_size,
    )))
}

/// GET /accounts/saving/modification/{customerId}/{accountNumber}
pub async fn get_saving_modification(
    State(state): State<AppState>,
    Path((customer_id, account_number)): Path<(String, String)>,
) -> RawResult<Value> {
    let style = state.config.error_style;
    if let Err(e) = require_customer_id(&customer_id).and(require_account_number(&account_number))
    {
        return raw_error(e, style);
    }
    Ok(Json(json!({
        "accountNumber": account_number,
        "customerId": customer_id,
        "modificationAllowed": true,
        "modificationOptions": state.fixtures.savings.modification_options,
    })))
}

/// GET /accounts/saving/new/{customerId}
pub async fn get_new_saving_products(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "customerId": customer_id,
        "availableProducts": state.fixtures.savings.products,
    })))
}

/// GET /accounts/utilities/customerMatchByAccount/{customerId}/{accountNumber}
pub async fn match_customer_by_account(
    State(state): State<AppState>,
    Path((customer_id, account_number)): Path<(String, String)>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id).and(require_account_number(&account_number))
    {
        return raw_error(e, state.config.error_style);
    }
    let holder = &state.fixtures.savings.account_holder;
    Ok(Json(json!({
        "customerId": customer_id,
        "accountNumber": account_number,
        "isMatch": true,
        "customerName": holder,
        "accountHolder": holder,
    })))
}

/// GET /accounts/targetAccounts/{customerId}/{accountNumber}/{transactionType}
pub async fn list_target_accounts(
    State(state): State<AppState>,
    Path((customer_id, account_number, _transaction_type)): Path<(String, String, String)>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id).and(require_account_number(&account_number))
    {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(state.fixtures.savings.target_accounts.clone()))
}

/// GET /accounts/saving/transactions/receipt/{accountNumber}
pub async fn get_transaction_receipt(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_account_number(&account_number) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "accountNumber": account_number,
        "transactionId": "TXN001",
        "receiptUrl": format!("/receipts/{}/TXN001.pdf", account_number),
        "timestamp": format::timestamp(),
    })))
}

/// GET /accounts/saving/statement/print/{accountNumber}
pub async fn print_statement(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_account_number(&account_number) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "success": true,
        "accountNumber": account_number,
        "statementUrl": format!("/statements/{}/statement.pdf", account_number),
        "timestamp": format::timestamp(),
    })))
}

/// GET /accounts/saving/rates/{customerId}
pub async fn get_saving_rates(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "customerId": customer_id,
        "rates": state.fixtures.savings.rates,
    })))
}

/// GET /accounts/saving/history/{accountNumber}
pub async fn get_saving_history(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_account_number(&account_number) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "accountNumber": account_number,
        "history": state.fixtures.savings.history,
    })))
}

/// GET /accounts/saving/history/print/{accountNumber}
pub async fn print_saving_history(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_account_number(&account_number) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "success": true,
        "accountNumber": account_number,
        "historyUrl": format!("/history/{}/history.pdf", account_number),
        "timestamp": format::timestamp(),
    })))
}

/// GET /accounts/saving/calculate/{customerId}
pub async fn calculate_saving(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Value> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }
    Ok(Json(json!({
        "customerId": customer_id,
        "calculations": state.fixtures.savings.calculations,
    })))
}

/// GET /accounts/list/{customerId}?accountType= - Accounts keyed by type.
pub async fn list_accounts(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    query: Result<Query<AccountTypeQuery>, QueryRejection>,
) -> RawResult<Value> {
    let style = state.config.error_style;
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, style);
    }
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return raw_error(rejection.into(), style),
    };
    let accounts = state.fixtures.accounts_of_type(&query.account_type);
    let mut body = serde_json::Map::new();
    body.insert(query.account_type, Value::Array(accounts));
    Ok(Json(Value::Object(body)))
}
