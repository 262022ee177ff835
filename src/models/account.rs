//! Account models shown on the portal dashboard.

use serde::{Deserialize, Serialize};

/// A savings account as listed on the dashboard widgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: f64,
    pub currency: String,
    pub iban: String,
    pub interest_rate: f64,
    pub holder_name: String,
}

/// Combispaar accounts with their aggregate balance.
#[derive(Debug, Clone, Serialize)]
pub struct CombispaarSummary {
    pub accounts: Vec<Account>,
    pub total_balance: f64,
    pub count: usize,
}

impl CombispaarSummary {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        Self {
            accounts: accounts.to_vec(),
            total_balance: total_balance(accounts),
            count: accounts.len(),
        }
    }
}

/// Sum of balances, rounded to cents.
pub fn total_balance(accounts: &[Account]) -> f64 {
    let cents: f64 = accounts.iter().map(|a| (a.balance * 100.0).round()).sum();
    cents / 100.0
}

/// Holder details resolved from an IBAN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbanHolder {
    pub holder_name: String,
    pub institution_name: String,
    pub bic: String,
    pub customer_number: String,
    pub support_reg_number: String,
    pub support_packages: String,
    pub email: String,
}

/// One line of an account statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    pub transaction_date: String,
    pub value_date: String,
    pub description: String,
    pub amount: f64,
    pub balance: f64,
    #[serde(rename = "type")]
    pub line_type: String,
    pub reference: String,
}

/// Pagination block echoed back with a statement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
    pub total_records: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(page_index: u32, page_size: u32, total_records: usize) -> Self {
        let size = page_size.max(1) as usize;
        Self {
            page_index,
            page_size,
            total_records,
            total_pages: total_records.div_ceil(size).max(1),
        }
    }
}

/// Account statement body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatement {
    pub account_number: String,
    pub account_name: String,
    pub currency_code: String,
    pub transactions: Vec<StatementLine>,
    pub pagination: Pagination,
}
