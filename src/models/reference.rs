//! Read-only reference data rendered on portal pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format;

/// One slice of the savings distribution chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Logged-in user summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub customer_id: String,
    pub last_login: String,
}

/// Dashboard payload combining the portal widgets.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub accounts: Vec<super::Account>,
    pub combispaar: super::CombispaarSummary,
    pub chart_data: Vec<ChartSlice>,
    pub user_info: UserInfo,
}

/// Breadcrumb labels of a product page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breadcrumbs {
    pub home: String,
    pub accounts: String,
    pub open_account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxispaar: Option<String>,
}

/// Marketing copy of a product page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDescription {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
}

/// Funding account shown at the top of a product page.
#[derive(Debug, Clone, Deserialize)]
pub struct MainAccount {
    pub name: String,
    pub balance: f64,
    pub iban: String,
    pub interest_rate: f64,
    pub holder_name: String,
}

/// [`MainAccount`] with display-formatted amounts.
#[derive(Debug, Clone, Serialize)]
pub struct MainAccountView {
    pub name: String,
    pub balance: String,
    pub iban: String,
    pub interest_rate: String,
    pub holder_name: String,
}

impl From<&MainAccount> for MainAccountView {
    fn from(account: &MainAccount) -> Self {
        Self {
            name: account.name.clone(),
            balance: format::euro_nl(account.balance),
            iban: account.iban.clone(),
            interest_rate: format::percent(account.interest_rate),
            holder_name: account.holder_name.clone(),
        }
    }
}

/// Combispaar notice-period option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CombispaarOption {
    pub id: String,
    pub balance_class: String,
    pub notice_period: String,
    pub interest: String,
    /// Filled with the current date when served
    #[serde(default)]
    pub valid_from: Option<String>,
    pub days: u32,
    pub code: String,
}

/// Combispaar options valid from `date`.
pub fn options_valid_from(options: &[CombispaarOption], date: NaiveDate) -> Vec<CombispaarOption> {
    let valid_from = format::dotted_date(date);
    options
        .iter()
        .cloned()
        .map(|mut option| {
            option.valid_from = Some(valid_from.clone());
            option
        })
        .collect()
}

/// Source account that can fund a new Combispaar account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IbanOption {
    pub iban: String,
    pub balance: f64,
    pub account_type: String,
    pub account_holder: String,
}

/// [`IbanOption`] with the balance formatted for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IbanOptionView {
    pub iban: String,
    pub balance: String,
    pub account_type: String,
    pub account_holder: String,
}

impl From<&IbanOption> for IbanOptionView {
    fn from(option: &IbanOption) -> Self {
        Self {
            iban: option.iban.clone(),
            balance: format::euro_nl(option.balance),
            account_type: option.account_type.clone(),
            account_holder: option.account_holder.clone(),
        }
    }
}

/// Combispaar product page source data.
#[derive(Debug, Clone, Deserialize)]
pub struct CombispaarPage {
    pub page_title: String,
    pub breadcrumbs: Breadcrumbs,
    pub main_account: MainAccount,
    pub description: PageDescription,
    pub account_options: Vec<CombispaarOption>,
    pub iban_options: Vec<IbanOption>,
}

/// Combispaar product page as served.
#[derive(Debug, Clone, Serialize)]
pub struct CombispaarPageView {
    pub page_title: String,
    pub breadcrumbs: Breadcrumbs,
    pub main_account: MainAccountView,
    pub description: PageDescription,
    pub account_options: Vec<CombispaarOption>,
    pub iban_options: Vec<IbanOptionView>,
}

impl CombispaarPage {
    pub fn render(&self, today: NaiveDate) -> CombispaarPageView {
        CombispaarPageView {
            page_title: self.page_title.clone(),
            breadcrumbs: self.breadcrumbs.clone(),
            main_account: MainAccountView::from(&self.main_account),
            description: self.description.clone(),
            account_options: options_valid_from(&self.account_options, today),
            iban_options: self.iban_options.iter().map(IbanOptionView::from).collect(),
        }
    }
}

/// MaxiSpaar fixed-term option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxispaarOption {
    pub id: String,
    pub term: String,
    pub interest: String,
    pub valid_from: String,
    pub balance_class: String,
}

/// MaxiSpaar product page source data.
#[derive(Debug, Clone, Deserialize)]
pub struct MaxispaarPage {
    pub page_title: String,
    pub breadcrumbs: Breadcrumbs,
    pub main_account: MainAccount,
    pub description: PageDescription,
    pub account_options: Vec<MaxispaarOption>,
}

/// MaxiSpaar product page as served.
#[derive(Debug, Clone, Serialize)]
pub struct MaxispaarPageView {
    pub page_title: String,
    pub breadcrumbs: Breadcrumbs,
    pub main_account: MainAccountView,
    pub description: PageDescription,
    pub account_options: Vec<MaxispaarOption>,
}

impl MaxispaarPage {
    pub fn render(&self) -> MaxispaarPageView {
        MaxispaarPageView {
            page_title: self.page_title.clone(),
            breadcrumbs: self.breadcrumbs.clone(),
            main_account: MainAccountView::from(&self.main_account),
            description: self.description.clone(),
            account_options: self.account_options.clone(),
        }
    }
}
