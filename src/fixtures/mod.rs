//! Static banking data embedded in the binary.
//!
//! `fixtures/banking.json` is parsed once at startup. Records that the
//! server only echoes back stay as raw JSON; records it computes over are
//! typed.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::format;
use crate::models::{
    Account, ChartSlice, CombispaarPage, IbanHolder, MaxispaarPage, Message, PersonalDetails,
    SofQuestion, StatementLine, UserInfo,
};

const BANKING_JSON: &str = include_str!("../../fixtures/banking.json");

/// Statement lines served for every account number.
#[derive(Debug, Clone, Deserialize)]
pub struct StatementFixture {
    pub account_name: String,
    pub currency_code: String,
    pub transactions: Vec<StatementLine>,
}

/// Initial contents of the mutable store.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub password: String,
    pub messages: Vec<Message>,
    pub personal_details: PersonalDetails,
    pub sof_questions: Vec<SofQuestion>,
}

/// Customer API reference data.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerFixtures {
    pub identification: Value,
    pub street: String,
    pub city: String,
    pub house_numbers: Vec<String>,
    pub last_login_date: String,
    pub annual_overviews: Value,
    pub contracts: Value,
    pub campaigns: Value,
}

/// Savings product reference data.
#[derive(Debug, Clone, Deserialize)]
pub struct SavingsFixtures {
    pub modification_options: Vec<String>,
    pub products: Value,
    pub rates: Value,
    pub history: Value,
    pub calculations: Value,
    pub target_accounts: Value,
    pub account_holder: String,
}

/// Transfer reference data.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferFixtures {
    pub own_account_targets: Value,
    pub holidays: Value,
    pub future_payments: Value,
}

/// All static data served by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    pub accounts: Vec<Account>,
    pub combispaar_accounts: Vec<Account>,
    pub chart_data: Vec<ChartSlice>,
    pub user_info: UserInfo,
    /// Full customer profile; `customerId` is filled per request
    pub customer_profile: Value,
    /// Saving accounts in the account-list record shape
    pub saving_accounts: Vec<Value>,
    pub combispaar_page: CombispaarPage,
    pub maxispaar_page: MaxispaarPage,
    /// Keyed by upper-case IBAN
    pub iban_holders: BTreeMap<String, IbanHolder>,
    pub statement: StatementFixture,
    pub seed: SeedData,
    pub customer: CustomerFixtures,
    pub savings: SavingsFixtures,
    pub transfers: TransferFixtures,
}

impl Fixtures {
    /// Parse the embedded fixture file.
    pub fn load() -> Result<Self, AppError> {
        Self::from_json(BANKING_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let fixtures: Fixtures = serde_json::from_str(raw)
            .map_err(|e| AppError::System(format!("Invalid fixture data: {}", e)))?;
        tracing::debug!(
            accounts = fixtures.accounts.len(),
            messages = fixtures.seed.messages.len(),
            "Fixtures loaded"
        );
        Ok(fixtures)
    }

    /// Holder details for an IBAN, matched case-insensitively.
    pub fn iban_holder(&self, iban: &str) -> Option<&IbanHolder> {
        self.iban_holders.get(&iban.trim().to_uppercase())
    }

    /// Full customer profile stamped with the requested customer id.
    pub fn profile_for(&self, customer_id: &str) -> Value {
        let mut profile = self.customer_profile.clone();
        if let Value::Object(fields) = &mut profile {
            fields.insert(
                "customerId".to_string(),
                Value::String(customer_id.to_string()),
            );
        }
        profile
    }

    /// Account list records for an account type; only savings exist.
    pub fn accounts_of_type(&self, account_type: &str) -> Vec<Value> {
        if account_type.eq_ignore_ascii_case("saving") {
            self.saving_accounts.clone()
        } else {
            Vec::new()
        }
    }
}

/// A downloadable document rendered from a text template.
#[derive(Debug, Clone, Copy)]
pub struct DocumentTemplate {
    pub key: &'static str,
    pub filename: &'static str,
    body: &'static str,
}

const DOCUMENTS: [DocumentTemplate; 5] = [
    DocumentTemplate {
        key: "terms-conditions",
        filename: "Terms_and_Conditions.pdf",
        body: include_str!("../../fixtures/documents/terms-conditions.txt"),
    },
    DocumentTemplate {
        key: "depositor-template",
        filename: "Depositor_Information_Template.pdf",
        body: include_str!("../../fixtures/documents/depositor-template.txt"),
    },
    DocumentTemplate {
        key: "financial-overview",
        filename: "Financial_Annual_Overview.pdf",
        body: include_str!("../../fixtures/documents/financial-overview.txt"),
    },
    DocumentTemplate {
        key: "account-statements",
        filename: "Account_Statements.pdf",
        body: include_str!("../../fixtures/documents/account-statements.txt"),
    },
    DocumentTemplate {
        key: "contracts",
        filename: "Your_Contracts.pdf",
        body: include_str!("../../fixtures/documents/contracts.txt"),
    },
];

/// Look up a document template by its type key.
pub fn find_document(key: &str) -> Option<&'static DocumentTemplate> {
    DOCUMENTS.iter().find(|doc| doc.key == key)
}

impl DocumentTemplate {
    /// Fill the date placeholders for `date`.
    pub fn render(&self, date: NaiveDate) -> String {
        self.body
            .replace("{generated_on}", &format::long_date(date))
            .replace("{statement_period}", &format::month_year(date))
    }
}
