//! Transfer simulation and payee verification models.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Query parameters of a transfer simulation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferQuery {
    #[serde(rename = "targetIBAN", default)]
    pub target_iban: String,
    /// Kept raw so a non-numeric amount maps to a banking error code
    #[serde(default = "default_amount")]
    pub amount: String,
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_payment_type")]
    pub payment_type: String,
    #[serde(default = "default_period")]
    pub period: String,
}

fn default_amount() -> String {
    "0".to_string()
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_payment_type() -> String {
    "normal".to_string()
}

fn default_period() -> String {
    "oneOff".to_string()
}

impl TransferQuery {
    /// Parsed amount; anything but a finite number is an invalid request.
    pub fn parsed_amount(&self) -> Result<f64, AppError> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| AppError::InvalidRequest(format!("Invalid amount: {}", self.amount)))
    }
}

/// Result of simulating a transfer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSimulation {
    pub simulation_id: String,
    pub source_account: String,
    #[serde(rename = "targetIBAN")]
    pub target_iban: String,
    pub amount: f64,
    pub currency_code: String,
    pub description: String,
    pub payment_type: String,
    pub period: String,
    pub fees: f64,
    pub total_amount: f64,
    pub estimated_delivery: String,
    pub status: String,
}

/// Request body of a payee verification.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeeVerificationRequest {
    #[serde(rename = "targetIBAN", default)]
    pub target_iban: Option<String>,
    #[serde(default)]
    pub beneficiary_name: Option<String>,
}

impl PayeeVerificationRequest {
    /// IBAN and name, checked in that order.
    pub fn required_fields(&self) -> Result<(&str, &str), AppError> {
        let iban = non_blank(&self.target_iban).ok_or(AppError::InvalidPartyIban)?;
        let name = non_blank(&self.beneficiary_name).ok_or(AppError::InvalidPartyName)?;
        Ok((iban, name))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Outcome of a payee verification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeeVerification {
    pub vop_guid: String,
    pub verification_status: String,
    pub beneficiary_name: String,
    #[serde(rename = "targetIBAN")]
    pub target_iban: String,
    pub verification_date: String,
    pub confidence: String,
}
