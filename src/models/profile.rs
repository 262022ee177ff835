//! Customer profile models: personal details, password and source-of-funds answers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display value of the password field once a real password has been set.
pub const MASKED_PASSWORD: &str = "••••••••••••••••";

/// The customer's editable personal details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub update_id: String,
    pub mobile_phone: String,
    /// Masked display value, never the real password
    pub password: String,
    pub email: String,
    pub telephone: String,
    pub address: String,
}

impl PersonalDetails {
    /// Slot for a wire key; these are the only keys a merge accepts.
    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "updateId" => Some(&mut self.update_id),
            "mobilePhone" => Some(&mut self.mobile_phone),
            "password" => Some(&mut self.password),
            "email" => Some(&mut self.email),
            "telephone" => Some(&mut self.telephone),
            "address" => Some(&mut self.address),
            _ => None,
        }
    }

    /// Merge a partial update, touching only keys the record already has.
    ///
    /// Unknown keys are ignored. Non-string values are stored as their JSON
    /// text, `null` as an empty string. Returns the keys that were written.
    pub fn merge(&mut self, patch: &Map<String, Value>) -> Vec<String> {
        let mut applied = Vec::new();
        for (key, value) in patch {
            let Some(slot) = self.field_mut(key) else {
                continue;
            };
            *slot = match value {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            applied.push(key.clone());
        }
        applied
    }
}

/// One source-of-funds entry, kept exactly as the client sent it.
pub type SofQuestion = Value;

/// Request body for replacing the source-of-funds answers.
///
/// Only the presence of the `questions` array is checked; its entries are
/// stored untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceSofQuestionsRequest {
    pub questions: Vec<SofQuestion>,
}

/// Request body carrying a password.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Outcome of a password check.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordCheck {
    pub success: bool,
    pub valid: bool,
    pub message: String,
    pub timestamp: String,
}
