//! In-memory state mutated by the write endpoints.
//!
//! One [`MemoryStore`] lives in the application state for the lifetime of
//! the process. Nothing but the password survives a restart.

mod password;

pub use password::*;

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::fixtures::SeedData;
use crate::models::{
    CreateMessageRequest, Message, PersonalDetails, SofQuestion, MASKED_PASSWORD,
};

/// Subject given to messages created without one.
pub const DEFAULT_SUBJECT: &str = "New Message";

/// Body given to messages created without content.
pub const DEFAULT_BODY: &str = "New message received.";

/// Mutable customer state.
#[derive(Debug)]
pub struct MemoryStore {
    messages: RwLock<Vec<Message>>,
    personal_details: RwLock<PersonalDetails>,
    password: RwLock<PasswordVault>,
    sof_questions: RwLock<Vec<SofQuestion>>,
}

impl MemoryStore {
    pub fn new(seed: &SeedData, password: PasswordVault) -> Self {
        Self {
            messages: RwLock::new(seed.messages.clone()),
            personal_details: RwLock::new(seed.personal_details.clone()),
            password: RwLock::new(password),
            sof_questions: RwLock::new(seed.sof_questions.clone()),
        }
    }

    // ==================== MESSAGES ====================

    /// All messages, newest first.
    pub async fn list_messages(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    /// Create a message and insert it at the head of the inbox.
    pub async fn create_message(&self, request: &CreateMessageRequest) -> Message {
        let message = Message {
            reference: new_reference(),
            entry_date: Utc::now(),
            message_type: request.message_type.unwrap_or_default(),
            subject: request
                .subject
                .clone()
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            body: request
                .content
                .clone()
                .unwrap_or_else(|| DEFAULT_BODY.to_string()),
            is_read: false,
        };

        self.messages.write().await.insert(0, message.clone());
        tracing::info!(reference = %message.reference, "Message created");
        message
    }

    pub async fn get_message(&self, reference: &str) -> Option<Message> {
        self.messages
            .read()
            .await
            .iter()
            .find(|m| m.reference == reference)
            .cloned()
    }

    /// Remove every message with `reference`; returns how many were removed.
    pub async fn delete_message(&self, reference: &str) -> usize {
        let mut messages = self.messages.write().await;
        let before = messages.len();
        messages.retain(|m| m.reference != reference);
        let removed = before - messages.len();
        if removed > 0 {
            tracing::info!(reference, "Message deleted");
        } else {
            tracing::debug!(reference, "Delete of unknown message ignored");
        }
        removed
    }

    pub async fn unread_count(&self) -> usize {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| !m.is_read)
            .count()
    }

    // ==================== PERSONAL DETAILS ====================

    pub async fn personal_details(&self) -> PersonalDetails {
        self.personal_details.read().await.clone()
    }

    /// Merge a partial update into the personal details.
    pub async fn merge_personal_details(
        &self,
        patch: &Map<String, Value>,
    ) -> PersonalDetails {
        let mut details = self.personal_details.write().await;
        let applied = details.merge(patch);
        tracing::info!(fields = ?applied, "Personal details updated");
        details.clone()
    }

    pub async fn mobile_phone(&self) -> String {
        self.personal_details.read().await.mobile_phone.clone()
    }

    // ==================== PASSWORD ====================

    /// Set a new password and mask the display field.
    ///
    /// A failed write to the password file is logged; the new password is
    /// still in effect for this process.
    pub async fn update_password(&self, password: &str) -> Result<PersonalDetails, AppError> {
        if password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }

        if let Err(e) = self.password.write().await.replace(password).await {
            tracing::warn!("Password not persisted: {}", e);
        }

        let mut details = self.personal_details.write().await;
        details.password = MASKED_PASSWORD.to_string();
        tracing::info!("Password updated");
        Ok(details.clone())
    }

    pub async fn validate_password(&self, candidate: &str) -> bool {
        self.password.read().await.matches(candidate)
    }

    pub async fn password_is_persistent(&self) -> bool {
        self.password.read().await.is_persistent()
    }

    // ==================== SOURCE OF FUNDS ====================

    pub async fn sof_questions(&self) -> Vec<SofQuestion> {
        self.sof_questions.read().await.clone()
    }

    /// Replace the whole questionnaire.
    pub async fn replace_sof_questions(&self, questions: Vec<SofQuestion>) -> Vec<SofQuestion> {
        let mut stored = self.sof_questions.write().await;
        *stored = questions;
        tracing::info!(count = stored.len(), "SOF questions replaced");
        stored.clone()
    }
}

/// `MSG` followed by eight upper-case hex digits.
fn new_reference() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("MSG{}", id[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixtures;
    use crate::models::MessageType;
    use serde_json::json;

    fn store() -> MemoryStore {
        let fixtures = Fixtures::load().unwrap();
        MemoryStore::new(&fixtures.seed, PasswordVault::in_memory(&fixtures.seed.password))
    }

    fn patch(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("patch must be an object"),
        }
    }

    #[test]
    fn test_reference_format() {
        let reference = new_reference();
        assert_eq!(reference.len(), 11);
        assert!(reference.starts_with("MSG"));
        assert!(reference[3..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn test_create_message_inserts_at_head() {
        let store = store();
        let before = store.list_messages().await.len();

        let request = CreateMessageRequest {
            message_type: Some(MessageType::Push),
            subject: None,
            content: Some("Test".to_string()),
        };
        let created = store.create_message(&request).await;

        let messages = store.list_messages().await;
        assert_eq!(messages.len(), before + 1);
        assert_eq!(messages[0].reference, created.reference);
        assert_eq!(created.message_type, MessageType::Push);
        assert_eq!(created.subject, DEFAULT_SUBJECT);
        assert_eq!(created.body, "Test");
        assert!(!created.is_read);
    }

    #[tokio::test]
    async fn test_create_message_defaults() {
        let store = store();
        let created = store.create_message(&CreateMessageRequest::default()).await;
        assert_eq!(created.message_type, MessageType::Email);
        assert_eq!(created.body, DEFAULT_BODY);
    }

    #[tokio::test]
    async fn test_delete_keeps_order_of_others() {
        let store = store();
        let before: Vec<String> = store
            .list_messages()
            .await
            .into_iter()
            .map(|m| m.reference)
            .collect();

        assert_eq!(store.delete_message("MSG003").await, 1);

        let after: Vec<String> = store
            .list_messages()
            .await
            .into_iter()
            .map(|m| m.reference)
            .collect();
        let expected: Vec<String> = before.into_iter().filter(|r| r != "MSG003").collect();
        assert_eq!(after, expected);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_noop() {
        let store = store();
        let before = store.list_messages().await;
        assert_eq!(store.delete_message("MSG999").await, 0);
        assert_eq!(store.list_messages().await, before);
    }

    #[tokio::test]
    async fn test_unread_count_tracks_new_messages() {
        let store = store();
        assert_eq!(store.unread_count().await, 2);
        store.create_message(&CreateMessageRequest::default()).await;
        assert_eq!(store.unread_count().await, 3);
    }

    #[tokio::test]
    async fn test_get_message() {
        let store = store();
        assert_eq!(store.get_message("MSG002").await.unwrap().subject, "Device Pairing Removed");
        assert!(store.get_message("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_merge_updates_only_known_keys() {
        let store = store();
        let before = store.personal_details().await;

        let updated = store
            .merge_personal_details(&patch(json!({"email": "new@example.com", "nickname": "Lu"})))
            .await;

        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.mobile_phone, before.mobile_phone);
        assert_eq!(updated.address, before.address);
        assert_eq!(store.personal_details().await, updated);
    }

    #[tokio::test]
    async fn test_merge_stores_numbers_as_text() {
        let store = store();
        let before = store.personal_details().await;

        let updated = store
            .merge_personal_details(&patch(json!({"email": "a@b.c", "telephone": 12})))
            .await;

        assert_eq!(updated.telephone, "12");
        assert_eq!(updated.email, "a@b.c");
        assert_eq!(updated.address, before.address);
        assert_eq!(store.personal_details().await, updated);
    }

    #[tokio::test]
    async fn test_password_update_and_validate() {
        let store = store();
        assert!(store.validate_password("password123").await);

        let details = store.update_password("n3w-pass").await.unwrap();

        assert_eq!(details.password, MASKED_PASSWORD);
        assert!(store.validate_password("n3w-pass").await);
        assert!(!store.validate_password("password123").await);
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let store = store();
        let err = store.update_password("").await.unwrap_err();
        assert_eq!(err.description(), "Password is required");
        assert!(store.validate_password("password123").await);
    }

    #[tokio::test]
    async fn test_sof_replace_is_wholesale() {
        let store = store();
        assert_eq!(store.sof_questions().await.len(), 7);

        let replacement = vec![json!({"question": "Q", "answer": 5, "note": "kept"})];
        store.replace_sof_questions(replacement.clone()).await;

        assert_eq!(store.sof_questions().await, replacement);

        store.replace_sof_questions(Vec::new()).await;
        assert!(store.sof_questions().await.is_empty());
    }
}
