//! Customer inbox message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format;

/// Delivery channel of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Email,
    Push,
}

/// A message in the customer's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub reference: String,
    pub entry_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
}

/// Request body for creating a message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(rename = "type", default)]
    pub message_type: Option<MessageType>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Portal rendering of a message with split date and time columns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalMessage {
    pub id: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub subject: String,
    pub content: String,
    pub is_read: bool,
}

impl From<&Message> for PortalMessage {
    fn from(message: &Message) -> Self {
        Self {
            id: message.reference.clone(),
            date: format::long_date(message.entry_date.date_naive()),
            time: format::short_time(message.entry_date.time()),
            message_type: message.message_type,
            subject: message.subject.clone(),
            content: message.body.clone(),
            is_read: message.is_read,
        }
    }
}

/// Unread message counter.
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCount {
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_message_wire_format() {
        let message = Message {
            reference: "MSG001".to_string(),
            entry_date: Utc.with_ymd_and_hms(2025, 1, 19, 11, 5, 0).unwrap(),
            message_type: MessageType::Push,
            subject: "Device Pairing Removed".to_string(),
            body: "Pairing removed.".to_string(),
            is_read: false,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["reference"], "MSG001");
        assert_eq!(json["entryDate"], "2025-01-19T11:05:00Z");
        assert_eq!(json["type"], "Push");
        assert_eq!(json["isRead"], false);
    }

    #[test]
    fn test_portal_view_splits_date_and_time() {
        let message = Message {
            reference: "MSG002".to_string(),
            entry_date: Utc.with_ymd_and_hms(2025, 8, 18, 10, 15, 0).unwrap(),
            message_type: MessageType::Email,
            subject: "Subject".to_string(),
            body: "Body".to_string(),
            is_read: true,
        };
        let view = PortalMessage::from(&message);
        assert_eq!(view.id, "MSG002");
        assert_eq!(view.date, "18 August 2025");
        assert_eq!(view.time, "10:15");
        assert_eq!(view.content, "Body");
    }

    #[test]
    fn test_create_request_rejects_unknown_type() {
        let parsed: Result<CreateMessageRequest, _> =
            serde_json::from_str(r#"{"type":"Sms","content":"x"}"#);
        assert!(parsed.is_err());

        let parsed: CreateMessageRequest = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        assert!(parsed.message_type.is_none());
    }
}
