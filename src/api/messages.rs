//! Message inbox endpoints on both surfaces.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

use super::{error, raw_error, require_customer_id, Acknowledgement, ApiResponse, ApiResult, RawResult};
use crate::errors::AppError;
use crate::models::{CreateMessageRequest, Message, PortalMessage, UnreadCount};
use crate::AppState;

/// Outcome of a delete.
#[derive(Debug, Serialize)]
pub struct DeletedMessage {
    pub reference: String,
    pub removed: usize,
}

// ==================== PORTAL ====================

/// GET /api/messages - List messages, newest first.
pub async fn list_portal_messages(State(state): State<AppState>) -> ApiResult<Vec<PortalMessage>> {
    let messages: Vec<PortalMessage> = state
        .store
        .list_messages()
        .await
        .iter()
        .map(PortalMessage::from)
        .collect();
    let unread = messages.iter().filter(|m| !m.is_read).count();
    let count = messages.len();

    Ok(ApiResponse::new(messages)
        .with_extra("count", count)
        .with_extra("new_count", unread))
}

/// POST /api/messages - Create a message.
pub async fn create_portal_message(
    State(state): State<AppState>,
    body: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> ApiResult<PortalMessage> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return error(rejection.into(), state.config.error_style),
    };

    let message = state.store.create_message(&request).await;
    Ok(ApiResponse::new(PortalMessage::from(&message)).with_message("Message sent successfully"))
}

/// DELETE /api/messages/{reference} - Delete a message; unknown references are ignored.
pub async fn delete_portal_message(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> ApiResult<DeletedMessage> {
    let removed = state.store.delete_message(&reference).await;
    Ok(ApiResponse::new(DeletedMessage { reference, removed })
        .with_message("Message deleted successfully"))
}

// ==================== BANKING ====================

/// POST /customer/messages/{customerId} - Create a message, returning the record.
pub async fn create_customer_message(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    body: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> RawResult<Message> {
    let style = state.config.error_style;
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, style);
    }
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return raw_error(rejection.into(), style),
    };

    let message = state.store.create_message(&request).await;
    Ok(Json(message))
}

/// GET /customer/messages/{customerId}/{reference}
pub async fn get_customer_message(
    State(state): State<AppState>,
    Path((customer_id, reference)): Path<(String, String)>,
) -> RawResult<Message> {
    let style = state.config.error_style;
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, style);
    }

    match state.store.get_message(&reference).await {
        Some(message) => Ok(Json(message)),
        None => raw_error(AppError::RecordNotFound("Message not found".to_string()), style),
    }
}

/// DELETE /customer/messages/{customerId}/{reference}
pub async fn delete_customer_message(
    State(state): State<AppState>,
    Path((customer_id, reference)): Path<(String, String)>,
) -> RawResult<Acknowledgement> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }

    state.store.delete_message(&reference).await;
    Ok(Json(Acknowledgement::new("Message deleted successfully")))
}

/// GET /customer/messages/unread/{customerId}
pub async fn count_unread_messages(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<UnreadCount> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }

    let count = state.store.unread_count().await;
    Ok(Json(UnreadCount { count }))
}

/// GET /customer/messages/list/{customerId}
pub async fn list_customer_messages(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> RawResult<Vec<Message>> {
    if let Err(e) = require_customer_id(&customer_id) {
        return raw_error(e, state.config.error_style);
    }

    Ok(Json(state.store.list_messages().await))
}
