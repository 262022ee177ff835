//! Document download endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::errors::{ApiFailure, AppError};
use crate::fixtures::find_document;
use crate::format;
use crate::AppState;

/// Query parameters for a download.
#[derive(Debug, Deserialize)]
pub struct DocumentQuery {
    #[serde(default, rename = "type")]
    pub document_type: String,
}

/// GET /api/documents/download?type= - Rendered template as an attachment.
///
/// The body is plain text even though the advertised filename ends in `.pdf`.
pub async fn download_document(
    State(state): State<AppState>,
    query: Result<Query<DocumentQuery>, QueryRejection>,
) -> Response {
    let style = state.config.error_style;
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return ApiFailure::new(rejection.into(), style).into_response(),
    };
    let Some(document) = find_document(&query.document_type) else {
        tracing::debug!(document_type = %query.document_type, "Unknown document requested");
        return ApiFailure::new(
            AppError::NotFound(format!("Document type not found: {}", query.document_type)),
            style,
        )
        .into_response();
    };

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.render(format::today()),
    )
        .into_response()
}
