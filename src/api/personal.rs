//! Personal details, password and source-of-funds endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{error, ApiResponse, ApiResult};
use crate::errors::{ApiFailure, AppError};
use crate::format;
use crate::models::{
    PasswordCheck, PasswordRequest, PersonalDetails, ReplaceSofQuestionsRequest, SofQuestion,
};
use crate::AppState;

/// The stored mobile phone number.
#[derive(Debug, Serialize)]
pub struct PhoneNumber {
    pub phone: String,
}

/// GET /api/personal-details
pub async fn get_personal_details(State(state): State<AppState>) -> ApiResult<PersonalDetails> {
    Ok(ApiResponse::new(state.store.personal_details().await))
}

/// PUT /api/personal-details - Merge known keys into the record.
pub async fn update_personal_details(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<PersonalDetails> {
    let style = state.config.error_style;
    let patch = match body {
        Ok(Json(patch)) => patch,
        Err(rejection) => return error(rejection.into(), style),
    };

    let details = state.store.merge_personal_details(&patch).await;
    Ok(ApiResponse::new(details).with_message("Personal details updated successfully"))
}

/// GET /api/personal-details/phone
pub async fn get_phone_number(State(state): State<AppState>) -> ApiResult<PhoneNumber> {
    let phone = state.store.mobile_phone().await;
    Ok(ApiResponse::new(PhoneNumber { phone }))
}

/// PUT /api/personal-details/password - Set a new password.
pub async fn update_password(
    State(state): State<AppState>,
    body: Result<Json<PasswordRequest>, JsonRejection>,
) -> ApiResult<PersonalDetails> {
    let style = state.config.error_style;
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return error(rejection.into(), style),
    };

    let password = request.password.unwrap_or_default();
    match state.store.update_password(&password).await {
        Ok(details) => Ok(ApiResponse::new(details).with_message("Password updated successfully")),
        Err(e) => error(e, style),
    }
}

/// POST /api/personal-details/validate-password - Compare against the stored password.
///
/// A wrong or missing password is a successful check with `valid: false`.
pub async fn validate_password(
    State(state): State<AppState>,
    body: Result<Json<PasswordRequest>, JsonRejection>,
) -> Result<Json<PasswordCheck>, ApiFailure> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return Err(ApiFailure::new(rejection.into(), state.config.error_style)),
    };

    let valid = match request.password.as_deref() {
        Some(candidate) => state.store.validate_password(candidate).await,
        None => false,
    };
    let message = if valid {
        "Password is valid"
    } else {
        "Password is incorrect"
    };

    Ok(Json(PasswordCheck {
        success: true,
        valid,
        message: message.to_string(),
        timestamp: format::timestamp(),
    }))
}

/// GET /api/sof-questions
pub async fn get_sof_questions(State(state): State<AppState>) -> ApiResult<Vec<SofQuestion>> {
    Ok(ApiResponse::new(state.store.sof_questions().await))
}

/// PUT /api/sof-questions - Replace the questionnaire wholesale.
pub async fn replace_sof_questions(
    State(state): State<AppState>,
    body: Result<Json<ReplaceSofQuestionsRequest>, JsonRejection>,
) -> ApiResult<Vec<SofQuestion>> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error(
                AppError::Validation(format!("questions array is required: {}", rejection.body_text())),
                state.config.error_style,
            )
        }
    };

    let questions = state.store.replace_sof_questions(request.questions).await;
    Ok(ApiResponse::new(questions).with_message("SOF questions updated successfully"))
}
