use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use jaycee_common::{KycStatus, LendError};

use crate::auth::Subject;
use crate::error::ApiError;
use crate::AppState;

/// Accepts the multipart KYC submission: `file` (identity document) and
/// `face` (live capture), both required.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    subject: Subject,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut document = None;
    let mut face = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| LendError::validation("Malformed multipart body"))?
    {
        match field.name() {
            Some("file") => {
                document = Some(field.bytes().await.map_err(|_| {
                    LendError::validation("Failed to read document image")
                })?);
            }
            Some("face") => {
                face = Some(field.bytes().await.map_err(|_| {
                    LendError::validation("Failed to read face image")
                })?);
            }
            _ => {}
        }
    }

    let (Some(document), Some(face)) = (document, face) else {
        return Err(LendError::validation(
            "Both document and face images are required.",
        )
        .into());
    };

    let outcome = state.kyc.submit(subject.user_id, &document, &face).await?;

    let response = match outcome.status {
        KycStatus::Verified => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": outcome.message,
                "status": outcome.status,
            })),
        ),
        KycStatus::Pending => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({
                "message": outcome.message,
                "status": outcome.status,
            })),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": outcome.message,
                "status": outcome.status,
            })),
        ),
    };

    Ok(response.into_response())
}

/// Current verification state for the authenticated subject, as shown on
/// the KYC status card.
pub async fn status(
    State(state): State<Arc<AppState>>,
    subject: Subject,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .find(subject.user_id)
        .await?
        .ok_or_else(|| LendError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "status": user.kyc_status,
        "verified": user.kyc_verified,
        "credit_score": user.credit_score,
    })))
}
