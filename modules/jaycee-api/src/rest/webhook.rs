use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use jaycee_lending::PaymentNotification;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Repayment notification from the payments provider. Unauthenticated:
/// the provider is not a bearer-token caller, and the reconciler trusts
/// nothing in the payload beyond what it can verify against storage.
pub async fn repayment(
    State(state): State<Arc<AppState>>,
    Json(notification): Json<PaymentNotification>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        transaction_id = %notification.transaction_id,
        status = %notification.status,
        "Repayment webhook received"
    );

    state.reconciler.process(notification).await?;
    Ok(Json(serde_json::json!({ "message": "Loan successfully repaid" })))
}
