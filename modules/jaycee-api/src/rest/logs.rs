use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use jaycee_common::LendError;
use serde::Deserialize;

use crate::auth::Subject;
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct LogsQuery {
    limit: Option<u32>,
}

/// Recent audit trail, admin only.
pub async fn recent(
    State(state): State<Arc<AppState>>,
    subject: Subject,
    Query(params): Query<LogsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if !subject.is_admin {
        return Err(LendError::Forbidden("Admin access required".to_string()).into());
    }

    let logs = state.audit.recent(params.limit.unwrap_or(100)).await?;
    Ok(Json(serde_json::json!({ "logs": logs })))
}
