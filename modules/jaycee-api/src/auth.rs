use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::Response,
};
use jsonwebtoken::errors::ErrorKind;
use uuid::Uuid;

use crate::error::error_response;
use crate::AppState;

/// The authenticated caller, resolved from the bearer credential before
/// any business logic runs. Threaded through handlers as an explicit
/// value; nothing is attached to the request itself.
#[derive(Debug, Clone, Copy)]
pub struct Subject {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl FromRequestParts<Arc<AppState>> for Subject {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let Some(token) = header.and_then(|h| h.strip_prefix("Bearer ")) else {
            return Err(error_response(
                StatusCode::UNAUTHORIZED,
                "Authentication token missing or invalid",
            ));
        };

        let claims = match state.jwt.verify(token) {
            Ok(claims) => claims,
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                return Err(error_response(StatusCode::FORBIDDEN, "Token expired"));
            }
            Err(_) => {
                return Err(error_response(StatusCode::UNAUTHORIZED, "Invalid token"));
            }
        };

        let Ok(user_id) = claims.sub.parse() else {
            return Err(error_response(StatusCode::UNAUTHORIZED, "Invalid token"));
        };

        Ok(Subject {
            user_id,
            is_admin: claims.is_admin,
        })
    }
}
