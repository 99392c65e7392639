use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Subject;
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct RequestLoanBody {
    pub amount: Decimal,
}

#[derive(Deserialize)]
pub struct ApproveLoanBody {
    pub loan_id: Uuid,
}

#[derive(Serialize)]
struct RepaymentDetailsBody {
    message: &'static str,
    #[serde(flatten)]
    details: jaycee_lending::RepaymentDetails,
}

pub async fn request_loan(
    State(state): State<Arc<AppState>>,
    subject: Subject,
    Json(body): Json<RequestLoanBody>,
) -> Result<impl IntoResponse, ApiError> {
    let loan = state.loans.request_loan(subject.user_id, body.amount).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Loan request submitted successfully",
            "loan": loan,
        })),
    ))
}

pub async fn approve_loan(
    State(state): State<Arc<AppState>>,
    subject: Subject,
    Json(body): Json<ApproveLoanBody>,
) -> Result<impl IntoResponse, ApiError> {
    let (loan, transaction_id) = state.loans.approve_loan(subject.user_id, body.loan_id).await?;
    Ok(Json(serde_json::json!({
        "message": "Loan approved and funds disbursed",
        "transaction_id": transaction_id,
        "loan": loan,
    })))
}

pub async fn repayment_details(
    State(state): State<Arc<AppState>>,
    subject: Subject,
) -> Result<impl IntoResponse, ApiError> {
    let details = state.loans.repayment_details(subject.user_id).await?;
    Ok(Json(RepaymentDetailsBody {
        message: "Loan repayment details",
        details,
    }))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    subject: Subject,
) -> Result<impl IntoResponse, ApiError> {
    let loans = state.loans.history(subject.user_id).await?;
    Ok(Json(serde_json::json!({ "loans": loans })))
}
