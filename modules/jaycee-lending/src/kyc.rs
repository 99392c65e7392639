use std::sync::Arc;

use jaycee_common::{KycStatus, LendError, Result};
use jaycee_store::UserStore;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{IdentityVerifier, ScanOutcome, ScanWarning};

const NO_DOCUMENT: &str = "No ID found";

/// Result of a KYC submission, already applied to the user.
#[derive(Debug, Clone, Serialize)]
pub struct KycOutcome {
    pub status: KycStatus,
    pub verified: bool,
    pub message: String,
}

/// How a provider decision maps onto the user record. Pure; the gate
/// applies it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DecisionMapping {
    Apply {
        verified: bool,
        status: KycStatus,
        message: String,
    },
    /// Provider answered something we do not understand; mutate nothing.
    Unexpected,
}

pub(crate) fn map_decision(outcome: &ScanOutcome, manual_review: bool) -> DecisionMapping {
    match outcome.decision.as_str() {
        "accept" => DecisionMapping::Apply {
            verified: true,
            status: KycStatus::Verified,
            message: "KYC verification successful! Your identity has been verified.".to_string(),
        },
        "reject" => DecisionMapping::Apply {
            verified: false,
            status: KycStatus::Failed,
            message: format!(
                "Your verification was rejected due to: {}",
                join_reasons(&outcome.warnings)
            ),
        },
        "review" if manual_review => DecisionMapping::Apply {
            verified: false,
            status: KycStatus::Pending,
            message: "KYC verification requires manual review. Please wait for an update."
                .to_string(),
        },
        "review" => DecisionMapping::Apply {
            verified: false,
            status: KycStatus::Failed,
            message: "KYC verification failed.".to_string(),
        },
        _ => DecisionMapping::Unexpected,
    }
}

fn join_reasons(warnings: &[ScanWarning]) -> String {
    if warnings.is_empty() {
        return "Unknown reason".to_string();
    }
    warnings
        .iter()
        .map(|w| format!("{}: {}", w.code, w.description))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Gatekeeper for loan eligibility: a subject must pass verification here
/// before the engine will consider them.
pub struct KycGate {
    users: UserStore,
    verifier: Arc<dyn IdentityVerifier>,
    manual_review: bool,
}

impl KycGate {
    pub fn new(users: UserStore, verifier: Arc<dyn IdentityVerifier>, manual_review: bool) -> Self {
        Self {
            users,
            verifier,
            manual_review,
        }
    }

    /// Submit a document + face capture for verification and apply the
    /// provider's decision to the user. Transport or parse failures from
    /// the provider surface as upstream errors with the user untouched.
    pub async fn submit(&self, user_id: Uuid, document: &[u8], face: &[u8]) -> Result<KycOutcome> {
        let outcome = self.verifier.scan(document, face).await.map_err(|e| {
            tracing::warn!(%user_id, error = %e, "Identity verification call failed");
            LendError::upstream("KYC verification failed")
        })?;

        let mapping = map_decision(&outcome, self.manual_review);
        let (verified, status, message) = match mapping {
            DecisionMapping::Apply {
                verified,
                status,
                message,
            } => (verified, status, message),
            DecisionMapping::Unexpected => {
                return Err(LendError::upstream(
                    "Unexpected response from identity verification service",
                ));
            }
        };

        let document_id = outcome.transaction_id.as_deref().unwrap_or(NO_DOCUMENT);
        self.users
            .set_kyc_decision(user_id, verified, status, document_id)
            .await?;

        info!(%user_id, status = %status, "KYC decision applied");

        Ok(KycOutcome {
            status,
            verified,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(decision: &str, warnings: Vec<ScanWarning>) -> ScanOutcome {
        ScanOutcome {
            decision: decision.to_string(),
            transaction_id: Some("scan-1".to_string()),
            warnings,
        }
    }

    #[test]
    fn accept_verifies_the_user() {
        let m = map_decision(&outcome("accept", vec![]), false);
        assert_eq!(
            m,
            DecisionMapping::Apply {
                verified: true,
                status: KycStatus::Verified,
                message: "KYC verification successful! Your identity has been verified."
                    .to_string(),
            }
        );
    }

    #[test]
    fn reject_collects_reasons() {
        let warnings = vec![
            ScanWarning {
                code: "FACE_MISMATCH".to_string(),
                description: "Face does not match document".to_string(),
            },
            ScanWarning {
                code: "DOCUMENT_EXPIRED".to_string(),
                description: "Document has expired".to_string(),
            },
        ];
        let DecisionMapping::Apply {
            verified,
            status,
            message,
        } = map_decision(&outcome("reject", warnings), false)
        else {
            panic!("expected an applied decision");
        };
        assert!(!verified);
        assert_eq!(status, KycStatus::Failed);
        assert_eq!(
            message,
            "Your verification was rejected due to: FACE_MISMATCH: Face does not match document, \
             DOCUMENT_EXPIRED: Document has expired"
        );
    }

    #[test]
    fn reject_without_warnings_has_a_fallback_reason() {
        let DecisionMapping::Apply { message, .. } = map_decision(&outcome("reject", vec![]), false)
        else {
            panic!("expected an applied decision");
        };
        assert!(message.ends_with("Unknown reason"));
    }

    #[test]
    fn review_fails_closed_by_default() {
        let DecisionMapping::Apply { status, verified, .. } =
            map_decision(&outcome("review", vec![]), false)
        else {
            panic!("expected an applied decision");
        };
        assert_eq!(status, KycStatus::Failed);
        assert!(!verified);
    }

    #[test]
    fn review_parks_pending_when_manual_review_is_on() {
        let DecisionMapping::Apply { status, verified, .. } =
            map_decision(&outcome("review", vec![]), true)
        else {
            panic!("expected an applied decision");
        };
        assert_eq!(status, KycStatus::Pending);
        assert!(!verified);
    }

    #[test]
    fn unknown_decisions_apply_nothing() {
        assert_eq!(
            map_decision(&outcome("escalate", vec![]), false),
            DecisionMapping::Unexpected
        );
        assert_eq!(
            map_decision(&outcome("", vec![]), true),
            DecisionMapping::Unexpected
        );
    }
}
