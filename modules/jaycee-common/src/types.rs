use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Loan lifecycle states. DECLINED is a reserved terminal state: no
/// exposed operation produces it, but it round-trips through storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanStatus {
    Pending,
    Active,
    Repaid,
    Declined,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "PENDING",
            LoanStatus::Active => "ACTIVE",
            LoanStatus::Repaid => "REPAID",
            LoanStatus::Declined => "DECLINED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(LoanStatus::Pending),
            "ACTIVE" => Some(LoanStatus::Active),
            "REPAID" => Some(LoanStatus::Repaid),
            "DECLINED" => Some(LoanStatus::Declined),
            _ => None,
        }
    }

    /// An open loan blocks further requests.
    pub fn is_open(&self) -> bool {
        matches!(self, LoanStatus::Pending | LoanStatus::Active)
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// KYC verification states for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KycStatus {
    Unverified,
    Pending,
    Verified,
    Failed,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Unverified => "UNVERIFIED",
            KycStatus::Pending => "PENDING",
            KycStatus::Verified => "VERIFIED",
            KycStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "UNVERIFIED" => Some(KycStatus::Unverified),
            "PENDING" => Some(KycStatus::Pending),
            "VERIFIED" => Some(KycStatus::Verified),
            "FAILED" => Some(KycStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An employee account as the lending feature sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub kyc_verified: bool,
    pub kyc_status: KycStatus,
    /// Verification provider transaction id from the last KYC scan.
    pub kyc_document: Option<String>,
    pub credit_score: i32,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A loan record. `total_payable` is derived once at creation:
/// `approved_amount * (1 + interest_rate)`, exact in Decimal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub approved_amount: Decimal,
    pub interest_rate: Decimal,
    pub total_payable: Decimal,
    pub due_date: DateTime<Utc>,
    pub status: LoanStatus,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Immutable audit record. Appended on every state-changing action,
/// never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}
