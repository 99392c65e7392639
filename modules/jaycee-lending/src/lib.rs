//! Loan lifecycle, repayment reconciliation, and the KYC gate.
//!
//! External collaborators (disbursement, virtual accounts, identity
//! verification) sit behind traits so the HTTP clients stay swappable
//! and the stateful paths testable.

pub mod kyc;
pub mod loans;
pub mod reconcile;
pub mod traits;

pub use kyc::{KycGate, KycOutcome};
pub use loans::{LoanService, RepaymentDetails};
pub use reconcile::{PaymentNotification, Reconciler};
pub use traits::{
    Disburser, DisbursementReceipt, IdentityVerifier, ScanOutcome, ScanWarning, VirtualAccount,
    VirtualAccountProvider,
};
