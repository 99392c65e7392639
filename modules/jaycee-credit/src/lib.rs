//! Loan eligibility engine.
//!
//! Pure decisioning over a borrower snapshot: no I/O, no side effects,
//! safe to evaluate repeatedly. The tier policy is an ordered table
//! (descending score thresholds, first match wins) so the numbers can be
//! audited and tested independently of control flow.

pub mod policy;

pub use policy::{evaluate, BorrowerSnapshot, Eligibility, LoanOffer, LOAN_TERM_DAYS, TIERS};
