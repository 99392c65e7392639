use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Repayment window granted on every approved loan.
pub const LOAN_TERM_DAYS: i64 = 30;

/// One row of the credit policy: minimum score, approved-amount cap
/// (None = full requested amount), interest rate as a fraction.
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub min_score: i32,
    pub cap: Option<Decimal>,
    pub rate: Decimal,
}

/// Ordered by descending `min_score`; evaluated first-match-wins.
/// A score below the last row is not eligible at all.
pub const TIERS: [Tier; 4] = [
    Tier { min_score: 750, cap: None, rate: dec!(0.05) },
    Tier { min_score: 600, cap: Some(dec!(200000)), rate: dec!(0.08) },
    Tier { min_score: 400, cap: Some(dec!(50000)), rate: dec!(0.12) },
    Tier { min_score: 250, cap: Some(dec!(10000)), rate: dec!(0.16) },
];

/// What the engine needs to know about a borrower. The caller resolves
/// the user row and open-loan check; absence of the user entirely is the
/// caller's not-found error, not an engine decision.
#[derive(Debug, Clone, Copy)]
pub struct BorrowerSnapshot {
    pub kyc_verified: bool,
    pub credit_score: i32,
    pub has_open_loan: bool,
}

/// Terms offered on an approved request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanOffer {
    pub approved_amount: Decimal,
    pub interest_rate: Decimal,
    pub total_payable: Decimal,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Eligibility {
    Approved(LoanOffer),
    Declined(&'static str),
}

impl Eligibility {
    pub fn is_approved(&self) -> bool {
        matches!(self, Eligibility::Approved(_))
    }
}

pub const MSG_KYC_REQUIRED: &str = "KYC verification is required";
pub const MSG_OPEN_LOAN: &str =
    "You must repay your current loan before requesting another";
pub const MSG_NOT_ELIGIBLE: &str = "Not eligible for a loan at this time";

/// Evaluate the loan policy for a borrower. `requested` must already be
/// validated positive by the caller; `now` anchors the due date.
pub fn evaluate(
    borrower: &BorrowerSnapshot,
    requested: Decimal,
    now: DateTime<Utc>,
) -> Eligibility {
    if !borrower.kyc_verified {
        return Eligibility::Declined(MSG_KYC_REQUIRED);
    }
    if borrower.has_open_loan {
        return Eligibility::Declined(MSG_OPEN_LOAN);
    }

    let Some(tier) = TIERS.iter().find(|t| borrower.credit_score >= t.min_score) else {
        return Eligibility::Declined(MSG_NOT_ELIGIBLE);
    };

    let approved_amount = match tier.cap {
        Some(cap) => requested.min(cap),
        None => requested,
    };
    let total_payable = approved_amount * (Decimal::ONE + tier.rate);

    Eligibility::Approved(LoanOffer {
        approved_amount,
        interest_rate: tier.rate,
        total_payable,
        due_date: now + Duration::days(LOAN_TERM_DAYS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn borrower(score: i32) -> BorrowerSnapshot {
        BorrowerSnapshot {
            kyc_verified: true,
            credit_score: score,
            has_open_loan: false,
        }
    }

    fn offer(e: Eligibility) -> LoanOffer {
        match e {
            Eligibility::Approved(o) => o,
            Eligibility::Declined(msg) => panic!("expected approval, got decline: {msg}"),
        }
    }

    #[test]
    fn unverified_borrower_is_declined() {
        let b = BorrowerSnapshot {
            kyc_verified: false,
            credit_score: 800,
            has_open_loan: false,
        };
        assert_eq!(
            evaluate(&b, dec!(1000), Utc::now()),
            Eligibility::Declined(MSG_KYC_REQUIRED)
        );
    }

    #[test]
    fn open_loan_blocks_regardless_of_score() {
        for score in [100, 250, 400, 600, 750, 900] {
            let b = BorrowerSnapshot {
                kyc_verified: true,
                credit_score: score,
                has_open_loan: true,
            };
            assert_eq!(
                evaluate(&b, dec!(1000), Utc::now()),
                Eligibility::Declined(MSG_OPEN_LOAN)
            );
        }
    }

    #[test]
    fn high_score_gets_full_amount_at_five_percent() {
        let o = offer(evaluate(&borrower(800), dec!(500000), Utc::now()));
        assert_eq!(o.approved_amount, dec!(500000));
        assert_eq!(o.interest_rate, dec!(0.05));
        assert_eq!(o.total_payable, dec!(525000.00));
    }

    #[test]
    fn mid_score_is_capped_at_fifty_thousand() {
        let o = offer(evaluate(&borrower(500), dec!(100000), Utc::now()));
        assert_eq!(o.approved_amount, dec!(50000));
        assert_eq!(o.interest_rate, dec!(0.12));
        assert_eq!(o.total_payable, dec!(56000.00));
    }

    #[test]
    fn low_score_is_declined() {
        assert_eq!(
            evaluate(&borrower(100), dec!(5000), Utc::now()),
            Eligibility::Declined(MSG_NOT_ELIGIBLE)
        );
    }

    #[test]
    fn boundary_scores_land_in_their_tier() {
        assert_eq!(offer(evaluate(&borrower(750), dec!(1), Utc::now())).interest_rate, dec!(0.05));
        assert_eq!(offer(evaluate(&borrower(749), dec!(1), Utc::now())).interest_rate, dec!(0.08));
        assert_eq!(offer(evaluate(&borrower(600), dec!(1), Utc::now())).interest_rate, dec!(0.08));
        assert_eq!(offer(evaluate(&borrower(599), dec!(1), Utc::now())).interest_rate, dec!(0.12));
        assert_eq!(offer(evaluate(&borrower(400), dec!(1), Utc::now())).interest_rate, dec!(0.12));
        assert_eq!(offer(evaluate(&borrower(399), dec!(1), Utc::now())).interest_rate, dec!(0.16));
        assert_eq!(offer(evaluate(&borrower(250), dec!(1), Utc::now())).interest_rate, dec!(0.16));
        assert!(!evaluate(&borrower(249), dec!(1), Utc::now()).is_approved());
    }

    #[test]
    fn caps_are_monotonic_in_score() {
        // Ask for more than any cap; the approved amount must never
        // shrink as the score rises.
        let request = dec!(1000000);
        let mut last = Decimal::ZERO;
        for score in [250, 400, 600, 750] {
            let o = offer(evaluate(&borrower(score), request, Utc::now()));
            assert!(
                o.approved_amount >= last,
                "cap shrank between tiers at score {score}"
            );
            last = o.approved_amount;
        }
    }

    #[test]
    fn total_payable_is_exact() {
        for (score, amount) in [(800, dec!(123457)), (650, dec!(199999)), (450, dec!(333))] {
            let o = offer(evaluate(&borrower(score), amount, Utc::now()));
            assert_eq!(
                o.total_payable,
                o.approved_amount * (Decimal::ONE + o.interest_rate)
            );
        }
    }

    #[test]
    fn requests_under_the_cap_are_not_inflated() {
        let o = offer(evaluate(&borrower(500), dec!(20000), Utc::now()));
        assert_eq!(o.approved_amount, dec!(20000));
    }

    #[test]
    fn due_date_is_thirty_days_out() {
        let now = Utc::now();
        let o = offer(evaluate(&borrower(800), dec!(1000), now));
        assert_eq!(o.due_date, now + Duration::days(30));
    }
}
