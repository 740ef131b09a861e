use serde::{Deserialize, Serialize};

use super::{finite_cents, require_non_negative, require_term, FinanceError};

/// Monthly payment and lifetime totals for a financed purchase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinanceEstimate {
    pub monthly: f64,
    pub total_cost: f64,
    pub total_interest: f64,
}

/// Loan request as accepted by the HTTP and CLI surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub msrp: f64,
    pub apr_percent: f64,
    pub term_months: u32,
    #[serde(default)]
    pub down_payment: f64,
}

impl LoanTerms {
    pub fn estimate(&self) -> Result<FinanceEstimate, FinanceError> {
        estimate_finance(
            self.msrp,
            self.apr_percent,
            self.term_months,
            self.down_payment,
        )
    }
}

/// Standard amortized loan payment: `M = P * r(1+r)^n / ((1+r)^n - 1)`.
///
/// The principal is `msrp - down_payment` clamped at zero, so a down payment
/// larger than the price yields a zero payment rather than negative
/// amortization. Totals are derived from the unrounded monthly figure and
/// rounded independently.
pub fn estimate_finance(
    msrp: f64,
    apr_percent: f64,
    term_months: u32,
    down_payment: f64,
) -> Result<FinanceEstimate, FinanceError> {
    let msrp = require_non_negative("msrp", msrp)?;
    let apr_percent = require_non_negative("apr_percent", apr_percent)?;
    let down_payment = require_non_negative("down_payment", down_payment)?;
    let payments = require_term(term_months)?;

    let principal = (msrp - down_payment).max(0.0);
    let monthly = amortized_payment(principal, apr_percent, payments)?;

    let total_paid = monthly * payments;
    let total_interest = if apr_percent == 0.0 {
        0.0
    } else {
        total_paid - principal
    };

    Ok(FinanceEstimate {
        monthly: finite_cents("monthly", monthly)?,
        total_cost: finite_cents("total_cost", total_paid + down_payment)?,
        total_interest: finite_cents("total_interest", total_interest)?,
    })
}

fn amortized_payment(principal: f64, apr_percent: f64, payments: f64) -> Result<f64, FinanceError> {
    let rate = apr_percent / 1200.0;
    let growth = (1.0 + rate).powf(payments);

    // A rate too small to move (1+r)^n behaves as interest-free.
    if apr_percent == 0.0 || growth <= 1.0 {
        return Ok(principal / payments);
    }

    let monthly = principal * rate * growth / (growth - 1.0);
    if monthly.is_finite() {
        Ok(monthly)
    } else {
        Err(FinanceError::invalid(
            "apr_percent",
            format!("{apr_percent}% produces a non-finite payment"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amortizes_standard_five_year_loan() {
        let estimate = estimate_finance(30_000.0, 5.5, 60, 3_000.0).expect("valid terms");

        assert_eq!(estimate.monthly, 515.73);
        assert_eq!(estimate.total_cost, 33_943.88);
        assert_eq!(estimate.total_interest, 3_943.88);
    }

    #[test]
    fn zero_apr_splits_principal_evenly() {
        let estimate = estimate_finance(30_000.0, 0.0, 60, 3_000.0).expect("valid terms");

        assert_eq!(estimate.monthly, 450.0);
        assert_eq!(estimate.total_cost, 30_000.0);
        assert_eq!(estimate.total_interest, 0.0);
    }

    #[test]
    fn down_payment_above_price_clamps_principal() {
        let estimate = estimate_finance(20_000.0, 4.9, 48, 25_000.0).expect("valid terms");

        assert_eq!(estimate.monthly, 0.0);
        assert_eq!(estimate.total_interest, 0.0);
        assert_eq!(estimate.total_cost, 25_000.0);
    }

    #[test]
    fn total_cost_tracks_monthly_times_term() {
        for apr in [0.0, 1.9, 5.5, 9.99, 18.0] {
            let estimate = estimate_finance(41_250.0, apr, 72, 4_000.0).expect("valid terms");
            assert!(estimate.total_cost >= estimate.monthly);
            let rebuilt = estimate.monthly * 72.0 + 4_000.0;
            assert!(
                (estimate.total_cost - rebuilt).abs() <= 0.005 * 72.0 + 0.01,
                "apr {apr}: {} vs {rebuilt}",
                estimate.total_cost
            );
        }
    }

    #[test]
    fn oversized_principal_is_rejected_instead_of_overflowing() {
        assert!(matches!(
            estimate_finance(1e307, 5.0, 60, 0.0),
            Err(FinanceError::InvalidArgument { .. })
        ));
        assert!(matches!(
            estimate_finance(f64::MAX, 0.0, 60, 0.0),
            Err(FinanceError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn rejects_zero_term_and_negative_inputs() {
        assert!(matches!(
            estimate_finance(30_000.0, 5.0, 0, 0.0),
            Err(FinanceError::InvalidArgument {
                field: "term_months",
                ..
            })
        ));
        assert!(matches!(
            estimate_finance(-1.0, 5.0, 60, 0.0),
            Err(FinanceError::InvalidArgument { field: "msrp", .. })
        ));
        assert!(matches!(
            estimate_finance(30_000.0, -0.5, 60, 0.0),
            Err(FinanceError::InvalidArgument {
                field: "apr_percent",
                ..
            })
        ));
        assert!(estimate_finance(30_000.0, f64::NAN, 60, 0.0).is_err());
    }

    #[test]
    fn loan_terms_default_down_payment_to_zero() {
        let terms: LoanTerms =
            serde_json::from_str(r#"{"msrp":24000,"apr_percent":0,"term_months":48}"#)
                .expect("terms parse");

        assert_eq!(terms.down_payment, 0.0);
        assert_eq!(terms.estimate().expect("valid").monthly, 500.0);
    }
}
