use serde::{Deserialize, Serialize};

use super::{finite_cents, require_non_negative, require_term, FinanceError};

/// Monthly payment and cash figures for a closed-end lease.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeaseEstimate {
    pub monthly: f64,
    pub total_cost: f64,
    pub due_at_signing: f64,
}

/// Lease request as accepted by the HTTP and CLI surfaces.
///
/// `residual_fraction` is the share of MSRP retained at lease end, expressed as
/// a fraction (`0.6` for 60%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeaseTerms {
    pub msrp: f64,
    pub residual_fraction: f64,
    pub money_factor: f64,
    pub term_months: u32,
    #[serde(default)]
    pub down_payment: f64,
}

impl LeaseTerms {
    pub fn estimate(&self) -> Result<LeaseEstimate, FinanceError> {
        estimate_lease(
            self.msrp,
            self.residual_fraction,
            self.money_factor,
            self.term_months,
            self.down_payment,
        )
    }
}

/// Convert a percentage residual (`60.0`) into the fraction `estimate_lease` expects.
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Depreciation fee plus finance fee, with the first payment due at signing.
///
/// ```text
/// residual      = msrp * residual_fraction
/// depreciation  = (msrp - down - residual) / term
/// finance fee   = (msrp - down + residual) * money_factor
/// ```
pub fn estimate_lease(
    msrp: f64,
    residual_fraction: f64,
    money_factor: f64,
    term_months: u32,
    down_payment: f64,
) -> Result<LeaseEstimate, FinanceError> {
    let msrp = require_non_negative("msrp", msrp)?;
    let residual_fraction = require_non_negative("residual_fraction", residual_fraction)?;
    let money_factor = require_non_negative("money_factor", money_factor)?;
    let down_payment = require_non_negative("down_payment", down_payment)?;
    let payments = require_term(term_months)?;

    if residual_fraction > 1.0 {
        return Err(FinanceError::invalid(
            "residual_fraction",
            format!("expected a fraction between 0 and 1 (got {residual_fraction}); divide percentages by 100"),
        ));
    }

    let adjusted_cap_cost = msrp - down_payment;
    let residual_value = msrp * residual_fraction;

    let depreciation_fee = (adjusted_cap_cost - residual_value) / payments;
    let finance_fee = (adjusted_cap_cost + residual_value) * money_factor;
    let monthly = depreciation_fee + finance_fee;

    Ok(LeaseEstimate {
        monthly: finite_cents("monthly", monthly)?,
        total_cost: finite_cents("total_cost", monthly * payments + down_payment)?,
        due_at_signing: finite_cents("due_at_signing", down_payment + monthly)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::apr_to_money_factor;

    #[test]
    fn thirty_six_month_lease_with_down_payment() {
        let estimate = estimate_lease(30_000.0, 0.6, apr_to_money_factor(5.5), 36, 3_000.0)
            .expect("valid terms");

        assert_eq!(estimate.monthly, 353.13);
        assert_eq!(estimate.total_cost, 15_712.5);
        assert_eq!(estimate.due_at_signing, 3_353.13);
    }

    #[test]
    fn zero_money_factor_is_pure_depreciation() {
        let estimate = estimate_lease(30_000.0, 0.6, 0.0, 36, 0.0).expect("valid terms");

        assert_eq!(estimate.monthly, 333.33);
        assert_eq!(estimate.total_cost, 12_000.0);
        assert_eq!(estimate.due_at_signing, 333.33);
    }

    #[test]
    fn percentage_residual_is_rejected() {
        let err = estimate_lease(30_000.0, 60.0, 0.0025, 36, 0.0).expect_err("percent rejected");

        assert!(matches!(
            err,
            FinanceError::InvalidArgument {
                field: "residual_fraction",
                ..
            }
        ));
        assert!(estimate_lease(30_000.0, percent_to_fraction(60.0), 0.0025, 36, 0.0).is_ok());
    }

    #[test]
    fn overflowing_finance_fee_is_rejected() {
        let err = estimate_lease(1e300, 0.5, 1e10, 36, 0.0).expect_err("overflow rejected");
        assert!(matches!(
            err,
            FinanceError::InvalidArgument {
                field: "monthly",
                ..
            }
        ));
    }

    #[test]
    fn zero_term_is_rejected() {
        assert!(matches!(
            estimate_lease(30_000.0, 0.55, 0.002, 0, 0.0),
            Err(FinanceError::InvalidArgument {
                field: "term_months",
                ..
            })
        ));
    }
}
