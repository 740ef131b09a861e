//! Loan and lease payment estimates.
//!
//! Every function here is pure and rejects degenerate input with
//! [`FinanceError::InvalidArgument`] instead of letting `NaN` or infinities leak
//! into payment figures. Monetary outputs are rounded to cents (half-up).

mod format;
mod lease;
mod loan;

pub use format::{format_currency, format_monthly};
pub use lease::{estimate_lease, percent_to_fraction, LeaseEstimate, LeaseTerms};
pub use loan::{estimate_finance, FinanceEstimate, LoanTerms};

/// Divisor relating an annual percentage rate to a lease money factor.
pub const MONEY_FACTOR_DIVISOR: f64 = 2400.0;

/// Error raised when an estimate cannot be computed from the supplied terms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FinanceError {
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl FinanceError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

/// Convert an APR (e.g. `5.5` for 5.5%) into a lease money factor.
pub fn apr_to_money_factor(apr: f64) -> f64 {
    apr / MONEY_FACTOR_DIVISOR
}

/// Convert a lease money factor back into an APR percentage.
pub fn money_factor_to_apr(money_factor: f64) -> f64 {
    money_factor * MONEY_FACTOR_DIVISOR
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64, FinanceError> {
    if !value.is_finite() {
        return Err(FinanceError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(FinanceError::invalid(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(value)
}

/// Round to cents, rejecting results too large to represent.
pub(crate) fn finite_cents(field: &'static str, value: f64) -> Result<f64, FinanceError> {
    let rounded = round_cents(value);
    if rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(FinanceError::invalid(
            field,
            "result is too large to represent; inputs are out of range",
        ))
    }
}

pub(crate) fn require_term(term_months: u32) -> Result<f64, FinanceError> {
    if term_months == 0 {
        return Err(FinanceError::invalid(
            "term_months",
            "must be at least one month",
        ));
    }
    Ok(f64::from(term_months))
}
