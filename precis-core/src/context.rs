//! Precision context
//!
//! Every `Number` is built and combined under an explicit digit budget.
//! There is no ambient global: callers hold a `PrecisionContext` value and
//! pass it to constructors, so two runs with different budgets never mix.

use crate::NumberError;
use dashu_base::Approximation;
use dashu_float::DBig;

/// Default budget (significant decimal digits)
pub const DEFAULT_DIGITS: usize = 150;

/// Largest budget `PrecisionContext::new` accepts
pub const MAX_DIGITS: usize = 10_000;

/// Significant-digit budget for decimal arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionContext {
    digits: usize,
}

impl PrecisionContext {
    pub fn new(digits: usize) -> Result<Self, NumberError> {
        if digits == 0 || digits > MAX_DIGITS {
            return Err(NumberError::InvalidPrecision(digits));
        }
        Ok(Self { digits })
    }

    /// Number of significant decimal digits kept by every operation
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Fail when the budget cannot hold `required` significant digits
    pub fn ensure_covers(&self, required: usize) -> Result<(), NumberError> {
        if required > self.digits {
            Err(NumberError::InsufficientPrecision {
                required,
                available: self.digits,
            })
        } else {
            Ok(())
        }
    }

    /// Bring a value to the budget, rounding half away from zero.
    pub(crate) fn round(&self, value: DBig) -> DBig {
        value.with_precision(self.digits).value()
    }

    /// Bring a value to the budget, refusing to drop any digit.
    pub(crate) fn exact(&self, value: DBig, literal: &str) -> Result<DBig, NumberError> {
        match value.with_precision(self.digits) {
            Approximation::Exact(v) => Ok(v),
            Approximation::Inexact(..) => Err(NumberError::PrecisionLoss {
                literal: literal.to_string(),
                digits: self.digits,
            }),
        }
    }
}

impl Default for PrecisionContext {
    fn default() -> Self {
        Self { digits: DEFAULT_DIGITS }
    }
}
