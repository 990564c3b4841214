//! Approximation generators
//!
//! Two ways of keeping `n` fractional digits of the reference:
//! cut the digit string, or round the full value half-up.

use crate::ReferenceConstant;
use precis_core::{Number, PrecisError, PrecisionContext};
use serde::Serialize;

/// How the reference was shortened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Truncated,
    Rounded,
}

impl Method {
    /// Table order: truncation first
    pub const ALL: [Method; 2] = [Method::Truncated, Method::Rounded];

    /// Short label used in the text table
    pub fn label(&self) -> &'static str {
        match self {
            Method::Truncated => "Trunc",
            Method::Rounded => "Round",
        }
    }

    /// Legend label used on the chart
    pub fn series_label(&self) -> &'static str {
        match self {
            Method::Truncated => "Truncation Error",
            Method::Rounded => "Rounding Error",
        }
    }

    pub fn approximate(
        &self,
        reference: &ReferenceConstant,
        n: usize,
        ctx: &PrecisionContext,
    ) -> Result<Number, PrecisError> {
        match self {
            Method::Truncated => truncate(reference, n, ctx),
            Method::Rounded => round_half_up(reference, n, ctx),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Keep the first `n` fractional digits as written; never rounds.
pub fn truncate(
    reference: &ReferenceConstant,
    n: usize,
    ctx: &PrecisionContext,
) -> Result<Number, PrecisError> {
    let prefix = reference
        .digits_prefix(n)
        .ok_or_else(|| PrecisError::digits_out_of_range(n, reference.fraction_digits()))?;
    Ok(Number::parse(prefix, ctx)?)
}

/// Parse the whole reference, then quantize to `n` places with ties away from zero.
pub fn round_half_up(
    reference: &ReferenceConstant,
    n: usize,
    ctx: &PrecisionContext,
) -> Result<Number, PrecisError> {
    if n > reference.fraction_digits() {
        return Err(PrecisError::digits_out_of_range(n, reference.fraction_digits()));
    }
    let full = reference.to_number(ctx)?;
    Ok(full.quantize_half_up(n, ctx))
}
