//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-float (DBig) for arbitrary precision decimal arithmetic.
//! DBig rounds half away from zero; only the scientific rendering rounds
//! its mantissa half-even.

use crate::PrecisionContext;
use dashu_float::ops::Abs;
use dashu_float::DBig;
use dashu_int::IBig;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid precision: {0} digits")]
    InvalidPrecision(usize),

    #[error("Literal '{literal}' does not fit in {digits} significant digits")]
    PrecisionLoss { literal: String, digits: usize },

    #[error("Precision budget too small: need {required} digits, have {available}")]
    InsufficientPrecision { required: usize, available: usize },
}

/// Arbitrary precision decimal number
///
/// Built on dashu-float's DBig. Every value is created under a
/// `PrecisionContext`; arithmetic keeps the larger budget of its operands.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    /// Parse a decimal literal exactly
    /// Supports: "123", "3.14", "-42", and the ratio form "4/3"
    ///
    /// Plain literals must fit the budget without rounding. A ratio is
    /// evaluated as a division and therefore rounded to the budget.
    pub fn parse(s: &str, ctx: &PrecisionContext) -> Result<Self, NumberError> {
        let s = s.trim();

        if let Some((num_str, den_str)) = s.split_once('/') {
            let num = Self::parse(num_str, ctx)?;
            let den = Self::parse(den_str, ctx)?;
            return num.checked_div(&den);
        }

        let inner: DBig = s.parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Ok(Self { inner: ctx.exact(inner, s)? })
    }

    /// Create from i64 with the context budget
    pub fn from_i64(n: i64, ctx: &PrecisionContext) -> Self {
        Self { inner: ctx.round(DBig::from(n)) }
    }

    /// Create from ratio, rounded to the context budget
    pub fn from_ratio(num: i64, den: i64, ctx: &PrecisionContext) -> Result<Self, NumberError> {
        Self::from_i64(num, ctx).checked_div(&Self::from_i64(den, ctx))
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    /// Count of digits left of the decimal point of |x| (0 when |x| < 1)
    pub fn integer_digits(&self) -> usize {
        let (significand, exponent) = self.parts();
        if significand == IBig::ZERO {
            return 0;
        }
        let len = magnitude(significand).to_string().len() as isize;
        (len + exponent).max(0) as usize
    }

    /// Count of significant digits, trailing zeros excluded (0 for zero)
    pub fn significant_digits(&self) -> usize {
        let digits = magnitude(self.parts().0).to_string();
        let trimmed = digits.trim_end_matches('0');
        trimmed.len()
    }

    // ========== Basic Arithmetic ==========

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Non-negative integer power by repeated multiplication
    pub fn pow(&self, exp: u32, ctx: &PrecisionContext) -> Self {
        let mut result = Self::from_i64(1, ctx);
        for _ in 0..exp {
            result = result.mul(self);
        }
        result
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self { inner: Abs::abs(self.inner.clone()) }
    }

    /// Round to exactly `places` fractional digits, ties away from zero.
    ///
    /// Works on the integer significand so the cut happens at a decimal
    /// digit boundary and never through a binary approximation.
    pub fn quantize_half_up(&self, places: usize, ctx: &PrecisionContext) -> Self {
        let (significand, exponent) = self.parts();
        let target = -(places as isize);
        if exponent >= target {
            return self.clone();
        }

        let dropped = (target - exponent) as usize;
        let negative = significand < IBig::ZERO;
        let kept = round_half_away(&magnitude(significand), dropped);
        let kept = if negative { -kept } else { kept };

        Self { inner: ctx.round(DBig::from_parts(kept, target)) }
    }

    // ========== Display ==========

    /// Full positional rendering, no exponent
    pub fn as_plain(&self) -> String {
        let (significand, exponent) = self.parts();
        let sign = if significand < IBig::ZERO { "-" } else { "" };
        let digits = magnitude(significand).to_string();

        if exponent >= 0 {
            return format!("{}{}{}", sign, digits, "0".repeat(exponent as usize));
        }

        let frac = (-exponent) as usize;
        if digits.len() > frac {
            let (int_part, frac_part) = digits.split_at(digits.len() - frac);
            format!("{}{}.{}", sign, int_part, frac_part)
        } else {
            format!("{}0.{}{}", sign, "0".repeat(frac - digits.len()), digits)
        }
    }

    /// Scientific rendering with `frac_digits` mantissa decimals, e.g. "3.52E-15".
    /// Mantissa ties go to the even digit, as Python's `{:.2E}` does.
    pub fn as_scientific(&self, frac_digits: usize) -> String {
        let (significand, exponent) = self.parts();
        if significand == IBig::ZERO {
            return if frac_digits == 0 {
                "0E+0".to_string()
            } else {
                format!("0.{}E+0", "0".repeat(frac_digits))
            };
        }

        let negative = significand < IBig::ZERO;
        let abs_sig = magnitude(significand);
        let len = abs_sig.to_string().len();
        let wanted = frac_digits + 1;
        let mut adjusted = exponent + len as isize - 1;

        let mantissa = if len > wanted {
            let rounded = round_half_even(&abs_sig, len - wanted);
            // 9.995 -> 10.00 carries into a new leading digit
            if rounded.to_string().len() > wanted {
                adjusted += 1;
                rounded / IBig::from(10u8)
            } else {
                rounded
            }
        } else {
            abs_sig * IBig::from(10u8).pow(wanted - len)
        };

        let text = mantissa.to_string();
        let (lead, rest) = text.split_at(1);
        let sign = if negative { "-" } else { "" };
        let exp_sign = if adjusted < 0 { '-' } else { '+' };

        if rest.is_empty() {
            format!("{}{}E{}{}", sign, lead, exp_sign, adjusted.unsigned_abs())
        } else {
            format!("{}{}.{}E{}{}", sign, lead, rest, exp_sign, adjusted.unsigned_abs())
        }
    }

    /// Convert to f64 (lossy; for charts only)
    pub fn to_f64(&self) -> Option<f64> {
        self.as_scientific(16)
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
    }

    // ========== Internals ==========

    fn parts(&self) -> (IBig, isize) {
        self.inner.clone().into_repr().into_parts()
    }
}

fn magnitude(significand: IBig) -> IBig {
    if significand < IBig::ZERO {
        -significand
    } else {
        significand
    }
}

/// Drop `dropped` trailing digits of a non-negative integer, ties away from zero
fn round_half_away(magnitude: &IBig, dropped: usize) -> IBig {
    let divisor = IBig::from(10u8).pow(dropped);
    let quotient = magnitude / &divisor;
    let remainder = magnitude % &divisor;
    if remainder * IBig::from(2u8) >= divisor {
        quotient + IBig::ONE
    } else {
        quotient
    }
}

/// Drop `dropped` trailing digits of a non-negative integer, ties to even
fn round_half_even(magnitude: &IBig, dropped: usize) -> IBig {
    let divisor = IBig::from(10u8).pow(dropped);
    let quotient = magnitude / &divisor;
    let twice = (magnitude % &divisor) * IBig::from(2u8);
    let odd = &quotient % IBig::from(2u8) == IBig::ONE;
    if twice > divisor || (twice == divisor && odd) {
        quotient + IBig::ONE
    } else {
        quotient
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_plain())
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_plain())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // DBig implements PartialOrd, use it and treat None as Equal
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PrecisionContext {
        PrecisionContext::new(50).unwrap()
    }

    #[test]
    fn test_round_half_away() {
        let n = IBig::from(31415u32);
        assert_eq!(round_half_away(&n, 1), IBig::from(3142u32));
        assert_eq!(round_half_away(&n, 2), IBig::from(314u32));
        assert_eq!(round_half_away(&IBig::from(25u8), 1), IBig::from(3u8));
        assert_eq!(round_half_away(&IBig::from(24u8), 1), IBig::from(2u8));
    }

    #[test]
    fn test_quantize_keeps_short_values() {
        let n = Number::parse("3.1", &ctx()).unwrap();
        assert_eq!(n.quantize_half_up(4, &ctx()), n);
    }

    #[test]
    fn test_quantize_negative_ties_away_from_zero() {
        let n = Number::parse("-2.345", &ctx()).unwrap();
        assert_eq!(n.quantize_half_up(2, &ctx()).as_plain(), "-2.35");
    }

    #[test]
    fn test_quantize_carry_through_nines() {
        let n = Number::parse("0.9996", &ctx()).unwrap();
        assert_eq!(n.quantize_half_up(3, &ctx()), Number::from_i64(1, &ctx()));
    }

    #[test]
    fn test_scientific_carry() {
        let n = Number::parse("9.996", &ctx()).unwrap();
        assert_eq!(n.as_scientific(2), "1.00E+1");
    }

    #[test]
    fn test_scientific_pads_short_mantissa() {
        let n = Number::parse("0.005", &ctx()).unwrap();
        assert_eq!(n.as_scientific(2), "5.00E-3");
        assert_eq!(n.as_scientific(0), "5E-3");
    }

    #[test]
    fn test_scientific_ties_to_even() {
        assert_eq!(Number::parse("1.125", &ctx()).unwrap().as_scientific(2), "1.12E+0");
        assert_eq!(Number::parse("1.135", &ctx()).unwrap().as_scientific(2), "1.14E+0");
        assert_eq!(Number::parse("-2.5", &ctx()).unwrap().as_scientific(0), "-2E+0");
        assert_eq!(Number::parse("9.995", &ctx()).unwrap().as_scientific(2), "1.00E+1");
        assert_eq!(Number::parse("1.1251", &ctx()).unwrap().as_scientific(2), "1.13E+0");
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(&IBig::from(25u8), 1), IBig::from(2u8));
        assert_eq!(round_half_even(&IBig::from(35u8), 1), IBig::from(4u8));
        assert_eq!(round_half_even(&IBig::from(26u8), 1), IBig::from(3u8));
        assert_eq!(round_half_even(&IBig::from(1250u32), 2), IBig::from(12u8));
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(Number::parse("100", &ctx()).unwrap().significant_digits(), 1);
        assert_eq!(Number::parse("12.50", &ctx()).unwrap().significant_digits(), 3);
        assert_eq!(Number::parse("0.00123", &ctx()).unwrap().significant_digits(), 3);
        assert_eq!(Number::from_i64(0, &ctx()).significant_digits(), 0);
    }
}
