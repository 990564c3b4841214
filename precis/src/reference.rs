//! Reference constant
//!
//! The ground truth every approximation is cut from. Kept as text so that
//! truncation can work on digits rather than on a numeric value.

use precis_core::{Number, PrecisError, PrecisionContext};

/// π to 120 fractional digits
pub const PI_REFERENCE: &str = "3.141592653589793238462643383279502884197169399375105820974944592307816406286208998628034825342117067982148086513282306647";

/// Validated `<digits>.<digits>` literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceConstant {
    text: String,
    point: usize,
}

impl ReferenceConstant {
    pub fn new(text: impl Into<String>) -> Result<Self, PrecisError> {
        let text = text.into();
        let (int_part, frac_part) = text
            .split_once('.')
            .ok_or_else(|| PrecisError::invalid_reference(format!("'{}' has no decimal point", text)))?;

        if int_part.is_empty() || frac_part.is_empty() {
            return Err(PrecisError::invalid_reference(format!(
                "'{}' needs digits on both sides of the point",
                text
            )));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(PrecisError::invalid_reference(format!("'{}' contains non-digits", text)));
        }

        let point = int_part.len();
        Ok(Self { text, point })
    }

    /// The built-in π literal
    pub fn pi() -> Self {
        Self {
            text: PI_REFERENCE.to_string(),
            point: 1,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn integer_part(&self) -> &str {
        &self.text[..self.point]
    }

    /// Fractional digits available (L - 2 for a one-digit integer part)
    pub fn fraction_digits(&self) -> usize {
        self.text.len() - self.point - 1
    }

    /// Upper bound on the significant digits of the literal
    pub fn significant_digits(&self) -> usize {
        self.text.len() - 1
    }

    /// Integer part plus the first `n` fractional digits, untouched.
    /// `None` when the literal is shorter than that.
    pub fn digits_prefix(&self, n: usize) -> Option<&str> {
        if n > self.fraction_digits() {
            None
        } else if n == 0 {
            Some(self.integer_part())
        } else {
            Some(&self.text[..self.point + 1 + n])
        }
    }

    /// The `n`-th fractional digit, counting from 1
    pub fn digit_at(&self, n: usize) -> Option<u8> {
        if n == 0 {
            return None;
        }
        self.text
            .as_bytes()
            .get(self.point + n)
            .map(|b| b - b'0')
    }

    /// The full literal as a number; exact under a large enough budget
    pub fn to_number(&self, ctx: &PrecisionContext) -> Result<Number, PrecisError> {
        Ok(Number::parse(&self.text, ctx)?)
    }
}

impl Default for ReferenceConstant {
    fn default() -> Self {
        Self::pi()
    }
}

impl std::fmt::Display for ReferenceConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
