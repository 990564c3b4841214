//! Sphere volume: V = (4/3) * pi * r^3
//!
//! A large radius multiplies any error in pi by r^3, which is what makes
//! digit-level differences in the approximations visible.

use precis_core::{Number, PrecisError, PrecisionContext};

/// Radius used by the demonstration (metres)
pub const DEFAULT_RADIUS: &str = "100";

/// Volume formula with its constant factors evaluated once
#[derive(Debug, Clone)]
pub struct SphereVolume {
    radius: Number,
    radius_cubed: Number,
    four_thirds: Number,
}

impl SphereVolume {
    /// Radius must be strictly positive. 4/3 is a decimal ratio at the
    /// context budget, never a binary float.
    pub fn new(radius: Number, ctx: &PrecisionContext) -> Result<Self, PrecisError> {
        if radius.is_negative() || radius.is_zero() {
            return Err(PrecisError::invalid_radius(format!("{} is not positive", radius)));
        }
        let radius_cubed = radius.pow(3, ctx);
        let four_thirds = Number::from_ratio(4, 3, ctx)?;
        Ok(Self { radius, radius_cubed, four_thirds })
    }

    pub fn parse(radius: &str, ctx: &PrecisionContext) -> Result<Self, PrecisError> {
        let radius = Number::parse(radius, ctx)
            .map_err(|e| PrecisError::invalid_radius(e.to_string()))?;
        Self::new(radius, ctx)
    }

    pub fn radius(&self) -> &Number {
        &self.radius
    }

    /// (4/3) * pi * r^3, multiplied left to right
    pub fn volume(&self, pi: &Number) -> Number {
        self.four_thirds.mul(pi).mul(&self.radius_cubed)
    }
}
