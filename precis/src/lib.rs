//! Precis - how digits of pi propagate into a sphere volume
//!
//! Cuts a high-precision reference for pi to `n` fractional digits two
//! ways (truncation and round-half-up), feeds each into
//! V = (4/3) * pi * r^3 and measures the distance from the volume of the
//! full reference. All arithmetic runs on arbitrary precision decimals.

mod reference;
mod approx;
mod formula;
mod experiment;
mod report;

pub use reference::{ReferenceConstant, PI_REFERENCE};
pub use approx::{Method, truncate, round_half_up};
pub use formula::{SphereVolume, DEFAULT_RADIUS};
pub use experiment::{
    Experiment, ExperimentConfig, Outcome, ErrorRow, Series, SeriesPoint,
    required_digits, DEFAULT_DIGIT_COUNTS, GUARD_DIGITS,
};
pub use report::{TableRenderer, render_json};

pub use precis_core::{Number, PrecisError, PrecisionContext};
