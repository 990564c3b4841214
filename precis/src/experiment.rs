//! Experiment driver
//!
//! Computes the baseline volume from the full reference, then for every
//! digit count measures how far the truncated and the rounded
//! approximations land from it.

use crate::formula::{SphereVolume, DEFAULT_RADIUS};
use crate::{Method, ReferenceConstant};
use precis_core::{Number, PrecisError, PrecisionContext, DEFAULT_DIGITS};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Extra digits kept beyond the strict minimum budget
pub const GUARD_DIGITS: usize = 10;

/// Digit counts used when none are configured
pub const DEFAULT_DIGIT_COUNTS: [usize; 4] = [20, 40, 60, 100];

/// Tunable parameters of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Significant digits for every decimal operation
    pub precision: usize,
    /// Sphere radius as a decimal literal
    pub radius: String,
    /// Fractional digits of pi to keep, ascending
    pub digit_counts: Vec<usize>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_DIGITS,
            radius: DEFAULT_RADIUS.to_string(),
            digit_counts: DEFAULT_DIGIT_COUNTS.to_vec(),
        }
    }
}

/// Smallest budget that holds pi times r^3 without rounding: the digits of
/// the reference plus three times the wider of the radius's significant and
/// integer digits, one digit for 4/3, and the guard digits.
pub fn required_digits(reference: &ReferenceConstant, radius: &Number) -> usize {
    let radius_digits = radius.significant_digits().max(radius.integer_digits());
    reference.significant_digits() + 3 * radius_digits + 1 + GUARD_DIGITS
}

/// One line of the result table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRow {
    pub digits: usize,
    pub method: Method,
    pub volume: Number,
    pub error: Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub digits: usize,
    pub error: Number,
}

/// Errors of one method, in ascending digit order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub method: Method,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    fn new(method: Method) -> Self {
        Self { method, points: Vec::new() }
    }

    /// True when no later point has a larger error than an earlier one
    pub fn is_non_increasing(&self) -> bool {
        self.points.windows(2).all(|w| w[1].error <= w[0].error)
    }
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub precision: usize,
    pub radius: Number,
    pub baseline: Number,
    pub rows: Vec<ErrorRow>,
    pub truncation: Series,
    pub rounding: Series,
}

impl Outcome {
    pub fn series(&self, method: Method) -> &Series {
        match method {
            Method::Truncated => &self.truncation,
            Method::Rounded => &self.rounding,
        }
    }

    /// Whether rounding was at least as close as truncation at every count.
    /// Usually true, but a run of digits can make truncation win.
    pub fn rounding_never_worse(&self) -> bool {
        self.truncation
            .points
            .iter()
            .zip(&self.rounding.points)
            .all(|(t, r)| r.error <= t.error)
    }
}

/// Validated inputs, ready to run
struct Plan {
    ctx: PrecisionContext,
    formula: SphereVolume,
}

/// Precision-loss experiment
pub struct Experiment {
    reference: ReferenceConstant,
    precision: usize,
    radius: String,
    digit_counts: Vec<usize>,
}

impl Experiment {
    pub fn new(reference: ReferenceConstant) -> Self {
        Self::from_config(reference, &ExperimentConfig::default())
    }

    pub fn from_config(reference: ReferenceConstant, config: &ExperimentConfig) -> Self {
        Self {
            reference,
            precision: config.precision,
            radius: config.radius.clone(),
            digit_counts: config.digit_counts.clone(),
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_radius(mut self, radius: impl Into<String>) -> Self {
        self.radius = radius.into();
        self
    }

    pub fn with_digit_counts(mut self, digit_counts: Vec<usize>) -> Self {
        self.digit_counts = digit_counts;
        self
    }

    pub fn config(&self) -> ExperimentConfig {
        ExperimentConfig {
            precision: self.precision,
            radius: self.radius.clone(),
            digit_counts: self.digit_counts.clone(),
        }
    }

    /// Reject a configuration before any approximation is generated
    pub fn validate(&self) -> Result<(), PrecisError> {
        self.plan().map(|_| ())
    }

    fn plan(&self) -> Result<Plan, PrecisError> {
        let ctx = PrecisionContext::new(self.precision)?;

        if self.digit_counts.is_empty() {
            return Err(PrecisError::invalid_digits("no digit counts given"));
        }
        if let Some(w) = self.digit_counts.windows(2).find(|w| w[1] <= w[0]) {
            return Err(PrecisError::invalid_digits(format!(
                "counts must be strictly ascending, found {} then {}",
                w[0], w[1]
            )));
        }
        let available = self.reference.fraction_digits();
        if let Some(&n) = self.digit_counts.iter().find(|&&n| n > available) {
            return Err(PrecisError::digits_out_of_range(n, available));
        }

        let formula = SphereVolume::parse(&self.radius, &ctx)?;
        ctx.ensure_covers(required_digits(&self.reference, formula.radius()))?;

        Ok(Plan { ctx, formula })
    }

    pub fn run(&self) -> Result<Outcome, PrecisError> {
        let Plan { ctx, formula } = self.plan()?;
        info!(
            precision = ctx.digits(),
            radius = %self.radius,
            digits = ?self.digit_counts,
            "running precision experiment"
        );

        let best = self.reference.to_number(&ctx)?;
        let baseline = formula.volume(&best);
        debug!(baseline = %baseline, "baseline volume");

        let mut rows = Vec::with_capacity(self.digit_counts.len() * Method::ALL.len());
        let mut truncation = Series::new(Method::Truncated);
        let mut rounding = Series::new(Method::Rounded);

        for &n in &self.digit_counts {
            for method in Method::ALL {
                let pi = method.approximate(&self.reference, n, &ctx)?;
                let volume = formula.volume(&pi);
                let error = volume.sub(&baseline).abs();
                debug!(digits = n, method = method.label(), error = %error.as_scientific(2), "measured");

                let series = match method {
                    Method::Truncated => &mut truncation,
                    Method::Rounded => &mut rounding,
                };
                series.points.push(SeriesPoint { digits: n, error: error.clone() });
                rows.push(ErrorRow { digits: n, method, volume, error });
            }
        }

        info!(rows = rows.len(), "experiment complete");
        Ok(Outcome {
            precision: ctx.digits(),
            radius: formula.radius().clone(),
            baseline,
            rows,
            truncation,
            rounding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precis_core::{codes, MAX_DIGITS};

    fn errors(series: &Series) -> Vec<String> {
        series.points.iter().map(|p| p.error.as_scientific(2)).collect()
    }

    #[test]
    fn test_default_run_matches_demonstration() {
        let outcome = Experiment::new(ReferenceConstant::pi()).run().unwrap();
        assert_eq!(
            errors(&outcome.truncation),
            ["3.52E-15", "9.25E-35", "7.90E-55", "1.10E-94"]
        );
        assert_eq!(
            errors(&outcome.rounding),
            ["3.52E-15", "4.08E-35", "5.44E-55", "2.38E-95"]
        );
        assert!(outcome.baseline.as_plain().starts_with("4188790.20478639098461685784437267"));
    }

    #[test]
    fn test_rows_in_table_order() {
        let outcome = Experiment::new(ReferenceConstant::pi()).run().unwrap();
        let order: Vec<(usize, Method)> = outcome.rows.iter().map(|r| (r.digits, r.method)).collect();
        assert_eq!(order.len(), 8);
        assert_eq!(order[0], (20, Method::Truncated));
        assert_eq!(order[1], (20, Method::Rounded));
        assert_eq!(order[7], (100, Method::Rounded));
        assert!(outcome.rows[0].volume.as_plain().starts_with("4188790.20478639098461333"));
    }

    #[test]
    fn test_errors_non_increasing() {
        let counts: Vec<usize> = (0..=12).map(|i| i * 10).collect();
        let outcome = Experiment::new(ReferenceConstant::pi())
            .with_digit_counts(counts)
            .run()
            .unwrap();
        assert!(outcome.truncation.is_non_increasing());
        assert!(outcome.rounding.is_non_increasing());
        assert!(outcome.rounding_never_worse());
    }

    #[test]
    fn test_full_length_has_zero_error() {
        let pi = ReferenceConstant::pi();
        let n = pi.fraction_digits();
        let outcome = Experiment::new(pi).with_digit_counts(vec![n]).run().unwrap();
        assert!(outcome.rows.iter().all(|r| r.error.is_zero()));
    }

    #[test]
    fn test_baseline_reproducible() {
        let experiment = Experiment::new(ReferenceConstant::pi());
        let first = experiment.run().unwrap();
        let second = experiment.run().unwrap();
        assert_eq!(first.baseline, second.baseline);
        assert_eq!(first.baseline.as_plain(), second.baseline.as_plain());
    }

    #[test]
    fn test_small_reference_rounding_equals_truncation() {
        let reference = ReferenceConstant::new("3.14159").unwrap();
        let outcome = Experiment::new(reference)
            .with_precision(50)
            .with_radius("10")
            .with_digit_counts(vec![2])
            .run()
            .unwrap();
        assert!(outcome.baseline.as_plain().starts_with("4188.7866666"));
        let trunc = &outcome.rows[0];
        let round = &outcome.rows[1];
        assert!(trunc.volume.as_plain().starts_with("4186.6666666"));
        assert_eq!(trunc.error.as_scientific(2), "2.12E+0");
        assert_eq!(trunc.volume, round.volume);
        assert_eq!(trunc.error, round.error);
    }

    #[test]
    fn test_small_reference_rounding_differs() {
        let reference = ReferenceConstant::new("3.146").unwrap();
        let outcome = Experiment::new(reference)
            .with_precision(50)
            .with_radius("10")
            .with_digit_counts(vec![2])
            .run()
            .unwrap();
        let trunc = &outcome.rows[0];
        let round = &outcome.rows[1];
        assert_ne!(trunc.volume, round.volume);
        assert!(round.error < trunc.error);
        assert_eq!(trunc.error.as_scientific(2), "8.00E+0");
        assert_eq!(round.error.as_scientific(2), "5.33E+0");
    }

    #[test]
    fn test_rejects_too_many_digits() {
        let err = Experiment::new(ReferenceConstant::pi())
            .with_digit_counts(vec![20, 121])
            .validate()
            .unwrap_err();
        assert_eq!(err.code, codes::INVALID_DIGITS);
    }

    #[test]
    fn test_rejects_unordered_or_empty_counts() {
        for counts in [vec![], vec![40, 20], vec![20, 20]] {
            let err = Experiment::new(ReferenceConstant::pi())
                .with_digit_counts(counts)
                .validate()
                .unwrap_err();
            assert_eq!(err.code, codes::INVALID_DIGITS);
        }
    }

    #[test]
    fn test_rejects_small_budget() {
        let err = Experiment::new(ReferenceConstant::pi())
            .with_precision(100)
            .run()
            .unwrap_err();
        assert_eq!(err.code, codes::INSUFFICIENT_PRECISION);
    }

    #[test]
    fn test_rejects_zero_budget() {
        let err = Experiment::new(ReferenceConstant::pi())
            .with_precision(0)
            .validate()
            .unwrap_err();
        assert_eq!(err.code, codes::INVALID_PRECISION);
    }

    #[test]
    fn test_rejects_oversized_budget() {
        for precision in [MAX_DIGITS + 1, usize::MAX] {
            let err = Experiment::new(ReferenceConstant::pi())
                .with_precision(precision)
                .validate()
                .unwrap_err();
            assert_eq!(err.code, codes::INVALID_PRECISION);
        }
    }

    #[test]
    fn test_long_radius_needs_larger_budget() {
        let radius = format!("1.{}", "3".repeat(53));
        let err = Experiment::new(ReferenceConstant::pi())
            .with_radius(radius.clone())
            .validate()
            .unwrap_err();
        assert_eq!(err.code, codes::INSUFFICIENT_PRECISION);

        // 121 + 3 * 54 + 1 + 10
        assert!(Experiment::new(ReferenceConstant::pi())
            .with_radius(radius)
            .with_precision(294)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_rejects_bad_radius() {
        let err = Experiment::new(ReferenceConstant::pi())
            .with_radius("-5")
            .validate()
            .unwrap_err();
        assert_eq!(err.code, codes::INVALID_RADIUS);
    }

    #[test]
    fn test_required_digits() {
        let ctx = PrecisionContext::default();
        let radius = Number::parse("100", &ctx).unwrap();
        assert_eq!(required_digits(&ReferenceConstant::pi(), &radius), 141);
        let fractional = Number::parse("12.5", &ctx).unwrap();
        assert_eq!(required_digits(&ReferenceConstant::pi(), &fractional), 141);
        let long = Number::parse("2.71828", &ctx).unwrap();
        assert_eq!(required_digits(&ReferenceConstant::pi(), &long), 150);
    }

    #[test]
    fn test_config_round_trip_through_builder() {
        let config = ExperimentConfig {
            precision: 200,
            radius: "50".to_string(),
            digit_counts: vec![10, 30],
        };
        let experiment = Experiment::from_config(ReferenceConstant::pi(), &config);
        assert_eq!(experiment.config(), config);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: ExperimentConfig = serde_json::from_str(r#"{"radius": "10"}"#).unwrap();
        assert_eq!(config.radius, "10");
        assert_eq!(config.precision, 150);
        assert_eq!(config.digit_counts, vec![20, 40, 60, 100]);
    }
}
