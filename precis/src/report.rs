//! Report rendering
//!
//! Renders an experiment outcome as a fixed-width text table or as JSON.

use crate::experiment::{ErrorRow, Outcome};
use precis_core::PrecisError;

/// Width of the dashed rule under the header
const RULE_WIDTH: usize = 85;

/// Fixed-width text table renderer
pub struct TableRenderer {
    volume_chars: usize,
    error_digits: usize,
    show_baseline: bool,
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            volume_chars: 25,
            error_digits: 2,
            show_baseline: false,
        }
    }

    /// Append a line with the full baseline volume
    pub fn with_baseline(mut self, show: bool) -> Self {
        self.show_baseline = show;
        self
    }

    /// Characters of the volume shown before the ellipsis
    pub fn with_volume_chars(mut self, chars: usize) -> Self {
        self.volume_chars = chars;
        self
    }

    /// Render header, rule and one line per row
    pub fn render(&self, outcome: &Outcome) -> String {
        let mut output = String::new();

        output.push_str(&self.header());
        output.push('\n');
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');

        for row in &outcome.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        if self.show_baseline {
            output.push('\n');
            output.push_str(&format!("Baseline volume: {}\n", outcome.baseline));
        }

        output
    }

    pub fn header(&self) -> String {
        format!(
            "{:<10} | {:<10} | {:<30} | {}",
            "Decimals", "Type", "Calculated Volume", "Error (Difference)"
        )
    }

    pub fn render_row(&self, row: &ErrorRow) -> String {
        let volume = row.volume.as_plain();
        let shown = &volume[..volume.len().min(self.volume_chars)];
        format!(
            "{:<10} | {:<10} | {}... | {}",
            row.digits,
            row.method.label(),
            shown,
            row.error.as_scientific(self.error_digits)
        )
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole outcome as pretty-printed JSON
pub fn render_json(outcome: &Outcome) -> Result<String, PrecisError> {
    serde_json::to_string_pretty(outcome)
        .map_err(|e| PrecisError::internal(format!("JSON encoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Experiment, ReferenceConstant};

    fn outcome() -> Outcome {
        Experiment::new(ReferenceConstant::pi()).run().unwrap()
    }

    #[test]
    fn test_header_layout() {
        let header = TableRenderer::new().header();
        assert_eq!(
            header,
            "Decimals   | Type       | Calculated Volume              | Error (Difference)"
        );
    }

    #[test]
    fn test_table_lines() {
        let table = TableRenderer::new().render(&outcome());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "-".repeat(85));
        assert_eq!(lines[2], "20         | Trunc      | 4188790.20478639098461333... | 3.52E-15");
        assert_eq!(lines[4], "40         | Trunc      | 4188790.20478639098461685... | 9.25E-35");
        assert_eq!(lines[9], "100        | Round      | 4188790.20478639098461685... | 2.38E-95");
    }

    #[test]
    fn test_baseline_line() {
        let table = TableRenderer::new().with_baseline(true).render(&outcome());
        let last = table.lines().last().unwrap();
        assert!(last.starts_with("Baseline volume: 4188790.2047863909846168578"));
    }

    #[test]
    fn test_volume_chars() {
        let out = outcome();
        let line = TableRenderer::new().with_volume_chars(7).render_row(&out.rows[0]);
        assert!(line.contains("| 4188790... |"), "{}", line);
    }

    #[test]
    fn test_json() {
        let json = render_json(&outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["precision"], 150);
        assert_eq!(value["radius"], "100");
        assert_eq!(value["rows"].as_array().unwrap().len(), 8);
        assert_eq!(value["rows"][1]["method"], "rounded");
        assert_eq!(value["truncation"]["points"][3]["digits"], 100);
        assert!(value["baseline"].as_str().unwrap().starts_with("4188790.2047"));
    }
}
