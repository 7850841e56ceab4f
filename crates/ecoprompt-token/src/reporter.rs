//! Batch optimization reports.
//!
//! Formats per-prompt savings and the aggregated statistics of a batch as
//! plain text.

use ecoprompt_core::{OptimizationResult, OptimizationStats};
use serde::Serialize;

const PREVIEW_CHARS: usize = 48;

/// Results of a batch together with their aggregate figures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub stats: OptimizationStats,
    pub results: Vec<OptimizationResult>,
}

impl BatchReport {
    /// Create a report from batch results.
    pub fn new(results: Vec<OptimizationResult>) -> Self {
        Self {
            stats: OptimizationStats::from_results(&results),
            results,
        }
    }

    /// Format the report as a human-readable string.
    pub fn to_display_string(&self) -> String {
        let mut output = String::new();

        output.push_str("Batch Optimization Report\n");
        output.push_str(&format!("{}\n", "─".repeat(50)));
        output.push_str(&format!("Prompts:          {:>10}\n", self.stats.total_optimizations));
        output.push_str(&format!("Tokens saved:     {:>10}\n", self.stats.total_tokens_saved));
        output.push_str(&format!("Avg tokens saved: {:>10.1}\n", self.stats.avg_tokens_saved));
        output.push_str(&format!("Avg quality:      {:>10.2}\n", self.stats.avg_quality_score));
        output.push_str(&format!("CO2 saved:        {:>8.3}mg\n", self.stats.total_co2_saved * 1000.0));
        output.push_str(&format!("Energy saved:     {:>10.3e} kWh\n", self.stats.total_energy_saved));
        output.push_str(&format!("{}\n", "─".repeat(50)));

        if self.results.is_empty() {
            return output;
        }

        output.push_str("\nPer prompt:\n");
        let total_before: usize = self.results.iter().map(|r| r.tokens_before).sum();

        for (i, result) in self.results.iter().enumerate() {
            let pct = if result.tokens_before > 0 {
                result.tokens_saved * 100 / result.tokens_before as i64
            } else {
                0
            };

            // Bar length is the prompt's share of the batch's input tokens.
            let share = if total_before > 0 {
                result.tokens_before * 20 / total_before
            } else {
                0
            };
            let bar = "█".repeat(share.max(1));

            let marker = if result.is_already_optimal() { " (already optimal)" } else { "" };

            output.push_str(&format!(
                "  {:>3}. {:>4} → {:<4} ({:>3}%) {} {}{}\n",
                i + 1,
                result.tokens_before,
                result.tokens_after,
                pct,
                bar,
                preview(&result.original),
                marker
            ));
        }

        output
    }
}

/// First characters of a prompt, on one line.
fn preview(text: &str) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::optimize;

    #[test]
    fn test_report_totals() {
        let report = BatchReport::new(vec![
            optimize("Please explain the very basics of Rust"),
            optimize("Explain quantum computing"),
        ]);
        assert_eq!(report.stats.total_optimizations, 2);

        let text = report.to_display_string();
        assert!(text.starts_with("Batch Optimization Report"));
        assert!(text.contains("Per prompt:"));
        assert!(text.contains("(already optimal)"));
    }

    #[test]
    fn test_empty_report() {
        let text = BatchReport::new(Vec::new()).to_display_string();
        assert!(text.contains("Prompts:"));
        assert!(!text.contains("Per prompt:"));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(100);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS);
        assert!(p.ends_with("..."));
        assert_eq!(preview("a\nb"), "a b");
    }
}
