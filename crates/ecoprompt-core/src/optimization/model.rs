//! Optimization domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EcoError;

/// How aggressively low-information words are stripped.
///
/// Ordered: every word removed by a weaker strategy is also removed by a
/// stronger one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Strategy {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl Strategy {
    /// All strategies, weakest first.
    pub const ALL: [Strategy; 3] = [Self::Conservative, Self::Balanced, Self::Aggressive];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = EcoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "balanced" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            other => Err(EcoError::UnknownStrategy(other.to_string())),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = EcoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Estimated energy draw and emissions for processing a number of tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub kwh: f64,
    pub co2_grams: f64,
}

/// Outcome of rewriting a single prompt.
///
/// Built fresh per call. `tokens_saved` is signed: a substitution can in
/// principle lengthen the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub original: String,
    pub optimized: String,
    pub tokens_before: usize,
    pub tokens_after: usize,
    pub tokens_saved: i64,
    pub quality_score: f64,
    /// Grams of CO2.
    pub carbon_saved: f64,
    /// Kilowatt-hours.
    pub energy_saved: f64,
    /// Names of the rules that fired, in firing order.
    pub applied_rules: Vec<String>,
    pub strategy: Strategy,
}

impl OptimizationResult {
    /// Whether the caller should treat the prompt as already optimal.
    ///
    /// Compares token estimates, not text: two different strings with the
    /// same estimated token count count as "already optimal".
    pub fn is_already_optimal(&self) -> bool {
        self.tokens_before == self.tokens_after
    }

    /// Carbon saved in milligrams, the unit the front end displays.
    pub fn carbon_saved_mg(&self) -> f64 {
        self.carbon_saved * 1000.0
    }
}

/// Aggregate figures over a set of optimization results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationStats {
    pub total_optimizations: usize,
    pub total_tokens_saved: i64,
    pub total_co2_saved: f64,
    pub total_energy_saved: f64,
    pub avg_quality_score: f64,
    pub avg_tokens_saved: f64,
}

impl OptimizationStats {
    /// Aggregate a slice of results. Averages are 0 for an empty slice.
    pub fn from_results(results: &[OptimizationResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let count = results.len();
        let total_tokens_saved: i64 = results.iter().map(|r| r.tokens_saved).sum();
        let total_co2_saved: f64 = results.iter().map(|r| r.carbon_saved).sum();
        let total_energy_saved: f64 = results.iter().map(|r| r.energy_saved).sum();
        let quality_sum: f64 = results.iter().map(|r| r.quality_score).sum();

        Self {
            total_optimizations: count,
            total_tokens_saved,
            total_co2_saved,
            total_energy_saved,
            avg_quality_score: quality_sum / count as f64,
            avg_tokens_saved: total_tokens_saved as f64 / count as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(tokens_before: usize, tokens_after: usize, quality: f64, co2: f64) -> OptimizationResult {
        OptimizationResult {
            original: "a".repeat(tokens_before * 4),
            optimized: "a".repeat(tokens_after * 4),
            tokens_before,
            tokens_after,
            tokens_saved: tokens_before as i64 - tokens_after as i64,
            quality_score: quality,
            carbon_saved: co2,
            energy_saved: co2 / 350.0,
            applied_rules: Vec::new(),
            strategy: Strategy::Balanced,
        }
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("Aggressive".parse::<Strategy>().unwrap(), Strategy::Aggressive);
        assert_eq!(" conservative ".parse::<Strategy>().unwrap(), Strategy::Conservative);
        assert!(matches!(
            "extreme".parse::<Strategy>(),
            Err(EcoError::UnknownStrategy(s)) if s == "extreme"
        ));
    }

    #[test]
    fn test_strategy_ordering() {
        assert!(Strategy::Conservative < Strategy::Balanced);
        assert!(Strategy::Balanced < Strategy::Aggressive);
        assert_eq!(Strategy::default(), Strategy::Balanced);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let json = serde_json::to_value(result(10, 6, 0.9, 0.001)).unwrap();
        assert_eq!(json["tokensBefore"], 10);
        assert_eq!(json["tokensSaved"], 4);
        assert_eq!(json["strategy"], "balanced");
        assert!(json.get("appliedRules").is_some());
    }

    #[test]
    fn test_already_optimal_compares_token_counts() {
        let mut r = result(5, 5, 0.8, 0.0);
        r.optimized = "different text".to_string();
        assert!(r.is_already_optimal());
        assert!(!result(5, 4, 0.8, 0.0).is_already_optimal());
    }

    #[test]
    fn test_stats_aggregation() {
        let stats = OptimizationStats::from_results(&[
            result(10, 6, 0.9, 0.002),
            result(8, 8, 0.8, 0.0),
        ]);
        assert_eq!(stats.total_optimizations, 2);
        assert_eq!(stats.total_tokens_saved, 4);
        assert!((stats.avg_quality_score - 0.85).abs() < 1e-12);
        assert!((stats.avg_tokens_saved - 2.0).abs() < 1e-12);
        assert!((stats.total_co2_saved - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_stats_empty() {
        let stats = OptimizationStats::from_results(&[]);
        assert_eq!(stats, OptimizationStats::default());
        assert_eq!(stats.avg_quality_score, 0.0);
    }
}
