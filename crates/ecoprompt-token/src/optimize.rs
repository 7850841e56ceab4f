//! Single and batch optimization.
//!
//! Glues the rewriter, token estimation, quality score and cost model into
//! an `OptimizationResult`. The cost model is called here rather than from
//! the rewriter so it stays independent of the text rules.

use ecoprompt_core::{OptimizationResult, Strategy};
use rayon::prelude::*;

use crate::analyzer::{estimate_tokens, quality_score};
use crate::carbon;
use crate::optimizer;

/// Optimize a prompt with the default (balanced) strategy.
pub fn optimize(prompt: &str) -> OptimizationResult {
    optimize_with(prompt, Strategy::default())
}

/// Optimize a prompt with an explicit strategy.
pub fn optimize_with(prompt: &str, strategy: Strategy) -> OptimizationResult {
    let rewrite = optimizer::rewrite(prompt, strategy);

    let tokens_before = estimate_tokens(prompt);
    let tokens_after = estimate_tokens(&rewrite.text);
    let saved = carbon::savings(tokens_before, tokens_after);
    let quality = quality_score(prompt, &rewrite.text);

    OptimizationResult {
        original: prompt.to_string(),
        tokens_before,
        tokens_after,
        tokens_saved: tokens_before as i64 - tokens_after as i64,
        quality_score: quality,
        carbon_saved: saved.co2_grams,
        energy_saved: saved.kwh,
        optimized: rewrite.text,
        applied_rules: rewrite.applied_rules,
        strategy,
    }
}

/// Optimize many prompts in parallel. Results keep the input order.
pub fn optimize_batch<S>(prompts: &[S], strategy: Strategy) -> Vec<OptimizationResult>
where
    S: AsRef<str> + Sync,
{
    optimize_batch_with_progress(prompts, strategy, || {})
}

/// Same as [`optimize_batch`], calling `on_done` once per finished prompt.
///
/// `on_done` runs on the worker threads, in completion order.
pub fn optimize_batch_with_progress<S, F>(
    prompts: &[S],
    strategy: Strategy,
    on_done: F,
) -> Vec<OptimizationResult>
where
    S: AsRef<str> + Sync,
    F: Fn() + Sync + Send,
{
    tracing::debug!(count = prompts.len(), %strategy, "optimizing batch");

    prompts
        .par_iter()
        .map(|prompt| {
            let result = optimize_with(prompt.as_ref(), strategy);
            on_done();
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_fields_are_consistent() {
        let result = optimize("Could you please explain the borrow checker in order to help me?");
        assert_eq!(result.optimized, "Explain the borrow checker to help me");
        assert_eq!(result.tokens_before, estimate_tokens(&result.original));
        assert_eq!(result.tokens_after, estimate_tokens(&result.optimized));
        assert_eq!(
            result.tokens_saved,
            result.tokens_before as i64 - result.tokens_after as i64
        );
        assert!(result.carbon_saved > 0.0);
        assert!(result.energy_saved > 0.0);
        assert_eq!(result.strategy, Strategy::Balanced);
    }

    #[test]
    fn test_batch_preserves_order() {
        let prompts = vec![
            "Explain quantum computing".to_string(),
            "Please list the planets".to_string(),
            String::new(),
        ];
        let results = optimize_batch(&prompts, Strategy::Balanced);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].optimized, "Explain quantum computing");
        assert_eq!(results[1].optimized, "List the planets");
        assert_eq!(results[2].optimized, "");
    }

    #[test]
    fn test_batch_reports_progress_per_prompt() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let done = AtomicUsize::new(0);
        let prompts = ["Please list the planets"; 25];
        let results = optimize_batch_with_progress(&prompts, Strategy::Balanced, || {
            done.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(results.len(), 25);
        assert_eq!(done.load(Ordering::Relaxed), 25);
    }

    #[test]
    fn test_batch_of_nothing() {
        let prompts: [&str; 0] = [];
        assert!(optimize_batch(&prompts, Strategy::Aggressive).is_empty());
    }
}
