use ecoprompt_core::Strategy as OptStrategy;
use ecoprompt_token::{estimate, optimize_batch, optimize_with, rewrite};
use proptest::prelude::*;

fn strategy() -> impl Strategy<Value = OptStrategy> {
    prop_oneof![
        Just(OptStrategy::Conservative),
        Just(OptStrategy::Balanced),
        Just(OptStrategy::Aggressive),
    ]
}

const PLAIN_WORDS: &[&str] = &["explain", "Rust", "ownership", "list", "planets", "sort", "numbers", "fast"];

/// Words and spaced-out punctuation that contain no trigger phrase. Always
/// opens with a word and never ends with `?`.
fn plain_sentence() -> impl Strategy<Value = String> {
    let tokens: Vec<&str> = PLAIN_WORDS
        .iter()
        .copied()
        .chain([",", ".", ":", ";", "...", "e.g.,", "i.e.,", "(see", "below)", "-"])
        .collect();

    (
        prop::sample::select(PLAIN_WORDS.to_vec()),
        prop::collection::vec(prop::sample::select(tokens), 0..16),
    )
        .prop_map(|(first, rest)| {
            let mut words = vec![first];
            words.extend(rest);
            words.join(" ")
        })
}

proptest! {
    #[test]
    fn never_panics(s in "\\PC{0,300}", st in strategy()) {
        let _ = optimize_with(&s, st);
    }

    #[test]
    fn token_accounting_is_exact(s in ".{0,300}", st in strategy()) {
        let result = optimize_with(&s, st);
        prop_assert_eq!(result.tokens_before, result.original.chars().count().div_ceil(4));
        prop_assert_eq!(result.tokens_after, result.optimized.chars().count().div_ceil(4));
        prop_assert_eq!(
            result.tokens_saved,
            result.tokens_before as i64 - result.tokens_after as i64
        );
    }

    #[test]
    fn quality_score_is_bounded(s in ".{0,300}", st in strategy()) {
        let score = optimize_with(&s, st).quality_score;
        prop_assert!((0.7..=0.99).contains(&score), "score {} out of bounds", score);
    }

    #[test]
    fn cost_is_monotonic(a in 0usize..1_000_000, b in 0usize..1_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(estimate(lo).co2_grams <= estimate(hi).co2_grams);
        prop_assert!(estimate(lo).kwh <= estimate(hi).kwh);
    }

    #[test]
    fn cost_is_linear(n in 0usize..1_000_000) {
        let single = estimate(n);
        let double = estimate(2 * n);
        let tolerance = 1e-12 * double.co2_grams.max(1.0);
        prop_assert!((double.co2_grams - 2.0 * single.co2_grams).abs() <= tolerance);
        prop_assert!((double.kwh - 2.0 * single.kwh).abs() <= tolerance);
    }

    #[test]
    fn plain_prompts_are_left_alone(s in plain_sentence(), st in strategy()) {
        let out = rewrite(&s, st);
        prop_assert_eq!(&out.text, &s);
        prop_assert!(out.applied_rules.is_empty());
    }

    #[test]
    fn batch_equals_individual(prompts in prop::collection::vec(".{0,80}", 0..16), st in strategy()) {
        let batch = optimize_batch(&prompts, st);
        prop_assert_eq!(batch.len(), prompts.len());
        for (prompt, result) in prompts.iter().zip(&batch) {
            prop_assert_eq!(result, &optimize_with(prompt, st));
        }
    }

    #[test]
    fn rewrite_is_deterministic(s in ".{0,200}", st in strategy()) {
        prop_assert_eq!(rewrite(&s, st), rewrite(&s, st));
    }
}
