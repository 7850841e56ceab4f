//! Token estimation and rewrite quality scoring.
//!
//! Token counts are approximated from character length (4 characters per
//! token) rather than produced by a real tokenizer.

/// Characters per estimated token.
pub const CHARS_PER_TOKEN: usize = 4;

const BASE_SCORE: f64 = 0.8;
const MIN_SCORE: f64 = 0.7;
const MAX_SCORE: f64 = 0.99;

/// Estimate the token count of a piece of text: `ceil(chars / 4)`.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Heuristic confidence that a rewrite kept the meaning of the original.
///
/// Rewards compression by length and by word count, clamped to
/// `[0.7, 0.99]`. This is a proxy derived purely from ratios; it knows
/// nothing about semantics.
pub fn quality_score(original: &str, optimized: &str) -> f64 {
    let original_len = original.chars().count();
    let length_ratio = if original_len == 0 {
        1.0
    } else {
        optimized.chars().count() as f64 / original_len as f64
    };

    let words_before = word_count(original);
    let word_reduction = if words_before == 0 {
        0.0
    } else {
        (words_before as f64 - word_count(optimized) as f64) / words_before as f64
    };

    let mut score = BASE_SCORE;
    if length_ratio < 0.8 {
        score += 0.1;
    }
    if length_ratio < 0.6 {
        score += 0.05;
    }
    if word_reduction > 0.2 {
        score += 0.05;
    }

    score.clamp(MIN_SCORE, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("a"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("Explain quantum computing"), 7);
    }

    #[test]
    fn test_estimate_tokens_counts_chars_not_bytes() {
        assert_eq!(estimate_tokens("été"), 1);
        assert_eq!(estimate_tokens("日本語です"), 2);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one \t two\nthree  "), 3);
    }

    #[test]
    fn test_quality_unchanged_text() {
        assert!((quality_score("same text", "same text") - 0.8).abs() < 1e-12);
        assert!((quality_score("", "") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_quality_moderate_compression() {
        // ratio 0.7, no word reduction
        let original = "abcdefghij";
        let optimized = "abcdefg";
        assert!((quality_score(original, optimized) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_quality_strong_compression_is_clamped() {
        let original = "could you please kindly tell me about the rust borrow checker";
        let optimized = "explain borrow checker";
        // 0.8 + 0.1 + 0.05 + 0.05 = 1.0, clamped
        assert!((quality_score(original, optimized) - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_quality_lengthened_text() {
        assert!((quality_score("short", "a much longer rewrite") - 0.8).abs() < 1e-12);
    }
}
