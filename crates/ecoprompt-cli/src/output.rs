//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use ecoprompt_core::OptimizationResult;
use ecoprompt_token::RuleInfo;
use unicode_width::UnicodeWidthStr;

/// Print a full optimization result.
pub fn print_result(result: &OptimizationResult) {
    let width = term_width().min(100);

    println!("{}", "Optimization Result".bold());
    println!("{}", "─".repeat(width));
    println!("{}", "Original".dimmed());
    println!("  {}", result.original.trim());
    println!("{}", "Optimized".green().bold());
    println!("  {}", result.optimized);
    println!("{}", "─".repeat(width));

    print_token_counts(result);
    println!("  Quality score:  {}", quality_colored(result.quality_score));
    println!("  CO2 saved:      {:.6} mg", result.carbon_saved_mg());
    println!("  Energy saved:   {:.3e} kWh", result.energy_saved);
    println!("  Strategy:       {}", result.strategy);

    if !result.applied_rules.is_empty() {
        println!();
        println!("{}", "Applied optimizations:".bold());
        for (i, rule) in result.applied_rules.iter().enumerate() {
            println!("  {}. {}", i + 1, rule);
        }
    }
}

/// Print before/after token estimates.
pub fn print_token_counts(result: &OptimizationResult) {
    println!("  Tokens before:  {}", result.tokens_before);
    println!("  Tokens after:   {}", result.tokens_after);
    let saved = result.tokens_saved.to_string();
    let saved = if result.tokens_saved > 0 {
        saved.green().bold()
    } else if result.tokens_saved < 0 {
        saved.red()
    } else {
        saved.normal()
    };
    println!("  Tokens saved:   {}", saved);
}

/// Print the rule catalog as a table.
pub fn print_rules_table(rules: &[RuleInfo]) {
    const STAGE_WIDTH: usize = 18;

    let name_width = term_width().saturating_sub(STAGE_WIDTH + 8).max(20);

    println!("{:>4}  {}  {}", "#", pad_right("STAGE", STAGE_WIDTH), "RULE");
    println!("{}", "─".repeat(STAGE_WIDTH + name_width + 8));

    let mut previous_stage = "";
    for (i, rule) in rules.iter().enumerate() {
        let stage = if rule.stage == previous_stage {
            pad_right("", STAGE_WIDTH).normal()
        } else {
            pad_right(rule.stage, STAGE_WIDTH).cyan()
        };
        previous_stage = rule.stage;

        println!(
            "{:>4}  {}  {}",
            i + 1,
            stage,
            truncate_visual(rule.name, name_width)
        );
    }
}

fn quality_colored(score: f64) -> ColoredString {
    let label = format!("{:.2}", score);
    if score >= 0.9 {
        label.green()
    } else if score >= 0.8 {
        label.yellow()
    } else {
        label.normal()
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
