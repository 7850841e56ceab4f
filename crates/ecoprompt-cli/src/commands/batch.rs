//! Batch optimization of a prompt file.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use ecoprompt_core::{validate_prompt, OptimizerConfig};
use ecoprompt_token::BatchReport;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct BatchArgs {
    /// File with one prompt per line (blank lines are skipped)
    pub file: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: BatchArgs, config: &OptimizerConfig) -> Result<()> {
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read: {}", args.file.display()))?;

    let (prompts, rejected) = collect_prompts(&content, config.max_prompt_chars);

    if prompts.is_empty() {
        println!("{}", "No prompts to optimize.".dimmed());
        return Ok(());
    }

    let progress = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(prompts.len() as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} prompts")?
            .progress_chars("=> "),
    );

    let strategy = config.strategy;
    let bar = progress.clone();
    let results = tokio::task::spawn_blocking(move || {
        ecoprompt_token::optimize_batch_with_progress(&prompts, strategy, || bar.inc(1))
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "batch task failed");
        anyhow!("Optimization failed")
    })?;
    progress.finish_and_clear();

    let report = BatchReport::new(results);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.to_display_string());

    if rejected > 0 {
        println!(
            "{} Skipped {} prompt(s) longer than {} characters",
            "!".yellow().bold(),
            rejected,
            config.max_prompt_chars
        );
    }

    Ok(())
}

/// Split file content into prompts, dropping blank and over-long lines.
///
/// Returns the accepted prompts and the number of rejected ones.
fn collect_prompts(content: &str, max_chars: usize) -> (Vec<String>, usize) {
    let mut prompts = Vec::new();
    let mut rejected = 0;

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match validate_prompt(line, max_chars) {
            Ok(()) => prompts.push(line.to_string()),
            Err(e) => {
                tracing::warn!(line = number + 1, error = %e, "skipping prompt");
                rejected += 1;
            }
        }
    }

    (prompts, rejected)
}
