//! Single prompt optimization.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use ecoprompt_core::{validate_prompt, OptimizationResult, OptimizerConfig, Strategy};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::output;

#[derive(Args)]
pub struct OptimizeArgs {
    /// Prompt text (omit to read --file or stdin)
    pub prompt: Option<String>,

    /// Read the prompt from a file
    #[arg(short, long, conflicts_with = "prompt")]
    pub file: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: OptimizeArgs, config: &OptimizerConfig) -> Result<()> {
    let prompt = read_prompt(&args).await?;
    validate_prompt(&prompt, config.max_prompt_chars)?;

    let result = run(prompt, config.strategy).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.is_already_optimal() {
        println!("{} Your prompt is already optimal!", "✓".green().bold());
        output::print_token_counts(&result);
        return Ok(());
    }

    output::print_result(&result);
    Ok(())
}

/// Run the optimizer off the async runtime.
///
/// A panic inside the rewriter surfaces as a generic failure instead of
/// tearing down the process.
pub async fn run(prompt: String, strategy: Strategy) -> Result<OptimizationResult> {
    tokio::task::spawn_blocking(move || ecoprompt_token::optimize_with(&prompt, strategy))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "optimizer task failed");
            anyhow!("Optimization failed")
        })
}

async fn read_prompt(args: &OptimizeArgs) -> Result<String> {
    if let Some(prompt) = &args.prompt {
        return Ok(prompt.clone());
    }

    if let Some(path) = &args.file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read: {}", path.display()));
    }

    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .context("Failed to read prompt from stdin")?;
    Ok(buffer)
}
