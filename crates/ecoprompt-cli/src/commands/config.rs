//! Effective configuration display.

use anyhow::Result;
use colored::Colorize;
use ecoprompt_core::OptimizerConfig;
use std::path::Path;

pub fn execute(config: &OptimizerConfig, source: Option<&Path>) -> Result<()> {
    println!("{}", "Configuration".bold());
    println!("{}", "─".repeat(40));
    match source {
        Some(path) => println!("  Source:    {}", path.display()),
        None => println!("  Source:    {}", "defaults".dimmed()),
    }
    println!("  Strategy:  {}", config.strategy.to_string().cyan());
    println!("  Max chars: {}", config.max_prompt_chars);
    println!("{}", "─".repeat(40));

    Ok(())
}
