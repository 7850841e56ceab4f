//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ecoprompt_core::{OptimizerConfig, Strategy};
use std::path::PathBuf;

pub mod batch;
pub mod config;
pub mod estimate;
pub mod optimize;
pub mod rules;

/// EcoPrompt - Shorter prompts, smaller footprint
#[derive(Parser)]
#[command(name = "ecoprompt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (defaults to ./ecoprompt.toml, then the user config dir)
    #[arg(short, long, global = true, env = "ECOPROMPT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Optimization strategy: conservative, balanced or aggressive
    #[arg(short, long, global = true, env = "ECOPROMPT_STRATEGY")]
    pub strategy: Option<Strategy>,

    /// Maximum prompt length in characters
    #[arg(long, global = true, env = "ECOPROMPT_MAX_CHARS")]
    pub max_chars: Option<usize>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Optimize a single prompt
    Optimize(optimize::OptimizeArgs),

    /// Optimize a file of prompts, one per line
    Batch(batch::BatchArgs),

    /// Estimate energy and CO2 for a token count
    Estimate(estimate::EstimateArgs),

    /// List the rewrite rules in execution order
    Rules(rules::RulesArgs),

    /// Show the effective configuration
    Config,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let (config, source) = self.resolve_config()?;

        match self.command {
            Commands::Optimize(args) => optimize::execute(args, &config).await,
            Commands::Batch(args) => batch::execute(args, &config).await,
            Commands::Estimate(args) => estimate::execute(args),
            Commands::Rules(args) => rules::execute(args, &config),
            Commands::Config => config::execute(&config, source.as_deref()),
        }
    }

    /// Load the config file, then apply flag and environment overrides.
    fn resolve_config(&self) -> Result<(OptimizerConfig, Option<PathBuf>)> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let (config, source) = OptimizerConfig::discover(self.config.as_deref(), &cwd)?;
        let config = config.with_overrides(self.strategy, self.max_chars)?;

        tracing::debug!(
            strategy = %config.strategy,
            max_prompt_chars = config.max_prompt_chars,
            source = ?source,
            "configuration resolved"
        );

        Ok((config, source))
    }
}
