//! Rule catalog listing.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use ecoprompt_core::OptimizerConfig;

use crate::output;

#[derive(Args)]
pub struct RulesArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: RulesArgs, config: &OptimizerConfig) -> Result<()> {
    let catalog = ecoprompt_token::catalog(config.strategy);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!(
        "{} {} rules ({} strategy)",
        "Rewrite Rules".bold(),
        catalog.len(),
        config.strategy.to_string().cyan()
    );
    output::print_rules_table(&catalog);

    Ok(())
}
