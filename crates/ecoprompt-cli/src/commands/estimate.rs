//! Cost model command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct EstimateArgs {
    /// Number of tokens
    pub tokens: usize,

    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: EstimateArgs) -> Result<()> {
    let cost = ecoprompt_token::estimate(args.tokens);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cost)?);
        return Ok(());
    }

    println!("{}", "Cost Estimate".bold());
    println!("{}", "─".repeat(40));
    println!("  Tokens: {}", args.tokens.to_string().cyan());
    println!("  Energy: {:.3e} kWh", cost.kwh);
    println!("  CO2:    {:.6} g ({:.3} mg)", cost.co2_grams, cost.co2_grams * 1000.0);
    println!("{}", "─".repeat(40));

    Ok(())
}
