mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::ma::{MaDealArgs, MaPpaArgs, MaRiskArgs, MaSensitivityArgs};
use commands::venture::{VentureValuationArgs, VentureVcReturnArgs};

/// Deterministic deal-modeling core: M&A accretion/dilution and early-stage
/// venture valuation
#[derive(Parser)]
#[command(
    name = "dealcore",
    version,
    about = "Deterministic deal-modeling core: M&A accretion/dilution and early-stage venture valuation",
    long_about = "A CLI for deterministic deal modeling with decimal precision. Supports M&A \
                  accretion/dilution pro-forma projection with a debt circularity solver, \
                  risk scorecards and sensitivity grids, and early-stage venture valuation \
                  (Berkus/Scorecard/Risk-Factor-Summation/ARR-multiple) with a VC return engine."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full M&A accretion/dilution run: PPA, debt schedule, projection, sensitivity, risk, scorecard, returns
    MaDeal(MaDealArgs),
    /// Standalone purchase price allocation (goodwill, asset writeup, intangible amortization)
    MaPpa(MaPpaArgs),
    /// Standalone risk-check run against a pro-forma projection
    MaRisk(MaRiskArgs),
    /// Standalone sensitivity grids (purchase price, synergy, financing mix)
    MaSensitivity(MaSensitivityArgs),
    /// Blended early-stage valuation (Berkus/Scorecard/Risk-Factor-Summation/ARR-multiple)
    VentureValuation(VentureValuationArgs),
    /// Ownership math, bear/base/bull scenarios, quick screen, and exit waterfall
    VentureVcReturn(VentureVcReturnArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::MaDeal(args) => commands::ma::run_ma_deal(args),
        Commands::MaPpa(args) => commands::ma::run_ma_ppa(args),
        Commands::MaRisk(args) => commands::ma::run_ma_risk(args),
        Commands::MaSensitivity(args) => commands::ma::run_ma_sensitivity(args),
        Commands::VentureValuation(args) => commands::venture::run_venture_valuation(args),
        Commands::VentureVcReturn(args) => commands::venture::run_venture_vc_return(args),
        Commands::Version => {
            println!("dealcore {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
