use clap::Args;
use serde_json::Value;

use corp_finance_core::ma::{self, DealInput};

use crate::input;
use crate::output::rounding::round_output;

/// Arguments for M&A accretion/dilution deal analysis
#[derive(Args)]
pub struct MaDealArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a standalone purchase price allocation run
#[derive(Args)]
pub struct MaPpaArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a standalone risk-check run
#[derive(Args)]
pub struct MaRiskArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a standalone sensitivity-grid run
#[derive(Args)]
pub struct MaSensitivityArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

fn read_deal_input(input: &Option<String>, context: &str) -> Result<DealInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = input {
        Ok(input::file::read_json(path)?)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(format!("--input <file.json> or stdin required for {}", context).into())
    }
}

pub fn run_ma_deal(args: MaDealArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input = read_deal_input(&args.input, "M&A deal analysis")?;
    let result = ma::analyze_deal(&deal_input)?;
    let mut value = serde_json::to_value(result)?;
    round_output(&mut value);
    Ok(value)
}

pub fn run_ma_ppa(args: MaPpaArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input = read_deal_input(&args.input, "purchase price allocation")?;
    let result = ma::allocate_purchase_price(&deal_input.target, &deal_input.ppa)?;
    let mut value = serde_json::to_value(result)?;
    round_output(&mut value);
    Ok(value)
}

pub fn run_ma_risk(args: MaRiskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input = read_deal_input(&args.input, "risk analysis")?;
    let projection = ma::project_full(&deal_input, None)?;
    let risks = ma::analyze_risks(&deal_input, &projection);
    let mut value = serde_json::to_value(risks)?;
    round_output(&mut value);
    Ok(value)
}

pub fn run_ma_sensitivity(args: MaSensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input = read_deal_input(&args.input, "sensitivity analysis")?;
    let purchase_price_vs_synergy = ma::purchase_price_vs_synergy_sensitivity(&deal_input)?;
    let purchase_price_vs_cash_stock = ma::purchase_price_vs_cash_stock_sensitivity(&deal_input)?;
    let interest_rate_vs_leverage = ma::interest_rate_vs_leverage_sensitivity(&deal_input)?;
    let mut value = serde_json::to_value(serde_json::json!({
        "purchase_price_vs_synergy_sensitivity": purchase_price_vs_synergy,
        "purchase_price_vs_cash_stock_sensitivity": purchase_price_vs_cash_stock,
        "interest_rate_vs_leverage_sensitivity": interest_rate_vs_leverage,
    }))?;
    round_output(&mut value);
    Ok(value)
}
