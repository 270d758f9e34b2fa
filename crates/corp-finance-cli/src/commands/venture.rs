use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use corp_finance_core::venture::{self, FundProfile, StartupInput, VcDealInput};

use crate::input;
use crate::output::rounding::round_output;

/// Arguments for blended early-stage valuation (Berkus/Scorecard/RFS/ARR-multiple)
#[derive(Args)]
pub struct VentureValuationArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the combined VC return run: ownership math, bear/base/bull
/// scenarios, an optional waterfall, and a quick-screen verdict
#[derive(Args)]
pub struct VentureVcReturnArgs {
    /// Path to JSON input file containing `deal` and `fund`
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_venture_valuation(args: VentureValuationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let startup_input: StartupInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for venture valuation".into());
    };
    let result = venture::analyze_startup_valuation(&startup_input)?;
    let mut value = serde_json::to_value(result)?;
    round_output(&mut value);
    Ok(value)
}

#[derive(Deserialize)]
struct VcReturnInput {
    deal: VcDealInput,
    fund: FundProfile,
}

/// Ownership math, bear/base/bull scenarios, the quick screen, and (when the
/// deal carries a liquidation stack) the exit waterfall at the base
/// scenario's exit enterprise value.
pub fn run_venture_vc_return(args: VentureVcReturnArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let vc_input: VcReturnInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for VC return analysis".into());
    };
    let deal = &vc_input.deal;

    let ownership = venture::compute_ownership_math(deal)?;
    let scenarios = venture::run_vc_scenarios(deal, &ownership);
    let quick_screen = venture::quick_screen(deal, &vc_input.fund);

    let waterfall = if deal.liquidation_stack.is_empty() {
        None
    } else {
        scenarios
            .iter()
            .find(|s| s.label == "base")
            .map(|base| venture::run_waterfall(base.exit_enterprise_value, &deal.liquidation_stack, deal.common_shares_pct))
    };

    let mut value = serde_json::to_value(serde_json::json!({
        "ownership": ownership,
        "scenarios": scenarios,
        "quick_screen": quick_screen,
        "waterfall_at_base_exit": waterfall,
    }))?;
    round_output(&mut value);
    Ok(value)
}
