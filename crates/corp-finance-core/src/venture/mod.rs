//! Early-stage venture valuation: Berkus/Scorecard/Risk-Factor-Summation/
//! ARR-multiple blended methods, an AI-native premium modifier, dilution and
//! SAFE conversion modeling, fundraising round-timing signals, an investor
//! scorecard, and a VC fund return engine.

pub mod ai_modifier;
pub mod benchmarks;
pub mod blending;
pub mod dilution;
pub mod methods;
pub mod round_timing;
pub mod scorecard_flags;
pub mod types;
pub mod vc_return;

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::CorpFinanceError;
use crate::types::{ComputationOutput, Money};

pub use ai_modifier::{apply_ai_native_modifier, AiNativeModifierResult};
pub use benchmarks::{benchmark_for, scale_for_stage, VerticalBenchmark};
pub use blending::{blend_valuations, BlendedValuation};
pub use dilution::{project_dilution, DilutionAssumptions, DilutionOutput, RoundAssumption, SafeNote};
pub use methods::{arr_multiple_method, berkus_method, risk_factor_summation_method, scorecard_method, ValuationMethodResult};
pub use round_timing::{assess_round_timing, RaiseSignal, RoundTimingSignal};
pub use scorecard_flags::{build_investor_scorecard, FlagStatus, ScorecardFlag, ValuationVerdict};
pub use types::{
    FundraisingProfile, MarketProfile, ProductProfile, StartupInput, StartupStage, StartupVertical, TeamProfile,
    TractionMetrics,
};
pub use vc_return::{
    compute_ownership_math, quick_screen, run_vc_scenarios, run_waterfall, AntiDilutionType, FundProfile,
    LiquidationPreference, OwnershipMath, PreferenceType, QuickScreenResult, ShareClassDistribution, VcDealInput,
    VcScenario, WaterfallDistribution,
};

fn validate_startup_input(input: &StartupInput) -> Result<(), CorpFinanceError> {
    if input.traction.gross_margin < Money::ZERO || input.traction.gross_margin > Money::ONE {
        return Err(CorpFinanceError::InvalidInput {
            field: "traction.gross_margin".to_string(),
            reason: "must be between 0 and 1".to_string(),
        });
    }
    if input.market.tam < input.market.sam {
        return Err(CorpFinanceError::InvalidInput {
            field: "market.tam".to_string(),
            reason: "TAM must be at least as large as SAM".to_string(),
        });
    }
    Ok(())
}

/// Full output of a startup valuation run: the blended method results, the
/// AI-native modifier decision, the round-timing signal, and the investor
/// scorecard/verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupValuationOutput {
    pub blended: BlendedValuation,
    pub ai_modifier: AiNativeModifierResult,
    pub round_timing: RoundTimingSignal,
    pub scorecard_flags: Vec<ScorecardFlag>,
    pub verdict: ValuationVerdict,
    pub final_pre_money_estimate: Money,
}

/// Runs the full early-stage valuation: blends the four methods, applies the
/// AI-native modifier on top of the blended point estimate, assesses
/// fundraising timing from runway, and builds the investor scorecard.
pub fn analyze_startup_valuation(
    input: &StartupInput,
) -> Result<ComputationOutput<StartupValuationOutput>, CorpFinanceError> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_startup_input(input)?;

    let blended = blend_valuations(input);
    if blended.used_vertical_fallback {
        warnings.push("no valuation method was applicable; fell back to the vertical's P50 benchmark median".to_string());
    }

    let ai_modifier = apply_ai_native_modifier(input, blended.point_estimate);
    let round_timing = assess_round_timing(input);
    let (scorecard_flags, verdict) = build_investor_scorecard(input, &blended);

    let output = StartupValuationOutput {
        final_pre_money_estimate: ai_modifier.adjusted_valuation,
        blended,
        ai_modifier,
        round_timing,
        scorecard_flags,
        verdict,
    };

    let elapsed_us = start.elapsed().as_micros() as u64;
    Ok(crate::types::with_metadata(
        "venture_blended_valuation_v1",
        &json!({
            "stage": input.stage,
            "vertical": input.market.vertical,
        }),
        warnings,
        elapsed_us,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use types::{FundraisingProfile, MarketProfile, ProductProfile, TeamProfile, TractionMetrics};

    fn sample_input() -> StartupInput {
        StartupInput {
            company_name: "Acme AI".to_string(),
            stage: StartupStage::Seed,
            team: TeamProfile {
                team_size: 8,
                founder_count: 2,
                has_prior_exit: true,
                has_technical_cofounder: true,
                domain_expertise_years: 6,
                is_solo_founder: false,
            },
            traction: TractionMetrics {
                arr: dec!(600_000),
                revenue_ttm: dec!(500_000),
                revenue_growth_rate: dec!(2.2),
                gross_margin: dec!(0.78),
                customer_count: 25,
                net_revenue_retention: Some(dec!(1.1)),
                logo_churn_annual: Some(dec!(0.05)),
                burn_rate_monthly: dec!(80_000),
                cash_on_hand: dec!(1_200_000),
            },
            product: ProductProfile {
                has_live_product: true,
                has_patents: false,
                patent_count: 0,
                is_ai_native: true,
                proprietary_data_moat: true,
            },
            market: MarketProfile {
                tam: dec!(8_000_000_000),
                sam: dec!(800_000_000),
                vertical: StartupVertical::Saas,
                competitive_intensity_high: false,
                is_defense_tech: false,
            },
            fundraising: FundraisingProfile {
                target_raise_amount: dec!(3_000_000),
                pre_money_valuation_ask: dec!(12_000_000),
                months_since_last_round: Some(10),
                prior_round_count: 1,
            },
        }
    }

    #[test]
    fn end_to_end_valuation_succeeds() {
        let output = analyze_startup_valuation(&sample_input()).unwrap();
        assert!(output.result.final_pre_money_estimate > Money::ZERO);
    }

    #[test]
    fn rejects_sam_larger_than_tam() {
        let mut input = sample_input();
        input.market.sam = input.market.tam + dec!(1);
        assert!(analyze_startup_valuation(&input).is_err());
    }
}
