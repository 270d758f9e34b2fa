use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

use super::benchmarks::{benchmark_for, scale_for_stage};
use super::types::{StartupInput, StartupStage};

/// Result of a single valuation method: the estimate plus a short note on
/// how it was derived, so a reader can sanity-check the number without
/// re-deriving it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationMethodResult {
    pub method: String,
    pub pre_money_valuation: Money,
    pub applicable: bool,
    pub notes: String,
}

fn stage_berkus_cap(stage: StartupStage) -> Money {
    let base_cap_per_factor = dec!(500_000);
    let multiplier = match stage {
        StartupStage::PreSeed => dec!(0.6),
        StartupStage::Seed => dec!(1.0),
        StartupStage::SeriesA => dec!(1.8),
        _ => dec!(2.5),
    };
    base_cap_per_factor * multiplier
}

/// Berkus method: five qualitative factors, each capped, summed into a
/// pre-money estimate. Intended for pre-revenue or early-revenue companies;
/// still computed (not skipped) post-Series-A since it's a useful floor, but
/// flagged as less applicable via `applicable`.
pub fn berkus_method(input: &StartupInput) -> ValuationMethodResult {
    let cap = stage_berkus_cap(input.stage);

    let sound_idea = if input.market.tam > dec!(1_000_000_000) {
        cap
    } else if input.market.tam > dec!(100_000_000) {
        cap * dec!(0.7)
    } else {
        cap * dec!(0.4)
    };

    let prototype = if input.product.has_live_product { cap } else { cap * dec!(0.3) };

    let management_score = {
        let mut score = dec!(0.4);
        if input.team.has_prior_exit {
            score += dec!(0.3);
        }
        if input.team.has_technical_cofounder {
            score += dec!(0.2);
        }
        if input.team.domain_expertise_years >= 5 {
            score += dec!(0.1);
        }
        score.min(Decimal::ONE)
    };
    let quality_management = cap * management_score;

    let strategic_relationships = if input.fundraising.prior_round_count > 0 {
        cap * dec!(0.6)
    } else {
        cap * dec!(0.2)
    };

    let product_rollout = if input.traction.revenue_ttm > Decimal::ZERO {
        cap
    } else if input.traction.customer_count > 0 {
        cap * dec!(0.5)
    } else {
        Decimal::ZERO
    };

    let total = sound_idea + prototype + quality_management + strategic_relationships + product_rollout;
    let applicable = matches!(input.stage, StartupStage::PreSeed | StartupStage::Seed | StartupStage::SeriesA);

    ValuationMethodResult {
        method: "berkus".to_string(),
        pre_money_valuation: total,
        applicable,
        notes: format!("five-factor qualitative sum, capped at {:.0} per factor", cap),
    }
}

/// Scorecard method: compares the company against a vertical/stage base
/// valuation across six weighted qualitative factors, each scored relative
/// to 1.0 (average).
pub fn scorecard_method(input: &StartupInput) -> ValuationMethodResult {
    let base = scale_for_stage(benchmark_for(input.market.vertical), input.stage).p50_pre_money;

    let management_factor = {
        let mut f = dec!(1.0);
        if input.team.has_prior_exit {
            f += dec!(0.3);
        }
        if input.team.has_technical_cofounder {
            f += dec!(0.15);
        }
        if input.team.is_solo_founder {
            f -= dec!(0.2);
        }
        f.max(dec!(0.3))
    };

    let market_size_factor = if input.market.tam > dec!(5_000_000_000) {
        dec!(1.3)
    } else if input.market.tam > dec!(1_000_000_000) {
        dec!(1.1)
    } else if input.market.tam > dec!(250_000_000) {
        dec!(1.0)
    } else {
        dec!(0.7)
    };

    let product_factor = {
        let mut f = dec!(1.0);
        if input.product.is_ai_native {
            f += dec!(0.1);
        }
        if input.product.has_patents {
            f += dec!(0.1);
        }
        if input.product.proprietary_data_moat {
            f += dec!(0.15);
        }
        f
    };

    let competitive_factor = if input.market.competitive_intensity_high {
        dec!(0.85)
    } else {
        dec!(1.05)
    };

    let sales_channel_factor = if input.traction.customer_count >= 10 { dec!(1.1) } else { dec!(0.9) };

    let funding_need_factor = match input.traction.runway_months() {
        Some(months) if months < dec!(6) => dec!(0.85),
        Some(months) if months > dec!(18) => dec!(1.1),
        _ => dec!(1.0),
    };

    let weighted_factor = management_factor * dec!(0.30)
        + market_size_factor * dec!(0.25)
        + product_factor * dec!(0.15)
        + competitive_factor * dec!(0.10)
        + sales_channel_factor * dec!(0.10)
        + funding_need_factor * dec!(0.10);

    ValuationMethodResult {
        method: "scorecard".to_string(),
        pre_money_valuation: base * weighted_factor,
        applicable: true,
        notes: format!("base {:.0} x weighted factor {:.2}", base, weighted_factor),
    }
}

/// Risk factor summation: starts from the scorecard base and nudges it up
/// or down by a fixed increment per risk category, each rated on a -2..+2
/// scale (0 = neutral).
pub fn risk_factor_summation_method(input: &StartupInput) -> ValuationMethodResult {
    let base = scale_for_stage(benchmark_for(input.market.vertical), input.stage).p50_pre_money;
    let increment = base * dec!(0.025);

    let management_risk = if input.team.has_prior_exit { 2 } else if input.team.is_solo_founder { -1 } else { 0 };
    let stage_risk = match input.stage {
        StartupStage::PreSeed => -2,
        StartupStage::Seed => -1,
        StartupStage::SeriesA => 0,
        _ => 1,
    };
    let legislation_risk = if input.market.is_defense_tech { -1 } else { 0 };
    let competition_risk = if input.market.competitive_intensity_high { -1 } else { 1 };
    let technology_risk = if input.product.is_ai_native || input.product.has_patents { 1 } else { 0 };
    let funding_risk = match input.traction.runway_months() {
        Some(months) if months < dec!(6) => -2,
        Some(months) if months < dec!(12) => -1,
        _ => 0,
    };

    let total_ticks = management_risk + stage_risk + legislation_risk + competition_risk + technology_risk + funding_risk;
    let adjustment = increment * Decimal::from(total_ticks);

    ValuationMethodResult {
        method: "risk_factor_summation".to_string(),
        pre_money_valuation: (base + adjustment).max(Decimal::ZERO),
        applicable: true,
        notes: format!("base {:.0} adjusted by {} risk ticks at {:.0} each", base, total_ticks, increment),
    }
}

/// ARR-multiple method: only applicable once the company has meaningful
/// revenue. Multiple comes from the vertical benchmark and is nudged by the
/// company's growth rate and gross margin relative to typical SaaS
/// benchmarks.
pub fn arr_multiple_method(input: &StartupInput) -> ValuationMethodResult {
    if input.traction.arr <= Decimal::ZERO {
        return ValuationMethodResult {
            method: "arr_multiple".to_string(),
            pre_money_valuation: Decimal::ZERO,
            applicable: false,
            notes: "no ARR reported".to_string(),
        };
    }

    let benchmark = benchmark_for(input.market.vertical);
    let mut multiple = benchmark.arr_multiple;

    if input.traction.revenue_growth_rate > dec!(2.0) {
        multiple *= dec!(1.25);
    } else if input.traction.revenue_growth_rate < dec!(0.5) {
        multiple *= dec!(0.75);
    }

    if input.traction.gross_margin > dec!(0.80) {
        multiple *= dec!(1.1);
    } else if input.traction.gross_margin < dec!(0.50) {
        multiple *= dec!(0.85);
    }

    ValuationMethodResult {
        method: "arr_multiple".to_string(),
        pre_money_valuation: input.traction.arr * multiple,
        applicable: true,
        notes: format!("ARR {:.0} x adjusted multiple {:.1}", input.traction.arr, multiple),
    }
}
