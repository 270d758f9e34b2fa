use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

use super::benchmarks::{benchmark_for, scale_for_stage};
use super::methods::{
    arr_multiple_method, berkus_method, risk_factor_summation_method, scorecard_method, ValuationMethodResult,
};
use super::types::StartupInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendedValuation {
    pub methods: Vec<ValuationMethodResult>,
    pub low_estimate: Money,
    pub point_estimate: Money,
    pub high_estimate: Money,
    /// True when no method was applicable and the blend fell back to the
    /// vertical's P50 benchmark median.
    pub used_vertical_fallback: bool,
}

/// Runs all four valuation methods and blends them into a low/point/high
/// pre-money range. Once ARR is applicable, it dominates the blend at 65%
/// weight against the mean of the applicable pre-revenue methods (Berkus,
/// Scorecard, Risk-Factor-Summation) at 35%; absent ARR, the blend is the
/// plain mean of whichever pre-revenue methods clear their own applicability
/// bar. If nothing is applicable at all, the blend falls back to the
/// vertical's P50 benchmark median.
pub fn blend_valuations(input: &StartupInput) -> BlendedValuation {
    let arr = arr_multiple_method(input);
    let methods = vec![
        berkus_method(input),
        scorecard_method(input),
        risk_factor_summation_method(input),
        arr.clone(),
    ];

    let pre_revenue: Vec<&ValuationMethodResult> = methods.iter().filter(|m| m.applicable && m.method != "arr_multiple").collect();
    let mean_pre_revenue: Option<Decimal> = if pre_revenue.is_empty() {
        None
    } else {
        Some(pre_revenue.iter().map(|m| m.pre_money_valuation).sum::<Decimal>() / Decimal::from(pre_revenue.len() as u32))
    };

    let mut used_vertical_fallback = false;
    let point_estimate = if arr.applicable {
        match mean_pre_revenue {
            Some(mean) => arr.pre_money_valuation * dec!(0.65) + mean * dec!(0.35),
            None => arr.pre_money_valuation,
        }
    } else {
        match mean_pre_revenue {
            Some(mean) => mean,
            None => {
                used_vertical_fallback = true;
                scale_for_stage(benchmark_for(input.market.vertical), input.stage).p50_pre_money
            }
        }
    };

    let contributing: Vec<Decimal> = pre_revenue
        .iter()
        .map(|m| m.pre_money_valuation)
        .chain(if arr.applicable { Some(arr.pre_money_valuation) } else { None })
        .collect();

    let (low_estimate, high_estimate) = if contributing.is_empty() {
        (point_estimate, point_estimate)
    } else {
        (
            contributing.iter().copied().fold(Decimal::MAX, Decimal::min).min(point_estimate),
            contributing.iter().copied().fold(Decimal::ZERO, Decimal::max).max(point_estimate),
        )
    };

    BlendedValuation { methods, low_estimate, point_estimate, high_estimate, used_vertical_fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venture::types::{
        FundraisingProfile, MarketProfile, ProductProfile, StartupStage, StartupVertical, TeamProfile, TractionMetrics,
    };

    fn sample_input() -> StartupInput {
        StartupInput {
            company_name: "Acme AI".to_string(),
            stage: StartupStage::SeriesA,
            team: TeamProfile {
                team_size: 20,
                founder_count: 2,
                has_prior_exit: true,
                has_technical_cofounder: true,
                domain_expertise_years: 8,
                is_solo_founder: false,
            },
            traction: TractionMetrics {
                arr: dec!(2_000_000),
                revenue_ttm: dec!(1_800_000),
                revenue_growth_rate: dec!(2.5),
                gross_margin: dec!(0.80),
                customer_count: 60,
                net_revenue_retention: Some(dec!(1.15)),
                logo_churn_annual: Some(dec!(0.03)),
                burn_rate_monthly: dec!(150_000),
                cash_on_hand: dec!(3_000_000),
            },
            product: ProductProfile {
                has_live_product: true,
                has_patents: true,
                patent_count: 2,
                is_ai_native: true,
                proprietary_data_moat: true,
            },
            market: MarketProfile {
                tam: dec!(10_000_000_000),
                sam: dec!(1_000_000_000),
                vertical: StartupVertical::Saas,
                competitive_intensity_high: false,
                is_defense_tech: false,
            },
            fundraising: FundraisingProfile {
                target_raise_amount: dec!(10_000_000),
                pre_money_valuation_ask: dec!(60_000_000),
                months_since_last_round: Some(14),
                prior_round_count: 2,
            },
        }
    }

    #[test]
    fn blend_includes_all_applicable_methods() {
        let blended = blend_valuations(&sample_input());
        assert_eq!(blended.methods.len(), 4);
        assert!(blended.methods.iter().all(|m| m.applicable));
    }

    #[test]
    fn point_estimate_falls_within_low_high_band() {
        let blended = blend_valuations(&sample_input());
        assert!(blended.point_estimate >= blended.low_estimate);
        assert!(blended.point_estimate <= blended.high_estimate);
    }

    #[test]
    fn pre_revenue_company_excludes_arr_multiple() {
        let mut input = sample_input();
        input.traction.arr = Decimal::ZERO;
        input.stage = StartupStage::PreSeed;
        let blended = blend_valuations(&input);
        let arr_method = blended.methods.iter().find(|m| m.method == "arr_multiple").unwrap();
        assert!(!arr_method.applicable);
        assert!(!blended.used_vertical_fallback);
    }

    #[test]
    fn arr_company_blends_at_sixty_five_thirty_five() {
        let input = sample_input();
        let blended = blend_valuations(&input);
        let arr = blended.methods.iter().find(|m| m.method == "arr_multiple").unwrap().pre_money_valuation;
        let pre_revenue_mean = blended
            .methods
            .iter()
            .filter(|m| m.applicable && m.method != "arr_multiple")
            .map(|m| m.pre_money_valuation)
            .sum::<Decimal>()
            / dec!(3);
        let expected = arr * dec!(0.65) + pre_revenue_mean * dec!(0.35);
        assert_eq!(blended.point_estimate, expected);
    }
}
