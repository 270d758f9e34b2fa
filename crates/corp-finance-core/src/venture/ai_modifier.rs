use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

use super::types::StartupInput;

/// Whether and why the AI-native premium applied. Pass-through by default:
/// a company that isn't AI-native, or that fails any gating check, gets a
/// `1.0` multiplier and an explanatory note rather than a silent no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiNativeModifierResult {
    pub multiplier: Rate,
    pub adjusted_valuation: Money,
    pub rationale: String,
}

/// Applies an AI-native valuation premium through a five-step decision
/// table. Each step either confirms the premium at a given size or disqualifies
/// it outright; the first disqualifying step wins.
///
/// 1. Must be flagged `is_ai_native` on the product profile.
/// 2. Must have a live product (a thesis without a product doesn't earn a
///    premium, it earns extra diligence).
/// 3. Revenue growth rate must be at or above 1.5x (100% YoY) to show the
///    premium is being monetized, not just narrated.
/// 4. A proprietary data moat bumps the premium from 15% to 25%.
/// 5. High competitive intensity halves whatever premium steps 1-4 produced,
///    since "AI-native" alone isn't a moat in a crowded field.
pub fn apply_ai_native_modifier(input: &StartupInput, base_valuation: Money) -> AiNativeModifierResult {
    if !input.product.is_ai_native {
        return AiNativeModifierResult {
            multiplier: Decimal::ONE,
            adjusted_valuation: base_valuation,
            rationale: "not flagged AI-native; no adjustment applied".to_string(),
        };
    }

    if !input.product.has_live_product {
        return AiNativeModifierResult {
            multiplier: Decimal::ONE,
            adjusted_valuation: base_valuation,
            rationale: "AI-native claim without a live product; premium withheld".to_string(),
        };
    }

    if input.traction.revenue_growth_rate < dec!(1.5) {
        return AiNativeModifierResult {
            multiplier: Decimal::ONE,
            adjusted_valuation: base_valuation,
            rationale: "growth rate below 150% YoY; premium withheld pending monetization evidence".to_string(),
        };
    }

    let mut premium = dec!(0.15);
    if input.product.proprietary_data_moat {
        premium = dec!(0.25);
    }

    if input.market.competitive_intensity_high {
        premium /= dec!(2);
    }

    let multiplier = Decimal::ONE + premium;
    AiNativeModifierResult {
        multiplier,
        adjusted_valuation: base_valuation * multiplier,
        rationale: format!("AI-native premium of {:.0}% applied", premium * dec!(100)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venture::types::{
        FundraisingProfile, MarketProfile, ProductProfile, StartupStage, StartupVertical, TeamProfile, TractionMetrics,
    };

    fn base_input() -> StartupInput {
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
                revenue_growth_rate: dec!(2.0),
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
                proprietary_data_moat: false,
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
    fn qualifying_ai_native_company_gets_the_base_premium() {
        let result = apply_ai_native_modifier(&base_input(), dec!(10_000_000));
        assert_eq!(result.multiplier, dec!(1.15));
    }

    #[test]
    fn data_moat_increases_the_premium() {
        let mut input = base_input();
        input.product.proprietary_data_moat = true;
        let result = apply_ai_native_modifier(&input, dec!(10_000_000));
        assert_eq!(result.multiplier, dec!(1.25));
    }

    #[test]
    fn high_competitive_intensity_halves_the_premium() {
        let mut input = base_input();
        input.market.competitive_intensity_high = true;
        let result = apply_ai_native_modifier(&input, dec!(10_000_000));
        assert_eq!(result.multiplier, dec!(1.075));
    }

    #[test]
    fn non_ai_native_company_is_a_pass_through() {
        let mut input = base_input();
        input.product.is_ai_native = false;
        let result = apply_ai_native_modifier(&input, dec!(10_000_000));
        assert_eq!(result.multiplier, Decimal::ONE);
        assert_eq!(result.adjusted_valuation, dec!(10_000_000));
    }

    #[test]
    fn low_growth_withholds_the_premium_despite_ai_native_flag() {
        let mut input = base_input();
        input.traction.revenue_growth_rate = dec!(0.8);
        let result = apply_ai_native_modifier(&input, dec!(10_000_000));
        assert_eq!(result.multiplier, Decimal::ONE);
    }
}
