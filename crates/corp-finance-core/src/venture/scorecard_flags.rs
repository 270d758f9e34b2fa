use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::blending::BlendedValuation;
use super::types::StartupInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagStatus {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorecardFlag {
    pub metric: String,
    pub status: FlagStatus,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationVerdict {
    Strong,
    Promising,
    Caution,
    Pass,
}

fn flag_runway(input: &StartupInput) -> ScorecardFlag {
    match input.traction.runway_months() {
        None => ScorecardFlag {
            metric: "runway".to_string(),
            status: FlagStatus::Green,
            detail: "burn is zero or negative".to_string(),
        },
        Some(months) if months < dec!(6) => ScorecardFlag {
            metric: "runway".to_string(),
            status: FlagStatus::Red,
            detail: format!("{:.0} months of runway", months),
        },
        Some(months) if months < dec!(12) => ScorecardFlag {
            metric: "runway".to_string(),
            status: FlagStatus::Yellow,
            detail: format!("{:.0} months of runway", months),
        },
        Some(months) => ScorecardFlag {
            metric: "runway".to_string(),
            status: FlagStatus::Green,
            detail: format!("{:.0} months of runway", months),
        },
    }
}

fn flag_growth(input: &StartupInput) -> ScorecardFlag {
    let growth = input.traction.revenue_growth_rate;
    let status = if growth >= dec!(2.0) {
        FlagStatus::Green
    } else if growth >= dec!(1.0) {
        FlagStatus::Yellow
    } else {
        FlagStatus::Red
    };
    ScorecardFlag {
        metric: "revenue_growth".to_string(),
        status,
        detail: format!("{:.0}% YoY growth", growth * dec!(100)),
    }
}

fn flag_retention(input: &StartupInput) -> ScorecardFlag {
    match input.traction.net_revenue_retention {
        None => ScorecardFlag {
            metric: "net_revenue_retention".to_string(),
            status: FlagStatus::Yellow,
            detail: "not reported".to_string(),
        },
        Some(nrr) if nrr >= dec!(1.10) => ScorecardFlag {
            metric: "net_revenue_retention".to_string(),
            status: FlagStatus::Green,
            detail: format!("{:.0}% NRR", nrr * dec!(100)),
        },
        Some(nrr) if nrr >= dec!(0.95) => ScorecardFlag {
            metric: "net_revenue_retention".to_string(),
            status: FlagStatus::Yellow,
            detail: format!("{:.0}% NRR", nrr * dec!(100)),
        },
        Some(nrr) => ScorecardFlag {
            metric: "net_revenue_retention".to_string(),
            status: FlagStatus::Red,
            detail: format!("{:.0}% NRR", nrr * dec!(100)),
        },
    }
}

fn flag_team(input: &StartupInput) -> ScorecardFlag {
    if input.team.is_solo_founder {
        ScorecardFlag {
            metric: "team".to_string(),
            status: FlagStatus::Yellow,
            detail: "solo founder".to_string(),
        }
    } else if input.team.has_technical_cofounder {
        ScorecardFlag {
            metric: "team".to_string(),
            status: FlagStatus::Green,
            detail: "multi-founder team with technical cofounder".to_string(),
        }
    } else {
        ScorecardFlag {
            metric: "team".to_string(),
            status: FlagStatus::Yellow,
            detail: "no technical cofounder on the team".to_string(),
        }
    }
}

fn flag_ask_vs_blend(input: &StartupInput, blended: &BlendedValuation) -> ScorecardFlag {
    if blended.point_estimate <= Decimal::ZERO {
        return ScorecardFlag {
            metric: "valuation_ask".to_string(),
            status: FlagStatus::Yellow,
            detail: "no blended estimate available to compare against the ask".to_string(),
        };
    }
    let ask = input.fundraising.pre_money_valuation_ask;
    let premium = (ask - blended.point_estimate) / blended.point_estimate;
    let status = if premium <= dec!(0.15) {
        FlagStatus::Green
    } else if premium <= dec!(0.40) {
        FlagStatus::Yellow
    } else {
        FlagStatus::Red
    };
    ScorecardFlag {
        metric: "valuation_ask".to_string(),
        status,
        detail: format!("ask is {:.0}% above the blended point estimate", premium * dec!(100)),
    }
}

/// Builds the investor-facing scorecard flags and rolls them into an
/// overall verdict. Any red flag caps the verdict at Caution; two or more
/// red flags caps it at Pass.
pub fn build_investor_scorecard(
    input: &StartupInput,
    blended: &BlendedValuation,
) -> (Vec<ScorecardFlag>, ValuationVerdict) {
    let flags = vec![
        flag_runway(input),
        flag_growth(input),
        flag_retention(input),
        flag_team(input),
        flag_ask_vs_blend(input, blended),
    ];

    let red_count = flags.iter().filter(|f| f.status == FlagStatus::Red).count();
    let yellow_count = flags.iter().filter(|f| f.status == FlagStatus::Yellow).count();

    let verdict = if red_count >= 2 {
        ValuationVerdict::Pass
    } else if red_count == 1 {
        ValuationVerdict::Caution
    } else if yellow_count >= 2 {
        ValuationVerdict::Promising
    } else {
        ValuationVerdict::Strong
    };

    (flags, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venture::blending::blend_valuations;
    use crate::venture::types::{
        FundraisingProfile, MarketProfile, ProductProfile, StartupStage, StartupVertical, TeamProfile, TractionMetrics,
    };

    fn strong_input() -> StartupInput {
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
                pre_money_valuation_ask: dec!(45_000_000),
                months_since_last_round: Some(14),
                prior_round_count: 2,
            },
        }
    }

    #[test]
    fn strong_company_clears_most_flags_green() {
        let input = strong_input();
        let blended = blend_valuations(&input);
        let (flags, verdict) = build_investor_scorecard(&input, &blended);
        let red_count = flags.iter().filter(|f| f.status == FlagStatus::Red).count();
        assert_eq!(red_count, 0);
        assert!(matches!(verdict, ValuationVerdict::Strong | ValuationVerdict::Promising));
    }

    #[test]
    fn short_runway_and_weak_retention_cap_the_verdict() {
        let mut input = strong_input();
        input.traction.cash_on_hand = dec!(200_000);
        input.traction.burn_rate_monthly = dec!(150_000);
        input.traction.net_revenue_retention = Some(dec!(0.80));
        let blended = blend_valuations(&input);
        let (_, verdict) = build_investor_scorecard(&input, &blended);
        assert!(matches!(verdict, ValuationVerdict::Caution | ValuationVerdict::Pass));
    }
}
