use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::projector::{project_core, DealOverride, ProFormaProjection};
use super::types::{DealInput, RiskSeverity};

/// A single risk finding. Every check is a plain function returning
/// `Option<RiskItem>` (`None` when the check doesn't fire) so the analyzer
/// never needs exception handling to aggregate across checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskItem {
    pub category: String,
    pub severity: RiskSeverity,
    pub description: String,
}

/// Gross combined leverage (acquisition debt + both parties' existing debt,
/// undiminished by cash) against year-one combined EBITDA.
fn check_leverage(projection: &ProFormaProjection) -> Option<RiskItem> {
    let year_one = projection.years.first()?;
    if year_one.combined_ebitda <= Decimal::ZERO {
        return Some(RiskItem {
            category: "leverage".to_string(),
            severity: RiskSeverity::Critical,
            description: "Pro-forma year-one EBITDA is zero or negative".to_string(),
        });
    }
    let leverage = projection.balance_sheet_at_close.combined_debt / year_one.combined_ebitda;
    if leverage >= dec!(6.0) {
        Some(RiskItem {
            category: "leverage".to_string(),
            severity: RiskSeverity::Critical,
            description: format!("Pro-forma debt / EBITDA of {:.1}x is at or above the 6.0x critical threshold", leverage),
        })
    } else if leverage >= dec!(5.0) {
        Some(RiskItem {
            category: "leverage".to_string(),
            severity: RiskSeverity::High,
            description: format!("Pro-forma debt / EBITDA of {:.1}x is at or above the 5.0x threshold", leverage),
        })
    } else if leverage >= dec!(4.0) {
        Some(RiskItem {
            category: "leverage".to_string(),
            severity: RiskSeverity::Medium,
            description: format!("Pro-forma debt / EBITDA of {:.1}x is elevated", leverage),
        })
    } else {
        None
    }
}

/// Total modeled synergies (cost + revenue) as a share of target revenue.
fn check_synergy_execution(deal: &DealInput) -> Option<RiskItem> {
    if deal.target.revenue <= Decimal::ZERO {
        return None;
    }
    let synergy_pct = deal.synergies.total_annual() / deal.target.revenue;
    if synergy_pct >= dec!(0.15) {
        Some(RiskItem {
            category: "synergy_dependence".to_string(),
            severity: RiskSeverity::High,
            description: format!(
                "Modeled run-rate synergies of {:.0}% of target revenue require aggressive execution",
                synergy_pct * dec!(100)
            ),
        })
    } else if synergy_pct >= dec!(0.08) {
        Some(RiskItem {
            category: "synergy_dependence".to_string(),
            severity: RiskSeverity::Medium,
            description: format!(
                "Modeled run-rate synergies of {:.0}% of target revenue are above typical execution norms",
                synergy_pct * dec!(100)
            ),
        })
    } else {
        None
    }
}

/// Bisects for the basis-point increase in acquisition-debt interest rates
/// that would eliminate year-one accretion, flagging deals with thin
/// headroom against a rate move. Only meaningful when year one is currently
/// accretive; an already-dilutive deal has no "headroom" to describe.
fn check_interest_rate_sensitivity(deal: &DealInput, projection: &ProFormaProjection) -> Option<RiskItem> {
    let year_one = projection.years.first()?;
    if year_one.accretion_dilution_pct <= Decimal::ZERO {
        return None;
    }

    let probe = |delta: Decimal| -> Option<Decimal> {
        let override_spec = DealOverride {
            interest_rate_delta: Some(delta),
            ..Default::default()
        };
        project_core(deal, Some(&override_spec)).ok()?.first().map(|y| y.accretion_dilution_pct)
    };

    let ceiling = dec!(0.20);
    if probe(ceiling)? > Decimal::ZERO {
        return None;
    }

    let mut lo = Decimal::ZERO;
    let mut hi = ceiling;
    for _ in 0..30 {
        let mid = (lo + hi) / dec!(2);
        match probe(mid) {
            Some(acc) if acc > Decimal::ZERO => lo = mid,
            Some(_) => hi = mid,
            None => return None,
        }
    }
    let breakeven_bps = hi * dec!(10_000);

    if breakeven_bps < dec!(100) {
        Some(RiskItem {
            category: "interest_rate_sensitivity".to_string(),
            severity: RiskSeverity::High,
            description: format!(
                "Accretion breaks even after just {:.0} bps of rate increase on acquisition debt",
                breakeven_bps
            ),
        })
    } else if breakeven_bps < dec!(200) {
        Some(RiskItem {
            category: "interest_rate_sensitivity".to_string(),
            severity: RiskSeverity::Medium,
            description: format!(
                "Accretion breaks even after {:.0} bps of rate increase on acquisition debt",
                breakeven_bps
            ),
        })
    } else {
        None
    }
}

/// Entry multiple against the industry's EV/EBITDA benchmark band.
fn check_purchase_price_premium(deal: &DealInput) -> Option<RiskItem> {
    if deal.target.ebitda <= Decimal::ZERO {
        return None;
    }
    let benchmark = super::benchmarks::benchmark_for(deal.target.industry);
    let entry_multiple = deal.target.acquisition_price / deal.target.ebitda;

    if entry_multiple > benchmark.ev_ebitda_median * dec!(1.5) {
        Some(RiskItem {
            category: "purchase_price_premium".to_string(),
            severity: RiskSeverity::High,
            description: format!(
                "Entry multiple of {:.1}x is more than 1.5x the industry median of {:.1}x",
                entry_multiple, benchmark.ev_ebitda_median
            ),
        })
    } else if entry_multiple > benchmark.ev_ebitda_high {
        Some(RiskItem {
            category: "purchase_price_premium".to_string(),
            severity: RiskSeverity::Medium,
            description: format!(
                "Entry multiple of {:.1}x exceeds the industry high of {:.1}x",
                entry_multiple, benchmark.ev_ebitda_high
            ),
        })
    } else {
        None
    }
}

/// Cost-to-achieve against the synergies it buys in year one.
fn check_integration_cost_drag(deal: &DealInput, projection: &ProFormaProjection) -> Option<RiskItem> {
    let year_one = projection.years.first()?;
    if year_one.synergies_realized <= Decimal::ZERO {
        return None;
    }
    let ratio = deal.synergies.total_cost_to_achieve() / year_one.synergies_realized;
    if ratio > dec!(2.0) {
        Some(RiskItem {
            category: "integration_cost".to_string(),
            severity: RiskSeverity::High,
            description: format!(
                "Cost to achieve is {:.1}x year-one realized synergies, more than double",
                ratio
            ),
        })
    } else if ratio > dec!(1.0) {
        Some(RiskItem {
            category: "integration_cost".to_string(),
            severity: RiskSeverity::Medium,
            description: format!("Cost to achieve exceeds year-one realized synergies ({:.1}x)", ratio),
        })
    } else {
        None
    }
}

/// Share of total synergies that are revenue (rather than cost) synergies.
/// Revenue synergies are historically the least reliable line item in a
/// deal model, so concentration there gets flagged on its own.
fn check_revenue_synergy_concentration(deal: &DealInput) -> Option<RiskItem> {
    let total = deal.synergies.total_annual();
    if total <= Decimal::ZERO {
        return None;
    }
    let revenue_share = deal.synergies.total_revenue_annual() / total;
    if revenue_share > dec!(0.70) {
        Some(RiskItem {
            category: "revenue_synergy_concentration".to_string(),
            severity: RiskSeverity::High,
            description: format!(
                "{:.0}% of modeled synergies are revenue synergies, the least reliable kind to underwrite",
                revenue_share * dec!(100)
            ),
        })
    } else if revenue_share > dec!(0.50) {
        Some(RiskItem {
            category: "revenue_synergy_concentration".to_string(),
            severity: RiskSeverity::Medium,
            description: format!("{:.0}% of modeled synergies are revenue synergies", revenue_share * dec!(100)),
        })
    } else {
        None
    }
}

fn check_customer_concentration(deal: &DealInput) -> Option<RiskItem> {
    let profile = deal.target.defense_profile.as_ref()?;
    if profile.customer_concentration_dod_pct > dec!(0.80) {
        Some(RiskItem {
            category: "customer_concentration".to_string(),
            severity: RiskSeverity::Medium,
            description: format!(
                "{:.0}% of target revenue concentrated with a single government customer",
                profile.customer_concentration_dod_pct * dec!(100)
            ),
        })
    } else {
        None
    }
}

fn check_financing_mix_concentration(deal: &DealInput) -> Option<RiskItem> {
    if deal.structure.debt_pct > dec!(0.7) {
        Some(RiskItem {
            category: "financing_mix".to_string(),
            severity: RiskSeverity::High,
            description: "More than 70% of consideration is debt-financed".to_string(),
        })
    } else {
        None
    }
}

fn check_convergence(projection: &ProFormaProjection) -> Option<RiskItem> {
    let first_non_converged = projection.years.iter().find(|y| !y.debt_schedule_converged)?;
    Some(RiskItem {
        category: "convergence".to_string(),
        severity: RiskSeverity::Medium,
        description: format!(
            "The debt schedule's circularity solve did not converge within tolerance in year {}",
            first_non_converged.year
        ),
    })
}

/// Runs every risk check and returns the findings sorted by descending
/// severity (Critical first). Checks that don't fire simply contribute no
/// item; there is no partial-failure state to propagate.
pub fn analyze_risks(deal: &DealInput, projection: &ProFormaProjection) -> Vec<RiskItem> {
    let mut items: Vec<RiskItem> = [
        check_leverage(projection),
        check_synergy_execution(deal),
        check_interest_rate_sensitivity(deal, projection),
        check_purchase_price_premium(deal),
        check_integration_cost_drag(deal, projection),
        check_revenue_synergy_concentration(deal),
        check_customer_concentration(deal),
        check_financing_mix_concentration(deal),
        check_convergence(projection),
    ]
    .into_iter()
    .flatten()
    .collect();

    items.sort_by(|a, b| b.severity.cmp(&a.severity));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ma::projector::project_full;
    use crate::ma::types::{
        AcquirerProfile, DealStructure, Industry, ModelMode, PurchasePriceAllocationInput, SynergyAssumptions,
        TargetProfile,
    };

    fn highly_levered_deal() -> DealInput {
        DealInput {
            acquirer: AcquirerProfile {
                name: "Acquirer Inc".to_string(),
                revenue: dec!(500_000_000),
                ebitda: dec!(100_000_000),
                net_income: dec!(50_000_000),
                total_debt: dec!(100_000_000),
                cash_on_hand: dec!(10_000_000),
                shares_outstanding: dec!(50_000_000),
                share_price: dec!(40),
                tax_rate: dec!(0.25),
                depreciation: dec!(20_000_000),
                capex: dec!(22_000_000),
                working_capital: dec!(60_000_000),
                industry: Industry::Manufacturing,
            },
            target: TargetProfile {
                name: "Target Co".to_string(),
                revenue: dec!(100_000_000),
                ebitda: dec!(20_000_000),
                net_income: dec!(10_000_000),
                total_debt: dec!(15_000_000),
                cash_on_hand: dec!(2_000_000),
                acquisition_price: dec!(400_000_000),
                tax_rate: dec!(0.25),
                depreciation: dec!(4_000_000),
                capex: dec!(4_500_000),
                working_capital: dec!(30_000_000),
                industry: Industry::Manufacturing,
                revenue_growth_rate: dec!(0.05),
                defense_profile: None,
                is_ai_native: false,
            },
            structure: DealStructure {
                cash_pct: dec!(0.1),
                stock_pct: dec!(0.1),
                debt_pct: dec!(0.8),
                debt_tranches: vec![],
                transaction_fees_pct: dec!(0.02),
                advisory_fees: Decimal::ZERO,
            },
            ppa: PurchasePriceAllocationInput::default(),
            synergies: SynergyAssumptions::default(),
            mode: ModelMode::Quick,
            projection_years: 3,
        }
    }

    #[test]
    fn flags_high_leverage_and_heavy_debt_financing() {
        let deal = highly_levered_deal();
        let projection = project_full(&deal, None).unwrap();
        let risks = analyze_risks(&deal, &projection);
        assert!(risks.iter().any(|r| r.category == "leverage"));
        assert!(risks.iter().any(|r| r.category == "financing_mix"));
    }

    #[test]
    fn items_are_sorted_by_descending_severity() {
        let deal = highly_levered_deal();
        let projection = project_full(&deal, None).unwrap();
        let risks = analyze_risks(&deal, &projection);
        for pair in risks.windows(2) {
            assert!(pair[0].severity >= pair[1].severity);
        }
    }
}
