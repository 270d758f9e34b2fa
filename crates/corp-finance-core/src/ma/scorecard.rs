use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::benchmarks::benchmark_for;
use super::projector::{project_core, DealOverride, ProFormaProjection};
use super::returns::ReturnsAnalysis;
use super::risk::RiskItem;
use super::types::{DealInput, DealVerdict, HealthStatus, Industry, RiskSeverity};

/// One of the eight standard headline metrics, graded against an industry
/// benchmark or a fixed policy band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorecardMetric {
    pub name: String,
    pub value: Decimal,
    pub health: HealthStatus,
}

/// Headline metrics an investment committee would scan first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealScorecard {
    pub year_one_accretion_dilution_pct: Decimal,
    pub year_two_accretion_dilution_pct: Decimal,
    pub breakeven_year: Option<u32>,
    pub net_debt_to_ebitda: Decimal,
    pub goodwill_pct_of_purchase_price: Decimal,
    pub metrics: Vec<ScorecardMetric>,
    pub highest_risk_severity: Option<RiskSeverity>,
    pub risk_count: usize,
    pub verdict: DealVerdict,
    pub verdict_rationale: String,
}

fn breakeven_year(projection: &ProFormaProjection) -> Option<u32> {
    projection
        .years
        .iter()
        .find(|y| y.accretion_dilution_pct >= Decimal::ZERO)
        .map(|y| y.year)
}

/// Lower-is-better banding for a ratio against three breakpoints.
fn band_lower_is_better(value: Decimal, good_below: Decimal, fair_below: Decimal, poor_below: Decimal) -> HealthStatus {
    if value < good_below {
        HealthStatus::Good
    } else if value < fair_below {
        HealthStatus::Fair
    } else if value < poor_below {
        HealthStatus::Poor
    } else {
        HealthStatus::Critical
    }
}

/// Higher-is-better banding for a ratio against three breakpoints.
fn band_higher_is_better(value: Decimal, good_above: Decimal, fair_above: Decimal, poor_above: Decimal) -> HealthStatus {
    if value > good_above {
        HealthStatus::Good
    } else if value > fair_above {
        HealthStatus::Fair
    } else if value > poor_above {
        HealthStatus::Poor
    } else {
        HealthStatus::Critical
    }
}

/// Year the acquisition debt raised for the deal first falls to or below
/// 10% of its initial balance, or `None` if it never does within the
/// projection horizon.
fn debt_repayment_year(projection: &ProFormaProjection) -> Option<u32> {
    let initial_debt = projection.consideration.debt_raised;
    if initial_debt <= Decimal::ZERO {
        return Some(0);
    }
    projection
        .years
        .iter()
        .find(|y| y.acquisition_debt_outstanding <= initial_debt * dec!(0.10))
        .map(|y| y.year)
}

/// Bisects for the smallest synergy multiplier (0..=1 of the modeled
/// synergy plan) at which year-one accretion reaches zero. A deal that is
/// already accretive with zero synergies needs none of the plan to break
/// even; a deal that is still dilutive at the full modeled plan needs more
/// than the plan delivers.
fn breakeven_synergy_fraction(deal: &DealInput) -> Decimal {
    let probe = |multiplier: Decimal| -> Option<Decimal> {
        let override_spec = DealOverride {
            synergy_multiplier: Some(multiplier),
            ..Default::default()
        };
        project_core(deal, Some(&override_spec)).ok()?.first().map(|y| y.accretion_dilution_pct)
    };

    match probe(Decimal::ZERO) {
        Some(acc) if acc >= Decimal::ZERO => return Decimal::ZERO,
        None => return Decimal::ONE,
        _ => {}
    }
    match probe(Decimal::ONE) {
        Some(acc) if acc < Decimal::ZERO => return Decimal::ONE,
        None => return Decimal::ONE,
        _ => {}
    }

    let mut lo = Decimal::ZERO;
    let mut hi = Decimal::ONE;
    for _ in 0..30 {
        let mid = (lo + hi) / dec!(2);
        match probe(mid) {
            Some(acc) if acc < Decimal::ZERO => lo = mid,
            Some(_) => hi = mid,
            None => return Decimal::ONE,
        }
    }
    hi
}

fn build_metrics(
    deal: &DealInput,
    projection: &ProFormaProjection,
    returns: &ReturnsAnalysis,
    year_one: Decimal,
    net_debt_to_ebitda: Decimal,
) -> Vec<ScorecardMetric> {
    let benchmark = benchmark_for(deal.target.industry);

    let entry_multiple = if deal.target.ebitda > Decimal::ZERO {
        deal.target.acquisition_price / deal.target.ebitda
    } else {
        Decimal::ZERO
    };
    let entry_multiple_health = band_lower_is_better(
        entry_multiple,
        benchmark.ev_ebitda_median,
        benchmark.ev_ebitda_high,
        benchmark.ev_ebitda_high * dec!(1.5),
    );

    let year_one_health = band_higher_is_better(year_one, dec!(0.02), Decimal::ZERO, dec!(-0.05));

    let pro_forma_eps = projection.years.first().map(|y| y.pro_forma_eps).unwrap_or(Decimal::ZERO);
    let standalone_eps = projection.years.first().map(|y| y.standalone_acquirer_eps).unwrap_or(Decimal::ZERO);
    let eps_health = band_higher_is_better(pro_forma_eps - standalone_eps, Decimal::ZERO, dec!(-0.01) * standalone_eps.abs(), dec!(-0.05) * standalone_eps.abs());

    // Base case: the 5-year hold (or the closest available exit year, since
    // a short projection horizon may not reach year 5) at the entry
    // multiple, i.e. no multiple expansion or compression from underwriting.
    let base_year = [5u32, 3, 7]
        .into_iter()
        .find(|y| returns.scenarios.iter().any(|s| s.exit_year == *y))
        .unwrap_or(0);
    let base_irr = returns
        .scenarios
        .iter()
        .filter(|s| s.exit_year == base_year)
        .min_by_key(|s| (s.exit_ev_ebitda_multiple - returns.entry_multiple).abs())
        .map(|s| s.irr)
        .unwrap_or(Decimal::ZERO);
    let irr_health = band_higher_is_better(base_irr, dec!(0.20), dec!(0.10), Decimal::ZERO);

    let leverage_health = band_lower_is_better(net_debt_to_ebitda, dec!(3.0), dec!(4.0), dec!(6.0));

    let breakeven_fraction = breakeven_synergy_fraction(deal);
    let breakeven_synergy_health =
        band_lower_is_better(breakeven_fraction, dec!(0.25), dec!(0.60), dec!(1.0));

    let repayment_year = debt_repayment_year(projection).unwrap_or(deal.projection_years + 1);
    let repayment_health = band_lower_is_better(Decimal::from(repayment_year), dec!(3), dec!(5), dec!(8));

    let synergy_cash_flows: Vec<Decimal> = std::iter::once(Decimal::ZERO)
        .chain(projection.years.iter().map(|y| y.synergies_realized))
        .collect();
    let synergy_npv = crate::time_value::npv(dec!(0.10), &synergy_cash_flows).unwrap_or(Decimal::ZERO);
    let synergy_npv_health = band_higher_is_better(
        synergy_npv,
        deal.target.acquisition_price * dec!(0.05),
        Decimal::ZERO,
        dec!(-1) * deal.target.acquisition_price * dec!(0.05),
    );

    vec![
        ScorecardMetric { name: "entry_multiple".to_string(), value: entry_multiple, health: entry_multiple_health },
        ScorecardMetric {
            name: "year_one_accretion_dilution_pct".to_string(),
            value: year_one,
            health: year_one_health,
        },
        ScorecardMetric { name: "pro_forma_eps".to_string(), value: pro_forma_eps, health: eps_health },
        ScorecardMetric { name: "five_year_irr_base_case".to_string(), value: base_irr, health: irr_health },
        ScorecardMetric {
            name: "post_close_leverage".to_string(),
            value: net_debt_to_ebitda,
            health: leverage_health,
        },
        ScorecardMetric {
            name: "breakeven_synergy_fraction".to_string(),
            value: breakeven_fraction,
            health: breakeven_synergy_health,
        },
        ScorecardMetric {
            name: "debt_repayment_year".to_string(),
            value: Decimal::from(repayment_year),
            health: repayment_health,
        },
        ScorecardMetric {
            name: "total_synergy_npv_10pct".to_string(),
            value: synergy_npv,
            health: synergy_npv_health,
        },
    ]
}

/// Scores the deal and assigns a green/yellow/red verdict. Defense-industry
/// targets get a wider yellow band (defense programs carry long-duration
/// backlog that smooths out near-term EPS noise a commercial target
/// wouldn't have), controlled by `defense_uplift`.
pub fn build_scorecard(
    deal: &DealInput,
    projection: &ProFormaProjection,
    risks: &[RiskItem],
    returns: &ReturnsAnalysis,
) -> DealScorecard {
    let year_one = projection
        .years
        .first()
        .map(|y| y.accretion_dilution_pct)
        .unwrap_or(Decimal::ZERO);
    let year_two = projection
        .years
        .get(1)
        .map(|y| y.accretion_dilution_pct)
        .unwrap_or(year_one);

    let combined_ebitda = projection.years.first().map(|y| y.combined_ebitda).unwrap_or(Decimal::ZERO);
    let net_debt = projection.balance_sheet_at_close.combined_debt - projection.balance_sheet_at_close.combined_cash;
    let net_debt_to_ebitda = if combined_ebitda > Decimal::ZERO {
        net_debt / combined_ebitda
    } else {
        Decimal::ZERO
    };

    let goodwill_pct_of_purchase_price = if deal.target.acquisition_price > Decimal::ZERO {
        projection.purchase_price_allocation.goodwill / deal.target.acquisition_price
    } else {
        Decimal::ZERO
    };

    let highest_risk_severity = risks.iter().map(|r| r.severity).max();
    let has_critical_risk = matches!(highest_risk_severity, Some(RiskSeverity::Critical));

    let defense_backlog_covered = projection
        .defense_positioning
        .as_ref()
        .map(|p| p.backlog_coverage_ratio >= dec!(2.0))
        .unwrap_or(false);
    let yellow_band_floor = if defense_backlog_covered { dec!(-0.08) } else { dec!(-0.02) };

    let (verdict, verdict_rationale) = if has_critical_risk || net_debt_to_ebitda > dec!(7.0) {
        (
            DealVerdict::Red,
            "A critical risk finding or net leverage above 7.0x makes this deal unfundable as structured".to_string(),
        )
    } else if year_one < yellow_band_floor
        || matches!(highest_risk_severity, Some(RiskSeverity::High))
        || net_debt_to_ebitda > dec!(5.0)
    {
        (
            DealVerdict::Yellow,
            format!(
                "Year-one EPS impact of {:.1}% and/or elevated risk findings warrant committee-level scrutiny",
                year_one * dec!(100)
            ),
        )
    } else {
        (
            DealVerdict::Green,
            "Deal clears accretion, leverage, and risk thresholds".to_string(),
        )
    };

    DealScorecard {
        year_one_accretion_dilution_pct: year_one,
        year_two_accretion_dilution_pct: year_two,
        breakeven_year: breakeven_year(projection),
        net_debt_to_ebitda,
        goodwill_pct_of_purchase_price,
        metrics: build_metrics(deal, projection, returns, year_one, net_debt_to_ebitda),
        highest_risk_severity,
        risk_count: risks.len(),
        verdict,
        verdict_rationale,
    }
}
