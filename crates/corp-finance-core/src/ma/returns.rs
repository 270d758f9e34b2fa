use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

use super::projector::ProFormaProjection;
use super::types::DealInput;

const IRR_SEED: Decimal = dec!(0.15);
const IRR_MAX_ITERATIONS: usize = 200;
const IRR_TOLERANCE: Decimal = dec!(0.00000001);

/// Net present value of a cash flow series at `rate`, flow 0 occurring at t=0.
fn npv(rate: Decimal, flows: &[Decimal]) -> Decimal {
    let mut total = Decimal::ZERO;
    let mut discount_factor = Decimal::ONE;
    let divisor = Decimal::ONE + rate;
    for flow in flows {
        total += *flow / discount_factor;
        discount_factor *= divisor;
    }
    total
}

fn npv_derivative(rate: Decimal, flows: &[Decimal]) -> Decimal {
    let mut total = Decimal::ZERO;
    let divisor = Decimal::ONE + rate;
    let mut discount_factor = divisor;
    for (period, flow) in flows.iter().enumerate().skip(1) {
        total -= Decimal::from(period as u64) * *flow / discount_factor;
        discount_factor *= divisor;
    }
    total
}

/// Solves for the internal rate of return via Newton-Raphson, seeded at 15%.
/// Falls back to -1.0 (total loss) when the flows never change sign, which
/// Newton-Raphson cannot root-find and which signals the acquirer never
/// recoups the outlay under any discount rate.
fn irr(flows: &[Decimal]) -> Decimal {
    let has_positive = flows.iter().any(|f| *f > Decimal::ZERO);
    let has_negative = flows.iter().any(|f| *f < Decimal::ZERO);
    if !has_positive || !has_negative {
        return dec!(-1.0);
    }

    let mut rate = IRR_SEED;
    for _ in 0..IRR_MAX_ITERATIONS {
        let value = npv(rate, flows);
        let derivative = npv_derivative(rate, flows);
        if derivative.abs() < Decimal::new(1, 12) {
            break;
        }
        let next_rate = rate - value / derivative;
        if (next_rate - rate).abs() <= IRR_TOLERANCE {
            return next_rate;
        }
        rate = next_rate;
    }
    rate
}

/// One exit scenario for the acquirer's return on the deal: multiple-year
/// hold, an assumed exit multiple, and the resulting IRR/MOIC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnScenario {
    pub label: String,
    pub exit_year: u32,
    pub exit_ev_ebitda_multiple: Decimal,
    pub exit_enterprise_value: Decimal,
    pub net_debt_at_exit: Decimal,
    pub exit_equity: Decimal,
    pub equity_invested: Decimal,
    pub moic: Decimal,
    pub irr: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnsAnalysis {
    pub entry_multiple: Decimal,
    pub equity_invested: Decimal,
    pub scenarios: Vec<ReturnScenario>,
}

const EXIT_MULTIPLE_OFFSETS: [Decimal; 9] = [
    dec!(-2.0),
    dec!(-1.5),
    dec!(-1.0),
    dec!(-0.5),
    dec!(0.0),
    dec!(0.5),
    dec!(1.0),
    dec!(1.5),
    dec!(2.0),
];
const CANDIDATE_EXIT_YEARS: [u32; 3] = [3, 5, 7];

/// Builds the full entry-multiple x exit-multiple x exit-year scenario grid.
/// Entry multiple is `price / target_ebitda`; exit multiples walk `entry +-
/// {0.5 steps up to 2.0}` keeping only positive multiples; exit years are
/// `{3, 5, 7}` intersected with the projection horizon. Net debt at exit nets
/// the acquisition debt outstanding against cumulative free cash flow
/// retained since close (never letting retained cash go negative); equity
/// invested is the cash-plus-stock consideration, floored at 10% of price so
/// an all-debt deal still has a invested-capital denominator.
pub fn analyze_returns(deal: &DealInput, projection: &ProFormaProjection) -> ReturnsAnalysis {
    let price = deal.target.acquisition_price;
    let entry_multiple = if deal.target.ebitda > Decimal::ZERO {
        price / deal.target.ebitda
    } else {
        Decimal::ZERO
    };

    let equity_invested =
        (price * (deal.structure.cash_pct + deal.structure.stock_pct)).max(price * dec!(0.10));

    let exit_multiples: Vec<Decimal> = EXIT_MULTIPLE_OFFSETS
        .iter()
        .map(|offset| entry_multiple + *offset)
        .filter(|m| *m > Decimal::ZERO)
        .collect();

    let exit_years: Vec<u32> = CANDIDATE_EXIT_YEARS
        .iter()
        .copied()
        .filter(|y| *y >= 1 && *y <= deal.projection_years)
        .collect();

    let mut cumulative_cash_by_year: Vec<Decimal> = Vec::with_capacity(projection.years.len());
    let mut running = Decimal::ZERO;
    for year in &projection.years {
        running = (running + year.free_cash_flow).max(Decimal::ZERO);
        cumulative_cash_by_year.push(running);
    }

    let mut scenarios = Vec::with_capacity(exit_years.len() * exit_multiples.len());
    for &exit_year in &exit_years {
        let year_idx = (exit_year - 1) as usize;
        let year = match projection.years.get(year_idx) {
            Some(year) => year,
            None => continue,
        };
        let cumulative_cash = cumulative_cash_by_year[year_idx];
        let net_debt_at_exit = (year.acquisition_debt_outstanding - cumulative_cash).max(Decimal::ZERO);

        for &multiple in &exit_multiples {
            let exit_enterprise_value = year.combined_ebitda * multiple;
            let exit_equity = (exit_enterprise_value - net_debt_at_exit).max(Decimal::ZERO);

            let moic = if equity_invested > Decimal::ZERO {
                exit_equity / equity_invested
            } else {
                Decimal::ZERO
            };

            let mut flows = vec![-equity_invested];
            flows.extend(std::iter::repeat(Decimal::ZERO).take((exit_year - 1) as usize));
            flows.push(exit_equity);
            let scenario_irr = irr(&flows).max(dec!(-1.0));

            scenarios.push(ReturnScenario {
                label: format!("{:.1}x exit in year {}", multiple, exit_year),
                exit_year,
                exit_ev_ebitda_multiple: multiple,
                exit_enterprise_value,
                net_debt_at_exit,
                exit_equity,
                equity_invested,
                moic,
                irr: scenario_irr,
            });
        }
    }

    ReturnsAnalysis {
        entry_multiple,
        equity_invested,
        scenarios,
    }
}
