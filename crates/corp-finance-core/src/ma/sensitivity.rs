use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CorpFinanceError;
use crate::types::Rate;

use super::projector::{project_core, DealOverride};
use super::types::DealInput;

/// A two-dimensional sensitivity grid: year-1 accretion/dilution re-computed
/// across every (row, col) perturbation pair. `data[row][col]` mirrors
/// `row_values`/`col_values` index-for-index. `base_row_index`/
/// `base_col_index` mark the cell closest to the deal as actually quoted, so
/// a UI can highlight "you are here."
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityMatrix {
    pub title: String,
    pub row_label: String,
    pub row_values: Vec<Decimal>,
    pub col_label: String,
    pub col_values: Vec<Decimal>,
    pub data: Vec<Vec<Decimal>>,
    pub base_row_index: usize,
    pub base_col_index: usize,
}

fn closest_index(values: &[Decimal], actual: Decimal) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| (**v - actual).abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[allow(clippy::too_many_arguments)]
fn run_grid_2d(
    input: &DealInput,
    title: &str,
    row_label: &str,
    row_values: &[Decimal],
    col_label: &str,
    col_values: &[Decimal],
    base_row_index: usize,
    base_col_index: usize,
    build_override: impl Fn(Decimal, Decimal) -> DealOverride,
) -> Result<SensitivityMatrix, CorpFinanceError> {
    let mut data = Vec::with_capacity(row_values.len());
    for &row in row_values {
        let mut row_data = Vec::with_capacity(col_values.len());
        for &col in col_values {
            let override_spec = build_override(row, col);
            let years = project_core(input, Some(&override_spec))?;
            let year_one = years.first().map(|y| y.accretion_dilution_pct).unwrap_or(Decimal::ZERO);
            row_data.push(year_one.round_dp(4));
        }
        data.push(row_data);
    }
    Ok(SensitivityMatrix {
        title: title.to_string(),
        row_label: row_label.to_string(),
        row_values: row_values.to_vec(),
        col_label: col_label.to_string(),
        col_values: col_values.to_vec(),
        data,
        base_row_index,
        base_col_index,
    })
}

fn price_premiums() -> Vec<Decimal> {
    vec![dec!(-0.20), dec!(-0.10), dec!(0.0), dec!(0.10), dec!(0.20), dec!(0.30), dec!(0.40)]
}

/// Purchase Price vs Synergies: price premium over the quoted acquisition
/// price against how much of the modeled synergy case is actually achieved.
pub fn purchase_price_vs_synergy_sensitivity(input: &DealInput) -> Result<SensitivityMatrix, CorpFinanceError> {
    let premiums = price_premiums();
    let achievement = vec![dec!(0.0), dec!(0.25), dec!(0.5), dec!(0.75), dec!(1.0), dec!(1.25), dec!(1.5)];
    let base_row = closest_index(&premiums, Decimal::ZERO);
    let base_col = closest_index(&achievement, Decimal::ONE);

    run_grid_2d(
        input,
        "Purchase Price vs Synergies",
        "price_premium",
        &premiums,
        "synergy_achievement",
        &achievement,
        base_row,
        base_col,
        |premium, achievement| DealOverride {
            acquisition_price_multiplier: Some(Decimal::ONE + premium),
            synergy_multiplier: Some(achievement),
            ..Default::default()
        },
    )
}

/// Purchase Price vs Cash/Stock Mix: price premium against how much of
/// consideration is cash, with debt held fixed at the deal's own debt
/// percentage and stock absorbing whatever cash doesn't cover.
pub fn purchase_price_vs_cash_stock_sensitivity(input: &DealInput) -> Result<SensitivityMatrix, CorpFinanceError> {
    let premiums = price_premiums();
    let cash_fractions = vec![dec!(0.0), dec!(0.2), dec!(0.4), dec!(0.6), dec!(0.8), dec!(1.0)];
    let debt_pct = input.structure.debt_pct;
    let base_row = closest_index(&premiums, Decimal::ZERO);
    let base_col = closest_index(&cash_fractions, input.structure.cash_pct);

    run_grid_2d(
        input,
        "Purchase Price vs Cash/Stock Mix",
        "price_premium",
        &premiums,
        "cash_fraction",
        &cash_fractions,
        base_row,
        base_col,
        move |premium, cash_pct| DealOverride {
            acquisition_price_multiplier: Some(Decimal::ONE + premium),
            cash_pct: Some(cash_pct),
            stock_pct: Some((Decimal::ONE - debt_pct - cash_pct).max(Decimal::ZERO)),
            debt_pct: Some(debt_pct),
            ..Default::default()
        },
    )
}

fn actual_acquisition_debt_rate(input: &DealInput) -> Rate {
    if !input.structure.debt_tranches.is_empty() {
        let total: Decimal = input.structure.debt_tranches.iter().map(|t| t.amount).sum();
        if total > Decimal::ZERO {
            return input
                .structure
                .debt_tranches
                .iter()
                .map(|t| t.interest_rate * (t.amount / total))
                .sum();
        }
    }
    let benchmark = super::benchmarks::benchmark_for(input.target.industry);
    Decimal::new(5, 2) + benchmark.typical_cost_of_debt_spread
}

/// Interest Rate vs Leverage: acquisition-debt coupon against debt sized as
/// a multiple ("turns") of combined EBITDA, independent of the deal's actual
/// financing mix.
pub fn interest_rate_vs_leverage_sensitivity(input: &DealInput) -> Result<SensitivityMatrix, CorpFinanceError> {
    let rates = vec![dec!(0.05), dec!(0.06), dec!(0.07), dec!(0.08), dec!(0.09), dec!(0.10), dec!(0.11)];
    let turns = vec![dec!(2), dec!(3), dec!(4), dec!(5), dec!(6), dec!(7)];

    let combined_ebitda = input.acquirer.ebitda + input.target.ebitda;
    let actual_debt = input.target.acquisition_price * input.structure.debt_pct;
    let actual_turns = if combined_ebitda > Decimal::ZERO {
        actual_debt / combined_ebitda
    } else {
        Decimal::ZERO
    };

    let base_row = closest_index(&rates, actual_acquisition_debt_rate(input));
    let base_col = closest_index(&turns, actual_turns);

    run_grid_2d(
        input,
        "Interest Rate vs Leverage",
        "interest_rate",
        &rates,
        "debt_to_ebitda_turns",
        &turns,
        base_row,
        base_col,
        |rate, turns| DealOverride {
            flat_tranche_rate: Some(rate),
            leverage_turns: Some(turns),
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ma::types::{
        AcquirerProfile, DealStructure, Industry, ModelMode, PurchasePriceAllocationInput, SynergyAssumptions,
        TargetProfile,
    };

    fn sample_deal() -> DealInput {
        DealInput {
            acquirer: AcquirerProfile {
                name: "Acquirer Inc".to_string(),
                revenue: dec!(500_000_000),
                ebitda: dec!(100_000_000),
                net_income: dec!(50_000_000),
                total_debt: dec!(100_000_000),
                cash_on_hand: dec!(50_000_000),
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
                cash_on_hand: dec!(5_000_000),
                acquisition_price: dec!(150_000_000),
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
                cash_pct: dec!(0.5),
                stock_pct: dec!(0.3),
                debt_pct: dec!(0.2),
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
    fn purchase_price_vs_synergy_grid_is_seven_by_seven() {
        let matrix = purchase_price_vs_synergy_sensitivity(&sample_deal()).unwrap();
        assert_eq!(matrix.data.len(), 7);
        assert!(matrix.data.iter().all(|row| row.len() == 7));
    }

    #[test]
    fn higher_price_premium_never_increases_accretion_at_fixed_synergies() {
        let matrix = purchase_price_vs_synergy_sensitivity(&sample_deal()).unwrap();
        for row in matrix.data.windows(2) {
            for col in 0..row[0].len() {
                assert!(row[1][col] <= row[0][col]);
            }
        }
    }

    #[test]
    fn higher_synergy_achievement_never_decreases_accretion_at_fixed_price() {
        let matrix = purchase_price_vs_synergy_sensitivity(&sample_deal()).unwrap();
        for row in &matrix.data {
            for pair in row.windows(2) {
                assert!(pair[1] >= pair[0]);
            }
        }
    }

    #[test]
    fn cash_stock_mix_grid_is_seven_by_six() {
        let matrix = purchase_price_vs_cash_stock_sensitivity(&sample_deal()).unwrap();
        assert_eq!(matrix.data.len(), 7);
        assert!(matrix.data.iter().all(|row| row.len() == 6));
    }

    #[test]
    fn interest_rate_vs_leverage_grid_is_seven_by_six() {
        let matrix = interest_rate_vs_leverage_sensitivity(&sample_deal()).unwrap();
        assert_eq!(matrix.data.len(), 7);
        assert!(matrix.data.iter().all(|row| row.len() == 6));
    }

    #[test]
    fn higher_leverage_never_increases_accretion_at_fixed_rate() {
        let matrix = interest_rate_vs_leverage_sensitivity(&sample_deal()).unwrap();
        for row in &matrix.data {
            for pair in row.windows(2) {
                assert!(pair[1] <= pair[0]);
            }
        }
    }
}
