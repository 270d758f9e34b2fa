//! M&A accretion/dilution modeling: a circularity-aware pro-forma projector,
//! purchase price allocation, sensitivity grids, risk analysis, a deal
//! scorecard, and an acquirer returns engine.

pub mod benchmarks;
pub mod debt_schedule;
pub mod ppa;
pub mod projector;
pub mod returns;
pub mod risk;
pub mod scorecard;
pub mod sensitivity;
pub mod types;

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::CorpFinanceError;
use crate::types::ComputationOutput;

pub use benchmarks::{benchmark_for, IndustryBenchmark};
pub use debt_schedule::{solve_year, DebtScheduleYear, TrancheYear};
pub use ppa::{allocate_purchase_price, PurchasePriceAllocation};
pub use projector::{project_core, project_full, BalanceSheetAtClose, Consideration, CoreYear, DealOverride, EpsBridge, ProFormaProjection};
pub use returns::{analyze_returns, ReturnScenario, ReturnsAnalysis};
pub use risk::{analyze_risks, RiskItem};
pub use scorecard::{build_scorecard, DealScorecard, ScorecardMetric};
pub use sensitivity::{
    interest_rate_vs_leverage_sensitivity, purchase_price_vs_cash_stock_sensitivity, purchase_price_vs_synergy_sensitivity,
    SensitivityMatrix,
};
pub use types::{
    AcquirerProfile, AmortizationType, ClearanceLevel, ContractVehicleType, DealInput, DealStructure, DealVerdict,
    DebtTranche, DefenseProfile, DefenseSoftwareType, DeploymentClassification, HealthStatus, Industry, ModelMode,
    PurchasePriceAllocationInput, RiskSeverity, SynergyAssumptions, SynergyItem, TargetProfile,
};

fn validate_deal_input(input: &DealInput) -> Result<(), CorpFinanceError> {
    if input.target.acquisition_price <= Decimal::ZERO {
        return Err(CorpFinanceError::InvalidInput {
            field: "target.acquisition_price".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if !(3..=10).contains(&input.projection_years) {
        return Err(CorpFinanceError::InvalidInput {
            field: "projection_years".to_string(),
            reason: "must be between 3 and 10".to_string(),
        });
    }
    let mix_total = input.structure.cash_pct + input.structure.stock_pct + input.structure.debt_pct;
    if (mix_total - Decimal::ONE).abs() > dec!(0.001) {
        return Err(CorpFinanceError::InvalidInput {
            field: "structure.{cash,stock,debt}_pct".to_string(),
            reason: "financing mix must sum to 1.0".to_string(),
        });
    }
    Ok(())
}

/// Full output of a single deal analysis: the pro-forma projection, risk
/// findings, scorecard/verdict, three sensitivity grids, and acquirer
/// returns across a standard set of exit scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealOutput {
    pub projection: ProFormaProjection,
    pub risks: Vec<RiskItem>,
    pub scorecard: DealScorecard,
    pub purchase_price_vs_synergy_sensitivity: SensitivityMatrix,
    pub purchase_price_vs_cash_stock_sensitivity: SensitivityMatrix,
    pub interest_rate_vs_leverage_sensitivity: SensitivityMatrix,
    pub returns: ReturnsAnalysis,
}

/// Runs the full M&A deal analysis: validates the input, builds the
/// pro-forma projection, analyzes risk, scores the deal, sweeps the three
/// standard sensitivity grids, and models acquirer returns across the full
/// exit-year x exit-multiple scenario grid.
pub fn analyze_deal(input: &DealInput) -> Result<ComputationOutput<DealOutput>, CorpFinanceError> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_deal_input(input)?;

    let projection = project_full(input, None)?;
    let risks = analyze_risks(input, &projection);

    let purchase_price_vs_synergy_sensitivity = purchase_price_vs_synergy_sensitivity(input)?;
    let purchase_price_vs_cash_stock_sensitivity = purchase_price_vs_cash_stock_sensitivity(input)?;
    let interest_rate_vs_leverage_sensitivity = interest_rate_vs_leverage_sensitivity(input)?;

    let returns = analyze_returns(input, &projection);

    let scorecard = build_scorecard(input, &projection, &risks, &returns);

    if matches!(scorecard.verdict, DealVerdict::Red) {
        warnings.push("deal scorecard verdict is Red".to_string());
    }

    let output = DealOutput {
        projection,
        risks,
        scorecard,
        purchase_price_vs_synergy_sensitivity,
        purchase_price_vs_cash_stock_sensitivity,
        interest_rate_vs_leverage_sensitivity,
        returns,
    };

    let elapsed_us = start.elapsed().as_micros() as u64;
    Ok(crate::types::with_metadata(
        "ma_deal_accretion_dilution_v1",
        &json!({
            "mode": input.mode,
            "projection_years": input.projection_years,
        }),
        warnings,
        elapsed_us,
        output,
    ))
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
    fn analyze_deal_end_to_end_succeeds() {
        let output = analyze_deal(&sample_deal()).unwrap();
        assert_eq!(output.result.projection.years.len(), 3);
        assert_eq!(output.result.purchase_price_vs_synergy_sensitivity.data.len(), 7);
        assert!(!output.result.returns.scenarios.is_empty());
    }

    #[test]
    fn rejects_zero_acquisition_price() {
        let mut deal = sample_deal();
        deal.target.acquisition_price = Decimal::ZERO;
        assert!(analyze_deal(&deal).is_err());
    }

    #[test]
    fn rejects_projection_years_out_of_range() {
        let mut deal = sample_deal();
        deal.projection_years = 15;
        assert!(analyze_deal(&deal).is_err());
    }

    #[test]
    fn rejects_projection_years_below_the_three_year_minimum() {
        let mut deal = sample_deal();
        deal.projection_years = 2;
        assert!(analyze_deal(&deal).is_err());
    }
}
