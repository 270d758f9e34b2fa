use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CorpFinanceError;
use crate::types::Money;

use super::types::{PurchasePriceAllocationInput, TargetProfile};

/// Resolved purchase price allocation: how the consideration paid splits
/// across net tangible assets, the asset writeup, identifiable intangibles
/// and residual goodwill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePriceAllocation {
    pub purchase_price: Money,
    pub target_net_tangible_assets: Money,
    pub asset_writeup: Money,
    pub identifiable_intangibles: Money,
    pub deferred_tax_liability: Money,
    pub fair_value_net_assets: Money,
    pub goodwill: Money,
    pub annual_writeup_amortization: Money,
    pub annual_intangible_amortization: Money,
    pub annual_incremental_d_and_a: Money,
}

/// Allocates the purchase price using the target's disclosed balance sheet
/// and the deal's writeup/intangible assumptions. The step-up and
/// identifiable intangibles create a deferred tax liability (book value
/// exceeds tax basis), which reduces fair-value net assets and so raises
/// goodwill (ASC 805/740). Goodwill absorbs whatever consideration isn't
/// assigned to fair-value net assets; it is clamped at zero on the books (a
/// price below fair-value net assets is a bargain purchase, out of scope
/// here and flagged instead of silently modeled as negative goodwill).
pub fn allocate_purchase_price(
    target: &TargetProfile,
    ppa_input: &PurchasePriceAllocationInput,
) -> Result<PurchasePriceAllocation, CorpFinanceError> {
    if target.acquisition_price <= Decimal::ZERO {
        return Err(CorpFinanceError::InvalidInput {
            field: "target.acquisition_price".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    let net_tangible_assets = target.working_capital + target.cash_on_hand - target.total_debt;
    let book_equity = net_tangible_assets;

    let deferred_tax_liability =
        (ppa_input.asset_writeup + ppa_input.identifiable_intangibles) * target.tax_rate;
    let fair_value_net_assets =
        book_equity + ppa_input.asset_writeup + ppa_input.identifiable_intangibles - deferred_tax_liability;

    if target.acquisition_price < fair_value_net_assets {
        return Err(CorpFinanceError::FinancialImpossibility(format!(
            "acquisition price {} is below fair-value net assets {} (bargain purchase); not modeled",
            target.acquisition_price, fair_value_net_assets
        )));
    }
    let goodwill = (target.acquisition_price - fair_value_net_assets).max(Decimal::ZERO);

    let annual_writeup_amortization = if ppa_input.asset_writeup_useful_life > 0 {
        ppa_input.asset_writeup / Decimal::from(ppa_input.asset_writeup_useful_life)
    } else {
        Decimal::ZERO
    };

    let annual_intangible_amortization = if ppa_input.intangible_useful_life > 0 {
        ppa_input.identifiable_intangibles / Decimal::from(ppa_input.intangible_useful_life)
    } else {
        Decimal::ZERO
    };

    Ok(PurchasePriceAllocation {
        purchase_price: target.acquisition_price,
        target_net_tangible_assets: net_tangible_assets,
        asset_writeup: ppa_input.asset_writeup,
        identifiable_intangibles: ppa_input.identifiable_intangibles,
        deferred_tax_liability,
        fair_value_net_assets,
        goodwill,
        annual_writeup_amortization,
        annual_intangible_amortization,
        annual_incremental_d_and_a: annual_writeup_amortization + annual_intangible_amortization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ma::types::Industry;
    use rust_decimal_macros::dec;

    fn target() -> TargetProfile {
        TargetProfile {
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
        }
    }

    #[test]
    fn goodwill_absorbs_the_residual() {
        let ppa_input = PurchasePriceAllocationInput {
            asset_writeup: dec!(10_000_000),
            asset_writeup_useful_life: 15,
            identifiable_intangibles: dec!(20_000_000),
            intangible_useful_life: 10,
        };
        let result = allocate_purchase_price(&target(), &ppa_input).unwrap();
        // net tangible assets = 30M + 5M - 15M = 20M
        assert_eq!(result.target_net_tangible_assets, dec!(20_000_000));
        // DTL = (10M + 20M) x 0.25 = 7.5M
        assert_eq!(result.deferred_tax_liability, dec!(7_500_000));
        // FVNA = 20M + 10M + 20M - 7.5M = 42.5M
        assert_eq!(result.fair_value_net_assets, dec!(42_500_000));
        // goodwill = 150M - 42.5M = 107.5M
        assert_eq!(result.goodwill, dec!(107_500_000));
        assert_eq!(result.annual_writeup_amortization, dec!(10_000_000) / dec!(15));
        assert_eq!(result.annual_intangible_amortization, dec!(2_000_000));
    }

    #[test]
    fn price_below_fair_value_net_assets_is_rejected_as_bargain_purchase() {
        let mut t = target();
        t.acquisition_price = dec!(10_000_000);
        let ppa_input = PurchasePriceAllocationInput {
            asset_writeup: dec!(10_000_000),
            asset_writeup_useful_life: 15,
            identifiable_intangibles: dec!(20_000_000),
            intangible_useful_life: 10,
        };
        assert!(allocate_purchase_price(&t, &ppa_input).is_err());
    }

    #[test]
    fn zero_acquisition_price_is_rejected() {
        let mut t = target();
        t.acquisition_price = Decimal::ZERO;
        assert!(allocate_purchase_price(&t, &PurchasePriceAllocationInput::default()).is_err());
    }
}
