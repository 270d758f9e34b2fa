use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CorpFinanceError;
use crate::types::{Money, Rate};

use super::dilution::{project_dilution, DilutionAssumptions, RoundAssumption, SafeNote};
use super::types::{StartupStage, StartupVertical};

// ---------------------------------------------------------------------------
// Fund economics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundProfile {
    pub fund_size: Money,
    pub vintage_year: u32,
    pub management_fee_pct: Rate,
    pub management_fee_years: u32,
    pub carry_pct: Rate,
    pub hurdle_rate: Rate,
    pub reserve_ratio: Rate,
    pub target_initial_check_count: u32,
    pub target_ownership_pct: Rate,
    pub recycling_pct: Rate,
    pub deployment_period_years: u32,
}

impl FundProfile {
    pub fn total_management_fees(&self) -> Money {
        self.fund_size * self.management_fee_pct * Decimal::from(self.management_fee_years)
    }

    pub fn investable_capital(&self) -> Money {
        self.fund_size - self.total_management_fees() + self.fund_size * self.recycling_pct
    }

    pub fn reserve_pool(&self) -> Money {
        self.investable_capital() * self.reserve_ratio
    }

    pub fn initial_check_pool(&self) -> Money {
        self.investable_capital() - self.reserve_pool()
    }

    pub fn target_initial_check_size(&self) -> Money {
        if self.target_initial_check_count == 0 {
            Decimal::ZERO
        } else {
            self.initial_check_pool() / Decimal::from(self.target_initial_check_count)
        }
    }
}

// ---------------------------------------------------------------------------
// Liquidation preference stack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreferenceType {
    NonParticipating,
    Participating,
    ParticipatingCapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AntiDilutionType {
    None,
    WeightedAverageBroad,
    WeightedAverageNarrow,
    FullRatchet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidationPreference {
    pub share_class: String,
    pub invested_amount: Money,
    #[serde(default = "default_preference_multiple")]
    pub preference_multiple: Decimal,
    pub preference_type: PreferenceType,
    #[serde(default)]
    pub participation_cap: Option<Decimal>,
    #[serde(default)]
    pub anti_dilution: AntiDilutionType,
    pub seniority: u32,
}

fn default_preference_multiple() -> Decimal {
    Decimal::ONE
}

impl Default for AntiDilutionType {
    fn default() -> Self {
        AntiDilutionType::None
    }
}

// ---------------------------------------------------------------------------
// Waterfall
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareClassDistribution {
    pub share_class: String,
    pub amount: Money,
    pub took_preference: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterfallDistribution {
    pub exit_ev: Money,
    pub share_classes: Vec<ShareClassDistribution>,
    pub common_gets: Money,
    pub total_distributed: Money,
}

/// Distributes exit proceeds across a liquidation preference stack in
/// seniority order (lower number = more senior), then whatever remains to
/// common. Each preferred class elects whichever of its own two options pays
/// more: take the straight preference, or waive it and convert to common for
/// its pro-rata share of the full proceeds. Participating preferred layers
/// take both the preference and a pro-rata share of the residual, capped at
/// `participation_cap` times invested capital when one is set.
pub fn run_waterfall(
    exit_ev: Money,
    stack: &[LiquidationPreference],
    common_pct_fully_diluted: Rate,
) -> WaterfallDistribution {
    let mut ordered: Vec<&LiquidationPreference> = stack.iter().collect();
    ordered.sort_by_key(|p| p.seniority);

    let total_invested: Money = stack.iter().map(|p| p.invested_amount).sum();
    let preferred_pct_fully_diluted = Decimal::ONE - common_pct_fully_diluted;

    let mut remaining = exit_ev;
    let mut classes = Vec::with_capacity(stack.len());

    for pref in &ordered {
        let as_converted_pct = if total_invested > Decimal::ZERO {
            preferred_pct_fully_diluted * (pref.invested_amount / total_invested)
        } else {
            Decimal::ZERO
        };
        let as_converted_value = exit_ev * as_converted_pct;

        let straight_preference = (pref.invested_amount * pref.preference_multiple).min(remaining);

        let amount = match pref.preference_type {
            PreferenceType::NonParticipating => straight_preference.max(as_converted_value.min(remaining)),
            PreferenceType::Participating => {
                let participation_share = remaining.max(Decimal::ZERO) * as_converted_pct;
                (straight_preference + participation_share).min(remaining)
            }
            PreferenceType::ParticipatingCapped => {
                let participation_share = remaining.max(Decimal::ZERO) * as_converted_pct;
                let uncapped = straight_preference + participation_share;
                let cap = pref
                    .participation_cap
                    .map(|multiple| pref.invested_amount * multiple)
                    .unwrap_or(Decimal::MAX);
                uncapped.min(cap).min(remaining)
            }
        };

        remaining -= amount;
        classes.push(ShareClassDistribution {
            share_class: pref.share_class.clone(),
            amount,
            took_preference: amount >= straight_preference,
        });
    }

    let common_gets = remaining.max(Decimal::ZERO);
    let total_distributed: Money = classes.iter().map(|c| c.amount).sum::<Money>() + common_gets;

    WaterfallDistribution {
        exit_ev,
        share_classes: classes,
        common_gets,
        total_distributed,
    }
}

// ---------------------------------------------------------------------------
// Deal input & ownership math
// ---------------------------------------------------------------------------

fn default_revenue_growth() -> Rate {
    dec!(1.50)
}
fn default_gross_margin() -> Rate {
    dec!(0.70)
}
fn default_common_shares_pct() -> Rate {
    dec!(0.30)
}
fn default_expected_exit_years() -> u32 {
    7
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcDealInput {
    pub company_name: String,
    pub vertical: StartupVertical,
    pub stage: StartupStage,
    pub post_money_valuation: Money,
    pub check_size: Money,
    pub arr: Money,
    pub revenue_ttm: Money,
    #[serde(default = "default_revenue_growth")]
    pub revenue_growth_rate: Rate,
    #[serde(default = "default_gross_margin")]
    pub gross_margin: Rate,
    pub burn_rate_monthly: Money,
    pub cash_on_hand: Money,
    #[serde(default)]
    pub future_rounds: Vec<RoundAssumption>,
    #[serde(default)]
    pub outstanding_safes: Vec<SafeNote>,
    #[serde(default)]
    pub liquidation_stack: Vec<LiquidationPreference>,
    #[serde(default = "default_common_shares_pct")]
    pub common_shares_pct: Rate,
    #[serde(default = "default_expected_exit_years")]
    pub expected_exit_years: u32,
    #[serde(default)]
    pub board_seat: bool,
    #[serde(default)]
    pub pro_rata_rights: bool,
    #[serde(default)]
    pub information_rights: bool,
    #[serde(default)]
    pub bear_exit_multiple_arr: Option<Decimal>,
    #[serde(default)]
    pub base_exit_multiple_arr: Option<Decimal>,
    #[serde(default)]
    pub bull_exit_multiple_arr: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipMath {
    pub entry_ownership_pct: Rate,
    pub exit_ownership_pct: Rate,
    pub total_dilution_pct: Rate,
}

/// Computes entry ownership from the check relative to post-money, then
/// walks it through any modeled future financing rounds via the same
/// dilution engine used for founder cap tables.
pub fn compute_ownership_math(deal: &VcDealInput) -> Result<OwnershipMath, CorpFinanceError> {
    let entry_ownership_pct = if deal.post_money_valuation > Decimal::ZERO {
        deal.check_size / deal.post_money_valuation
    } else {
        Decimal::ZERO
    };

    if deal.future_rounds.is_empty() {
        return Ok(OwnershipMath {
            entry_ownership_pct,
            exit_ownership_pct: entry_ownership_pct,
            total_dilution_pct: Decimal::ZERO,
        });
    }

    let dilution = project_dilution(
        entry_ownership_pct,
        &deal.outstanding_safes,
        &deal.future_rounds,
        &DilutionAssumptions::default(),
    )?;

    let exit_ownership_pct = dilution.founder_ownership_at_exit_pct;
    let total_dilution_pct = if entry_ownership_pct > Decimal::ZERO {
        Decimal::ONE - exit_ownership_pct / entry_ownership_pct
    } else {
        Decimal::ZERO
    };

    Ok(OwnershipMath {
        entry_ownership_pct,
        exit_ownership_pct,
        total_dilution_pct,
    })
}

// ---------------------------------------------------------------------------
// Exit scenarios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcScenario {
    pub label: String,
    pub probability: Rate,
    pub exit_year: u32,
    pub exit_multiple_arr: Decimal,
    pub exit_enterprise_value: Money,
    pub gross_proceeds_to_fund: Money,
    pub gross_moic: Decimal,
    pub gross_irr: Rate,
    pub fund_contribution_x: Decimal,
}

fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

fn single_period_irr(initial_outlay: Money, final_proceeds: Money, years: u32) -> Rate {
    if initial_outlay <= Decimal::ZERO || years == 0 {
        return Decimal::ZERO;
    }
    let moic = final_proceeds / initial_outlay;
    if moic <= Decimal::ZERO {
        return dec!(-1.0);
    }
    // nth root via Newton-Raphson on f(r) = (1+r)^years - moic
    let mut rate = dec!(0.15);
    for _ in 0..100 {
        let value = compound(rate, years) - moic;
        let derivative_approx = (compound(rate + dec!(0.0001), years) - compound(rate, years)) / dec!(0.0001);
        if derivative_approx.abs() < Decimal::new(1, 10) {
            break;
        }
        let next_rate = rate - value / derivative_approx;
        if (next_rate - rate).abs() <= dec!(0.00000001) {
            rate = next_rate;
            break;
        }
        rate = next_rate;
    }
    rate
}

fn run_scenario(
    label: &str,
    probability: Rate,
    deal: &VcDealInput,
    ownership: &OwnershipMath,
    exit_multiple_arr: Decimal,
) -> VcScenario {
    let exit_year = deal.expected_exit_years;
    let projected_arr = deal.arr * compound(deal.revenue_growth_rate, exit_year);
    let exit_enterprise_value = projected_arr * exit_multiple_arr;

    // The fund's own stake is assumed to sit pro-rata within whatever the
    // preferred stack (if any) distributes as a whole; `run_waterfall` is
    // exposed separately for callers that need a specific share class's cut.
    let gross_proceeds_to_fund = exit_enterprise_value * ownership.exit_ownership_pct;

    let gross_moic = if deal.check_size > Decimal::ZERO {
        gross_proceeds_to_fund / deal.check_size
    } else {
        Decimal::ZERO
    };

    let gross_irr = single_period_irr(deal.check_size, gross_proceeds_to_fund, exit_year);

    VcScenario {
        label: label.to_string(),
        probability,
        exit_year,
        exit_multiple_arr,
        exit_enterprise_value,
        gross_proceeds_to_fund,
        gross_moic,
        gross_irr,
        fund_contribution_x: gross_moic,
    }
}

/// Runs bear/base/bull exit scenarios. Multiples default to the vertical's
/// ARR-multiple benchmark scaled down/up 30% unless the deal explicitly
/// overrides one or more of them.
pub fn run_vc_scenarios(deal: &VcDealInput, ownership: &OwnershipMath) -> Vec<VcScenario> {
    let benchmark = super::benchmarks::benchmark_for(deal.vertical);

    let base_multiple = deal.base_exit_multiple_arr.unwrap_or(benchmark.arr_multiple);
    let bear_multiple = deal.bear_exit_multiple_arr.unwrap_or(base_multiple * dec!(0.6));
    let bull_multiple = deal.bull_exit_multiple_arr.unwrap_or(base_multiple * dec!(1.6));

    vec![
        run_scenario("bear", dec!(0.30), deal, ownership, bear_multiple),
        run_scenario("base", dec!(0.50), deal, ownership, base_multiple),
        run_scenario("bull", dec!(0.20), deal, ownership, bull_multiple),
    ]
}

// ---------------------------------------------------------------------------
// Quick screen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickScreenResult {
    pub company_name: String,
    pub stage: StartupStage,
    pub vertical: StartupVertical,
    pub post_money_valuation: Money,
    pub check_size: Money,
    pub entry_ownership_pct: Rate,
    pub fund_returner_exit_value_needed: Money,
    pub bear_exit_enterprise_value: Money,
    pub base_exit_enterprise_value: Money,
    pub bull_exit_enterprise_value: Money,
    pub bear_moic: Decimal,
    pub base_moic: Decimal,
    pub bull_moic: Decimal,
    pub recommendation: String,
    pub flags: Vec<String>,
}

/// Cheap single-pass screen: no dilution projection, no waterfall, just
/// entry ownership against bear/base/bull ARR-multiple exits. Meant for
/// triaging inbound deal flow before the full `analyze_vc_deal` run.
pub fn quick_screen(deal: &VcDealInput, fund: &FundProfile) -> QuickScreenResult {
    let entry_ownership_pct = if deal.post_money_valuation > Decimal::ZERO {
        deal.check_size / deal.post_money_valuation
    } else {
        Decimal::ZERO
    };

    let ownership = OwnershipMath {
        entry_ownership_pct,
        exit_ownership_pct: entry_ownership_pct,
        total_dilution_pct: Decimal::ZERO,
    };
    let scenarios = run_vc_scenarios(deal, &ownership);
    let bear = &scenarios[0];
    let base = &scenarios[1];
    let bull = &scenarios[2];

    let fund_returner_exit_value_needed = if entry_ownership_pct > Decimal::ZERO {
        fund.fund_size / entry_ownership_pct
    } else {
        Decimal::MAX
    };

    let mut flags = Vec::new();
    if deal.runway_months().map(|m| m < dec!(6)).unwrap_or(false) {
        flags.push("less than six months of runway at entry".to_string());
    }
    if entry_ownership_pct < fund.target_ownership_pct {
        flags.push("entry ownership below the fund's target ownership threshold".to_string());
    }
    if base.gross_moic < dec!(1.0) {
        flags.push("base case does not return capital".to_string());
    }

    let recommendation = if bull.gross_moic >= dec!(10.0) && base.gross_moic >= dec!(3.0) {
        "pursue".to_string()
    } else if base.gross_moic >= dec!(1.0) {
        "monitor".to_string()
    } else {
        "pass".to_string()
    };

    QuickScreenResult {
        company_name: deal.company_name.clone(),
        stage: deal.stage,
        vertical: deal.vertical,
        post_money_valuation: deal.post_money_valuation,
        check_size: deal.check_size,
        entry_ownership_pct,
        fund_returner_exit_value_needed,
        bear_exit_enterprise_value: bear.exit_enterprise_value,
        base_exit_enterprise_value: base.exit_enterprise_value,
        bull_exit_enterprise_value: bull.exit_enterprise_value,
        bear_moic: bear.gross_moic,
        base_moic: base.gross_moic,
        bull_moic: bull.gross_moic,
        recommendation,
        flags,
    }
}

impl VcDealInput {
    pub fn runway_months(&self) -> Option<Decimal> {
        if self.burn_rate_monthly <= Decimal::ZERO {
            None
        } else {
            Some(self.cash_on_hand / self.burn_rate_monthly)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fund() -> FundProfile {
        FundProfile {
            fund_size: dec!(100_000_000),
            vintage_year: 2024,
            management_fee_pct: dec!(0.02),
            management_fee_years: 10,
            carry_pct: dec!(0.20),
            hurdle_rate: dec!(0.08),
            reserve_ratio: dec!(0.5),
            target_initial_check_count: 25,
            target_ownership_pct: dec!(0.10),
            recycling_pct: dec!(0.05),
            deployment_period_years: 3,
        }
    }

    fn sample_deal() -> VcDealInput {
        VcDealInput {
            company_name: "Rocket Co".to_string(),
            vertical: StartupVertical::Saas,
            stage: StartupStage::SeriesA,
            post_money_valuation: dec!(50_000_000),
            check_size: dec!(5_000_000),
            arr: dec!(3_000_000),
            revenue_ttm: dec!(2_700_000),
            revenue_growth_rate: dec!(1.5),
            gross_margin: dec!(0.75),
            burn_rate_monthly: dec!(250_000),
            cash_on_hand: dec!(4_000_000),
            future_rounds: vec![],
            outstanding_safes: vec![],
            liquidation_stack: vec![],
            common_shares_pct: dec!(0.30),
            expected_exit_years: 7,
            board_seat: true,
            pro_rata_rights: true,
            information_rights: true,
            bear_exit_multiple_arr: None,
            base_exit_multiple_arr: None,
            bull_exit_multiple_arr: None,
        }
    }

    #[test]
    fn fund_profile_computes_consistent_capital_pools() {
        let fund = sample_fund();
        assert_eq!(fund.initial_check_pool() + fund.reserve_pool(), fund.investable_capital());
    }

    #[test]
    fn entry_ownership_is_check_over_post_money() {
        let deal = sample_deal();
        let ownership = compute_ownership_math(&deal).unwrap();
        assert_eq!(ownership.entry_ownership_pct, dec!(0.1));
    }

    #[test]
    fn bull_case_exit_value_exceeds_bear_case() {
        let deal = sample_deal();
        let ownership = compute_ownership_math(&deal).unwrap();
        let scenarios = run_vc_scenarios(&deal, &ownership);
        assert!(scenarios[2].exit_enterprise_value > scenarios[0].exit_enterprise_value);
    }

    #[test]
    fn non_participating_preferred_takes_the_better_of_pref_or_convert() {
        let stack = vec![LiquidationPreference {
            share_class: "Series A".to_string(),
            invested_amount: dec!(5_000_000),
            preference_multiple: Decimal::ONE,
            preference_type: PreferenceType::NonParticipating,
            participation_cap: None,
            anti_dilution: AntiDilutionType::None,
            seniority: 1,
        }];
        // Small exit: preference wins over the tiny as-converted share.
        let small_exit = run_waterfall(dec!(8_000_000), &stack, dec!(0.30));
        assert_eq!(small_exit.share_classes[0].amount, dec!(5_000_000));

        // Huge exit: converting to common is worth more than the 1x preference.
        let huge_exit = run_waterfall(dec!(500_000_000), &stack, dec!(0.30));
        assert!(huge_exit.share_classes[0].amount > dec!(5_000_000));
    }

    #[test]
    fn quick_screen_flags_thin_runway() {
        let mut deal = sample_deal();
        deal.cash_on_hand = dec!(500_000);
        deal.burn_rate_monthly = dec!(250_000);
        let result = quick_screen(&deal, &sample_fund());
        assert!(result.flags.iter().any(|f| f.contains("runway")));
    }
}
