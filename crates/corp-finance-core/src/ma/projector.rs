use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CorpFinanceError;
use crate::types::{Money, Rate};

use super::ppa::{allocate_purchase_price, PurchasePriceAllocation};
use super::types::{AmortizationType, DealInput, DebtTranche, DefensePositioning, Industry};

/// Fixed acquirer standalone growth rate used for both the acquirer's
/// revenue line and its standalone EPS baseline (spec'd as a constant rather
/// than an input so the "what would the acquirer have done on its own"
/// counterfactual never drifts with deal assumptions).
const ACQUIRER_GROWTH_RATE: Rate = dec!(0.03);

/// Clamps a party's gross margin baseline to a plausible band, derived from
/// its EBITDA margin plus a fixed 20-point operating-expense allowance.
fn gross_margin_baseline(ebitda: Money, revenue: Money) -> Rate {
    if revenue <= Decimal::ZERO {
        return dec!(0.10);
    }
    let ebitda_margin = ebitda / revenue;
    (ebitda_margin + dec!(0.20)).max(dec!(0.10)).min(dec!(0.95))
}

/// A named, cloned-and-mutated override of a `DealInput`, used by the
/// sensitivity engine to re-run the projector against a perturbed assumption
/// without mutating the caller's original deal. Replaces the deep-copy +
/// in-place mutation pattern with explicit, named fields so every override
/// site is visible at a glance.
#[derive(Debug, Clone, Default)]
pub struct DealOverride {
    pub cash_pct: Option<Rate>,
    pub stock_pct: Option<Rate>,
    pub debt_pct: Option<Rate>,
    pub synergy_multiplier: Option<Decimal>,
    pub acquisition_price_multiplier: Option<Decimal>,
    pub interest_rate_delta: Option<Rate>,
    /// Replaces every acquisition-debt tranche with a single synthetic
    /// tranche at this flat rate, sized the same way an unspecified tranche
    /// list already is (scaled to the consideration's debt-raised amount).
    pub flat_tranche_rate: Option<Rate>,
    /// Re-derives debt/cash/stock percentages so acquisition debt equals
    /// this many turns of combined (pre-deal) EBITDA, splitting the
    /// remainder evenly between cash and stock.
    pub leverage_turns: Option<Decimal>,
}

impl DealOverride {
    fn apply(&self, input: &DealInput) -> DealInput {
        let mut deal = input.clone();

        if let Some(price_mult) = self.acquisition_price_multiplier {
            deal.target.acquisition_price *= price_mult;
        }
        if let Some(cash_pct) = self.cash_pct {
            deal.structure.cash_pct = cash_pct;
        }
        if let Some(stock_pct) = self.stock_pct {
            deal.structure.stock_pct = stock_pct;
        }
        if let Some(debt_pct) = self.debt_pct {
            deal.structure.debt_pct = debt_pct;
        }
        if let Some(delta) = self.interest_rate_delta {
            for tranche in &mut deal.structure.debt_tranches {
                tranche.interest_rate += delta;
            }
        }
        if let Some(mult) = self.synergy_multiplier {
            for item in deal
                .synergies
                .cost_synergies
                .iter_mut()
                .chain(deal.synergies.revenue_synergies.iter_mut())
            {
                item.annual_amount *= mult;
            }
        }
        if let Some(rate) = self.flat_tranche_rate {
            deal.structure.debt_tranches = vec![DebtTranche {
                name: "Sensitivity Tranche".to_string(),
                amount: Decimal::ONE,
                interest_rate: rate,
                term_years: 7,
                amortization_type: AmortizationType::StraightLine,
            }];
        }
        if let Some(turns) = self.leverage_turns {
            let combined_ebitda = input.acquirer.ebitda + input.target.ebitda;
            let target_debt_pct = if deal.target.acquisition_price > Decimal::ZERO {
                (turns * combined_ebitda / deal.target.acquisition_price).max(Decimal::ZERO).min(Decimal::ONE)
            } else {
                Decimal::ZERO
            };
            let remaining = Decimal::ONE - target_debt_pct;
            deal.structure.debt_pct = target_debt_pct;
            deal.structure.cash_pct = remaining * dec!(0.5);
            deal.structure.stock_pct = remaining * dec!(0.5);
        }

        deal
    }
}

/// Consideration actually exchanged for the target, split by financing source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consideration {
    pub cash_paid: Money,
    pub stock_paid: Money,
    pub new_shares_issued: Decimal,
    pub debt_raised: Money,
    pub transaction_fees: Money,
}

fn compute_consideration(input: &DealInput) -> Result<Consideration, CorpFinanceError> {
    let total_pct = input.structure.cash_pct + input.structure.stock_pct + input.structure.debt_pct;
    if (total_pct - Decimal::ONE).abs() > Decimal::new(1, 3) {
        return Err(CorpFinanceError::InvalidInput {
            field: "structure.{cash,stock,debt}_pct".to_string(),
            reason: "financing mix must sum to 1.0".to_string(),
        });
    }

    let price = input.target.acquisition_price;
    let cash_paid = price * input.structure.cash_pct;
    let stock_paid = price * input.structure.stock_pct;
    let debt_raised = price * input.structure.debt_pct;

    let new_shares_issued = if input.acquirer.share_price > Decimal::ZERO {
        stock_paid / input.acquirer.share_price
    } else {
        Decimal::ZERO
    };

    let transaction_fees = price * input.structure.transaction_fees_pct + input.structure.advisory_fees;

    Ok(Consideration {
        cash_paid,
        stock_paid,
        new_shares_issued,
        debt_raised,
        transaction_fees,
    })
}

/// Combined balance sheet immediately at close, before any post-merger
/// operating activity. Goodwill and the writeup come from the PPA; cash is
/// drawn down by the cash portion of consideration plus fees; debt reflects
/// newly raised acquisition debt plus both companies' pre-existing debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetAtClose {
    pub combined_cash: Money,
    pub combined_debt: Money,
    pub combined_working_capital: Money,
    pub goodwill: Money,
    pub asset_writeup: Money,
    pub identifiable_intangibles: Money,
    pub pro_forma_shares_outstanding: Decimal,
}

fn compute_balance_sheet_at_close(
    input: &DealInput,
    consideration: &Consideration,
    ppa: &PurchasePriceAllocation,
) -> BalanceSheetAtClose {
    let combined_cash =
        input.acquirer.cash_on_hand + input.target.cash_on_hand - consideration.cash_paid - consideration.transaction_fees;
    let combined_debt = input.acquirer.total_debt + input.target.total_debt + consideration.debt_raised;
    let combined_working_capital = input.acquirer.working_capital + input.target.working_capital;
    let pro_forma_shares = input.acquirer.shares_outstanding + consideration.new_shares_issued;

    BalanceSheetAtClose {
        combined_cash,
        combined_debt,
        combined_working_capital,
        goodwill: ppa.goodwill,
        asset_writeup: ppa.asset_writeup,
        identifiable_intangibles: ppa.identifiable_intangibles,
        pro_forma_shares_outstanding: pro_forma_shares,
    }
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal powd drift).
fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

fn synergy_realized_in_year(
    items: impl Iterator<Item = (Money, u32, Money)>,
    year_index: u32,
) -> (Money, Money) {
    let mut annual_total = Decimal::ZERO;
    let mut cost_to_achieve_total = Decimal::ZERO;
    for (annual_amount, phase_in_years, cost_to_achieve) in items {
        let ramp = if phase_in_years == 0 {
            Decimal::ONE
        } else {
            (Decimal::from(year_index + 1) / Decimal::from(phase_in_years)).min(Decimal::ONE)
        };
        annual_total += annual_amount * ramp;
        if year_index == 0 {
            cost_to_achieve_total += cost_to_achieve;
        }
    }
    (annual_total, cost_to_achieve_total)
}

/// Core per-year combined financials, cheap enough to re-run many times for
/// sensitivity sweeps. Does not build the EPS reconciliation bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreYear {
    pub year: u32,
    pub combined_revenue: Money,
    pub combined_cogs: Money,
    pub combined_gross_profit: Money,
    pub combined_sga: Money,
    pub combined_ebitda: Money,
    pub acquirer_ebitda: Money,
    pub target_ebitda: Money,
    pub synergies_realized: Money,
    pub d_and_a: Money,
    pub ebit: Money,
    pub new_debt_interest: Money,
    pub interest_expense: Money,
    pub transaction_costs_expensed: Money,
    pub ebt: Money,
    pub taxes: Money,
    pub net_income: Money,
    pub capex: Money,
    pub working_capital_change: Money,
    pub optional_sweep_consumed: Money,
    pub free_cash_flow: Money,
    pub pro_forma_eps: Money,
    pub standalone_acquirer_eps: Money,
    pub accretion_dilution_pct: Rate,
    pub debt_schedule_converged: bool,
    pub acquisition_debt_outstanding: Money,
}

/// Cheap core-only multi-year projection: combined revenue/EBITDA/EPS and
/// accretion-dilution, without the EPS bridge or balance sheet detail.
/// `project_full` builds on top of this rather than duplicating it.
pub fn project_core(
    input: &DealInput,
    overrides: Option<&DealOverride>,
) -> Result<Vec<CoreYear>, CorpFinanceError> {
    let deal = match overrides {
        Some(o) => o.apply(input),
        None => input.clone(),
    };

    let consideration = compute_consideration(&deal)?;
    let ppa = allocate_purchase_price(&deal.target, &deal.ppa)?;

    let acquisition_tranches = acquisition_debt_tranches(&deal, &consideration);
    let mut tranche_balances: Vec<Money> = acquisition_tranches.iter().map(|t| t.amount).collect();

    let acquirer_gm = gross_margin_baseline(deal.acquirer.ebitda, deal.acquirer.revenue);
    let acquirer_margin = if deal.acquirer.revenue > Decimal::ZERO {
        deal.acquirer.ebitda / deal.acquirer.revenue
    } else {
        Decimal::ZERO
    };
    let target_gm = gross_margin_baseline(deal.target.ebitda, deal.target.revenue);
    let target_margin = if deal.target.revenue > Decimal::ZERO {
        deal.target.ebitda / deal.target.revenue
    } else {
        Decimal::ZERO
    };

    let existing_debt_interest = weighted_existing_debt_interest(&deal);
    let blended_tax_rate = blended_tax_rate(&deal);
    let transaction_cost_total = deal.target.acquisition_price * deal.structure.transaction_fees_pct + deal.structure.advisory_fees;

    let mut prior_working_capital = deal.acquirer.working_capital + deal.target.working_capital;

    let mut years = Vec::with_capacity(deal.projection_years as usize);

    for year_index in 0..deal.projection_years {
        let acquirer_growth_factor = compound(ACQUIRER_GROWTH_RATE, year_index + 1);
        let target_growth_factor = compound(deal.target.revenue_growth_rate, year_index + 1);

        let acquirer_revenue = deal.acquirer.revenue * acquirer_growth_factor;
        let target_revenue = deal.target.revenue * target_growth_factor;

        let acquirer_cogs = acquirer_revenue * (Decimal::ONE - acquirer_gm);
        let acquirer_sga = acquirer_revenue * (acquirer_gm - acquirer_margin);
        let acquirer_ebitda = acquirer_revenue - acquirer_cogs - acquirer_sga;

        let target_cogs = target_revenue * (Decimal::ONE - target_gm);
        let target_sga = target_revenue * (target_gm - target_margin);
        let target_ebitda = target_revenue - target_cogs - target_sga;

        let cost_items = deal
            .synergies
            .cost_synergies
            .iter()
            .map(|s| (s.annual_amount, s.phase_in_years, s.cost_to_achieve));
        let revenue_items = deal
            .synergies
            .revenue_synergies
            .iter()
            .map(|s| (s.annual_amount, s.phase_in_years, s.cost_to_achieve));
        let (cost_synergies_realized, _) = synergy_realized_in_year(cost_items, year_index);
        let (revenue_synergies_realized, _) = synergy_realized_in_year(revenue_items, year_index);
        let synergies_realized = cost_synergies_realized + revenue_synergies_realized;

        let combined_revenue = acquirer_revenue + target_revenue + revenue_synergies_realized;
        let combined_cogs = acquirer_cogs + target_cogs;
        let combined_gross_profit = combined_revenue - combined_cogs;
        let combined_sga = acquirer_sga + target_sga - cost_synergies_realized;
        let combined_ebitda = combined_gross_profit - combined_sga;

        let combined_d_and_a = deal.acquirer.depreciation * acquirer_growth_factor
            + deal.target.depreciation * target_growth_factor
            + ppa.annual_incremental_d_and_a;

        let capex = deal.acquirer.capex * acquirer_growth_factor + deal.target.capex * target_growth_factor;
        let working_capital =
            deal.acquirer.working_capital * acquirer_growth_factor + deal.target.working_capital * target_growth_factor;
        let working_capital_change = working_capital - prior_working_capital;
        prior_working_capital = working_capital;

        let ebit = combined_ebitda - combined_d_and_a;
        let transaction_costs_expensed = if year_index == 0 { transaction_cost_total } else { Decimal::ZERO };

        let (new_debt_interest, debt_schedule_converged, optional_sweep_consumed) = if acquisition_tranches.is_empty() {
            (Decimal::ZERO, true, Decimal::ZERO)
        } else {
            let beginning_balances: Vec<(DebtTranche, Money)> = acquisition_tranches
                .iter()
                .cloned()
                .zip(tranche_balances.iter().copied())
                .collect();
            let compute_fcf = |interest_estimate: Money| -> Money {
                let total_interest = existing_debt_interest + interest_estimate;
                let ebt = ebit - total_interest - transaction_costs_expensed;
                let taxes = (ebt * blended_tax_rate).max(Decimal::ZERO);
                let net_income = ebt - taxes;
                net_income + combined_d_and_a - capex - working_capital_change
            };
            let schedule = super::debt_schedule::solve_year(&beginning_balances, year_index, compute_fcf)?;
            tranche_balances = schedule.tranches.iter().map(|t| t.ending_balance).collect();
            (schedule.total_interest_expense, schedule.converged, schedule.total_optional_sweep)
        };
        let interest_expense = existing_debt_interest + new_debt_interest;

        let ebt = ebit - interest_expense - transaction_costs_expensed;
        let taxes = (ebt * blended_tax_rate).max(Decimal::ZERO);
        let net_income = ebt - taxes;

        let free_cash_flow = net_income + combined_d_and_a - capex - optional_sweep_consumed;

        let pro_forma_shares = deal.acquirer.shares_outstanding + consideration.new_shares_issued;
        let pro_forma_eps = if pro_forma_shares > Decimal::ZERO {
            net_income / pro_forma_shares
        } else {
            Decimal::ZERO
        };

        let standalone_net_income = deal.acquirer.net_income * compound(ACQUIRER_GROWTH_RATE, year_index + 1);
        let standalone_acquirer_eps = if deal.acquirer.shares_outstanding > Decimal::ZERO {
            standalone_net_income / deal.acquirer.shares_outstanding
        } else {
            Decimal::ZERO
        };

        let accretion_dilution_pct = if standalone_acquirer_eps != Decimal::ZERO {
            (pro_forma_eps - standalone_acquirer_eps) / standalone_acquirer_eps.abs()
        } else {
            Decimal::ZERO
        };

        years.push(CoreYear {
            year: year_index + 1,
            combined_revenue,
            combined_cogs,
            combined_gross_profit,
            combined_sga,
            combined_ebitda,
            acquirer_ebitda,
            target_ebitda,
            synergies_realized,
            d_and_a: combined_d_and_a,
            ebit,
            new_debt_interest,
            interest_expense,
            transaction_costs_expensed,
            ebt,
            taxes,
            net_income,
            capex,
            working_capital_change,
            optional_sweep_consumed,
            free_cash_flow,
            pro_forma_eps,
            standalone_acquirer_eps,
            accretion_dilution_pct,
            debt_schedule_converged,
            acquisition_debt_outstanding: tranche_balances.iter().sum(),
        });
    }

    Ok(years)
}

/// Builds the tranche list that will be run through the circularity-solving
/// debt schedule. Uses the deal's explicitly specified tranches when present
/// (rescaled to the actual debt raised); otherwise fabricates a single
/// straight-line tranche priced off the target's industry spread.
fn acquisition_debt_tranches(deal: &DealInput, consideration: &Consideration) -> Vec<DebtTranche> {
    if consideration.debt_raised <= Decimal::ZERO {
        return Vec::new();
    }

    if !deal.structure.debt_tranches.is_empty() {
        let specified_total: Money = deal.structure.debt_tranches.iter().map(|t| t.amount).sum();
        if specified_total > Decimal::ZERO {
            let scale = consideration.debt_raised / specified_total;
            return deal
                .structure
                .debt_tranches
                .iter()
                .map(|t| DebtTranche {
                    name: t.name.clone(),
                    amount: t.amount * scale,
                    interest_rate: t.interest_rate,
                    term_years: t.term_years,
                    amortization_type: t.amortization_type,
                })
                .collect();
        }
    }

    let benchmark = super::benchmarks::benchmark_for(deal.target.industry);
    vec![DebtTranche {
        name: "Acquisition Term Loan".to_string(),
        amount: consideration.debt_raised,
        interest_rate: Decimal::new(5, 2) + benchmark.typical_cost_of_debt_spread,
        term_years: 7,
        amortization_type: AmortizationType::StraightLine,
    }]
}

fn weighted_existing_debt_interest(deal: &DealInput) -> Money {
    let benchmark = super::benchmarks::benchmark_for(deal.target.industry);
    let acquirer_rate = Decimal::new(5, 2) + benchmark.typical_cost_of_debt_spread;
    deal.acquirer.total_debt * acquirer_rate + deal.target.total_debt * acquirer_rate
}

fn blended_tax_rate(deal: &DealInput) -> Rate {
    let total_income = deal.acquirer.net_income.abs() + deal.target.net_income.abs();
    if total_income.is_zero() {
        return deal.acquirer.tax_rate;
    }
    deal.acquirer.tax_rate * (deal.acquirer.net_income.abs() / total_income)
        + deal.target.tax_rate * (deal.target.net_income.abs() / total_income)
}

/// EPS bridge: reconciles standalone acquirer EPS to pro-forma combined EPS
/// through named contributions. `tax_impact` is a residual plug that absorbs
/// whatever the other named components don't explain, so the components
/// always sum exactly to `pro_forma_eps - standalone_eps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpsBridge {
    pub standalone_eps: Money,
    pub target_earnings_contribution: Money,
    pub synergy_contribution: Money,
    pub financing_cost_contribution: Money,
    pub share_dilution_contribution: Money,
    pub incremental_d_and_a_contribution: Money,
    pub tax_impact: Money,
    pub pro_forma_eps: Money,
}

fn build_eps_bridge(
    deal: &DealInput,
    consideration: &Consideration,
    ppa: &PurchasePriceAllocation,
    year: &CoreYear,
) -> EpsBridge {
    let pro_forma_shares = deal.acquirer.shares_outstanding + consideration.new_shares_issued;
    let tax_rate = blended_tax_rate(deal);

    let target_earnings_after_tax = year.target_ebitda * (Decimal::ONE - tax_rate);
    let target_contribution_per_share = if pro_forma_shares > Decimal::ZERO {
        target_earnings_after_tax / pro_forma_shares
    } else {
        Decimal::ZERO
    };

    let synergy_contribution = if pro_forma_shares > Decimal::ZERO {
        (year.synergies_realized * (Decimal::ONE - tax_rate)) / pro_forma_shares
    } else {
        Decimal::ZERO
    };

    let financing_cost_contribution = if pro_forma_shares > Decimal::ZERO {
        -(year.new_debt_interest * (Decimal::ONE - tax_rate)) / pro_forma_shares
    } else {
        Decimal::ZERO
    };

    let incremental_d_and_a_contribution = if pro_forma_shares > Decimal::ZERO {
        -(ppa.annual_incremental_d_and_a * (Decimal::ONE - tax_rate)) / pro_forma_shares
    } else {
        Decimal::ZERO
    };

    let share_dilution_contribution = if pro_forma_shares > Decimal::ZERO
        && deal.acquirer.shares_outstanding > Decimal::ZERO
    {
        let pre_dilution_combined_eps_per_old_share =
            (target_earnings_after_tax + year.synergies_realized * (Decimal::ONE - tax_rate))
                / deal.acquirer.shares_outstanding;
        let same_on_new_share_count = if pro_forma_shares > Decimal::ZERO {
            (target_earnings_after_tax + year.synergies_realized * (Decimal::ONE - tax_rate)) / pro_forma_shares
        } else {
            Decimal::ZERO
        };
        same_on_new_share_count - pre_dilution_combined_eps_per_old_share
    } else {
        Decimal::ZERO
    };

    let named_total = target_contribution_per_share
        + synergy_contribution
        + financing_cost_contribution
        + incremental_d_and_a_contribution
        + share_dilution_contribution;

    let actual_delta = year.pro_forma_eps - year.standalone_acquirer_eps;
    let tax_impact = actual_delta - named_total;

    EpsBridge {
        standalone_eps: year.standalone_acquirer_eps,
        target_earnings_contribution: target_contribution_per_share,
        synergy_contribution,
        financing_cost_contribution,
        share_dilution_contribution,
        incremental_d_and_a_contribution,
        tax_impact,
        pro_forma_eps: year.pro_forma_eps,
    }
}

/// Full multi-year pro-forma projection: core financials, the EPS
/// reconciliation bridge for every year, the balance sheet at close, and
/// (Defense-industry targets only) the defense positioning summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProFormaProjection {
    pub years: Vec<CoreYear>,
    pub eps_bridges: Vec<EpsBridge>,
    pub balance_sheet_at_close: BalanceSheetAtClose,
    pub consideration: Consideration,
    pub purchase_price_allocation: PurchasePriceAllocation,
    pub defense_positioning: Option<DefensePositioning>,
}

pub fn project_full(
    input: &DealInput,
    overrides: Option<&DealOverride>,
) -> Result<ProFormaProjection, CorpFinanceError> {
    let deal = match overrides {
        Some(o) => o.apply(input),
        None => input.clone(),
    };

    let years = project_core(&deal, None)?;
    let consideration = compute_consideration(&deal)?;
    let ppa = allocate_purchase_price(&deal.target, &deal.ppa)?;
    let balance_sheet_at_close = compute_balance_sheet_at_close(&deal, &consideration, &ppa);

    let eps_bridges = years
        .iter()
        .map(|year| build_eps_bridge(&deal, &consideration, &ppa, year))
        .collect();

    let defense_positioning = if matches!(deal.target.industry, Industry::Defense) {
        deal.target
            .defense_profile
            .as_ref()
            .map(|profile| compute_defense_positioning(&deal, profile))
    } else {
        None
    };

    Ok(ProFormaProjection {
        years,
        eps_bridges,
        balance_sheet_at_close,
        consideration,
        purchase_price_allocation: ppa,
        defense_positioning,
    })
}

fn compute_defense_positioning(
    deal: &DealInput,
    profile: &super::types::DefenseProfile,
) -> DefensePositioning {
    use super::types::{ClearanceLevel, DeploymentClassification};

    let ev = deal.target.acquisition_price + deal.target.total_debt - deal.target.cash_on_hand;
    let ev_to_revenue_multiple = if deal.target.revenue > Decimal::ZERO {
        ev / deal.target.revenue
    } else {
        Decimal::ZERO
    };

    let backlog_coverage_ratio = if deal.target.revenue > Decimal::ZERO {
        profile.contract_backlog_total / deal.target.revenue
    } else {
        Decimal::ZERO
    };

    let revenue_visibility_years = if deal.target.revenue > Decimal::ZERO {
        profile.contract_backlog_funded / deal.target.revenue
    } else {
        Decimal::ZERO
    };

    let clearance_premium = match profile.clearance_level {
        ClearanceLevel::Unclassified => Decimal::ZERO,
        ClearanceLevel::Confidential => Decimal::new(2, 2),
        ClearanceLevel::Secret => Decimal::new(5, 2),
        ClearanceLevel::TopSecret => Decimal::new(8, 2),
        ClearanceLevel::TopSecretSci => Decimal::new(12, 2),
    };

    let certification_premium =
        Decimal::from(profile.authorization_certifications.len() as u32) * Decimal::new(1, 2);

    let program_of_record_premium = Decimal::from(profile.programs_of_record) * Decimal::new(15, 3);

    let deployment_note = match profile.deployment_classification {
        DeploymentClassification::Unclassified => "commercial-equivalent deployment",
        DeploymentClassification::Classified => "classified network deployment",
        DeploymentClassification::AirGapped => "air-gapped deployment",
    };

    let positioning_summary = format!(
        "{} backlog-years of visibility, {:.1}x backlog coverage, {}",
        revenue_visibility_years.round_dp(1),
        backlog_coverage_ratio,
        deployment_note
    );

    DefensePositioning {
        ev_to_revenue_multiple,
        backlog_coverage_ratio,
        revenue_visibility_years,
        clearance_premium,
        certification_premium,
        program_of_record_premium,
        positioning_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ma::types::{AcquirerProfile, DealStructure, ModelMode, PurchasePriceAllocationInput, SynergyAssumptions, TargetProfile};
    use rust_decimal_macros::dec;

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
    fn core_projection_produces_requested_years() {
        let years = project_core(&sample_deal(), None).unwrap();
        assert_eq!(years.len(), 3);
        assert_eq!(years[0].year, 1);
    }

    #[test]
    fn rejects_financing_mix_not_summing_to_one() {
        let mut deal = sample_deal();
        deal.structure.cash_pct = dec!(0.9);
        assert!(project_core(&deal, None).is_err());
    }

    #[test]
    fn full_projection_includes_matching_bridge_count() {
        let full = project_full(&sample_deal(), None).unwrap();
        assert_eq!(full.years.len(), full.eps_bridges.len());
        assert!(full.defense_positioning.is_none());
    }

    #[test]
    fn eps_bridge_components_reconcile_to_the_actual_delta() {
        let full = project_full(&sample_deal(), None).unwrap();
        for (year, bridge) in full.years.iter().zip(full.eps_bridges.iter()) {
            let named_sum = bridge.target_earnings_contribution
                + bridge.synergy_contribution
                + bridge.financing_cost_contribution
                + bridge.share_dilution_contribution
                + bridge.incremental_d_and_a_contribution
                + bridge.tax_impact;
            let actual_delta = year.pro_forma_eps - year.standalone_acquirer_eps;
            assert_eq!(named_sum, actual_delta);
        }
    }

    #[test]
    fn override_scales_synergies_without_mutating_original() {
        let deal = sample_deal();
        let mut with_synergy = deal.clone();
        with_synergy.synergies.cost_synergies.push(super::super::types::SynergyItem {
            category: "procurement".to_string(),
            annual_amount: dec!(5_000_000),
            phase_in_years: 1,
            cost_to_achieve: dec!(1_000_000),
            is_revenue: false,
        });

        let override_spec = DealOverride {
            synergy_multiplier: Some(dec!(2.0)),
            ..Default::default()
        };
        let doubled = project_core(&with_synergy, Some(&override_spec)).unwrap();
        let base = project_core(&with_synergy, None).unwrap();
        assert!(doubled[0].synergies_realized > base[0].synergies_realized);
        // original deal untouched
        assert_eq!(with_synergy.synergies.cost_synergies[0].annual_amount, dec!(5_000_000));
    }
}
