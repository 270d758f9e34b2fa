use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CorpFinanceError;
use crate::types::Money;

use super::types::{AmortizationType, DebtTranche};

const MAX_ITERATIONS: usize = 100;
const ABSOLUTE_CONVERGENCE: Decimal = dec!(1.0);
const RELATIVE_CONVERGENCE: Decimal = dec!(0.0001);
const DAMPING: Decimal = dec!(0.5);

/// One year of a single tranche's amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrancheYear {
    pub tranche: String,
    pub beginning_balance: Money,
    pub interest_expense: Money,
    pub scheduled_principal: Money,
    pub optional_principal: Money,
    pub principal_repayment: Money,
    pub ending_balance: Money,
}

/// Full-year debt schedule across all tranches, plus the cash-sweep paydown
/// implied by the circularity solve (interest depends on cash available,
/// cash available depends on interest).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtScheduleYear {
    pub year: u32,
    pub tranches: Vec<TrancheYear>,
    pub total_interest_expense: Money,
    pub total_principal_repaid: Money,
    pub total_optional_sweep: Money,
    pub total_ending_balance: Money,
    pub converged: bool,
    pub iterations_used: usize,
}

fn scheduled_principal(tranche: &DebtTranche, beginning_balance: Money, year_index: u32) -> Money {
    if beginning_balance <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match tranche.amortization_type {
        AmortizationType::InterestOnly => Decimal::ZERO,
        AmortizationType::Bullet => {
            if year_index + 1 >= tranche.term_years {
                beginning_balance
            } else {
                Decimal::ZERO
            }
        }
        AmortizationType::StraightLine => {
            if tranche.term_years == 0 {
                Decimal::ZERO
            } else {
                let straight_line = tranche.amount / Decimal::from(tranche.term_years);
                straight_line.min(beginning_balance)
            }
        }
    }
}

/// Advances every tranche one year using a damped Picard fixed-point
/// iteration on total interest expense: interest depends on the average
/// balance, which depends on how much optional principal the cash sweep
/// retires, which depends on free cash flow, which depends on interest.
/// `compute_fcf` closes over the year's EBIT, D&A, capex, working-capital
/// change and tax rate, and turns this iteration's acquisition-debt interest
/// estimate into free cash flow available before debt service; the solver
/// floors that at the scheduled (mandatory) principal to get the optional
/// sweep, then waterfalls it across tranches in descending interest-rate
/// order. Converges when the change in total interest expense is within $1
/// or 0.01% of the prior estimate, whichever is looser; otherwise returns the
/// last iterate with `converged = false` so callers can surface a warning.
pub fn solve_year(
    beginning_balances: &[(DebtTranche, Money)],
    year_index: u32,
    compute_fcf: impl Fn(Money) -> Money,
) -> Result<DebtScheduleYear, CorpFinanceError> {
    let mandatory: Vec<Money> = beginning_balances
        .iter()
        .map(|(tranche, balance)| scheduled_principal(tranche, *balance, year_index))
        .collect();
    let mandatory_total: Money = mandatory.iter().sum();

    // Waterfall order: richest coupon gets swept first.
    let mut sweep_order: Vec<usize> = (0..beginning_balances.len()).collect();
    sweep_order.sort_by(|&a, &b| beginning_balances[b].0.interest_rate.cmp(&beginning_balances[a].0.interest_rate));

    let mut prev_total_interest: Money = beginning_balances
        .iter()
        .map(|(tranche, balance)| *balance * tranche.interest_rate)
        .sum();
    let mut last_years: Vec<TrancheYear> = Vec::new();
    let mut converged = false;
    let mut iterations_used = 0usize;

    for iteration in 1..=MAX_ITERATIONS {
        iterations_used = iteration;

        let fcf = compute_fcf(prev_total_interest);
        let optional_available = (fcf - mandatory_total).max(Decimal::ZERO);

        let mut remaining_sweep = optional_available;
        let mut optional_by_index = vec![Decimal::ZERO; beginning_balances.len()];
        for &idx in &sweep_order {
            let (_, beginning_balance) = &beginning_balances[idx];
            let room = (*beginning_balance - mandatory[idx]).max(Decimal::ZERO);
            let take = remaining_sweep.min(room);
            optional_by_index[idx] = take;
            remaining_sweep -= take;
        }

        let mut years = Vec::with_capacity(beginning_balances.len());
        let mut total_interest = Decimal::ZERO;

        for (idx, (tranche, beginning_balance)) in beginning_balances.iter().enumerate() {
            let scheduled = mandatory[idx];
            let optional = optional_by_index[idx];
            let ending_balance = (*beginning_balance - scheduled - optional).max(Decimal::ZERO);
            let average_balance = (*beginning_balance + ending_balance) / dec!(2);
            let interest = average_balance * tranche.interest_rate;

            total_interest += interest;

            years.push(TrancheYear {
                tranche: tranche.name.clone(),
                beginning_balance: *beginning_balance,
                interest_expense: interest,
                scheduled_principal: scheduled,
                optional_principal: optional,
                principal_repayment: scheduled + optional,
                ending_balance,
            });
        }

        let delta = (total_interest - prev_total_interest).abs();
        let relative_ok = delta / prev_total_interest.abs().max(Decimal::ONE) <= RELATIVE_CONVERGENCE;

        last_years = years;

        if iteration > 1 && (delta <= ABSOLUTE_CONVERGENCE || relative_ok) {
            converged = true;
            break;
        }

        prev_total_interest = prev_total_interest * DAMPING + total_interest * (Decimal::ONE - DAMPING);
    }

    let total_interest_expense = last_years.iter().map(|y| y.interest_expense).sum();
    let total_principal_repaid = last_years.iter().map(|y| y.principal_repayment).sum();
    let total_optional_sweep = last_years.iter().map(|y| y.optional_principal).sum();
    let total_ending_balance = last_years.iter().map(|y| y.ending_balance).sum();

    Ok(DebtScheduleYear {
        year: year_index + 1,
        tranches: last_years,
        total_interest_expense,
        total_principal_repaid,
        total_optional_sweep,
        total_ending_balance,
        converged,
        iterations_used,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tranche() -> DebtTranche {
        DebtTranche {
            name: "Term Loan B".to_string(),
            amount: dec!(100_000_000),
            interest_rate: dec!(0.08),
            term_years: 5,
            amortization_type: AmortizationType::StraightLine,
        }
    }

    #[test]
    fn straight_line_schedule_amortizes_evenly() {
        let result = solve_year(&[(tranche(), dec!(100_000_000))], 0, |_| Decimal::ZERO).unwrap();
        assert_eq!(result.total_principal_repaid, dec!(20_000_000));
        assert_eq!(result.total_ending_balance, dec!(80_000_000));
        assert!(result.converged);
    }

    #[test]
    fn interest_only_tranche_never_amortizes_principal() {
        let mut t = tranche();
        t.amortization_type = AmortizationType::InterestOnly;
        let result = solve_year(&[(t, dec!(100_000_000))], 0, |_| Decimal::ZERO).unwrap();
        assert_eq!(result.total_principal_repaid, Decimal::ZERO);
        assert_eq!(result.total_ending_balance, dec!(100_000_000));
    }

    #[test]
    fn bullet_repays_only_in_final_year() {
        let mut t = tranche();
        t.amortization_type = AmortizationType::Bullet;
        t.term_years = 3;
        let mid_year = solve_year(&[(t.clone(), dec!(100_000_000))], 1, |_| Decimal::ZERO).unwrap();
        assert_eq!(mid_year.total_principal_repaid, Decimal::ZERO);
        let final_year = solve_year(&[(t, dec!(100_000_000))], 2, |_| Decimal::ZERO).unwrap();
        assert_eq!(final_year.total_principal_repaid, dec!(100_000_000));
    }

    #[test]
    fn zero_balance_tranche_produces_zero_interest() {
        let result = solve_year(&[(tranche(), Decimal::ZERO)], 0, |_| Decimal::ZERO).unwrap();
        assert_eq!(result.total_interest_expense, Decimal::ZERO);
    }

    #[test]
    fn excess_fcf_sweeps_the_richest_coupon_first() {
        let mut senior = tranche();
        senior.name = "Senior".to_string();
        senior.interest_rate = dec!(0.06);
        let mut mezz = tranche();
        mezz.name = "Mezz".to_string();
        mezz.interest_rate = dec!(0.12);

        let balances = [(senior, dec!(100_000_000)), (mezz, dec!(100_000_000))];
        // Plenty of FCF regardless of the interest estimate: the whole
        // scheduled-principal-exceeding surplus should sweep mezz (the
        // higher coupon) before senior is touched.
        let result = solve_year(&balances, 0, |_| dec!(60_000_000)).unwrap();

        let mezz_year = result.tranches.iter().find(|t| t.tranche == "Mezz").unwrap();
        let senior_year = result.tranches.iter().find(|t| t.tranche == "Senior").unwrap();
        assert!(mezz_year.optional_principal > Decimal::ZERO);
        assert!(senior_year.optional_principal <= mezz_year.optional_principal);
    }

    #[test]
    fn non_positive_fcf_yields_no_optional_sweep() {
        let result = solve_year(&[(tranche(), dec!(100_000_000))], 0, |_| dec!(-5_000_000)).unwrap();
        let only = &result.tranches[0];
        assert_eq!(only.optional_principal, Decimal::ZERO);
    }
}
