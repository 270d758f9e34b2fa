use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CorpFinanceError;
use crate::types::{Money, Rate};

/// Stage-transition dilution defaults, taken from widely cited venture
/// benchmark surveys. Used when a round's own dilution isn't specified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DilutionAssumptions {
    pub pre_seed_to_seed: Rate,
    pub seed_to_a: Rate,
    pub a_to_b: Rate,
    pub b_to_c: Rate,
    pub c_to_ipo: Rate,
    pub option_pool_expansion: Rate,
}

impl Default for DilutionAssumptions {
    fn default() -> Self {
        DilutionAssumptions {
            pre_seed_to_seed: dec!(0.205),
            seed_to_a: dec!(0.20),
            a_to_b: dec!(0.18),
            b_to_c: dec!(0.15),
            c_to_ipo: dec!(0.12),
            option_pool_expansion: dec!(0.05),
        }
    }
}

/// A convertible note or SAFE outstanding ahead of the next priced round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeNote {
    pub label: String,
    pub investment_amount: Money,
    #[serde(default)]
    pub valuation_cap: Option<Money>,
    #[serde(default)]
    pub discount_rate: Option<Rate>,
}

/// One priced round in the dilution path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundAssumption {
    pub round_name: String,
    pub pre_money_valuation: Money,
    pub new_money_raised: Money,
    #[serde(default)]
    pub option_pool_expansion_pct: Option<Rate>,
}

/// Founder/existing-holder ownership after a single round, plus the slice
/// that round's new investors and the expanded option pool took.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipPoint {
    pub round_name: String,
    pub post_money_valuation: Money,
    pub new_investor_ownership_pct: Rate,
    pub option_pool_ownership_pct: Rate,
    pub existing_holder_ownership_pct: Rate,
}

/// How outstanding SAFEs converted into the first priced round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeConversionSummary {
    pub note_count: usize,
    pub total_safe_investment: Money,
    pub combined_safe_ownership_pct: Rate,
    pub cap_triggered_count: usize,
    pub discount_triggered_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DilutionOutput {
    pub safe_conversion: Option<SafeConversionSummary>,
    pub ownership_path: Vec<OwnershipPoint>,
    pub founder_ownership_at_exit_pct: Rate,
}

/// Converts outstanding SAFEs against the first priced round's pre-money
/// valuation. Each note converts at the cheaper of its cap-implied valuation
/// or its discount off the round's pre-money, so an investor never converts
/// at worse terms than either instrument on its own provides.
fn convert_safes(safes: &[SafeNote], round_pre_money: Money) -> SafeConversionSummary {
    let mut combined_ownership_pct = Decimal::ZERO;
    let mut cap_triggered = 0usize;
    let mut discount_triggered = 0usize;
    let mut total_investment = Decimal::ZERO;

    for safe in safes {
        total_investment += safe.investment_amount;

        let cap_implied_valuation = safe.valuation_cap;
        let discount_implied_valuation = safe
            .discount_rate
            .map(|discount| round_pre_money * (Decimal::ONE - discount));

        let effective_valuation = match (cap_implied_valuation, discount_implied_valuation) {
            (Some(cap), Some(discounted)) => {
                if cap <= discounted {
                    cap_triggered += 1;
                    cap
                } else {
                    discount_triggered += 1;
                    discounted
                }
            }
            (Some(cap), None) => {
                cap_triggered += 1;
                cap
            }
            (None, Some(discounted)) => {
                discount_triggered += 1;
                discounted
            }
            (None, None) => round_pre_money,
        };

        if effective_valuation > Decimal::ZERO {
            combined_ownership_pct += safe.investment_amount / effective_valuation;
        }
    }

    SafeConversionSummary {
        note_count: safes.len(),
        total_safe_investment: total_investment,
        combined_safe_ownership_pct: combined_ownership_pct,
        cap_triggered_count: cap_triggered,
        discount_triggered_count: discount_triggered,
    }
}

/// Walks a founder's fully-diluted ownership through a sequence of priced
/// rounds, converting any outstanding SAFEs into the first round. Each
/// round's option pool expansion dilutes existing holders before the new
/// money comes in, matching how term sheets typically size the pool against
/// the pre-money cap table.
pub fn project_dilution(
    starting_founder_ownership_pct: Rate,
    safes: &[SafeNote],
    rounds: &[RoundAssumption],
    defaults: &DilutionAssumptions,
) -> Result<DilutionOutput, CorpFinanceError> {
    if starting_founder_ownership_pct <= Decimal::ZERO || starting_founder_ownership_pct > Decimal::ONE {
        return Err(CorpFinanceError::InvalidInput {
            field: "starting_founder_ownership_pct".to_string(),
            reason: "must be in (0, 1]".to_string(),
        });
    }

    let mut existing_holder_ownership_pct = Decimal::ONE;
    let mut ownership_path = Vec::with_capacity(rounds.len());
    let mut safe_conversion = None;

    for (index, round) in rounds.iter().enumerate() {
        let mut effective_pre_money = round.pre_money_valuation;

        if index == 0 && !safes.is_empty() {
            let conversion = convert_safes(safes, round.pre_money_valuation);
            existing_holder_ownership_pct -= conversion.combined_safe_ownership_pct * existing_holder_ownership_pct;
            effective_pre_money = round.pre_money_valuation;
            safe_conversion = Some(conversion);
        }

        let pool_expansion = round.option_pool_expansion_pct.unwrap_or(defaults.option_pool_expansion);
        existing_holder_ownership_pct *= Decimal::ONE - pool_expansion;

        let post_money = effective_pre_money + round.new_money_raised;
        let new_investor_pct = if post_money > Decimal::ZERO {
            round.new_money_raised / post_money
        } else {
            Decimal::ZERO
        };
        existing_holder_ownership_pct *= Decimal::ONE - new_investor_pct;

        ownership_path.push(OwnershipPoint {
            round_name: round.round_name.clone(),
            post_money_valuation: post_money,
            new_investor_ownership_pct: new_investor_pct,
            option_pool_ownership_pct: pool_expansion,
            existing_holder_ownership_pct,
        });
    }

    let founder_ownership_at_exit_pct = starting_founder_ownership_pct * existing_holder_ownership_pct;

    Ok(DilutionOutput {
        safe_conversion,
        ownership_path,
        founder_ownership_at_exit_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_priced_round_dilutes_by_the_new_money_share() {
        let rounds = vec![RoundAssumption {
            round_name: "Series A".to_string(),
            pre_money_valuation: dec!(40_000_000),
            new_money_raised: dec!(10_000_000),
            option_pool_expansion_pct: Some(Decimal::ZERO),
        }];
        let output = project_dilution(Decimal::ONE, &[], &rounds, &DilutionAssumptions::default()).unwrap();
        // new investor takes 10 / 50 = 20%, founders retain 80%
        assert_eq!(output.founder_ownership_at_exit_pct, dec!(0.8));
    }

    #[test]
    fn safe_with_a_lower_cap_converts_more_cheaply_than_the_discount() {
        let safes = vec![SafeNote {
            label: "Pre-seed SAFE".to_string(),
            investment_amount: dec!(500_000),
            valuation_cap: Some(dec!(5_000_000)),
            discount_rate: Some(dec!(0.20)),
        }];
        let rounds = vec![RoundAssumption {
            round_name: "Seed".to_string(),
            pre_money_valuation: dec!(10_000_000),
            new_money_raised: dec!(2_000_000),
            option_pool_expansion_pct: Some(Decimal::ZERO),
        }];
        let output = project_dilution(dec!(1.0), &safes, &rounds, &DilutionAssumptions::default()).unwrap();
        let conversion = output.safe_conversion.unwrap();
        assert_eq!(conversion.cap_triggered_count, 1);
        assert_eq!(conversion.discount_triggered_count, 0);
        // 500k / 5M cap = 10% ownership to the SAFE holder
        assert_eq!(conversion.combined_safe_ownership_pct, dec!(0.1));
    }

    #[test]
    fn rejects_starting_ownership_outside_unit_interval() {
        let result = project_dilution(dec!(1.5), &[], &[], &DilutionAssumptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn multi_round_path_monotonically_dilutes_founders() {
        let rounds = vec![
            RoundAssumption {
                round_name: "Seed".to_string(),
                pre_money_valuation: dec!(8_000_000),
                new_money_raised: dec!(2_000_000),
                option_pool_expansion_pct: None,
            },
            RoundAssumption {
                round_name: "Series A".to_string(),
                pre_money_valuation: dec!(30_000_000),
                new_money_raised: dec!(10_000_000),
                option_pool_expansion_pct: None,
            },
        ];
        let output = project_dilution(dec!(1.0), &[], &rounds, &DilutionAssumptions::default()).unwrap();
        assert!(output.ownership_path[0].existing_holder_ownership_pct > output.ownership_path[1].existing_holder_ownership_pct);
    }
}
