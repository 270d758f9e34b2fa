use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::Industry;

/// Industry benchmark bundle used to sanity-check and default deal assumptions.
#[derive(Debug, Clone, Copy)]
pub struct IndustryBenchmark {
    pub ev_ebitda_low: Decimal,
    pub ev_ebitda_median: Decimal,
    pub ev_ebitda_high: Decimal,
    pub typical_synergy_pct_of_target_revenue: Decimal,
    pub typical_integration_cost_pct_of_deal: Decimal,
    pub typical_cost_of_debt_spread: Decimal,
}

/// Looks up the benchmark row for an industry, falling back to Manufacturing
/// when the industry has no dedicated row (there isn't one; every variant is
/// covered, but the fallback keeps the lookup total if the table is trimmed).
pub fn benchmark_for(industry: Industry) -> IndustryBenchmark {
    match industry {
        Industry::Manufacturing => IndustryBenchmark {
            ev_ebitda_low: dec!(5.6),
            ev_ebitda_median: dec!(8),
            ev_ebitda_high: dec!(10.8),
            typical_synergy_pct_of_target_revenue: dec!(0.03),
            typical_integration_cost_pct_of_deal: dec!(0.02),
            typical_cost_of_debt_spread: dec!(0.025),
        },
        Industry::Defense => IndustryBenchmark {
            ev_ebitda_low: dec!(9.1),
            ev_ebitda_median: dec!(13),
            ev_ebitda_high: dec!(17.55),
            typical_synergy_pct_of_target_revenue: dec!(0.025),
            typical_integration_cost_pct_of_deal: dec!(0.03),
            typical_cost_of_debt_spread: dec!(0.02),
        },
        Industry::Technology => IndustryBenchmark {
            ev_ebitda_low: dec!(11.2),
            ev_ebitda_median: dec!(16),
            ev_ebitda_high: dec!(21.6),
            typical_synergy_pct_of_target_revenue: dec!(0.05),
            typical_integration_cost_pct_of_deal: dec!(0.04),
            typical_cost_of_debt_spread: dec!(0.03),
        },
        Industry::Healthcare => IndustryBenchmark {
            ev_ebitda_low: dec!(8.4),
            ev_ebitda_median: dec!(12),
            ev_ebitda_high: dec!(16.2),
            typical_synergy_pct_of_target_revenue: dec!(0.04),
            typical_integration_cost_pct_of_deal: dec!(0.03),
            typical_cost_of_debt_spread: dec!(0.022),
        },
        Industry::Pharmaceuticals => IndustryBenchmark {
            ev_ebitda_low: dec!(9.8),
            ev_ebitda_median: dec!(14),
            ev_ebitda_high: dec!(18.9),
            typical_synergy_pct_of_target_revenue: dec!(0.06),
            typical_integration_cost_pct_of_deal: dec!(0.05),
            typical_cost_of_debt_spread: dec!(0.025),
        },
        Industry::FinancialServices => IndustryBenchmark {
            ev_ebitda_low: dec!(7),
            ev_ebitda_median: dec!(10),
            ev_ebitda_high: dec!(13.5),
            typical_synergy_pct_of_target_revenue: dec!(0.04),
            typical_integration_cost_pct_of_deal: dec!(0.03),
            typical_cost_of_debt_spread: dec!(0.02),
        },
        Industry::ConsumerRetail => IndustryBenchmark {
            ev_ebitda_low: dec!(6.3),
            ev_ebitda_median: dec!(9),
            ev_ebitda_high: dec!(12.15),
            typical_synergy_pct_of_target_revenue: dec!(0.035),
            typical_integration_cost_pct_of_deal: dec!(0.025),
            typical_cost_of_debt_spread: dec!(0.028),
        },
        Industry::Industrial => IndustryBenchmark {
            ev_ebitda_low: dec!(5.95),
            ev_ebitda_median: dec!(8.5),
            ev_ebitda_high: dec!(11.48),
            typical_synergy_pct_of_target_revenue: dec!(0.03),
            typical_integration_cost_pct_of_deal: dec!(0.02),
            typical_cost_of_debt_spread: dec!(0.025),
        },
        Industry::Energy => IndustryBenchmark {
            ev_ebitda_low: dec!(4.9),
            ev_ebitda_median: dec!(7),
            ev_ebitda_high: dec!(9.45),
            typical_synergy_pct_of_target_revenue: dec!(0.02),
            typical_integration_cost_pct_of_deal: dec!(0.02),
            typical_cost_of_debt_spread: dec!(0.03),
        },
        Industry::TelecomMedia => IndustryBenchmark {
            ev_ebitda_low: dec!(6.65),
            ev_ebitda_median: dec!(9.5),
            ev_ebitda_high: dec!(12.83),
            typical_synergy_pct_of_target_revenue: dec!(0.05),
            typical_integration_cost_pct_of_deal: dec!(0.04),
            typical_cost_of_debt_spread: dec!(0.025),
        },
        Industry::BusinessServices => IndustryBenchmark {
            ev_ebitda_low: dec!(7.7),
            ev_ebitda_median: dec!(11),
            ev_ebitda_high: dec!(14.85),
            typical_synergy_pct_of_target_revenue: dec!(0.04),
            typical_integration_cost_pct_of_deal: dec!(0.02),
            typical_cost_of_debt_spread: dec!(0.025),
        },
        Industry::RealEstate => IndustryBenchmark {
            ev_ebitda_low: dec!(9.8),
            ev_ebitda_median: dec!(14),
            ev_ebitda_high: dec!(18.9),
            typical_synergy_pct_of_target_revenue: dec!(0.015),
            typical_integration_cost_pct_of_deal: dec!(0.015),
            typical_cost_of_debt_spread: dec!(0.02),
        },
        Industry::Transportation => IndustryBenchmark {
            ev_ebitda_low: dec!(5.25),
            ev_ebitda_median: dec!(7.5),
            ev_ebitda_high: dec!(10.12),
            typical_synergy_pct_of_target_revenue: dec!(0.03),
            typical_integration_cost_pct_of_deal: dec!(0.025),
            typical_cost_of_debt_spread: dec!(0.03),
        },
        Industry::Agriculture => IndustryBenchmark {
            ev_ebitda_low: dec!(4.9),
            ev_ebitda_median: dec!(7),
            ev_ebitda_high: dec!(9.45),
            typical_synergy_pct_of_target_revenue: dec!(0.02),
            typical_integration_cost_pct_of_deal: dec!(0.02),
            typical_cost_of_debt_spread: dec!(0.03),
        },
        Industry::Materials => IndustryBenchmark {
            ev_ebitda_low: dec!(5.25),
            ev_ebitda_median: dec!(7.5),
            ev_ebitda_high: dec!(10.12),
            typical_synergy_pct_of_target_revenue: dec!(0.025),
            typical_integration_cost_pct_of_deal: dec!(0.02),
            typical_cost_of_debt_spread: dec!(0.028),
        },
        Industry::Utilities => IndustryBenchmark {
            ev_ebitda_low: dec!(7.35),
            ev_ebitda_median: dec!(10.5),
            ev_ebitda_high: dec!(14.18),
            typical_synergy_pct_of_target_revenue: dec!(0.015),
            typical_integration_cost_pct_of_deal: dec!(0.015),
            typical_cost_of_debt_spread: dec!(0.018),
        },
        Industry::Aerospace => IndustryBenchmark {
            ev_ebitda_low: dec!(8.4),
            ev_ebitda_median: dec!(12),
            ev_ebitda_high: dec!(16.2),
            typical_synergy_pct_of_target_revenue: dec!(0.03),
            typical_integration_cost_pct_of_deal: dec!(0.03),
            typical_cost_of_debt_spread: dec!(0.022),
        },
        Industry::Construction => IndustryBenchmark {
            ev_ebitda_low: dec!(4.55),
            ev_ebitda_median: dec!(6.5),
            ev_ebitda_high: dec!(8.78),
            typical_synergy_pct_of_target_revenue: dec!(0.025),
            typical_integration_cost_pct_of_deal: dec!(0.02),
            typical_cost_of_debt_spread: dec!(0.03),
        },
        Industry::Hospitality => IndustryBenchmark {
            ev_ebitda_low: dec!(6.3),
            ev_ebitda_median: dec!(9),
            ev_ebitda_high: dec!(12.15),
            typical_synergy_pct_of_target_revenue: dec!(0.03),
            typical_integration_cost_pct_of_deal: dec!(0.025),
            typical_cost_of_debt_spread: dec!(0.03),
        },
        Industry::Education => IndustryBenchmark {
            ev_ebitda_low: dec!(6.65),
            ev_ebitda_median: dec!(9.5),
            ev_ebitda_high: dec!(12.83),
            typical_synergy_pct_of_target_revenue: dec!(0.025),
            typical_integration_cost_pct_of_deal: dec!(0.02),
            typical_cost_of_debt_spread: dec!(0.025),
        },
        Industry::Other => IndustryBenchmark {
            ev_ebitda_low: dec!(5.6),
            ev_ebitda_median: dec!(8),
            ev_ebitda_high: dec!(10.8),
            typical_synergy_pct_of_target_revenue: dec!(0.03),
            typical_integration_cost_pct_of_deal: dec!(0.02),
            typical_cost_of_debt_spread: dec!(0.025),
        },
    }
}
