use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartupStage {
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    SeriesC,
    GrowthLate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartupVertical {
    Saas,
    Fintech,
    Healthcare,
    Biotech,
    Consumer,
    Marketplace,
    Hardware,
    DefenseTech,
    Climate,
    DevTools,
    Other,
}

fn default_team_size() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamProfile {
    #[serde(default = "default_team_size")]
    pub team_size: u32,
    pub founder_count: u32,
    pub has_prior_exit: bool,
    pub has_technical_cofounder: bool,
    pub domain_expertise_years: u32,
    #[serde(default)]
    pub is_solo_founder: bool,
}

fn default_growth_rate() -> Rate {
    dec!(1.50)
}
fn default_gross_margin() -> Rate {
    dec!(0.70)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TractionMetrics {
    pub arr: Money,
    pub revenue_ttm: Money,
    #[serde(default = "default_growth_rate")]
    pub revenue_growth_rate: Rate,
    #[serde(default = "default_gross_margin")]
    pub gross_margin: Rate,
    pub customer_count: u32,
    #[serde(default)]
    pub net_revenue_retention: Option<Rate>,
    #[serde(default)]
    pub logo_churn_annual: Option<Rate>,
    pub burn_rate_monthly: Money,
    pub cash_on_hand: Money,
}

impl TractionMetrics {
    /// Months of runway at the current burn rate, `None` when burn is zero
    /// (infinite runway, not a divide-by-zero).
    pub fn runway_months(&self) -> Option<Decimal> {
        if self.burn_rate_monthly <= Decimal::ZERO {
            None
        } else {
            Some(self.cash_on_hand / self.burn_rate_monthly)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductProfile {
    pub has_live_product: bool,
    pub has_patents: bool,
    #[serde(default)]
    pub patent_count: u32,
    #[serde(default)]
    pub is_ai_native: bool,
    #[serde(default)]
    pub proprietary_data_moat: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketProfile {
    pub tam: Money,
    pub sam: Money,
    pub vertical: StartupVertical,
    #[serde(default)]
    pub competitive_intensity_high: bool,
    #[serde(default)]
    pub is_defense_tech: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundraisingProfile {
    pub target_raise_amount: Money,
    pub pre_money_valuation_ask: Money,
    #[serde(default)]
    pub months_since_last_round: Option<u32>,
    #[serde(default)]
    pub prior_round_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupInput {
    pub company_name: String,
    pub stage: StartupStage,
    pub team: TeamProfile,
    pub traction: TractionMetrics,
    pub product: ProductProfile,
    pub market: MarketProfile,
    pub fundraising: FundraisingProfile,
}
