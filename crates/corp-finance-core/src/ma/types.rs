use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Industry & benchmark keys
// ---------------------------------------------------------------------------

/// Target/acquirer industry classification. Drives benchmark lookups
/// (`ma::benchmarks`); unrecognized combinations fall back to Manufacturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Manufacturing,
    Defense,
    Technology,
    Healthcare,
    FinancialServices,
    ConsumerRetail,
    Industrial,
    Energy,
    TelecomMedia,
    BusinessServices,
    RealEstate,
    Transportation,
    Agriculture,
    Materials,
    Utilities,
    Aerospace,
    Construction,
    Hospitality,
    Education,
    Pharmaceuticals,
    Other,
}

// ---------------------------------------------------------------------------
// Defense-sector profile (optional pass-through, Defense industry only)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearanceLevel {
    Unclassified,
    Confidential,
    Secret,
    TopSecret,
    TopSecretSci,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentClassification {
    Unclassified,
    Classified,
    AirGapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseSoftwareType {
    MissionSoftware,
    EnterpriseIt,
    Embedded,
    Analytics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractVehicleType {
    Idiq,
    GsaSchedule,
    Ota,
    FirmFixedPrice,
    CostPlus,
    SingleAward,
    MultipleAward,
}

/// Additional deal context supplied only when `target.industry == Defense`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseProfile {
    pub is_ai_native: bool,
    pub contract_backlog_total: Money,
    pub contract_backlog_funded: Money,
    pub idiq_ceiling_value: Option<Money>,
    pub contract_vehicles: Vec<ContractVehicleType>,
    pub clearance_level: ClearanceLevel,
    pub authorization_certifications: Vec<String>,
    pub customer_concentration_dod_pct: Rate,
    pub programs_of_record: u32,
    pub deployment_classification: DeploymentClassification,
    pub software_type: DefenseSoftwareType,
    pub ip_ownership: String,
}

/// Computed defense-sector positioning, present only for Defense-industry deals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefensePositioning {
    pub ev_to_revenue_multiple: Decimal,
    pub backlog_coverage_ratio: Decimal,
    pub revenue_visibility_years: Decimal,
    pub clearance_premium: Rate,
    pub certification_premium: Rate,
    pub program_of_record_premium: Rate,
    pub positioning_summary: String,
}

// ---------------------------------------------------------------------------
// Parties
// ---------------------------------------------------------------------------

fn default_tax_rate() -> Rate {
    dec!(0.25)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquirerProfile {
    pub name: String,
    pub revenue: Money,
    pub ebitda: Money,
    pub net_income: Money,
    pub total_debt: Money,
    pub cash_on_hand: Money,
    pub shares_outstanding: Decimal,
    pub share_price: Money,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Rate,
    pub depreciation: Money,
    pub capex: Money,
    pub working_capital: Money,
    pub industry: Industry,
}

impl AcquirerProfile {
    pub fn market_cap(&self) -> Money {
        self.share_price * self.shares_outstanding
    }

    pub fn eps(&self) -> Money {
        if self.shares_outstanding.is_zero() {
            Decimal::ZERO
        } else {
            self.net_income / self.shares_outstanding
        }
    }
}

fn default_revenue_growth() -> Rate {
    dec!(0.05)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetProfile {
    pub name: String,
    pub revenue: Money,
    pub ebitda: Money,
    pub net_income: Money,
    pub total_debt: Money,
    pub cash_on_hand: Money,
    pub acquisition_price: Money,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Rate,
    pub depreciation: Money,
    pub capex: Money,
    pub working_capital: Money,
    pub industry: Industry,
    #[serde(default = "default_revenue_growth")]
    pub revenue_growth_rate: Rate,
    #[serde(default)]
    pub defense_profile: Option<DefenseProfile>,
    #[serde(default)]
    pub is_ai_native: bool,
}

// ---------------------------------------------------------------------------
// Deal structure & financing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationType {
    StraightLine,
    InterestOnly,
    Bullet,
}

impl Default for AmortizationType {
    fn default() -> Self {
        AmortizationType::StraightLine
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtTranche {
    pub name: String,
    pub amount: Money,
    pub interest_rate: Rate,
    pub term_years: u32,
    #[serde(default)]
    pub amortization_type: AmortizationType,
}

fn default_transaction_fees_pct() -> Rate {
    dec!(0.02)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealStructure {
    pub cash_pct: Rate,
    pub stock_pct: Rate,
    pub debt_pct: Rate,
    #[serde(default)]
    pub debt_tranches: Vec<DebtTranche>,
    #[serde(default = "default_transaction_fees_pct")]
    pub transaction_fees_pct: Rate,
    #[serde(default)]
    pub advisory_fees: Money,
}

// ---------------------------------------------------------------------------
// Purchase price allocation assumptions
// ---------------------------------------------------------------------------

fn default_writeup_life() -> u32 {
    15
}
fn default_intangible_life() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePriceAllocationInput {
    #[serde(default)]
    pub asset_writeup: Money,
    #[serde(default = "default_writeup_life")]
    pub asset_writeup_useful_life: u32,
    #[serde(default)]
    pub identifiable_intangibles: Money,
    #[serde(default = "default_intangible_life")]
    pub intangible_useful_life: u32,
}

impl Default for PurchasePriceAllocationInput {
    fn default() -> Self {
        PurchasePriceAllocationInput {
            asset_writeup: Decimal::ZERO,
            asset_writeup_useful_life: default_writeup_life(),
            identifiable_intangibles: Decimal::ZERO,
            intangible_useful_life: default_intangible_life(),
        }
    }
}

// ---------------------------------------------------------------------------
// Synergies
// ---------------------------------------------------------------------------

fn default_phase_in_years() -> u32 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynergyItem {
    pub category: String,
    pub annual_amount: Money,
    #[serde(default = "default_phase_in_years")]
    pub phase_in_years: u32,
    #[serde(default)]
    pub cost_to_achieve: Money,
    #[serde(default)]
    pub is_revenue: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynergyAssumptions {
    #[serde(default)]
    pub cost_synergies: Vec<SynergyItem>,
    #[serde(default)]
    pub revenue_synergies: Vec<SynergyItem>,
}

impl SynergyAssumptions {
    pub fn all_items(&self) -> impl Iterator<Item = &SynergyItem> {
        self.cost_synergies.iter().chain(self.revenue_synergies.iter())
    }

    pub fn total_annual(&self) -> Money {
        self.all_items().map(|s| s.annual_amount).sum()
    }

    pub fn total_cost_to_achieve(&self) -> Money {
        self.all_items().map(|s| s.cost_to_achieve).sum()
    }

    pub fn total_revenue_annual(&self) -> Money {
        self.revenue_synergies.iter().map(|s| s.annual_amount).sum()
    }
}

// ---------------------------------------------------------------------------
// Mode & deal input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelMode {
    Quick,
    Deep,
}

impl Default for ModelMode {
    fn default() -> Self {
        ModelMode::Quick
    }
}

fn default_projection_years() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealInput {
    pub acquirer: AcquirerProfile,
    pub target: TargetProfile,
    pub structure: DealStructure,
    #[serde(default)]
    pub ppa: PurchasePriceAllocationInput,
    #[serde(default)]
    pub synergies: SynergyAssumptions,
    #[serde(default)]
    pub mode: ModelMode,
    #[serde(default = "default_projection_years")]
    pub projection_years: u32,
}

// ---------------------------------------------------------------------------
// Risk & verdict vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    Fair,
    Poor,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealVerdict {
    Green,
    Yellow,
    Red,
}
