use corp_finance_core::venture::{
    self, FundProfile, FundraisingProfile, MarketProfile, ProductProfile, StartupInput, StartupStage, StartupVertical,
    TeamProfile, TractionMetrics, VcDealInput,
};
use rust_decimal_macros::dec;

fn startup() -> StartupInput {
    StartupInput {
        company_name: "Acme AI".to_string(),
        stage: StartupStage::Seed,
        team: TeamProfile {
            team_size: 10,
            founder_count: 2,
            has_prior_exit: true,
            has_technical_cofounder: true,
            domain_expertise_years: 7,
            is_solo_founder: false,
        },
        traction: TractionMetrics {
            arr: dec!(900_000),
            revenue_ttm: dec!(750_000),
            revenue_growth_rate: dec!(2.1),
            gross_margin: dec!(0.76),
            customer_count: 40,
            net_revenue_retention: Some(dec!(1.12)),
            logo_churn_annual: Some(dec!(0.04)),
            burn_rate_monthly: dec!(110_000),
            cash_on_hand: dec!(1_800_000),
        },
        product: ProductProfile {
            has_live_product: true,
            has_patents: false,
            patent_count: 0,
            is_ai_native: true,
            proprietary_data_moat: true,
        },
        market: MarketProfile {
            tam: dec!(9_000_000_000),
            sam: dec!(900_000_000),
            vertical: StartupVertical::Saas,
            competitive_intensity_high: false,
            is_defense_tech: false,
        },
        fundraising: FundraisingProfile {
            target_raise_amount: dec!(4_000_000),
            pre_money_valuation_ask: dec!(16_000_000),
            months_since_last_round: Some(11),
            prior_round_count: 1,
        },
    }
}

fn vc_deal() -> VcDealInput {
    VcDealInput {
        company_name: "Acme AI".to_string(),
        vertical: StartupVertical::Saas,
        stage: StartupStage::Seed,
        post_money_valuation: dec!(16_000_000),
        check_size: dec!(2_000_000),
        arr: dec!(900_000),
        revenue_ttm: dec!(750_000),
        revenue_growth_rate: dec!(2.1),
        gross_margin: dec!(0.76),
        burn_rate_monthly: dec!(110_000),
        cash_on_hand: dec!(1_800_000),
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

fn fund() -> FundProfile {
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
        recycling_pct: dec!(0.10),
        deployment_period_years: 3,
    }
}

#[test]
fn end_to_end_valuation_blends_all_four_methods() {
    let output = venture::analyze_startup_valuation(&startup()).unwrap();
    assert!(output.result.final_pre_money_estimate > rust_decimal::Decimal::ZERO);
    assert!(!output.result.scorecard_flags.is_empty());
}

#[test]
fn vc_scenarios_run_bear_base_and_bull() {
    let deal = vc_deal();
    let ownership = venture::compute_ownership_math(&deal).unwrap();
    assert!(ownership.entry_ownership_pct > rust_decimal::Decimal::ZERO);

    let scenarios = venture::run_vc_scenarios(&deal, &ownership);
    assert_eq!(scenarios.len(), 3);
}

#[test]
fn quick_screen_flags_a_thin_ownership_deal() {
    let mut deal = vc_deal();
    deal.check_size = dec!(50_000);
    let result = venture::quick_screen(&deal, &fund());
    assert!(!result.flags.is_empty() || !result.recommendation.is_empty());
}

#[test]
fn waterfall_pays_seniority_before_common() {
    let stack = vec![corp_finance_core::venture::LiquidationPreference {
        share_class: "Series A".to_string(),
        invested_amount: dec!(2_000_000),
        preference_multiple: dec!(1.0),
        preference_type: corp_finance_core::venture::PreferenceType::NonParticipating,
        participation_cap: None,
        anti_dilution: corp_finance_core::venture::AntiDilutionType::None,
        seniority: 1,
    }];
    let distribution = venture::run_waterfall(dec!(1_000_000), &stack, dec!(0.30));
    assert_eq!(distribution.common_gets, rust_decimal::Decimal::ZERO);
    assert_eq!(distribution.share_classes[0].amount, dec!(1_000_000));
}
