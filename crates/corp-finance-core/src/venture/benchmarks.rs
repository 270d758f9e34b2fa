use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::StartupVertical;

/// Percentile band of pre-money valuations observed at a given stage within
/// a vertical, plus the ARR multiple used by the ARR-multiple method.
#[derive(Debug, Clone, Copy)]
pub struct VerticalBenchmark {
    pub p25_pre_money: Decimal,
    pub p50_pre_money: Decimal,
    pub p75_pre_money: Decimal,
    pub p95_pre_money: Decimal,
    pub arr_multiple: Decimal,
}

/// Looks up the seed-stage benchmark row for a vertical; callers scale the
/// row to other stages via `benchmarks::scale_for_stage`. Falls back to
/// Other when a vertical has no dedicated row.
pub fn benchmark_for(vertical: StartupVertical) -> VerticalBenchmark {
    match vertical {
        StartupVertical::Saas => VerticalBenchmark {
            p25_pre_money: dec!(6_000_000),
            p50_pre_money: dec!(10_000_000),
            p75_pre_money: dec!(16_000_000),
            p95_pre_money: dec!(28_000_000),
            arr_multiple: dec!(12),
        },
        StartupVertical::Fintech => VerticalBenchmark {
            p25_pre_money: dec!(7_000_000),
            p50_pre_money: dec!(12_000_000),
            p75_pre_money: dec!(20_000_000),
            p95_pre_money: dec!(35_000_000),
            arr_multiple: dec!(10),
        },
        StartupVertical::Healthcare => VerticalBenchmark {
            p25_pre_money: dec!(6_500_000),
            p50_pre_money: dec!(11_000_000),
            p75_pre_money: dec!(18_000_000),
            p95_pre_money: dec!(30_000_000),
            arr_multiple: dec!(9),
        },
        StartupVertical::Biotech => VerticalBenchmark {
            p25_pre_money: dec!(8_000_000),
            p50_pre_money: dec!(15_000_000),
            p75_pre_money: dec!(25_000_000),
            p95_pre_money: dec!(45_000_000),
            arr_multiple: dec!(8),
        },
        StartupVertical::Consumer => VerticalBenchmark {
            p25_pre_money: dec!(5_000_000),
            p50_pre_money: dec!(8_500_000),
            p75_pre_money: dec!(14_000_000),
            p95_pre_money: dec!(24_000_000),
            arr_multiple: dec!(7),
        },
        StartupVertical::Marketplace => VerticalBenchmark {
            p25_pre_money: dec!(5_500_000),
            p50_pre_money: dec!(9_000_000),
            p75_pre_money: dec!(15_000_000),
            p95_pre_money: dec!(26_000_000),
            arr_multiple: dec!(8),
        },
        StartupVertical::Hardware => VerticalBenchmark {
            p25_pre_money: dec!(5_000_000),
            p50_pre_money: dec!(8_000_000),
            p75_pre_money: dec!(13_000_000),
            p95_pre_money: dec!(22_000_000),
            arr_multiple: dec!(6),
        },
        StartupVertical::DefenseTech => VerticalBenchmark {
            p25_pre_money: dec!(7_500_000),
            p50_pre_money: dec!(13_000_000),
            p75_pre_money: dec!(22_000_000),
            p95_pre_money: dec!(40_000_000),
            arr_multiple: dec!(11),
        },
        StartupVertical::Climate => VerticalBenchmark {
            p25_pre_money: dec!(6_000_000),
            p50_pre_money: dec!(10_000_000),
            p75_pre_money: dec!(17_000_000),
            p95_pre_money: dec!(30_000_000),
            arr_multiple: dec!(8),
        },
        StartupVertical::DevTools => VerticalBenchmark {
            p25_pre_money: dec!(6_500_000),
            p50_pre_money: dec!(11_000_000),
            p75_pre_money: dec!(18_000_000),
            p95_pre_money: dec!(32_000_000),
            arr_multiple: dec!(13),
        },
        StartupVertical::Other => VerticalBenchmark {
            p25_pre_money: dec!(5_000_000),
            p50_pre_money: dec!(9_000_000),
            p75_pre_money: dec!(15_000_000),
            p95_pre_money: dec!(25_000_000),
            arr_multiple: dec!(8),
        },
    }
}

/// Scales a seed-anchored benchmark row to another stage. Each step up
/// roughly triples the seed-stage band, which matches typical Series A/B/C
/// step-ups observed across the pack's comp tables.
pub fn scale_for_stage(benchmark: VerticalBenchmark, stage: super::types::StartupStage) -> VerticalBenchmark {
    use super::types::StartupStage;
    let multiplier = match stage {
        StartupStage::PreSeed => dec!(0.35),
        StartupStage::Seed => dec!(1.0),
        StartupStage::SeriesA => dec!(2.8),
        StartupStage::SeriesB => dec!(7.0),
        StartupStage::SeriesC => dec!(16.0),
        StartupStage::GrowthLate => dec!(35.0),
    };
    VerticalBenchmark {
        p25_pre_money: benchmark.p25_pre_money * multiplier,
        p50_pre_money: benchmark.p50_pre_money * multiplier,
        p75_pre_money: benchmark.p75_pre_money * multiplier,
        p95_pre_money: benchmark.p95_pre_money * multiplier,
        arr_multiple: benchmark.arr_multiple,
    }
}
