use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::{StartupInput, StartupStage};

/// Runway sentinel used in place of an actual months figure when burn is
/// zero; large enough that every threshold comparison resolves to the
/// best-capitalized bucket without a special-cased branch.
const INFINITE_RUNWAY_SENTINEL: Decimal = dec!(999);

/// How urgently a company should be fundraising, derived from runway
/// against the stage-typical time to the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaiseSignal {
    RaiseNow,
    RaiseInMonths,
    FocusMilestones,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTimingSignal {
    pub runway_months: Decimal,
    pub months_to_next_round: Option<u32>,
    pub signal: RaiseSignal,
    pub rationale: String,
}

/// Typical months from the current stage to the next round's close, used as
/// the reference point for the runway comparison. `None` once there's no
/// well-defined "next round" left to time against (Series A and later are
/// terminal for this signal).
fn months_to_next_round(stage: StartupStage) -> Option<u32> {
    match stage {
        StartupStage::PreSeed => Some(9),
        StartupStage::Seed => Some(12),
        StartupStage::SeriesA | StartupStage::SeriesB | StartupStage::SeriesC | StartupStage::GrowthLate => None,
    }
}

/// Compares runway against the stage-typical months to the next round's
/// close. Raise now if runway falls short of that window by more than 6
/// months; raise in months if it falls short by up to 18; otherwise the
/// company can focus on milestones rather than the fundraising calendar.
/// Series A and later are terminal for this signal: there's no standard
/// "next round" clock left to race, so it always resolves to
/// `focus_milestones`.
pub fn assess_round_timing(input: &StartupInput) -> RoundTimingSignal {
    let runway_months = input.traction.runway_months().unwrap_or(INFINITE_RUNWAY_SENTINEL);
    let target = months_to_next_round(input.stage);

    let (signal, rationale) = match target {
        None => (
            RaiseSignal::FocusMilestones,
            "stage has no standard next-round timing window; focus on milestones instead of the calendar"
                .to_string(),
        ),
        Some(months_to_next) => {
            let months_to_next = Decimal::from(months_to_next);
            if runway_months < months_to_next - dec!(6) {
                (
                    RaiseSignal::RaiseNow,
                    format!(
                        "{:.0} months of runway is short of the typical {:.0}-month window to the next round by more than 6 months",
                        runway_months, months_to_next
                    ),
                )
            } else if runway_months < months_to_next - dec!(6) + dec!(12) {
                (
                    RaiseSignal::RaiseInMonths,
                    format!(
                        "{:.0} months of runway leaves room to begin fundraising within the next several months",
                        runway_months
                    ),
                )
            } else {
                (
                    RaiseSignal::FocusMilestones,
                    format!("{:.0} months of runway comfortably clears the next-round timing window", runway_months),
                )
            }
        }
    };

    RoundTimingSignal { runway_months, months_to_next_round: target, signal, rationale }
}
