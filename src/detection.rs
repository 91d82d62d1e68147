// 🔍 Detection Rules
// Rebirth, legacy and great love as pure predicates over chart numbers

use crate::chart::{NumerologyChart, RealizationIndex};
use serde::{Deserialize, Serialize};

/// Numbers that block affective and timing conditions
pub const BLOCKED_NUMBERS: [u32; 2] = [4, 8];

/// Largest gap between inner self and motivation that still counts as harmony
pub const HARMONY_TOLERANCE: u32 = 2;

fn is_blocked(n: u32) -> bool {
    BLOCKED_NUMBERS.contains(&n)
}

// ============================================================================
// RULES
// ============================================================================

/// Rebirth needs a serious life event during realization 2, 3 or 4.
/// Realization 1 never qualifies.
#[doc(alias = "renascimento")]
pub fn detect_rebirth(index: RealizationIndex, has_serious_life_event: bool) -> bool {
    index != RealizationIndex::First && has_serious_life_event
}

/// Legacy: outside realization 1, the realization value repeats motivation,
/// destiny path or merit.
pub fn detect_legacy(
    index: RealizationIndex,
    realization_value: u32,
    motivation: u32,
    destiny: u32,
    merit: u32,
) -> bool {
    if index == RealizationIndex::First {
        return false;
    }

    realization_value == motivation || realization_value == destiny || realization_value == merit
}

/// Great love: unblocked motivation, inner self within 2 of motivation,
/// unblocked destiny path and a favorable quarterly cycle.
#[doc(alias = "grande_amor")]
pub fn detect_great_love(motivation: u32, inner_self: u32, destiny: u32, quarterly_cycle: u32) -> bool {
    !is_blocked(motivation)
        && inner_self.abs_diff(motivation) <= HARMONY_TOLERANCE
        && !is_blocked(destiny)
        && !is_blocked(quarterly_cycle)
}

// ============================================================================
// DETECTION REPORT
// ============================================================================

/// Inputs the chart cannot derive on its own (recorded by an administrator)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionFlags {
    #[serde(default)]
    pub has_serious_life_event: bool,
}

/// All three rules evaluated for a chart's current realization and quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub realization_index: RealizationIndex,
    pub realization_value: u32,
    pub quarterly_cycle: u32,
    pub rebirth: bool,
    pub legacy: bool,
    pub great_love: bool,
}

impl DetectionReport {
    pub fn evaluate(chart: &NumerologyChart, flags: &DetectionFlags) -> Self {
        let (realization_index, realization_value) = chart.current_realization();
        let quarterly_cycle = chart.current_quarterly_cycle();

        DetectionReport {
            realization_index,
            realization_value,
            quarterly_cycle,
            rebirth: detect_rebirth(realization_index, flags.has_serious_life_event),
            legacy: detect_legacy(
                realization_index,
                realization_value,
                chart.motivation,
                chart.destiny,
                chart.merit,
            ),
            // 0 means the name gave no signal, not a harmonious pair
            great_love: chart.motivation != 0
                && chart.inner_self != 0
                && detect_great_love(chart.motivation, chart.inner_self, chart.destiny, quarterly_cycle),
        }
    }

    /// Names of the rules that fired
    pub fn triggered(&self) -> Vec<&'static str> {
        let mut fired = Vec::new();
        if self.rebirth {
            fired.push("rebirth");
        }
        if self.legacy {
            fired.push("legacy");
        }
        if self.great_love {
            fired.push("great_love");
        }
        fired
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::calculate_chart;
    use chrono::NaiveDate;

    #[test]
    fn test_rebirth_rule() {
        assert!(!detect_rebirth(RealizationIndex::First, true));
        assert!(detect_rebirth(RealizationIndex::Second, true));
        assert!(!detect_rebirth(RealizationIndex::Second, false));
        assert!(detect_rebirth(RealizationIndex::Third, true));
        assert!(detect_rebirth(RealizationIndex::Fourth, true));
    }

    #[test]
    fn test_legacy_never_in_first_realization() {
        for value in 0..=33 {
            assert!(!detect_legacy(RealizationIndex::First, value, value, value, value));
        }
    }

    #[test]
    fn test_legacy_rule() {
        assert!(detect_legacy(RealizationIndex::Second, 5, 5, 3, 8));
        assert!(!detect_legacy(RealizationIndex::Second, 5, 6, 3, 8));
        assert!(detect_legacy(RealizationIndex::Third, 3, 6, 3, 8));
        assert!(detect_legacy(RealizationIndex::Fourth, 8, 6, 3, 8));
    }

    #[test]
    fn test_great_love_rule() {
        // blocked motivation
        assert!(!detect_great_love(4, 3, 1, 2));
        // harmony gap > 2
        assert!(!detect_great_love(2, 5, 1, 2));
        // destiny blockage
        assert!(!detect_great_love(2, 3, 4, 2));
        // unfavorable timing
        assert!(!detect_great_love(2, 3, 1, 4));
        assert!(!detect_great_love(2, 3, 1, 8));
        // all conditions pass
        assert!(detect_great_love(2, 3, 1, 2));
        // gap of exactly 2 still counts, either direction
        assert!(detect_great_love(5, 3, 1, 2));
        assert!(detect_great_love(3, 5, 1, 2));
    }

    #[test]
    fn test_report_for_chart() {
        // 1966-05-20 as of 2026-10-16: age 60, realization 4 (r4 = 9),
        // quarter 2 (ct2 = 1), destiny 11
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let chart = calculate_chart("Ana", "1966-05-20", as_of).unwrap();
        // Ana: vowels 2, consonants 5
        assert_eq!((chart.motivation, chart.inner_self), (2, 5));

        let report = DetectionReport::evaluate(&chart, &DetectionFlags { has_serious_life_event: true });

        assert_eq!(report.realization_index, RealizationIndex::Fourth);
        assert_eq!(report.realization_value, 9);
        assert_eq!(report.quarterly_cycle, 1);
        assert!(report.rebirth);
        // merit = reduce(2 + 11) = 4; 9 matches none of 2, 11, 4
        assert!(!report.legacy);
        // |5 - 2| = 3 breaks harmony
        assert!(!report.great_love);
        assert_eq!(report.triggered(), vec!["rebirth"]);
    }

    #[test]
    fn test_report_without_flags() {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let chart = calculate_chart("Ana", "1966-05-20", as_of).unwrap();

        let report = DetectionReport::evaluate(&chart, &DetectionFlags::default());
        assert!(!report.rebirth);
        assert!(report.triggered().is_empty());
    }

    #[test]
    fn test_great_love_needs_name_signal() {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let chart = calculate_chart("", "1966-05-20", as_of).unwrap();
        assert_eq!((chart.motivation, chart.inner_self), (0, 0));

        let report = DetectionReport::evaluate(&chart, &DetectionFlags::default());
        assert!(!report.great_love);

        // digits only: no vowels, consonants present
        let chart = calculate_chart("123", "1966-05-20", as_of).unwrap();
        assert!(!DetectionReport::evaluate(&chart, &DetectionFlags::default()).great_love);
    }
}
