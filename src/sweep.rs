//! Re-run a scenario across a range of counts for one tracked card type,
//! e.g. to see how the land count moves the odds.

use crate::scenario::{Scenario, ScenarioError};
use indicatif::{ProgressBar, ProgressIterator};
use serde::Serialize;
use std::ops::RangeInclusive;

/// Result of one count in a sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SweepOutcome {
    Computed {
        single_hand_success: f64,
        borderline_mass: f64,
        /// Success probability using every allowed mulligan
        with_mulligans: f64,
    },
    /// The deck was invalid at this count, or too large to count exactly
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub count: u32,
    pub outcome: SweepOutcome,
}

impl SweepPoint {
    pub fn single_hand_success(&self) -> Option<f64> {
        match self.outcome {
            SweepOutcome::Computed {
                single_hand_success, ..
            } => Some(single_hand_success),
            SweepOutcome::Skipped { .. } => None,
        }
    }
}

/// Run the full calculation once per count of `card`.
///
/// Counts that make the deck invalid or overflow the exact counts are
/// reported as skipped; an unknown card name fails the whole sweep.
pub fn run_sweep(
    base: &Scenario,
    card: &str,
    counts: RangeInclusive<u32>,
    progress: ProgressBar,
) -> Result<Vec<SweepPoint>, ScenarioError> {
    base.validate()?;
    if base.card(card).is_none() {
        return Err(ScenarioError::InvalidScenario(format!(
            "no tracked card type named '{}'",
            card
        )));
    }

    let length = if counts.is_empty() {
        0
    } else {
        u64::from(*counts.end()) - u64::from(*counts.start()) + 1
    };
    progress.set_length(length);

    let mut points = Vec::new();
    for count in counts.progress_with(progress) {
        let outcome = match base.with_count(card, count)?.request() {
            Ok(request) => match request.run() {
                Ok(calculation) => SweepOutcome::Computed {
                    single_hand_success: calculation.single_hand_success,
                    borderline_mass: calculation.borderline_mass(),
                    with_mulligans: calculation.mulligan_curve.last(),
                },
                Err(err) => {
                    log::debug!("skipping {} = {}: {}", card, count, err);
                    SweepOutcome::Skipped {
                        reason: err.to_string(),
                    }
                }
            },
            Err(ScenarioError::Deck(err)) => {
                log::debug!("skipping {} = {}: {}", card, count, err);
                SweepOutcome::Skipped {
                    reason: err.to_string(),
                }
            }
            Err(err) => return Err(err),
        };
        points.push(SweepPoint { count, outcome });
    }

    Ok(points)
}

/// The computed point with the highest single-hand success, first on ties
pub fn best_point(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points
        .iter()
        .filter_map(|p| p.single_hand_success().map(|s| (p, s)))
        .fold(None, |best: Option<(&SweepPoint, f64)>, (point, success)| match best {
            Some((_, top)) if top >= success => best,
            _ => Some((point, success)),
        })
        .map(|(point, _)| point)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario::from_json(
            r#"{"deck_size": "40", "cards": [{"name": "Lands", "count": 17, "required": 2}]}"#,
        )
        .expect("should parse")
    }

    #[test]
    fn test_sweep_increases_with_count() {
        let points = run_sweep(&scenario(), "Lands", 10..=20, ProgressBar::hidden())
            .expect("sweep should run");
        assert_eq!(points.len(), 11);
        let values: Vec<f64> = points.iter().filter_map(|p| p.single_hand_success()).collect();
        assert_eq!(values.len(), 11);
        for pair in values.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_sweep_skips_invalid_counts() {
        let points = run_sweep(&scenario(), "Lands", 38..=41, ProgressBar::hidden())
            .expect("sweep should run");
        assert!(points[0].single_hand_success().is_some());
        assert!(points[1].single_hand_success().is_some());
        assert!(matches!(points[2].outcome, SweepOutcome::Skipped { .. }));
        assert!(matches!(points[3].outcome, SweepOutcome::Skipped { .. }));
    }

    #[test]
    fn test_sweep_skips_overflowing_counts() {
        let base = Scenario::from_json(
            r#"{"deck_size": "custom", "other_cards": 1000000, "cards": [{"name": "Lands", "count": 17, "required": 3}]}"#,
        )
        .expect("should parse");
        let points = run_sweep(&base, "Lands", 80_000..=80_111, ProgressBar::hidden())
            .expect("sweep should run");
        assert_eq!(points.len(), 112);
        assert!(points[0].single_hand_success().is_some());
        assert!(points[110].single_hand_success().is_some());
        assert!(matches!(points[111].outcome, SweepOutcome::Skipped { .. }));
    }

    #[test]
    fn test_sweep_unknown_card() {
        let result = run_sweep(&scenario(), "Dragons", 0..=3, ProgressBar::hidden());
        assert!(matches!(result, Err(ScenarioError::InvalidScenario(_))));
    }

    #[test]
    fn test_best_point() {
        let points = vec![
            SweepPoint {
                count: 1,
                outcome: SweepOutcome::Computed {
                    single_hand_success: 0.4,
                    borderline_mass: 0.1,
                    with_mulligans: 0.6,
                },
            },
            SweepPoint {
                count: 2,
                outcome: SweepOutcome::Skipped {
                    reason: "full".to_string(),
                },
            },
            SweepPoint {
                count: 3,
                outcome: SweepOutcome::Computed {
                    single_hand_success: 0.7,
                    borderline_mass: 0.1,
                    with_mulligans: 0.9,
                },
            },
        ];
        assert_eq!(best_point(&points).map(|p| p.count), Some(3));
        assert!(best_point(&points[1..2]).is_none());
    }
}
