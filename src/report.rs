use crate::card::{Deck, SuccessCriteria};
use crate::engine::{BorderlineRecord, CalcRequest, Calculation, MulliganCurve};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Row order for the borderline table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BorderlineOrder {
    /// Order the hands were enumerated in
    #[default]
    Enumeration,
    /// Largest contribution first
    Contribution,
}

/// A finished calculation together with the inputs that produced it
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub deck: Deck,
    pub criteria: SuccessCriteria,
    pub hand_size: u32,
    pub mulligans: u32,
    pub extra_draws: u32,
    pub single_hand_success: f64,
    pub borderline_count: usize,
    pub borderline_mass: f64,
    pub borderline: Vec<BorderlineRecord>,
    pub mulligan_curve: MulliganCurve,
}

impl Report {
    pub fn new(request: &CalcRequest, calculation: Calculation, order: BorderlineOrder) -> Self {
        let borderline_mass = calculation.borderline_mass();
        let mut borderline = calculation.borderline_table;
        sort_borderline(&mut borderline, order);

        Report {
            generated_at: Utc::now(),
            deck: request.deck.clone(),
            criteria: request.criteria.clone(),
            hand_size: request.hand_size,
            mulligans: request.mulligans,
            extra_draws: request.extra_draws,
            single_hand_success: calculation.single_hand_success,
            borderline_count: borderline.len(),
            borderline_mass,
            borderline,
            mulligan_curve: calculation.mulligan_curve,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Reorder borderline rows; the engine itself only emits enumeration order
pub fn sort_borderline(records: &mut [BorderlineRecord], order: BorderlineOrder) {
    if order == BorderlineOrder::Contribution {
        // stable, so ties keep enumeration order
        records.sort_by(|a, b| {
            b.contribution
                .partial_cmp(&a.contribution)
                .unwrap_or(Ordering::Equal)
        });
    }
}

/// Label for curve entry `i`
pub fn mulligan_label(i: usize) -> String {
    if i == 0 {
        "Opening hand".to_string()
    } else {
        format!("After {} mulligan(s)", i)
    }
}

fn percent(p: f64) -> f64 {
    p * 100.0
}

/// Plain-text rendering: inputs, success figures, the borderline table and
/// the mulligan curve
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deck: Vec<String> = self
            .deck
            .iter()
            .map(|(name, count)| format!("{} {}", count, name))
            .collect();
        writeln!(f, "Deck: {} ({} cards)", deck.join(", "), self.deck.total())?;
        writeln!(
            f,
            "Hand size: {}, mulligans: {}, extra draws: {}",
            self.hand_size, self.mulligans, self.extra_draws
        )?;
        writeln!(f)?;

        writeln!(f, "=== Opening Hand Probability Breakdown ===\n")?;
        writeln!(
            f,
            "Single-hand success probability: {:.2}%",
            percent(self.single_hand_success)
        )?;
        writeln!(f, "Borderline hands considered: {}", self.borderline_count)?;
        writeln!(
            f,
            "Borderline hands that convert: {:.2}%",
            percent(self.borderline_mass)
        )?;

        if !self.borderline.is_empty() {
            let hands: Vec<String> = self.borderline.iter().map(|r| r.hand.to_string()).collect();
            let width = hands
                .iter()
                .map(|h| h.len())
                .chain(std::iter::once("Borderline Hand".len()))
                .max()
                .unwrap_or(0);

            writeln!(f)?;
            writeln!(
                f,
                "{:<width$}  {:>14} {:>14} {:>17}",
                "Borderline Hand",
                "Draw Prob (%)",
                "Conv Prob (%)",
                "Contribution (%)",
                width = width
            )?;
            writeln!(f, "{:-<1$}", "", width + 48)?;
            for (hand, record) in hands.iter().zip(&self.borderline) {
                writeln!(
                    f,
                    "{:<width$}  {:>14.4} {:>14.2} {:>17.4}",
                    hand,
                    percent(record.draw_probability),
                    percent(record.conversion_probability),
                    percent(record.contribution),
                    width = width
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "=== Overall Success Chance Across Mulligans ===\n")?;
        for (i, p) in self.mulligan_curve.values().iter().enumerate() {
            writeln!(f, "{:<20}: {:.2}%", mulligan_label(i), percent(*p))?;
        }
        Ok(())
    }
}
