use crate::card::{Deck, DeckError, SuccessCriteria};
use crate::engine::classify::{classify, Classification};
use crate::engine::combinatorics::{ratio, CountOverflow};
use crate::engine::conversion::conversion_probability;
use crate::engine::enumerate::{enumerate_hands, Hand};
use crate::engine::mulligan::MulliganCurve;
use crate::engine::probability::{hand_probability, hand_ways, total_ways};
use serde::Serialize;

/// A hand with its exact draw probability and class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandOutcome {
    pub hand: Hand,
    pub probability: f64,
    pub classification: Classification,
}

/// A borderline hand and how likely it is to convert with extra draws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorderlineRecord {
    pub hand: Hand,
    pub draw_probability: f64,
    pub conversion_probability: f64,
    /// draw_probability * conversion_probability
    pub contribution: f64,
}

/// Everything one calculation produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    /// Borderline hands in enumeration order
    pub borderline_table: Vec<BorderlineRecord>,
    pub single_hand_success: f64,
    pub mulligan_curve: MulliganCurve,
}

impl Calculation {
    /// Probability of opening on a borderline hand that then converts
    pub fn borderline_mass(&self) -> f64 {
        self.borderline_table.iter().map(|r| r.contribution).sum()
    }
}

/// The inputs of one calculation, fixed for its whole run
#[derive(Debug, Clone, PartialEq)]
pub struct CalcRequest {
    pub deck: Deck,
    pub criteria: SuccessCriteria,
    pub hand_size: u32,
    pub mulligans: u32,
    pub extra_draws: u32,
}

impl CalcRequest {
    /// Build a request from raw per-type counts, which must include
    /// `OtherCards`; an invalid deck refuses the whole calculation
    pub fn from_counts<I, S>(
        counts: I,
        criteria: SuccessCriteria,
        hand_size: u32,
        mulligans: u32,
        extra_draws: u32,
    ) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Ok(CalcRequest {
            deck: Deck::new(counts)?,
            criteria,
            hand_size,
            mulligans,
            extra_draws,
        })
    }

    pub fn run(&self) -> Result<Calculation, CountOverflow> {
        calculate_probabilities(
            &self.deck,
            &self.criteria,
            self.hand_size,
            self.mulligans,
            self.extra_draws,
        )
    }
}

/// Classify and weight every distinct hand of `hand_size` cards
pub fn evaluate_hands(
    deck: &Deck,
    criteria: &SuccessCriteria,
    hand_size: u32,
) -> Result<Vec<HandOutcome>, CountOverflow> {
    enumerate_hands(deck, hand_size)
        .into_iter()
        .map(|hand| -> Result<HandOutcome, CountOverflow> {
            Ok(HandOutcome {
                probability: hand_probability(&hand, deck, hand_size)?,
                classification: classify(&hand, criteria),
                hand,
            })
        })
        .collect()
}

/// Exact single-hand success probability, the borderline table and the
/// mulligan curve for one deck and set of criteria.
///
/// Fails only when an exact count outgrows `u128`, which takes a deck of
/// hundreds of thousands of cards or a hand size in the dozens.
pub fn calculate_probabilities(
    deck: &Deck,
    criteria: &SuccessCriteria,
    hand_size: u32,
    mulligans: u32,
    extra_draws: u32,
) -> Result<Calculation, CountOverflow> {
    let total = total_ways(deck, hand_size)?;
    let hands = enumerate_hands(deck, hand_size);

    // Sum success ways as integers so the only rounding is the final division
    let mut success_ways: u128 = 0;
    let mut borderline_table = Vec::new();

    for hand in hands {
        match classify(&hand, criteria) {
            Classification::Success => {
                success_ways = success_ways
                    .checked_add(hand_ways(&hand, deck)?)
                    .ok_or(CountOverflow)?;
            }
            Classification::Borderline => {
                let draw_probability = hand_probability(&hand, deck, hand_size)?;
                let conversion_probability =
                    conversion_probability(&hand, deck, extra_draws, criteria)?;
                borderline_table.push(BorderlineRecord {
                    hand,
                    draw_probability,
                    conversion_probability,
                    contribution: draw_probability * conversion_probability,
                });
            }
            Classification::Neither => {}
        }
    }

    let single_hand_success = ratio(success_ways, total);
    log::debug!(
        "single-hand success {:.6}, {} borderline hands",
        single_hand_success,
        borderline_table.len()
    );

    Ok(Calculation {
        borderline_table,
        single_hand_success,
        mulligan_curve: MulliganCurve::new(single_hand_success, mulligans),
    })
}
