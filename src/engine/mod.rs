//! Exact opening-hand probability engine.
//!
//! Every hand composition is enumerated, classified against the success
//! criteria and weighted by its hypergeometric probability. Borderline
//! hands additionally get the probability of converting within a number
//! of extra draws, and the single-hand success probability is spread over
//! a mulligan curve.

pub mod calculate;
pub mod classify;
pub mod combinatorics;
pub mod conversion;
pub mod enumerate;
pub mod mulligan;
pub mod probability;

pub use calculate::{
    calculate_probabilities, evaluate_hands, BorderlineRecord, CalcRequest, Calculation,
    HandOutcome,
};
pub use classify::{classify, is_borderline, is_success, Classification};
pub use combinatorics::{binomial, choose, CountOverflow};
pub use conversion::{conversion_counts, conversion_probability, ConversionCounts};
pub use enumerate::{enumerate_hands, Hand};
pub use mulligan::{MulliganCurve, MAX_MULLIGANS};
pub use probability::{hand_probability, hand_ways, total_ways};
