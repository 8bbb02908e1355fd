use crate::card::SuccessCriteria;
use crate::engine::enumerate::Hand;
use serde::Serialize;
use std::fmt;

/// Where a hand lands against the success criteria. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Success,
    Borderline,
    Neither,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Borderline => write!(f, "Borderline"),
            Self::Neither => write!(f, "Neither"),
        }
    }
}

/// Every type with a positive requirement is met or exceeded
pub fn is_success(hand: &Hand, criteria: &SuccessCriteria) -> bool {
    criteria
        .active()
        .all(|(name, required)| hand.count(name) >= required)
}

/// One card short on at least one required type, and over on none.
///
/// A type short by two or more neither qualifies nor disqualifies the
/// hand; an excess on any required type always disqualifies it.
pub fn is_borderline(hand: &Hand, criteria: &SuccessCriteria) -> bool {
    if is_success(hand, criteria) {
        return false;
    }

    let mut one_short = false;
    for (name, required) in criteria.active() {
        let count = hand.count(name);
        if count > required {
            return false;
        }
        if count == required - 1 {
            one_short = true;
        }
    }
    one_short
}

pub fn classify(hand: &Hand, criteria: &SuccessCriteria) -> Classification {
    if is_success(hand, criteria) {
        Classification::Success
    } else if is_borderline(hand, criteria) {
        Classification::Borderline
    } else {
        Classification::Neither
    }
}
