use crate::card::Deck;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A hand by composition: how many cards of each type were drawn.
///
/// Listing order and zero counts only affect display; two hands with the
/// same non-zero counts are the same hand.
#[derive(Debug, Clone)]
pub struct Hand {
    /// Display order, as listed by the caller
    counts: Vec<(String, u32)>,
    /// Non-zero counts keyed by name, the hand's identity
    composition: BTreeMap<String, u32>,
}

impl Hand {
    /// Build a hand from per-type counts; a name listed twice has its
    /// counts added
    pub fn new<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut listed: Vec<(String, u32)> = Vec::new();
        for (name, count) in counts {
            let name = name.into();
            match listed.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => *existing = existing.saturating_add(count),
                None => listed.push((name, count)),
            }
        }

        let composition = listed
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(name, count)| (name.clone(), *count))
            .collect();

        Hand {
            counts: listed,
            composition,
        }
    }

    /// Cards of a type in this hand; 0 for types the hand does not list
    pub fn count(&self, name: &str) -> u32 {
        self.composition.get(name).copied().unwrap_or(0)
    }

    pub fn size(&self) -> u32 {
        self.composition
            .values()
            .fold(0u32, |total, count| total.saturating_add(*count))
    }

    /// Every listed type in display order, zero counts included
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.composition == other.composition
    }
}

impl Eq for Hand {}

impl Hash for Hand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.composition.hash(state);
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(name, count)| format!("{}:{}", name, count))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl Serialize for Hand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (name, count) in &self.counts {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// Every distinct hand of `hand_size` cards the deck can produce.
///
/// Types with no copies are left out of the hands. Hands come out in
/// Cartesian-product order over the deck's types, the first type varying
/// slowest; branches that can no longer reach the hand size are cut early.
pub fn enumerate_hands(deck: &Deck, hand_size: u32) -> Vec<Hand> {
    let types: Vec<(&str, u32)> = deck.iter().filter(|(_, count)| *count > 0).collect();

    // capacity[i] = most cards types i.. can still contribute
    let mut capacity = vec![0u32; types.len() + 1];
    for i in (0..types.len()).rev() {
        capacity[i] = capacity[i + 1] + types[i].1.min(hand_size);
    }

    let mut hands = Vec::new();
    let mut drawn = Vec::with_capacity(types.len());
    extend_hands(&types, &capacity, hand_size, &mut drawn, &mut hands);

    log::debug!(
        "enumerated {} hands of {} from {} card types",
        hands.len(),
        hand_size,
        types.len()
    );
    hands
}

fn extend_hands(
    types: &[(&str, u32)],
    capacity: &[u32],
    remaining: u32,
    drawn: &mut Vec<u32>,
    hands: &mut Vec<Hand>,
) {
    let idx = drawn.len();
    if idx == types.len() {
        if remaining == 0 {
            hands.push(Hand::new(
                types.iter().zip(drawn.iter()).map(|((name, _), count)| (*name, *count)),
            ));
        }
        return;
    }

    let most = types[idx].1.min(remaining);
    for count in 0..=most {
        if count + capacity[idx + 1] < remaining {
            continue;
        }
        drawn.push(count);
        extend_hands(types, capacity, remaining - count, drawn, hands);
        drawn.pop();
    }
}
