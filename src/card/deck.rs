use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;
use thiserror::Error;

/// Name of the synthetic type covering every untracked card
pub const OTHER_CARDS: &str = "OtherCards";

/// Upper bound on tracked card types, keeps enumeration small
pub const MAX_TRACKED_TYPES: usize = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeckError {
    #[error(
        "Total wanted cards ({tracked}) exceed or equal deck size ({deck_size}); reduce counts or choose a custom deck size"
    )]
    InvalidDeckComposition { tracked: u32, deck_size: u32 },
    #[error("OtherCards must be at least 1, got {count}")]
    OtherCardsTooFew { count: u32 },
    #[error("Deck has no OtherCards entry")]
    MissingOtherCards,
    #[error("Deck counts sum to {actual}, expected {expected}")]
    InconsistentTotal { expected: u32, actual: u32 },
    #[error("Card type '{0}' is listed more than once")]
    DuplicateCardType(String),
    #[error("Card type name must not be empty")]
    EmptyCardName,
    #[error("At most {max} card types can be tracked, got {count}")]
    TooManyCardTypes { count: usize, max: usize },
    #[error("Deck counts add up to more than 4294967295 cards")]
    DeckTooLarge,
}

/// Deck composition: card counts per type name, always including
/// `OtherCards`. Order is the order the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    entries: Vec<(String, u32)>,
    total: u32,
}

impl Deck {
    /// Build a deck from per-type counts. The counts must contain an
    /// `OtherCards` entry of at least 1.
    pub fn new<I, S>(counts: I) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let entries: Vec<(String, u32)> = counts
            .into_iter()
            .map(|(name, count)| (name.into(), count))
            .collect();

        let mut seen = HashSet::new();
        for (name, _) in &entries {
            if name.trim().is_empty() {
                return Err(DeckError::EmptyCardName);
            }
            if !seen.insert(name.as_str()) {
                return Err(DeckError::DuplicateCardType(name.clone()));
            }
        }

        let tracked = entries.iter().filter(|(name, _)| name != OTHER_CARDS).count();
        if tracked > MAX_TRACKED_TYPES {
            return Err(DeckError::TooManyCardTypes {
                count: tracked,
                max: MAX_TRACKED_TYPES,
            });
        }

        match entries.iter().find(|(name, _)| name == OTHER_CARDS) {
            None => return Err(DeckError::MissingOtherCards),
            Some((_, count)) if *count < 1 => {
                return Err(DeckError::OtherCardsTooFew { count: *count })
            }
            Some(_) => {}
        }

        let total = entries
            .iter()
            .try_fold(0u32, |total, (_, count)| total.checked_add(*count))
            .ok_or(DeckError::DeckTooLarge)?;
        Ok(Deck { entries, total })
    }

    /// Build a deck and check the counts add up to the declared size
    pub fn with_total<I, S>(counts: I, expected: u32) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let deck = Self::new(counts)?;
        if deck.total != expected {
            return Err(DeckError::InconsistentTotal {
                expected,
                actual: deck.total,
            });
        }
        Ok(deck)
    }

    /// Copies of a card type in the deck; 0 for unknown names
    pub fn count(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn other_cards(&self) -> u32 {
        self.count(OTHER_CARDS)
    }

    /// Total of every type except `OtherCards`
    pub fn tracked_total(&self) -> u32 {
        self.total - self.other_cards()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn type_count(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for Deck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}
