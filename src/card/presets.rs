use crate::card::deck::{Deck, DeckError, OTHER_CARDS};
use crate::card::types::CardType;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deck-size presets. For a fixed size the `OtherCards` count is whatever
/// the tracked types leave over; `Custom` takes it from the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum DeckSize {
    #[serde(rename = "100")]
    #[value(name = "100")]
    Hundred,
    #[default]
    #[serde(rename = "60")]
    #[value(name = "60")]
    Sixty,
    #[serde(rename = "40")]
    #[value(name = "40")]
    Forty,
    #[serde(rename = "custom")]
    #[value(name = "custom")]
    Custom,
}

impl DeckSize {
    pub const ALL: [DeckSize; 4] = [
        DeckSize::Hundred,
        DeckSize::Sixty,
        DeckSize::Forty,
        DeckSize::Custom,
    ];

    /// Total deck size, or None for `Custom`
    pub fn total(&self) -> Option<u32> {
        match self {
            DeckSize::Hundred => Some(100),
            DeckSize::Sixty => Some(60),
            DeckSize::Forty => Some(40),
            DeckSize::Custom => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeckSize::Hundred => "100 Card",
            DeckSize::Sixty => "60 Card",
            DeckSize::Forty => "40 Card",
            DeckSize::Custom => "Custom",
        }
    }

    /// Derive the `OtherCards` count for this preset
    pub fn other_cards(&self, tracked: u32, custom_other: Option<u32>) -> Result<u32, DeckError> {
        match self.total() {
            Some(deck_size) => {
                if tracked >= deck_size {
                    return Err(DeckError::InvalidDeckComposition { tracked, deck_size });
                }
                Ok(deck_size - tracked)
            }
            None => match custom_other {
                Some(count) if count >= 1 => Ok(count),
                Some(count) => Err(DeckError::OtherCardsTooFew { count }),
                None => Err(DeckError::MissingOtherCards),
            },
        }
    }

    /// Build the full deck for a list of tracked types
    pub fn build_deck(&self, tracked: &[CardType], custom_other: Option<u32>) -> Result<Deck, DeckError> {
        let tracked_total = tracked
            .iter()
            .try_fold(0u32, |total, t| total.checked_add(t.count))
            .ok_or(DeckError::DeckTooLarge)?;
        let other = self.other_cards(tracked_total, custom_other)?;

        let counts = tracked
            .iter()
            .map(|t| (t.name.clone(), t.count))
            .chain(std::iter::once((OTHER_CARDS.to_string(), other)));

        match self.total() {
            Some(total) => Deck::with_total(counts, total),
            None => Deck::new(counts),
        }
    }
}

impl fmt::Display for DeckSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
