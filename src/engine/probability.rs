use crate::card::Deck;
use crate::engine::combinatorics::{checked_product, choose, ratio, CountOverflow};
use crate::engine::enumerate::Hand;

/// Number of distinct card sets that realise this hand composition
pub fn hand_ways(hand: &Hand, deck: &Deck) -> Result<u128, CountOverflow> {
    checked_product(hand.iter().map(|(name, count)| choose(deck.count(name), count)))
}

/// Number of distinct hands of `hand_size` cards, ignoring type
pub fn total_ways(deck: &Deck, hand_size: u32) -> Result<u128, CountOverflow> {
    choose(deck.total(), hand_size)
}

/// Exact probability of drawing exactly this composition from the full deck
pub fn hand_probability(hand: &Hand, deck: &Deck, hand_size: u32) -> Result<f64, CountOverflow> {
    Ok(ratio(hand_ways(hand, deck)?, total_ways(deck, hand_size)?))
}
