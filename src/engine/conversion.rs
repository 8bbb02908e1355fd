//! Probability that a near-miss hand reaches success within a fixed number
//! of extra draws from what is left of the deck.
//!
//! The favourable draws are counted by a constrained composition search:
//! every way to split the extra draws across card types, each type taking
//! at least what it still needs and at most what remains of it, weighted by
//! the number of card sets realising that split. There is no closed form for
//! several lower-bounded types at once.

use crate::card::{Deck, SuccessCriteria};
use crate::engine::combinatorics::{choose, ratio, CountOverflow};
use crate::engine::enumerate::Hand;

/// One card type as seen after the opening hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Remaining {
    /// Copies still in the deck
    residual: u32,
    /// Extra copies the hand still needs
    needed: u32,
}

/// Counts behind a conversion probability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionCounts {
    pub favorable: u128,
    pub possible: u128,
}

/// Probability that `extra_draws` more cards turn `hand` into a success.
///
/// Already-successful hands convert with certainty, gaps larger than the
/// draw budget never do, and drawing more cards than remain gives 0.
pub fn conversion_probability(
    hand: &Hand,
    deck: &Deck,
    extra_draws: u32,
    criteria: &SuccessCriteria,
) -> Result<f64, CountOverflow> {
    let total_needed: u64 = criteria
        .active()
        .map(|(name, required)| u64::from(required.saturating_sub(hand.count(name))))
        .sum();

    if total_needed == 0 {
        return Ok(1.0);
    }
    if total_needed > u64::from(extra_draws) {
        return Ok(0.0);
    }

    let counts = conversion_counts(hand, deck, extra_draws, criteria)?;
    Ok(ratio(counts.favorable, counts.possible))
}

/// Favourable and total ways to draw `extra_draws` cards after `hand`
pub fn conversion_counts(
    hand: &Hand,
    deck: &Deck,
    extra_draws: u32,
    criteria: &SuccessCriteria,
) -> Result<ConversionCounts, CountOverflow> {
    let mut remaining: Vec<Remaining> = deck
        .iter()
        .map(|(name, count)| Remaining {
            residual: count.saturating_sub(hand.count(name)),
            needed: criteria.required(name).saturating_sub(hand.count(name)),
        })
        .collect();

    // Required types the deck never had can only be satisfied by nothing
    remaining.extend(
        criteria
            .active()
            .filter(|(name, _)| !deck.contains(name))
            .map(|(name, required)| Remaining {
                residual: 0,
                needed: required.saturating_sub(hand.count(name)),
            }),
    );

    let total_residual: u32 = remaining.iter().map(|r| r.residual).sum();
    let favorable = count_favorable(&remaining, extra_draws)?;
    let possible = choose(total_residual, extra_draws)?;

    log::debug!(
        "conversion of [{}] with {} extra draws: {}/{}",
        hand,
        extra_draws,
        favorable,
        possible
    );

    Ok(ConversionCounts { favorable, possible })
}

/// Ways to draw exactly `draws` cards from `types` meeting every type's need.
///
/// The slice is the unassigned suffix of the type list and `draws` the
/// budget left for it; each level fixes one type's draw count and multiplies
/// in its coefficient, so nothing is shared between branches.
fn count_favorable(types: &[Remaining], draws: u32) -> Result<u128, CountOverflow> {
    let Some((first, rest)) = types.split_first() else {
        return Ok(u128::from(draws == 0));
    };

    // widened so arbitrary requirements cannot overflow the sums
    let rest_needed: u64 = rest.iter().map(|r| u64::from(r.needed)).sum();
    let rest_residual: u64 = rest.iter().map(|r| u64::from(r.residual)).sum();
    let draws_wide = u64::from(draws);

    if u64::from(first.needed) + rest_needed > draws_wide
        || u64::from(first.residual) + rest_residual < draws_wide
    {
        return Ok(0);
    }

    // both bounds are at most `draws` once the checks above pass
    let low = u64::from(first.needed).max(draws_wide.saturating_sub(rest_residual)) as u32;
    let high = u64::from(first.residual).min(draws_wide - rest_needed) as u32;

    let mut total: u128 = 0;
    for taken in low..=high {
        let ways = choose(first.residual, taken)?
            .checked_mul(count_favorable(rest, draws - taken)?)
            .ok_or(CountOverflow)?;
        total = total.checked_add(ways).ok_or(CountOverflow)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::OTHER_CARDS;

    fn c(n: u32, k: u32) -> u128 {
        choose(n, k).expect("fits in u128")
    }

    fn conversion(hand: &Hand, deck: &Deck, extra: u32, criteria: &SuccessCriteria) -> f64 {
        conversion_probability(hand, deck, extra, criteria).expect("fits in u128")
    }

    fn lands_deck() -> Deck {
        Deck::new([("Lands", 17), (OTHER_CARDS, 83)]).expect("valid deck")
    }

    /// Unpruned search over every split of the draws
    fn brute_force(types: &[Remaining], draws: u32) -> u128 {
        match types.split_first() {
            None => u128::from(draws == 0),
            Some((first, rest)) => (0..=first.residual.min(draws))
                .filter(|taken| *taken >= first.needed)
                .map(|taken| c(first.residual, taken) * brute_force(rest, draws - taken))
                .sum(),
        }
    }

    #[test]
    fn test_single_type_shortfall() {
        let deck = lands_deck();
        let criteria = SuccessCriteria::new().with("Lands", 3);
        let hand = Hand::new([("Lands", 2), (OTHER_CARDS, 5)]);

        // at least one of 15 remaining lands among 3 draws from 93
        let favorable = c(15, 1) * c(78, 2)
            + c(15, 2) * c(78, 1)
            + c(15, 3);
        let counts = conversion_counts(&hand, &deck, 3, &criteria).expect("fits");
        assert_eq!(counts.favorable, favorable);
        assert_eq!(counts.possible, c(93, 3));

        let expected = favorable as f64 / c(93, 3) as f64;
        assert!((conversion(&hand, &deck, 3, &criteria) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_gap_larger_than_draws() {
        let deck = lands_deck();
        let criteria = SuccessCriteria::new().with("Lands", 4);
        let hand = Hand::new([("Lands", 2), (OTHER_CARDS, 5)]);
        assert_eq!(conversion(&hand, &deck, 1, &criteria), 0.0);
        assert!(conversion(&hand, &deck, 2, &criteria) > 0.0);
    }

    #[test]
    fn test_already_satisfied() {
        let deck = lands_deck();
        let criteria = SuccessCriteria::new().with("Lands", 2);
        let hand = Hand::new([("Lands", 2), (OTHER_CARDS, 5)]);
        assert_eq!(conversion(&hand, &deck, 0, &criteria), 1.0);
        assert_eq!(conversion(&hand, &deck, 3, &criteria), 1.0);
    }

    #[test]
    fn test_forced_draw_of_everything_left() {
        // 2 lands left, 1 other left, need 2 lands: drawing all 3 always works
        let deck = Deck::new([("Lands", 3), (OTHER_CARDS, 2)]).expect("valid deck");
        let criteria = SuccessCriteria::new().with("Lands", 3);
        let hand = Hand::new([("Lands", 1), (OTHER_CARDS, 1)]);
        assert_eq!(conversion(&hand, &deck, 3, &criteria), 1.0);

        // exactly the needed cards remain
        let deck = Deck::new([("Lands", 3), (OTHER_CARDS, 1)]).expect("valid deck");
        let hand = Hand::new([("Lands", 1), (OTHER_CARDS, 1)]);
        assert_eq!(conversion(&hand, &deck, 2, &criteria), 1.0);
    }

    #[test]
    fn test_more_draws_than_cards_left() {
        let deck = Deck::new([("Lands", 3), (OTHER_CARDS, 2)]).expect("valid deck");
        let criteria = SuccessCriteria::new().with("Lands", 3);
        let hand = Hand::new([("Lands", 2), (OTHER_CARDS, 1)]);
        let counts = conversion_counts(&hand, &deck, 3, &criteria).expect("fits");
        assert_eq!(counts, ConversionCounts { favorable: 0, possible: 0 });
        assert_eq!(conversion(&hand, &deck, 3, &criteria), 0.0);
    }

    #[test]
    fn test_requirement_outside_deck() {
        let deck = lands_deck();
        let criteria = SuccessCriteria::new().with("Dragons", 1);
        let hand = Hand::new([("Lands", 2), (OTHER_CARDS, 5)]);
        assert_eq!(conversion(&hand, &deck, 5, &criteria), 0.0);
    }

    #[test]
    fn test_requirement_above_deck_count() {
        let deck = Deck::new([("Dragons", 2), (OTHER_CARDS, 58)]).expect("valid deck");
        let criteria = SuccessCriteria::new().with("Dragons", 3);
        let hand = Hand::new([("Dragons", 2), (OTHER_CARDS, 5)]);
        assert_eq!(conversion(&hand, &deck, 4, &criteria), 0.0);
    }

    #[test]
    fn test_two_types_short() {
        let deck = Deck::new([("Lands", 24), ("Ramp", 8), (OTHER_CARDS, 28)]).expect("valid deck");
        let criteria = SuccessCriteria::new().with("Lands", 3).with("Ramp", 1);
        let hand = Hand::new([("Lands", 2), ("Ramp", 0), (OTHER_CARDS, 5)]);

        // residual: 22 lands, 8 ramp, 23 other; 2 draws must be one land and one ramp
        let counts = conversion_counts(&hand, &deck, 2, &criteria).expect("fits");
        assert_eq!(counts.favorable, 22 * 8);
        assert_eq!(counts.possible, c(53, 2));
    }

    #[test]
    fn test_pruned_search_matches_brute_force() {
        let shapes: [&[(u32, u32)]; 4] = [
            &[(15, 1), (78, 0)],
            &[(22, 1), (8, 1), (23, 0)],
            &[(3, 2), (4, 2), (1, 1), (9, 0)],
            &[(0, 0), (5, 3), (2, 0), (6, 1)],
        ];
        for shape in shapes {
            let types: Vec<Remaining> = shape
                .iter()
                .map(|(residual, needed)| Remaining {
                    residual: *residual,
                    needed: *needed,
                })
                .collect();
            for draws in 0..=8 {
                assert_eq!(count_favorable(&types, draws), Ok(brute_force(&types, draws)));
            }
        }
    }

    #[test]
    fn test_huge_requirements_do_not_overflow() {
        let deck = lands_deck();
        let criteria = SuccessCriteria::new()
            .with("Lands", u32::MAX)
            .with(OTHER_CARDS, u32::MAX);
        let hand = Hand::new([("Lands", 2), (OTHER_CARDS, 5)]);
        assert_eq!(conversion(&hand, &deck, u32::MAX, &criteria), 0.0);

        let types = [
            Remaining { residual: 3, needed: u32::MAX },
            Remaining { residual: 4, needed: u32::MAX },
        ];
        assert_eq!(count_favorable(&types, u32::MAX), Ok(0));
    }

    #[test]
    fn test_oversized_residual_reports_overflow() {
        let deck = Deck::new([("Lands", 100_000), (OTHER_CARDS, 1_000_000)]).expect("valid deck");
        let criteria = SuccessCriteria::new().with("Lands", 3);
        let hand = Hand::new([("Lands", 2), (OTHER_CARDS, 5)]);
        assert_eq!(
            conversion_probability(&hand, &deck, 9, &criteria),
            Err(CountOverflow)
        );
        assert!(conversion_probability(&hand, &deck, 3, &criteria).is_ok());
    }
}
