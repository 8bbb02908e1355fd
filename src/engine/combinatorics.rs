use thiserror::Error;

/// An exact count that does not fit in `u128`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Exact hand count exceeds 128 bits; reduce the deck size, hand size or extra draws")]
pub struct CountOverflow;

/// Number of k-element subsets of an n-element set, or None when the exact
/// result does not fit in `u128`.
///
/// Out-of-range arguments (`k < 0`, `k > n`, `n < 0`) give 0 rather than an
/// error, so impossible compositions contribute nothing to a product.
pub fn binomial(n: i64, k: i64) -> Option<u128> {
    if n < 0 || k < 0 || k > n {
        return Some(0);
    }

    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // result == C(n, i); dividing out gcd(result, i + 1) first leaves a
        // divisor of (n - i), so every step is exact and no larger than C(n, i + 1)
        let step = (i + 1) as u128;
        let g = gcd(result, step);
        let factor = (n - i) as u128 / (step / g);
        result = (result / g).checked_mul(factor)?;
    }
    Some(result)
}

/// `binomial` for card counts
pub fn choose(n: u32, k: u32) -> Result<u128, CountOverflow> {
    binomial(i64::from(n), i64::from(k)).ok_or(CountOverflow)
}

/// Product of counts, failing instead of wrapping
pub fn checked_product<I>(factors: I) -> Result<u128, CountOverflow>
where
    I: IntoIterator<Item = Result<u128, CountOverflow>>,
{
    factors
        .into_iter()
        .try_fold(1u128, |acc, factor| acc.checked_mul(factor?).ok_or(CountOverflow))
}

/// Exact ratio of two counts, converted to floating point only here.
/// A zero denominator yields 0.
pub fn ratio(numerator: u128, denominator: u128) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
