//! Hit odds from the live shoe.

/// Rank composition of a single fresh deck, in [`crate::Shoe::composition`] order.
pub const SINGLE_DECK: [u32; 10] = [4, 4, 4, 4, 4, 4, 4, 4, 4, 16];

/// Probability (0 to 1) that one more card busts the hand.
///
/// `composition` counts the cards left in the shoe by rank class, Aces
/// first and ten-valued cards last. A soft hand cannot bust on one card and
/// a hand already at 21 or more has nothing left to draw for.
///
/// ```
/// use bjtrainer::odds::{SINGLE_DECK, bust_probability};
///
/// let p = bust_probability(12, false, &SINGLE_DECK);
/// assert!((p - 16.0 / 52.0).abs() < 1e-12);
/// assert_eq!(bust_probability(16, true, &SINGLE_DECK), 0.0);
/// ```
#[must_use]
pub fn bust_probability(total: u8, soft: bool, composition: &[u32; 10]) -> f64 {
    if soft || total >= 21 || total <= 11 {
        return 0.0;
    }

    let remaining: u32 = composition.iter().sum();
    if remaining == 0 {
        return 0.0;
    }

    // Aces count as 1 here, so the card value is the index plus one.
    let busting: u32 = composition
        .iter()
        .zip(1u8..)
        .filter(|&(_, value)| total + value > 21)
        .map(|(count, _)| count)
        .sum();

    f64::from(busting) / f64::from(remaining)
}
