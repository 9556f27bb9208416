//! Hi-Lo card counting.

use serde::{Deserialize, Serialize};

use crate::card::{Card, DECK_SIZE};

/// Hi-Lo tag for a rank class: low cards +1, 7 to 9 neutral, tens and Aces -1.
#[must_use]
pub const fn hi_lo(card: &Card) -> i32 {
    match card.class() {
        2..=6 => 1,
        7..=9 => 0,
        _ => -1,
    }
}

/// Qualitative reading of the true count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountStatus {
    /// True count of +2 or more.
    Favorable,
    /// True count between +1 and +2.
    SlightlyFavorable,
    /// True count between -1 and +1.
    Neutral,
    /// True count between -2 and -1.
    SlightlyUnfavorable,
    /// True count below -2.
    Unfavorable,
}

impl CountStatus {
    /// Classifies a true count.
    #[must_use]
    pub fn from_true_count(true_count: f64) -> Self {
        if true_count >= 2.0 {
            Self::Favorable
        } else if true_count >= 1.0 {
            Self::SlightlyFavorable
        } else if true_count >= -1.0 {
            Self::Neutral
        } else if true_count >= -2.0 {
            Self::SlightlyUnfavorable
        } else {
            Self::Unfavorable
        }
    }
}

/// Running Hi-Lo count over the cards that have become visible since the
/// last reshuffle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCounter {
    running_count: i32,
    cards_seen: u32,
    decks: u8,
}

impl CardCounter {
    /// Creates a counter for a shoe of `decks` decks.
    #[must_use]
    pub const fn new(decks: u8) -> Self {
        Self {
            running_count: 0,
            cards_seen: 0,
            decks,
        }
    }

    /// Counts a card that has just become visible to every seat.
    pub fn count_card(&mut self, card: &Card) {
        self.running_count += hi_lo(card);
        self.cards_seen += 1;
    }

    /// Zeroes the count. Called only when the shoe is reshuffled.
    pub const fn reset(&mut self) {
        self.running_count = 0;
        self.cards_seen = 0;
    }

    /// Returns the running count.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Returns how many cards were counted since the last reshuffle.
    #[must_use]
    pub const fn cards_seen(&self) -> u32 {
        self.cards_seen
    }

    /// Returns the number of decks in play.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Running count divided by the decks actually left in the shoe.
    ///
    /// Returns 0 for an empty shoe.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    pub fn true_count(&self, cards_remaining: usize) -> f64 {
        if cards_remaining == 0 {
            return 0.0;
        }
        let decks_remaining = cards_remaining as f64 / DECK_SIZE as f64;
        f64::from(self.running_count) / decks_remaining
    }

    /// Classifies the current true count.
    #[must_use]
    pub fn status(&self, cards_remaining: usize) -> CountStatus {
        CountStatus::from_true_count(self.true_count(cards_remaining))
    }
}
