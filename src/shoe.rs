//! The multi-deck card supply.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Suit};
use crate::error::ShoeError;

/// Default number of decks in a shoe.
pub const DEFAULT_DECKS: u8 = 8;

/// A card drawn from the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    /// The card.
    pub card: Card,
    /// The shoe was empty and was refilled and reshuffled before this draw.
    pub reshuffled: bool,
}

/// A shuffled shoe of one or more decks.
///
/// Cards are drawn from the end of the internal vector. An empty shoe is not
/// an error: the next draw rebuilds and reshuffles it.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: u8,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates and shuffles a shoe with the given number of decks.
    #[must_use]
    pub fn new(decks: u8, seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            decks: decks.max(1),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        shoe.reset();
        shoe
    }

    /// Rebuilds the full shoe and shuffles it.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.reserve(self.capacity());

        for _ in 0..self.decks {
            for suit in Suit::ALL {
                for rank in 1..=13 {
                    self.cards.push(Card::new(suit, rank));
                }
            }
        }

        self.cards.shuffle(&mut self.rng);
        log::debug!("shoe reshuffled ({} decks)", self.decks);
    }

    /// Draws the top card, refilling and reshuffling first if the shoe is
    /// empty.
    pub fn draw(&mut self) -> Draw {
        let mut reshuffled = false;
        let card = loop {
            if let Some(card) = self.cards.pop() {
                break card;
            }
            self.reset();
            reshuffled = true;
        };
        Draw { card, reshuffled }
    }

    /// Replaces the shoe contents so that `draws` come out first, in order.
    ///
    /// Used to set up deterministic rounds. Once the stacked cards run out
    /// the shoe reshuffles as usual.
    ///
    /// # Errors
    ///
    /// Returns an error if more cards are given than the shoe can hold.
    pub fn stack(&mut self, draws: &[Card]) -> Result<(), ShoeError> {
        if draws.len() > self.capacity() {
            return Err(ShoeError::Overfull {
                cards: draws.len(),
                capacity: self.capacity(),
            });
        }
        self.cards = draws.iter().rev().copied().collect();
        Ok(())
    }

    /// Returns the number of decks.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Returns the number of cards a full shoe holds.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }

    /// Returns the number of cards remaining in the shoe.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns the number of decks remaining, as a fraction.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    pub fn decks_remaining(&self) -> f64 {
        self.cards.len() as f64 / DECK_SIZE as f64
    }

    /// Returns whether fewer than `threshold` cards remain.
    #[must_use]
    pub fn needs_reshuffle(&self, threshold: usize) -> bool {
        self.cards.len() < threshold
    }

    /// Counts the remaining cards by rank class; index 0 is Aces, index 9
    /// is the ten class.
    #[must_use]
    pub fn composition(&self) -> [u32; 10] {
        let mut counts = [0u32; 10];
        for card in &self.cards {
            counts[usize::from(card.class() - 1)] += 1;
        }
        counts
    }
}
