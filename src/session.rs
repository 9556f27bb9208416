//! Session-lifetime table context: the shoe and the count that follows it.

use crate::card::Card;
use crate::count::CardCounter;
use crate::shoe::Shoe;

/// The shoe and the card counter, kept together so a reshuffle always
/// resets the count.
///
/// Owned by the round engine and passed explicitly; nothing here is global.
#[derive(Debug, Clone)]
pub struct Session {
    shoe: Shoe,
    counter: CardCounter,
    reshuffles: u32,
    /// Reshuffle number of the shoe the face-down card came from.
    face_down_from: Option<u32>,
}

impl Session {
    /// Creates a session with a freshly shuffled shoe.
    #[must_use]
    pub fn new(decks: u8, seed: u64) -> Self {
        let shoe = Shoe::new(decks, seed);
        let counter = CardCounter::new(shoe.decks());
        Self {
            shoe,
            counter,
            reshuffles: 0,
            face_down_from: None,
        }
    }

    /// Deals a card every seat can see and counts it.
    ///
    /// Returns the card and whether the shoe was reshuffled to produce it.
    pub fn deal_face_up(&mut self) -> (Card, bool) {
        let (card, reshuffled) = self.draw();
        self.counter.count_card(&card);
        (card, reshuffled)
    }

    /// Deals a card without counting it (the dealer's hole card).
    pub fn deal_face_down(&mut self) -> (Card, bool) {
        let drawn = self.draw();
        self.face_down_from = Some(self.reshuffles);
        drawn
    }

    fn draw(&mut self) -> (Card, bool) {
        let draw = self.shoe.draw();
        if draw.reshuffled {
            self.on_reshuffle();
        }
        (draw.card, draw.reshuffled)
    }

    /// Counts a card that was dealt face down and is now revealed.
    ///
    /// A card from a shoe that has since been reshuffled is not counted: it
    /// belongs to the old count.
    pub fn reveal(&mut self, card: &Card) {
        if self.face_down_from.take().is_some_and(|from| from != self.reshuffles) {
            log::debug!("{card} revealed from a previous shoe; not counted");
            return;
        }
        self.counter.count_card(card);
    }

    /// Reshuffles before a round if fewer than `threshold` cards remain.
    ///
    /// Returns `true` if a reshuffle was performed.
    pub fn prepare_round(&mut self, threshold: usize) -> bool {
        if self.shoe.needs_reshuffle(threshold) {
            self.reshuffle();
            true
        } else {
            false
        }
    }

    /// Rebuilds and reshuffles the shoe and resets the count.
    pub fn reshuffle(&mut self) {
        self.shoe.reset();
        self.on_reshuffle();
    }

    fn on_reshuffle(&mut self) {
        self.counter.reset();
        self.reshuffles += 1;
        log::info!("shoe reshuffled, count reset (reshuffle #{})", self.reshuffles);
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the shoe mutably, for stacking deterministic rounds.
    pub const fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    /// Returns the card counter.
    #[must_use]
    pub const fn counter(&self) -> &CardCounter {
        &self.counter
    }

    /// Returns the true count against the cards actually left in the shoe.
    #[must_use]
    pub fn true_count(&self) -> f64 {
        self.counter.true_count(self.shoe.remaining())
    }

    /// Returns how many times the shoe has been reshuffled.
    #[must_use]
    pub const fn reshuffles(&self) -> u32 {
        self.reshuffles
    }
}
