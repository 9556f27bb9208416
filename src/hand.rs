//! Hand evaluation plus player and dealer hand representations.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::strategy::Action;

/// The evaluated state of a set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandValue {
    /// Best total: every Ace counts 11 while that does not bust, else 1.
    pub total: u8,
    /// At least one Ace is counted as 11 in `total`.
    pub soft: bool,
    /// The total is over 21.
    pub bust: bool,
    /// Exactly two cards totalling 21. Whether this is a real blackjack also
    /// depends on the hand not coming from a split.
    pub blackjack_eligible: bool,
}

/// Evaluates a set of cards.
///
/// Only the number of Aces and the sum of the other rank classes matter, so
/// the result does not depend on card order.
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandValue {
    let hard: u8 = cards
        .iter()
        .fold(0u8, |sum, card| sum.saturating_add(card.class()));
    // At most one Ace can count 11 without busting.
    let soft = cards.iter().any(Card::is_ace) && hard <= 11;
    let total = if soft { hard + 10 } else { hard };

    HandValue {
        total,
        soft,
        bust: total > 21,
        blackjack_eligible: cards.len() == 2 && total == 21,
    }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandStatus {
    /// Hand is active and can take actions.
    Active,
    /// Player has stood (or was stood automatically at 21 / after a double).
    Stood,
    /// Hand has busted (over 21).
    Bust,
    /// Hand is a blackjack (natural 21).
    Blackjack,
    /// Player has surrendered.
    Surrendered,
}

/// One decision taken on a hand, next to what the strategy table advised at
/// that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// The recommendation shown before the action.
    pub recommended: Action,
    /// The action actually applied.
    pub taken: Action,
}

impl Decision {
    /// Returns whether the action followed the recommendation.
    #[must_use]
    pub fn followed(&self) -> bool {
        self.recommended == self.taken
    }
}

/// A player's hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    status: HandStatus,
    bet: usize,
    from_split: bool,
    doubled: bool,
    insurance: usize,
    decisions: Vec<Decision>,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Active,
            bet,
            from_split: false,
            doubled: false,
            insurance: 0,
            decisions: Vec::new(),
        }
    }

    /// Creates a new hand from a split with a single card.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        Self {
            cards: alloc::vec![card],
            status: HandStatus::Active,
            bet,
            from_split: true,
            doubled: false,
            insurance: 0,
            decisions: Vec::new(),
        }
    }

    /// Adds a card to the hand and applies the automatic transitions:
    /// over 21 busts, an unsplit two-card 21 is a blackjack, any other 21
    /// stands.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);

        if self.status != HandStatus::Active {
            return;
        }

        let value = evaluate(&self.cards);
        if value.bust {
            self.status = HandStatus::Bust;
        } else if value.blackjack_eligible && !self.from_split {
            self.status = HandStatus::Blackjack;
        } else if value.total == 21 {
            self.status = HandStatus::Stood;
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the evaluated value of the hand.
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Calculates the total of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.evaluate().total
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.evaluate().soft
    }

    /// Returns whether the hand is a natural blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        !self.from_split && self.evaluate().blackjack_eligible
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Doubles the bet amount.
    pub const fn double_bet(&mut self) {
        self.bet *= 2;
        self.doubled = true;
    }

    /// Returns whether the bet on this hand was doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Returns the insurance stake attached to this hand (0 if none).
    #[must_use]
    pub const fn insurance(&self) -> usize {
        self.insurance
    }

    pub(crate) const fn set_insurance(&mut self, amount: usize) {
        self.insurance = amount;
    }

    /// Returns the decisions recorded on this hand, in order.
    #[must_use]
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub(crate) fn record_decision(&mut self, recommended: Action, taken: Action) {
        self.decisions.push(Decision { recommended, taken });
    }

    /// Returns whether the hand is a pair of the same rank class.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].class() == self.cards[1].class()
    }

    /// Returns whether no action has been taken on the first two cards.
    #[must_use]
    pub fn is_untouched(&self) -> bool {
        self.cards.len() == 2 && self.decisions.is_empty()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.from_split = true;
            self.cards.pop()
        } else {
            None
        }
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerHand {
    cards: Vec<Card>,
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the cards a player may see: the up card until the hole card
    /// is revealed, everything afterwards.
    #[must_use]
    pub fn visible_cards(&self) -> &[Card] {
        if self.hole_revealed {
            &self.cards
        } else {
            &self.cards[..self.cards.len().min(1)]
        }
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns the hole card (second card).
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.cards.get(1)
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Calculates the visible value (only up card if hole not revealed).
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        evaluate(self.visible_cards()).total
    }

    /// Returns the evaluated value of all dealer cards.
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.evaluate().total
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.evaluate().blackjack_eligible
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.evaluate().bust
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.evaluate().soft
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.hole_revealed = false;
    }
}

impl Default for DealerHand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn cards(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().map(|&rank| Card::new(Suit::Spades, rank)).collect()
    }

    #[test]
    fn aces_fall_back_to_one() {
        let value = evaluate(&cards(&[1, 1, 9]));
        assert_eq!(value.total, 21);
        assert!(value.soft);

        let value = evaluate(&cards(&[1, 1, 13, 9]));
        assert_eq!(value.total, 21);
        assert!(!value.soft);

        let value = evaluate(&cards(&[10, 1, 1]));
        assert_eq!(value.total, 12);
        assert!(!value.soft);
    }

    #[test]
    fn court_cards_count_ten() {
        let value = evaluate(&cards(&[12, 13]));
        assert_eq!(value.total, 20);
        assert!(!value.soft);
        assert!(!value.blackjack_eligible);
    }

    #[test]
    fn three_card_twenty_one_is_not_blackjack() {
        let value = evaluate(&cards(&[7, 7, 7]));
        assert_eq!(value.total, 21);
        assert!(!value.blackjack_eligible);

        let value = evaluate(&cards(&[1, 12]));
        assert!(value.blackjack_eligible);
    }

    #[test]
    fn bust_is_reported() {
        let value = evaluate(&cards(&[10, 6, 9]));
        assert_eq!(value.total, 25);
        assert!(value.bust);
    }

    #[test]
    fn empty_hand_is_zero() {
        let value = evaluate(&[]);
        assert_eq!(value.total, 0);
        assert!(!value.soft && !value.bust && !value.blackjack_eligible);
    }

    #[test]
    fn hitting_to_twenty_one_stands() {
        let mut hand = Hand::new(10);
        for card in cards(&[5, 6, 10]) {
            hand.add_card(card);
        }
        assert_eq!(hand.status(), HandStatus::Stood);
    }

    #[test]
    fn split_hand_twenty_one_is_not_blackjack() {
        let mut hand = Hand::from_split(Card::new(Suit::Hearts, 1), 10);
        hand.add_card(Card::new(Suit::Clubs, 13));
        assert_eq!(hand.status(), HandStatus::Stood);
        assert!(!hand.is_blackjack());
    }

    #[test]
    fn ten_and_king_are_a_pair() {
        let mut hand = Hand::new(10);
        hand.add_card(Card::new(Suit::Hearts, 10));
        hand.add_card(Card::new(Suit::Clubs, 13));
        assert!(hand.is_pair());
    }

    #[test]
    fn dealer_visible_cards_hide_hole() {
        let mut dealer = DealerHand::new();
        dealer.add_card(Card::new(Suit::Hearts, 9));
        dealer.add_card(Card::new(Suit::Hearts, 1));
        assert_eq!(dealer.visible_cards().len(), 1);
        assert_eq!(dealer.visible_value(), 9);
        dealer.reveal_hole();
        assert_eq!(dealer.visible_value(), 20);
    }
}
