//! Round state and read-only table views.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::count::CountStatus;
use crate::hand::Hand;
use crate::stats::PlayerStatistics;

/// Where the round is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Between rounds. Bets may be placed and rules changed.
    Idle,
    /// Bets are committed; the initial cards are next.
    Dealing,
    /// Waiting for the first seat's insurance decision.
    Insurance,
    /// Early surrender: this seat decides before the dealer checks for
    /// blackjack.
    EarlySurrender(usize),
    /// Waiting for an action on a hand.
    SeatTurn(TurnPosition),
    /// The dealer reveals and draws, one card per step.
    DealerTurn,
    /// Every hand is final and ready to be paid.
    Settlement,
}

/// Represents the current turn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPosition {
    /// Seat index.
    pub seat: usize,
    /// Index into the seat's hands (for splits).
    pub hand: usize,
}

impl TurnPosition {
    /// Creates a position.
    #[must_use]
    pub const fn new(seat: usize, hand: usize) -> Self {
        Self { seat, hand }
    }
}

/// A seat as the presentation layer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatView {
    /// Seat index.
    pub seat: usize,
    /// Current balance.
    pub balance: usize,
    /// This round's hands.
    pub hands: Vec<Hand>,
    /// Running statistics.
    pub stats: PlayerStatistics,
}

/// Everything needed to render the table, with the hole card hidden until
/// it is revealed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Rounds started so far.
    pub round: u32,
    /// Where the round is.
    pub state: RoundState,
    /// Dealer cards every seat can see.
    pub dealer_cards: Vec<Card>,
    /// Total of the visible dealer cards.
    pub dealer_value: u8,
    /// Seats in turn order.
    pub seats: Vec<SeatView>,
    /// Hi-Lo running count.
    pub running_count: i32,
    /// Running count per remaining deck.
    pub true_count: f64,
    /// Reading of the true count.
    pub count_status: CountStatus,
    /// Cards left in the shoe.
    pub cards_remaining: usize,
    /// Whether the engine is playing every seat.
    pub autoplay: bool,
}
