//! Events emitted for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::hand::HandStatus;
use crate::result::HandOutcome;
use crate::strategy::Action;

/// Who received a dealt card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// A seat's hand.
    Seat {
        /// Seat index.
        seat: usize,
        /// Hand index.
        hand: usize,
    },
    /// The dealer.
    Dealer,
}

/// Something that happened at the table, in order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The shoe was rebuilt and the count reset.
    Reshuffled,
    /// A round was opened.
    RoundStarted {
        /// Round number.
        round: u32,
    },
    /// A seat's stake was committed.
    BetPlaced {
        /// Seat index.
        seat: usize,
        /// Amount staked.
        amount: usize,
    },
    /// A face-up card was dealt.
    CardDealt {
        /// Who received it.
        to: Recipient,
        /// The card.
        card: Card,
    },
    /// The dealer's hole card was dealt face down.
    HoleCardDealt,
    /// The hole card was turned over.
    HoleRevealed {
        /// The card.
        card: Card,
    },
    /// Insurance is on offer to the first seat.
    InsuranceOffered {
        /// The deciding seat.
        seat: usize,
    },
    /// The insurance decision was made.
    InsuranceResolved {
        /// The deciding seat.
        seat: usize,
        /// Amount staked, 0 if declined.
        stake: usize,
    },
    /// A seat may surrender before the dealer checks for blackjack.
    SurrenderOffered {
        /// The deciding seat.
        seat: usize,
    },
    /// The dealer checked under an Ace or ten and has blackjack.
    DealerBlackjack,
    /// A hand is waiting for a decision.
    Recommendation {
        /// Seat index.
        seat: usize,
        /// Hand index.
        hand: usize,
        /// The advised action.
        action: Action,
    },
    /// An action was applied.
    ActionTaken {
        /// Seat index.
        seat: usize,
        /// Hand index.
        hand: usize,
        /// The action applied.
        action: Action,
        /// What was advised.
        recommended: Action,
    },
    /// A hand left the active state.
    StatusChanged {
        /// Seat index.
        seat: usize,
        /// Hand index.
        hand: usize,
        /// The new status.
        status: HandStatus,
    },
    /// The dealer stopped drawing.
    DealerStands {
        /// Final total.
        total: u8,
    },
    /// The dealer went over 21.
    DealerBusts {
        /// Final total.
        total: u8,
    },
    /// A hand was paid.
    HandSettled {
        /// Seat index.
        seat: usize,
        /// Hand index.
        hand: usize,
        /// The outcome.
        outcome: HandOutcome,
        /// Amount credited, stake included.
        returned: usize,
    },
    /// Every hand was paid.
    RoundSettled {
        /// Round number.
        round: u32,
        /// Net result over all seats.
        net: isize,
    },
    /// The round could not start because a seat cannot cover its bet.
    RoundAborted {
        /// The seat that could not pay.
        seat: usize,
        /// The bet it needed.
        needed: usize,
        /// Its balance.
        balance: usize,
    },
    /// Autoplay was switched off after an aborted round.
    AutoplayHalted,
}
