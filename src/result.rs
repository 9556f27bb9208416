//! Settlement rules and round result types.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::hand::{DealerHand, HandStatus};
use crate::rules::RulesConfig;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandOutcome {
    /// The hand beat the dealer (dealer bust or higher total).
    Win,
    /// The hand lost (bust, lower total or dealer blackjack).
    Loss,
    /// Equal totals, or blackjack against blackjack.
    Push,
    /// A natural blackjack paid at the table's ratio.
    Blackjack,
    /// Half the bet was given up.
    Surrendered,
}

/// How the dealer's hand finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealerOutcome {
    /// Two-card 21.
    Blackjack,
    /// Over 21.
    Bust,
    /// Stood on a total.
    Stands(u8),
}

impl DealerOutcome {
    /// Classifies a finished dealer hand.
    #[must_use]
    pub fn of(dealer: &DealerHand) -> Self {
        if dealer.is_blackjack() {
            Self::Blackjack
        } else if dealer.is_bust() {
            Self::Bust
        } else {
            Self::Stands(dealer.value())
        }
    }
}

/// What one hand pays back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// The hand's outcome.
    pub outcome: HandOutcome,
    /// Amount credited for the main bet, stake included.
    pub returned: usize,
    /// Amount credited for the insurance bet, stake included.
    pub insurance_returned: usize,
}

/// Settles one hand against the dealer.
///
/// Checked in order: surrender, bust, player blackjack, dealer blackjack,
/// dealer bust, then totals. Insurance is settled independently of the main
/// bet and pays 2:1 whenever the dealer has blackjack.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "f64 has sufficient precision for monetary values"
)]
pub fn settle_hand(
    status: HandStatus,
    total: u8,
    dealer: DealerOutcome,
    bet: usize,
    insurance: usize,
    rules: &RulesConfig,
) -> Settlement {
    let dealer_blackjack = dealer == DealerOutcome::Blackjack;

    let (outcome, returned) = match status {
        HandStatus::Surrendered => (
            HandOutcome::Surrendered,
            crate::math::round_amount(bet as f64 * 0.5, rules.rounding_surrender),
        ),
        HandStatus::Bust => (HandOutcome::Loss, 0),
        HandStatus::Blackjack if dealer_blackjack => (HandOutcome::Push, bet),
        HandStatus::Blackjack => (
            HandOutcome::Blackjack,
            bet + rules
                .blackjack_payout
                .winnings(bet, rules.rounding_blackjack),
        ),
        HandStatus::Stood | HandStatus::Active => match dealer {
            DealerOutcome::Blackjack => (HandOutcome::Loss, 0),
            DealerOutcome::Bust => (HandOutcome::Win, bet * 2),
            DealerOutcome::Stands(dealer_total) => {
                if total > dealer_total {
                    (HandOutcome::Win, bet * 2)
                } else if total < dealer_total {
                    (HandOutcome::Loss, 0)
                } else {
                    (HandOutcome::Push, bet)
                }
            }
        },
    };

    let insurance_returned = if dealer_blackjack { insurance * 3 } else { 0 };

    Settlement {
        outcome,
        returned,
        insurance_returned,
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// Final status the hand was settled from.
    pub status: HandStatus,
    /// The bet on this hand, including any double.
    pub bet: usize,
    /// Amount credited for the hand, stake included.
    pub returned: usize,
    /// The hand's total.
    pub player_value: u8,
    /// The dealer's total.
    pub dealer_value: u8,
}

/// Result for a single seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatResult {
    /// Seat index.
    pub seat: usize,
    /// Results for each hand (multiple if split).
    pub hands: Vec<HandResult>,
    /// Insurance stake (0 if none was taken).
    pub insurance_bet: usize,
    /// Insurance credit (0 unless the dealer had blackjack).
    pub insurance_returned: usize,
    /// Everything staked this round.
    pub wagered: usize,
    /// Everything credited this round.
    pub returned: usize,
    /// `returned - wagered`.
    pub net: isize,
    /// Balance after settlement.
    pub balance: usize,
}

/// Result of the entire round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number, starting at 1.
    pub round: u32,
    /// Results for each seat.
    pub seats: Vec<SeatResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
}

impl RoundResult {
    /// Sum of every seat's net result.
    #[must_use]
    pub fn total_net(&self) -> isize {
        self.seats.iter().map(|seat| seat.net).sum()
    }
}
