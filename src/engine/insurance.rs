use crate::error::InsuranceError;

use super::{Event, RoundEngine, RoundState};

impl RoundEngine {
    /// The only seat asked for an insurance decision: the first in turn order.
    pub const INSURANCE_SEAT: usize = 0;

    /// Returns whether the round is waiting for the insurance decision.
    #[must_use]
    pub fn is_insurance_pending(&self) -> bool {
        self.state == RoundState::Insurance
    }

    fn ensure_insurance(&self, seat: usize) -> Result<(), InsuranceError> {
        if self.state != RoundState::Insurance {
            return Err(if self.insurance_offered {
                InsuranceError::InvalidState
            } else {
                InsuranceError::NotOffered
            });
        }
        if seat != Self::INSURANCE_SEAT {
            return Err(InsuranceError::NotDecider(seat));
        }
        Ok(())
    }

    /// Takes insurance on the first seat's hand.
    ///
    /// The insurance bet is half of the original bet, rounded down, and pays
    /// 2:1 if the dealer has blackjack. Returns the stake.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Insurance is not on offer
    /// - The seat is not the first seat
    /// - The stake would be zero or the seat has insufficient funds
    pub fn take_insurance(&mut self, seat: usize) -> Result<usize, InsuranceError> {
        self.ensure_insurance(seat)?;

        let player = self
            .players
            .get_mut(seat)
            .ok_or(InsuranceError::NotDecider(seat))?;
        let stake = player.round_bet() / 2;
        if stake == 0 || stake > player.balance() {
            return Err(InsuranceError::InsufficientFunds);
        }

        let _ = player.debit(stake);
        if let Some(hand) = player.hands_mut().first_mut() {
            hand.set_insurance(stake);
        }

        log::debug!("seat {seat} insured for {stake}");
        self.emit(Event::InsuranceResolved { seat, stake });
        self.peek_or_play();
        Ok(stake)
    }

    /// Declines insurance and moves on to the peek and the first turn.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not on offer or the seat is not the
    /// first seat.
    pub fn decline_insurance(&mut self, seat: usize) -> Result<(), InsuranceError> {
        self.ensure_insurance(seat)?;
        self.emit(Event::InsuranceResolved { seat, stake: 0 });
        self.peek_or_play();
        Ok(())
    }
}
