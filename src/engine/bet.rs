use alloc::vec::Vec;

use crate::error::BetError;
use crate::hand::{Hand, HandStatus};
use crate::rules::SurrenderKind;

use super::{Event, Recipient, RoundEngine, RoundState, TurnPosition};

impl RoundEngine {
    /// Places a manual bet for the next round.
    ///
    /// The stake is checked now and committed when the round starts. Seats
    /// without a manual bet are sized by their betting system.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress, the seat cannot be found,
    /// the bet is zero, or the seat lacks funds.
    pub fn place_bet(&mut self, seat: usize, amount: usize) -> Result<(), BetError> {
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }
        if self.state != RoundState::Idle {
            return Err(BetError::InvalidState);
        }

        let player = self.players.get_mut(seat).ok_or(BetError::SeatNotFound)?;
        if player.balance() < amount {
            return Err(BetError::InsufficientFunds { seat });
        }
        player.set_pending_bet(Some(amount));
        Ok(())
    }

    /// Withdraws a manual bet so the betting system sizes the next round.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress or the seat cannot be found.
    pub fn clear_bet(&mut self, seat: usize) -> Result<(), BetError> {
        if self.state != RoundState::Idle {
            return Err(BetError::InvalidState);
        }
        let player = self.players.get_mut(seat).ok_or(BetError::SeatNotFound)?;
        player.set_pending_bet(None);
        Ok(())
    }

    /// Commits every seat's bet and opens a round.
    ///
    /// If any seat cannot cover its bet the whole round is aborted before a
    /// card is dealt and no balance changes. An aborted round also switches
    /// autoplay off.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is already in progress, there are no
    /// seats, or a seat cannot cover its bet.
    pub fn start_round(&mut self) -> Result<(), BetError> {
        if self.state != RoundState::Idle {
            return Err(BetError::InvalidState);
        }
        if self.players.is_empty() {
            return Err(BetError::NoSeats);
        }

        // Bets are sized before the pre-round reshuffle; a fresh shoe counts from zero.
        let reshuffle = self
            .session
            .shoe()
            .needs_reshuffle(self.rules.reshuffle_threshold);
        let true_count = if reshuffle {
            0.0
        } else {
            self.session.true_count()
        };

        let bets: Vec<usize> = self
            .players
            .iter()
            .map(|player| player.next_bet(true_count))
            .collect();

        let short = self
            .players
            .iter()
            .zip(&bets)
            .position(|(player, &bet)| bet == 0 || bet > player.balance());
        if let Some(seat) = short {
            let player = &self.players[seat];
            let needed = if bets[seat] == 0 {
                player.config().base_bet.max(1)
            } else {
                bets[seat]
            };
            let balance = player.balance();
            log::warn!("round aborted: seat {seat} needs {needed} but holds {balance}");
            self.emit(Event::RoundAborted {
                seat,
                needed,
                balance,
            });
            self.halt_autoplay();
            return Err(BetError::InsufficientFunds { seat });
        }

        if self.session.prepare_round(self.rules.reshuffle_threshold) {
            self.emit(Event::Reshuffled);
        }

        self.round += 1;
        self.insurance_offered = false;
        self.latched = None;
        self.dealer.clear();
        log::info!("round {} started", self.round);
        self.emit(Event::RoundStarted { round: self.round });

        for (seat, amount) in bets.into_iter().enumerate() {
            let player = &mut self.players[seat];
            // Checked against the balance above.
            let _ = player.debit(amount);
            player.open_round(amount);
            self.emit(Event::BetPlaced { seat, amount });
        }

        self.state = RoundState::Dealing;
        Ok(())
    }

    fn deal_to_seats(&mut self) {
        for seat in 0..self.players.len() {
            if self.players[seat].hands().is_empty() {
                continue;
            }
            let (card, reshuffled) = self.session.deal_face_up();
            if reshuffled {
                self.emit(Event::Reshuffled);
            }
            if let Some(hand) = self.players[seat].hands_mut().first_mut() {
                hand.add_card(card);
            }
            self.emit(Event::CardDealt {
                to: Recipient::Seat { seat, hand: 0 },
                card,
            });
        }
    }

    /// Deals two cards to every seat and to the dealer, the second dealer
    /// card face down, then opens insurance or the first turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealing state.
    pub fn deal(&mut self) -> Result<(), BetError> {
        if self.state != RoundState::Dealing {
            return Err(BetError::InvalidState);
        }

        self.deal_to_seats();

        let (up, reshuffled) = self.session.deal_face_up();
        if reshuffled {
            self.emit(Event::Reshuffled);
        }
        self.dealer.add_card(up);
        self.emit(Event::CardDealt {
            to: Recipient::Dealer,
            card: up,
        });

        self.deal_to_seats();

        let (hole, reshuffled) = self.session.deal_face_down();
        if reshuffled {
            self.emit(Event::Reshuffled);
        }
        self.dealer.add_card(hole);
        self.emit(Event::HoleCardDealt);

        for seat in 0..self.players.len() {
            if self.players[seat].hand(0).map(Hand::status) == Some(HandStatus::Blackjack) {
                self.emit(Event::StatusChanged {
                    seat,
                    hand: 0,
                    status: HandStatus::Blackjack,
                });
            }
        }

        if self.rules.offers_insurance(up.class()) {
            self.insurance_offered = true;
            self.state = RoundState::Insurance;
            self.emit(Event::InsuranceOffered {
                seat: Self::INSURANCE_SEAT,
            });
        } else {
            self.peek_or_play();
        }
        Ok(())
    }

    /// Checks for a dealer blackjack where the rules call for it, then hands
    /// the turn to the first active hand. With early surrender the seats
    /// decide on surrender before the check.
    pub(super) fn peek_or_play(&mut self) {
        let peeks = self
            .dealer
            .up_card()
            .is_some_and(|card| self.rules.peeks_at(card.class()));

        let early = self.rules.surrender
            && self.rules.surrender_kind == SurrenderKind::Early
            && !self.insurance_offered;
        if peeks && early {
            self.offer_early_surrender(0);
        } else {
            self.peek(peeks);
        }
    }

    /// Offers early surrender to the first seat at or after `from` whose hand
    /// can still surrender, or runs the peek once every seat has decided.
    pub(super) fn offer_early_surrender(&mut self, from: usize) {
        let next = self
            .players
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, player)| {
                player.hand(0).is_some_and(|hand| {
                    hand.status() == HandStatus::Active && hand.is_untouched()
                })
            })
            .map(|(seat, _)| seat);

        match next {
            Some(seat) => {
                self.state = RoundState::EarlySurrender(seat);
                self.emit(Event::SurrenderOffered { seat });
            }
            None => self.peek(true),
        }
    }

    fn peek(&mut self, peeks: bool) {
        if peeks && self.dealer.is_blackjack() {
            self.reveal_hole();
            self.emit(Event::DealerBlackjack);
            log::info!("dealer blackjack on the peek");
            self.state = RoundState::Settlement;
            return;
        }

        self.enter_turn(TurnPosition::new(0, 0));
    }
}
