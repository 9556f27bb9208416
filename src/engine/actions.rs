use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::{Hand, HandStatus};
use crate::odds;
use crate::rules::SurrenderKind;
use crate::strategy::{self, Action, Availability, HandKind, Recommendation, Upcard};

use super::{Event, Recipient, RoundEngine, RoundState, TurnPosition};

impl RoundEngine {
    /// Returns the hand whose turn it is.
    #[must_use]
    pub const fn current_turn(&self) -> Option<TurnPosition> {
        match self.state {
            RoundState::SeatTurn(position) => Some(position),
            _ => None,
        }
    }

    fn find_hand(&self, seat: usize, hand: usize) -> Result<&Hand, ActionError> {
        self.players
            .get(seat)
            .ok_or(ActionError::SeatNotFound)?
            .hand(hand)
            .ok_or(ActionError::HandNotFound)
    }

    fn hand_mut(&mut self, position: TurnPosition) -> Result<&mut Hand, ActionError> {
        self.players
            .get_mut(position.seat)
            .ok_or(ActionError::SeatNotFound)?
            .hands_mut()
            .get_mut(position.hand)
            .ok_or(ActionError::HandNotFound)
    }

    fn ensure_turn(&self, seat: usize, hand: usize) -> Result<TurnPosition, ActionError> {
        let RoundState::SeatTurn(position) = self.state else {
            return Err(ActionError::InvalidState);
        };
        let current = self.find_hand(seat, hand)?;
        if position != TurnPosition::new(seat, hand) {
            return Err(ActionError::NotYourTurn);
        }
        if current.status() != HandStatus::Active {
            return Err(ActionError::HandNotActive);
        }
        Ok(position)
    }

    fn check_double(&self, position: TurnPosition) -> Result<(), ActionError> {
        let hand = self.find_hand(position.seat, position.hand)?;
        if hand.len() != 2 {
            return Err(ActionError::CannotDouble);
        }
        if hand.is_from_split() && !self.rules.double_after_split {
            return Err(ActionError::CannotDouble);
        }
        if self.players[position.seat].balance() < hand.bet() {
            return Err(ActionError::InsufficientFunds);
        }
        Ok(())
    }

    fn check_split(&self, position: TurnPosition) -> Result<(), ActionError> {
        let hand = self.find_hand(position.seat, position.hand)?;
        if !hand.is_pair() {
            return Err(ActionError::CannotSplit);
        }
        let aces = hand.cards().first().is_some_and(Card::is_ace);
        if aces && hand.is_from_split() && !self.rules.resplit_aces {
            return Err(ActionError::CannotSplit);
        }
        let player = &self.players[position.seat];
        if player.splits() >= usize::from(self.rules.max_splits) {
            return Err(ActionError::MaxSplitsReached);
        }
        if player.balance() < hand.bet() {
            return Err(ActionError::InsufficientFunds);
        }
        Ok(())
    }

    fn check_surrender(&self, position: TurnPosition) -> Result<(), ActionError> {
        let hand = self.find_hand(position.seat, position.hand)?;
        if !self.rules.surrender || self.insurance_offered {
            return Err(ActionError::CannotSurrender);
        }
        if !hand.is_untouched() || hand.is_from_split() {
            return Err(ActionError::CannotSurrender);
        }
        // Late surrender needs the peek to have happened.
        let unpeeked = !self
            .dealer
            .up_card()
            .is_some_and(|card| self.rules.peeks_at(card.class()));
        let risky_up_card = self
            .dealer
            .up_card()
            .is_some_and(|card| card.class() == 1 || card.class() == 10);
        if self.rules.surrender_kind == SurrenderKind::Late && unpeeked && risky_up_card {
            return Err(ActionError::CannotSurrender);
        }
        Ok(())
    }

    /// Actions the hand whose turn it is may take. Empty if it is not that
    /// hand's turn.
    #[must_use]
    pub fn legal_actions(&self, seat: usize, hand: usize) -> Vec<Action> {
        if let RoundState::EarlySurrender(deciding) = self.state {
            let position = TurnPosition::new(seat, hand);
            if seat == deciding && hand == 0 && self.check_surrender(position).is_ok() {
                return alloc::vec![Action::Surrender];
            }
            return Vec::new();
        }
        let Ok(position) = self.ensure_turn(seat, hand) else {
            return Vec::new();
        };
        let mut actions = alloc::vec![Action::Hit, Action::Stand];
        if self.check_double(position).is_ok() {
            actions.push(Action::Double);
        }
        if self.check_split(position).is_ok() {
            actions.push(Action::Split);
        }
        if self.check_surrender(position).is_ok() {
            actions.push(Action::Surrender);
        }
        actions
    }

    /// The strategy recommendation for a hand against the dealer's up card,
    /// using the seat's table and downgrading actions the seat cannot take.
    ///
    /// # Errors
    ///
    /// Returns an error if the seat or hand cannot be found or no cards have
    /// been dealt.
    pub fn recommendation(&self, seat: usize, hand: usize) -> Result<Recommendation, ActionError> {
        let cards = self.find_hand(seat, hand)?.cards();
        let up_card = self.dealer.up_card().ok_or(ActionError::InvalidState)?;
        if cards.is_empty() {
            return Err(ActionError::InvalidState);
        }

        let position = TurnPosition::new(seat, hand);
        let availability = Availability {
            can_split: self.check_split(position).is_ok(),
            can_double: self.check_double(position).is_ok(),
        };
        let table = self.book.resolve(&self.players[seat].config().strategy);
        Ok(table.recommend(cards, Upcard::of(up_card), availability))
    }

    /// Tutorial text for the current recommendation on a hand.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Self::recommendation`].
    pub fn explanation(&self, seat: usize, hand: usize) -> Result<String, ActionError> {
        let recommendation = self.recommendation(seat, hand)?;
        let cards = self.find_hand(seat, hand)?.cards();
        let up_card = self.dealer.up_card().ok_or(ActionError::InvalidState)?;
        let total = match recommendation.kind {
            HandKind::Pair => cards[0].class(),
            HandKind::Hard | HandKind::Soft => recommendation.value.total,
        };
        Ok(strategy::explain(
            recommendation.kind,
            recommendation.action,
            total,
            Upcard::of(up_card),
        ))
    }

    /// Probability that one more card busts a hand, from the live shoe.
    ///
    /// # Errors
    ///
    /// Returns an error if the seat or hand cannot be found.
    pub fn bust_probability(&self, seat: usize, hand: usize) -> Result<f64, ActionError> {
        let value = self.find_hand(seat, hand)?.evaluate();
        Ok(odds::bust_probability(
            value.total,
            value.soft,
            &self.session.shoe().composition(),
        ))
    }

    fn recommended_action(&self, position: TurnPosition) -> Action {
        self.recommendation(position.seat, position.hand)
            .map_or(Action::Hit, |recommendation| recommendation.action)
    }

    /// First active hand at or after `from`, in seat order.
    fn first_active_from(&self, from: TurnPosition) -> Option<TurnPosition> {
        self.players
            .iter()
            .enumerate()
            .skip(from.seat)
            .find_map(|(seat, player)| {
                let start = if seat == from.seat { from.hand } else { 0 };
                player
                    .hands()
                    .iter()
                    .enumerate()
                    .skip(start)
                    .find(|(_, hand)| hand.status() == HandStatus::Active)
                    .map(|(hand, _)| TurnPosition::new(seat, hand))
            })
    }

    /// Moves the turn to the first active hand at or after `from`, or to the
    /// dealer once every hand is final.
    pub(super) fn enter_turn(&mut self, from: TurnPosition) {
        let Some(next) = self.first_active_from(from) else {
            self.latched = None;
            self.state = RoundState::DealerTurn;
            log::debug!("all hands final; dealer turn");
            return;
        };

        if self.latched.is_some_and(|seat| seat != next.seat) {
            self.latched = None;
        }
        self.state = RoundState::SeatTurn(next);
        let action = self.recommended_action(next);
        self.emit(Event::Recommendation {
            seat: next.seat,
            hand: next.hand,
            action,
        });
    }

    fn deal_to_hand(&mut self, position: TurnPosition) -> Result<Card, ActionError> {
        let (card, reshuffled) = self.session.deal_face_up();
        if reshuffled {
            self.emit(Event::Reshuffled);
        }
        self.hand_mut(position)?.add_card(card);
        self.emit(Event::CardDealt {
            to: Recipient::Seat {
                seat: position.seat,
                hand: position.hand,
            },
            card,
        });
        Ok(card)
    }

    fn record(&mut self, position: TurnPosition, action: Action, recommended: Action) {
        if let Ok(hand) = self.hand_mut(position) {
            hand.record_decision(recommended, action);
        }
        log::debug!(
            "seat {} hand {}: {action} (advised {recommended})",
            position.seat,
            position.hand
        );
        self.emit(Event::ActionTaken {
            seat: position.seat,
            hand: position.hand,
            action,
            recommended,
        });
    }

    fn finish_action(&mut self, position: TurnPosition) {
        if let Ok(hand) = self.find_hand(position.seat, position.hand) {
            let status = hand.status();
            if status != HandStatus::Active {
                self.emit(Event::StatusChanged {
                    seat: position.seat,
                    hand: position.hand,
                    status,
                });
            }
        }
        self.enter_turn(position);
    }

    /// Seat action: Hit (draw a card).
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in a seat turn, it is not this
    /// hand's turn, the seat or hand cannot be found, or the hand is not
    /// active.
    pub fn hit(&mut self, seat: usize, hand: usize) -> Result<Card, ActionError> {
        let position = self.ensure_turn(seat, hand)?;
        let recommended = self.recommended_action(position);

        let card = self.deal_to_hand(position)?;
        self.record(position, Action::Hit, recommended);
        self.finish_action(position);
        Ok(card)
    }

    /// Seat action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in a seat turn, it is not this
    /// hand's turn, the seat or hand cannot be found, or the hand is not
    /// active.
    pub fn stand(&mut self, seat: usize, hand: usize) -> Result<(), ActionError> {
        let position = self.ensure_turn(seat, hand)?;
        let recommended = self.recommended_action(position);

        self.hand_mut(position)?.set_status(HandStatus::Stood);
        self.record(position, Action::Stand, recommended);
        self.finish_action(position);
        Ok(())
    }

    /// Seat action: Double down (double the bet, take exactly one card,
    /// then stand).
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this hand's turn, the hand does not hold
    /// exactly two cards, the rules forbid doubling after a split, or the seat
    /// lacks funds.
    pub fn double(&mut self, seat: usize, hand: usize) -> Result<Card, ActionError> {
        let position = self.ensure_turn(seat, hand)?;
        self.check_double(position)?;
        let recommended = self.recommended_action(position);

        let bet = self.find_hand(seat, hand)?.bet();
        let player = &mut self.players[seat];
        if !player.debit(bet) {
            return Err(ActionError::InsufficientFunds);
        }
        player.stats_mut().record_double();
        self.hand_mut(position)?.double_bet();

        let card = self.deal_to_hand(position)?;
        let doubled = self.hand_mut(position)?;
        if doubled.status() == HandStatus::Active {
            doubled.set_status(HandStatus::Stood);
        }
        self.record(position, Action::Double, recommended);
        self.finish_action(position);
        Ok(card)
    }

    /// Seat action: Split a pair into two hands.
    ///
    /// The second card moves to a new hand placed right after this one, with
    /// a bet equal to the original. Each hand is then dealt one card at once.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this hand's turn, the hand is not a
    /// two-card pair, Aces may not be split again, the split limit is reached,
    /// or the seat lacks funds.
    pub fn split(&mut self, seat: usize, hand: usize) -> Result<(), ActionError> {
        let position = self.ensure_turn(seat, hand)?;
        self.check_split(position)?;
        let recommended = self.recommended_action(position);

        let bet = self.find_hand(seat, hand)?.bet();
        let moved = self
            .hand_mut(position)?
            .take_split_card()
            .ok_or(ActionError::CannotSplit)?;

        let player = &mut self.players[seat];
        // Funds were checked with the split rules.
        let _ = player.debit(bet);
        player.stats_mut().record_split();
        player
            .hands_mut()
            .insert(hand + 1, Hand::from_split(moved, bet));
        log::debug!("seat {seat} split hand {hand}");

        self.record(position, Action::Split, recommended);
        self.deal_to_hand(position)?;
        let second = TurnPosition::new(seat, hand + 1);
        self.deal_to_hand(second)?;

        if let Ok(new_hand) = self.find_hand(seat, hand + 1) {
            let status = new_hand.status();
            if status != HandStatus::Active {
                self.emit(Event::StatusChanged {
                    seat,
                    hand: hand + 1,
                    status,
                });
            }
        }
        self.finish_action(position);
        Ok(())
    }

    /// Seat action: Surrender (give up half the bet).
    ///
    /// Under early surrender this is also how a seat answers the offer made
    /// before the dealer checks for blackjack.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this hand's turn, surrender is disabled,
    /// insurance was offered this round, the hand is not the untouched
    /// original two cards, or late surrender is asked for before a peek.
    pub fn surrender(&mut self, seat: usize, hand: usize) -> Result<(), ActionError> {
        let early = matches!(self.state, RoundState::EarlySurrender(_));
        let position = if early {
            self.ensure_surrender_offer(seat)?;
            if hand != 0 {
                return Err(ActionError::HandNotFound);
            }
            TurnPosition::new(seat, 0)
        } else {
            self.ensure_turn(seat, hand)?
        };
        self.check_surrender(position)?;
        let recommended = self.recommended_action(position);

        self.hand_mut(position)?.set_status(HandStatus::Surrendered);
        self.record(position, Action::Surrender, recommended);
        if early {
            self.emit(Event::StatusChanged {
                seat,
                hand: 0,
                status: HandStatus::Surrendered,
            });
            self.offer_early_surrender(seat + 1);
        } else {
            self.finish_action(position);
        }
        Ok(())
    }

    fn ensure_surrender_offer(&self, seat: usize) -> Result<(), ActionError> {
        let RoundState::EarlySurrender(deciding) = self.state else {
            return Err(ActionError::InvalidState);
        };
        self.find_hand(seat, 0)?;
        if seat != deciding {
            return Err(ActionError::NotYourTurn);
        }
        Ok(())
    }

    /// Turns down the early surrender offer and passes it to the next seat.
    /// Once every seat has answered the dealer checks for blackjack.
    ///
    /// # Errors
    ///
    /// Returns an error if no early surrender offer is open or it is another
    /// seat's turn to answer.
    pub fn decline_surrender(&mut self, seat: usize) -> Result<(), ActionError> {
        self.ensure_surrender_offer(seat)?;
        log::debug!("seat {seat} keeps its hand");
        self.offer_early_surrender(seat + 1);
        Ok(())
    }

    /// Applies any action by name of its variant.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying action.
    pub fn act(&mut self, seat: usize, hand: usize, action: Action) -> Result<(), ActionError> {
        match action {
            Action::Hit => self.hit(seat, hand).map(drop),
            Action::Stand => self.stand(seat, hand),
            Action::Double => self.double(seat, hand).map(drop),
            Action::Split => self.split(seat, hand),
            Action::Surrender => self.surrender(seat, hand),
        }
    }
}
