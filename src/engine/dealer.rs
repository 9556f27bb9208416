use alloc::vec::Vec;

use crate::card::Card;
use crate::error::SettlementError;
use crate::hand::HandStatus;
use crate::result::{DealerOutcome, HandResult, RoundResult, SeatResult, settle_hand};
use crate::stats::{RoundRecord, SeatSnapshot};

use super::{Event, Recipient, RoundEngine, RoundState};

/// One transition of the dealer's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStep {
    /// The hole card was turned over.
    Revealed(Card),
    /// The dealer drew a card.
    Drew(Card),
    /// The dealer stopped on a total.
    Stands(u8),
    /// The dealer went over 21.
    Busts(u8),
}

impl RoundEngine {
    /// Turns the hole card over and counts it, if it is still hidden.
    pub(super) fn reveal_hole(&mut self) -> Option<Card> {
        if self.dealer.is_hole_revealed() {
            return None;
        }
        let hole = *self.dealer.hole_card()?;
        self.dealer.reveal_hole();
        self.session.reveal(&hole);
        self.emit(Event::HoleRevealed { card: hole });
        Some(hole)
    }

    /// Whether some hand still needs the dealer's final total.
    fn dealer_must_play(&self) -> bool {
        self.players
            .iter()
            .flat_map(|player| player.hands())
            .any(|hand| hand.status() == HandStatus::Stood)
    }

    /// Advances the dealer's turn by one transition.
    ///
    /// The first step reveals the hole card. Each later step draws one card
    /// while the rules say hit, until the dealer stands or busts and the
    /// round moves on to settlement. When every hand is already bust,
    /// surrendered or a blackjack the dealer draws nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealer's turn.
    pub fn dealer_step(&mut self) -> Result<DealerStep, SettlementError> {
        if self.state != RoundState::DealerTurn {
            return Err(SettlementError::InvalidState);
        }

        if let Some(hole) = self.reveal_hole() {
            return Ok(DealerStep::Revealed(hole));
        }

        let value = self.dealer.evaluate();
        if self.dealer_must_play() && self.rules.dealer_hits(value.total, value.soft) {
            let (card, reshuffled) = self.session.deal_face_up();
            if reshuffled {
                self.emit(Event::Reshuffled);
            }
            self.dealer.add_card(card);
            self.emit(Event::CardDealt {
                to: Recipient::Dealer,
                card,
            });
            return Ok(DealerStep::Drew(card));
        }

        self.state = RoundState::Settlement;
        if value.bust {
            log::debug!("dealer busts with {}", value.total);
            self.emit(Event::DealerBusts { total: value.total });
            Ok(DealerStep::Busts(value.total))
        } else {
            log::debug!("dealer stands on {}", value.total);
            self.emit(Event::DealerStands { total: value.total });
            Ok(DealerStep::Stands(value.total))
        }
    }

    /// Pays every hand against the dealer, records the round and returns the
    /// engine to idle.
    ///
    /// Winnings and refunds are credited here; stakes were debited when they
    /// were placed. Hands stay on the table until the next round starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the settlement state.
    #[expect(
        clippy::cast_possible_wrap,
        reason = "balances stay far below isize::MAX"
    )]
    pub fn settle(&mut self) -> Result<RoundResult, SettlementError> {
        if self.state != RoundState::Settlement {
            return Err(SettlementError::InvalidState);
        }
        self.reveal_hole();

        let dealer = DealerOutcome::of(&self.dealer);
        let dealer_value = self.dealer.value();
        let mut seats = Vec::with_capacity(self.players.len());
        let mut events = Vec::new();

        for (seat, player) in self.players.iter_mut().enumerate() {
            if player.hands().is_empty() {
                continue;
            }

            let mut hands = Vec::with_capacity(player.hands().len());
            let mut wagered = 0;
            let mut returned = 0;
            let mut insurance_bet = 0;
            let mut insurance_returned = 0;

            for (hand_index, hand) in player.hands().iter().enumerate() {
                let settlement = settle_hand(
                    hand.status(),
                    hand.value(),
                    dealer,
                    hand.bet(),
                    hand.insurance(),
                    &self.rules,
                );
                wagered += hand.bet() + hand.insurance();
                returned += settlement.returned + settlement.insurance_returned;
                insurance_bet += hand.insurance();
                insurance_returned += settlement.insurance_returned;

                hands.push(HandResult {
                    hand_index,
                    outcome: settlement.outcome,
                    status: hand.status(),
                    bet: hand.bet(),
                    returned: settlement.returned,
                    player_value: hand.value(),
                    dealer_value,
                });
                events.push(Event::HandSettled {
                    seat,
                    hand: hand_index,
                    outcome: settlement.outcome,
                    returned: settlement.returned,
                });
            }

            player.credit(returned);
            player.record_results(&hands);
            if insurance_bet > 0 {
                player
                    .stats_mut()
                    .record_insurance(insurance_bet, insurance_returned);
            }

            let net = returned as isize - wagered as isize;
            player.close_round(net);
            log::debug!("seat {seat} settled: net {net}");

            seats.push(SeatResult {
                seat,
                hands,
                insurance_bet,
                insurance_returned,
                wagered,
                returned,
                net,
                balance: player.balance(),
            });
        }

        let result = RoundResult {
            round: self.round,
            seats,
            dealer_value,
            dealer_bust: dealer == DealerOutcome::Bust,
            dealer_blackjack: dealer == DealerOutcome::Blackjack,
        };

        for event in events {
            self.emit(event);
        }
        let net = result.total_net();
        self.emit(Event::RoundSettled {
            round: self.round,
            net,
        });
        log::info!("round {} settled: net {net}", self.round);

        self.log.record(RoundRecord {
            round: self.round,
            timestamp: (self.clock)(),
            total_pl: net,
            seats: self
                .players
                .iter()
                .enumerate()
                .map(|(seat, player)| SeatSnapshot::of(seat, player.balance(), player.stats()))
                .collect(),
        });

        self.state = RoundState::Idle;
        self.last_result = Some(result.clone());
        Ok(result)
    }
}
