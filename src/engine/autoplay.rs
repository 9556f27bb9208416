use alloc::vec::Vec;

use crate::error::StepError;
use crate::policy;
use crate::result::RoundResult;
use crate::strategy::Action;

use super::{DealerStep, Event, RoundEngine, RoundState, TurnPosition};

/// What a call to [`RoundEngine::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing to do until a round is started.
    Idle,
    /// Bets were committed and a round opened.
    Started,
    /// The initial cards were dealt.
    Dealt,
    /// The first seat has to decide on insurance.
    AwaitingInsurance,
    /// Insurance was declined for an autoplayed first seat.
    InsuranceDeclined,
    /// This seat may surrender before the dealer checks for blackjack.
    AwaitingSurrender(usize),
    /// An autoplayed seat kept its hand instead of surrendering early.
    SurrenderDeclined(usize),
    /// A seat that is not autoplayed has to act on this hand.
    AwaitingAction(TurnPosition),
    /// An autoplayed seat acted.
    Played {
        /// The hand that acted.
        position: TurnPosition,
        /// The action taken.
        action: Action,
    },
    /// The dealer's turn advanced.
    Dealer(DealerStep),
    /// The round was paid and the engine is idle again.
    Settled(RoundResult),
}

impl Step {
    /// Returns whether the engine is waiting on the host.
    #[must_use]
    pub const fn needs_input(&self) -> bool {
        matches!(
            self,
            Self::Idle
                | Self::AwaitingInsurance
                | Self::AwaitingSurrender(_)
                | Self::AwaitingAction(_)
        )
    }
}

impl RoundEngine {
    /// Switches engine-wide autoplay and returns the new setting.
    ///
    /// Turning it off never interrupts a seat mid-hand: a seat already being
    /// played finishes all of its hands and the engine pauses before the
    /// next seat.
    pub fn toggle_autoplay(&mut self) -> bool {
        self.autoplay = !self.autoplay;
        log::info!("autoplay {}", if self.autoplay { "on" } else { "off" });
        self.autoplay
    }

    /// Returns whether engine-wide autoplay is on.
    #[must_use]
    pub const fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub(super) fn halt_autoplay(&mut self) {
        if self.autoplay {
            self.autoplay = false;
            log::warn!("autoplay halted");
            self.emit(Event::AutoplayHalted);
        }
    }

    fn is_autoplayed(&self, seat: usize) -> bool {
        self.autoplay
            || self.latched == Some(seat)
            || self
                .players
                .get(seat)
                .is_some_and(|player| player.config().autoplay)
    }

    fn autoplay_turn(&mut self, position: TurnPosition) -> Result<Action, StepError> {
        let recommended = self.recommendation(position.seat, position.hand)?.action;
        let legal = self.legal_actions(position.seat, position.hand);
        let skill = self.players[position.seat].config().skill;
        let action = policy::choose_action(recommended, skill, &legal, &mut self.rng);

        self.latched = Some(position.seat);
        self.act(position.seat, position.hand, action)?;
        Ok(action)
    }

    /// Advances the engine by one pending transition.
    ///
    /// Autoplayed seats act, the dealer draws a single card and settlement
    /// runs here. With engine-wide autoplay on an idle engine also starts
    /// the next round. Anything a human seat must decide is reported instead
    /// of performed.
    ///
    /// # Errors
    ///
    /// Returns the error of the transition that failed, e.g. a round that
    /// could not start for lack of funds.
    pub fn step(&mut self) -> Result<Step, StepError> {
        match self.state {
            RoundState::Idle => {
                if !self.autoplay {
                    return Ok(Step::Idle);
                }
                self.start_round()?;
                Ok(Step::Started)
            }
            RoundState::Dealing => {
                self.deal()?;
                Ok(Step::Dealt)
            }
            RoundState::Insurance => {
                if !self.is_autoplayed(Self::INSURANCE_SEAT) {
                    return Ok(Step::AwaitingInsurance);
                }
                self.decline_insurance(Self::INSURANCE_SEAT)?;
                Ok(Step::InsuranceDeclined)
            }
            RoundState::EarlySurrender(seat) => {
                if !self.is_autoplayed(seat) {
                    return Ok(Step::AwaitingSurrender(seat));
                }
                self.decline_surrender(seat)?;
                Ok(Step::SurrenderDeclined(seat))
            }
            RoundState::SeatTurn(position) => {
                if !self.is_autoplayed(position.seat) {
                    return Ok(Step::AwaitingAction(position));
                }
                let action = self.autoplay_turn(position)?;
                Ok(Step::Played { position, action })
            }
            RoundState::DealerTurn => Ok(Step::Dealer(self.dealer_step()?)),
            RoundState::Settlement => Ok(Step::Settled(self.settle()?)),
        }
    }

    /// Steps until the host has to act or a round settles.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Self::step`].
    pub fn run_until_input(&mut self) -> Result<Vec<Step>, StepError> {
        let mut steps = Vec::new();
        loop {
            let step = self.step()?;
            let done = step.needs_input() || matches!(step, Step::Settled(_));
            steps.push(step);
            if done {
                return Ok(steps);
            }
        }
    }

    /// Steps the current round through to settlement, starting one first if
    /// the engine is idle. Only autoplayed seats can be played this way.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::AwaitingInput`] if a seat that is not autoplayed
    /// has to decide, or the error of any failed transition.
    pub fn play_round(&mut self) -> Result<RoundResult, StepError> {
        if self.state == RoundState::Idle {
            self.start_round()?;
        }
        loop {
            match self.step()? {
                Step::Settled(result) => return Ok(result),
                Step::AwaitingInsurance => {
                    return Err(StepError::AwaitingInput(Self::INSURANCE_SEAT));
                }
                Step::AwaitingSurrender(seat) => {
                    return Err(StepError::AwaitingInput(seat));
                }
                Step::AwaitingAction(position) => {
                    return Err(StepError::AwaitingInput(position.seat));
                }
                _ => {}
            }
        }
    }
}
