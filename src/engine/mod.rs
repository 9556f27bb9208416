//! The round engine: a single-threaded state machine driven by intents and
//! by [`RoundEngine::step`].

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::betting::{BetRecommendation, BettingSystem, Ramp, recommend_bet};
use crate::error::ConfigError;
use crate::hand::DealerHand;
use crate::player::{Player, SeatConfig};
use crate::result::RoundResult;
use crate::rules::RulesConfig;
use crate::session::Session;
use crate::stats::{Clock, SessionLog, system_clock};
use crate::strategy::{DEFAULT_STRATEGY, StrategyBook, StrategyTable};

mod actions;
mod autoplay;
mod bet;
mod dealer;
pub mod events;
mod insurance;
pub mod state;

pub use autoplay::Step;
pub use dealer::DealerStep;
pub use events::{Event, Recipient};
pub use state::{RoundState, SeatView, TableSnapshot, TurnPosition};

/// Runs rounds for any number of seats against one dealer.
///
/// The engine owns the [`Session`] (shoe and count), the seats and the
/// dealer. Presentation code sends intents (`place_bet`, `hit`, ...) and
/// calls [`RoundEngine::step`] to let the engine advance on its own: deal,
/// play simulated seats, draw dealer cards and settle. Nothing blocks; every
/// pending transition waits for the next `step`.
///
/// ```
/// use bjtrainer::{RoundEngine, RulesConfig, SeatConfig};
///
/// let mut engine = RoundEngine::new(RulesConfig::default(), 42);
/// let seat = engine.join(SeatConfig::default().with_autoplay(true));
/// engine.start_round().unwrap();
/// let result = engine.play_round().unwrap();
/// assert_eq!(result.seats[0].seat, seat);
/// ```
pub struct RoundEngine {
    rules: RulesConfig,
    session: Session,
    seed: u64,
    shoes_built: u64,
    book: StrategyBook,
    players: Vec<Player>,
    dealer: DealerHand,
    state: RoundState,
    round: u32,
    insurance_offered: bool,
    autoplay: bool,
    latched: Option<usize>,
    rng: ChaCha8Rng,
    events: VecDeque<Event>,
    clock: Clock,
    log: SessionLog,
    last_result: Option<RoundResult>,
}

impl RoundEngine {
    /// Creates an engine with the given rules and seed.
    ///
    /// The shoe and the simulated-seat policy draw from separate generators
    /// derived from `seed`, so a seed replays the same session.
    #[must_use]
    pub fn new(rules: RulesConfig, seed: u64) -> Self {
        let clock: Clock = system_clock;
        Self {
            session: Session::new(rules.decks, seed),
            rules,
            seed,
            shoes_built: 1,
            book: StrategyBook::new(),
            players: Vec::new(),
            dealer: DealerHand::new(),
            state: RoundState::Idle,
            round: 0,
            insurance_offered: false,
            autoplay: false,
            latched: None,
            rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            events: VecDeque::new(),
            clock,
            log: SessionLog::new(clock()),
            last_result: None,
        }
    }

    /// Replaces the clock used for session timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.log = SessionLog::new(clock());
        self
    }

    /// Seats a player and returns its seat index.
    ///
    /// An unknown strategy name in the configuration falls back to the
    /// default table. A seat joining mid-round plays from the next round.
    pub fn join(&mut self, mut config: SeatConfig) -> usize {
        if !self.book.contains(&config.strategy) {
            log::warn!(
                "unknown playing strategy `{}`; using `{DEFAULT_STRATEGY}`",
                config.strategy
            );
            config.strategy = DEFAULT_STRATEGY.into();
        }
        self.players.push(Player::new(config));
        let seat = self.players.len() - 1;
        log::debug!("seat {seat} joined");
        seat
    }

    /// Selects a seat's playing strategy by name.
    ///
    /// An unknown name is not fatal: the seat falls back to `basic` and a
    /// warning is logged. Returns the name of the table now in use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SeatNotFound`] for an unknown seat.
    pub fn set_playing_strategy(&mut self, seat: usize, name: &str) -> Result<&str, ConfigError> {
        let known = self.book.contains(name);
        let player = self.players.get_mut(seat).ok_or(ConfigError::SeatNotFound)?;
        let config = player.config_mut();
        if known {
            name.clone_into(&mut config.strategy);
        } else {
            log::warn!("unknown playing strategy `{name}`; using `{DEFAULT_STRATEGY}`");
            DEFAULT_STRATEGY.clone_into(&mut config.strategy);
        }
        Ok(config.strategy.as_str())
    }

    /// Selects a seat's betting system by name, falling back to flat betting
    /// for an unknown name. Returns the system now in use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SeatNotFound`] for an unknown seat.
    pub fn set_betting_strategy(
        &mut self,
        seat: usize,
        name: &str,
    ) -> Result<BettingSystem, ConfigError> {
        let system = BettingSystem::from_name_or_default(name);
        self.set_betting_system(seat, system)?;
        Ok(system)
    }

    /// Sets a seat's betting system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SeatNotFound`] for an unknown seat.
    pub fn set_betting_system(
        &mut self,
        seat: usize,
        system: BettingSystem,
    ) -> Result<(), ConfigError> {
        let player = self.players.get_mut(seat).ok_or(ConfigError::SeatNotFound)?;
        player.config_mut().betting = system;
        Ok(())
    }

    /// Sets a seat's skill level for simulated play.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SeatNotFound`] for an unknown seat.
    pub fn set_skill(&mut self, seat: usize, skill: f64) -> Result<(), ConfigError> {
        let player = self.players.get_mut(seat).ok_or(ConfigError::SeatNotFound)?;
        player.config_mut().skill = if skill.is_nan() { 1.0 } else { skill.clamp(0.0, 1.0) };
        Ok(())
    }

    /// Replaces the table rules between rounds. A different deck count
    /// rebuilds the shoe, shuffled from a seed derived from the engine seed,
    /// and resets the count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RoundInProgress`] unless the engine is idle.
    pub fn set_rules(&mut self, rules: RulesConfig) -> Result<(), ConfigError> {
        if self.state != RoundState::Idle {
            return Err(ConfigError::RoundInProgress);
        }
        if rules.decks != self.rules.decks {
            let seed = self
                .seed
                .wrapping_add(self.shoes_built.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            self.shoes_built += 1;
            self.session = Session::new(rules.decks, seed);
            self.emit(Event::Reshuffled);
        }
        log::info!("rules changed: {rules:?}");
        self.rules = rules;
        Ok(())
    }

    /// Adds or replaces a named strategy table.
    pub fn register_strategy(&mut self, name: &str, table: StrategyTable) {
        self.book.register(name, table);
    }

    /// Returns the table rules.
    #[must_use]
    pub const fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Returns the round state.
    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.state
    }

    /// Returns the number of rounds started.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Returns the shoe and count.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the shoe and count mutably, e.g. to stack the shoe.
    pub const fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Returns the seats in turn order.
    #[must_use]
    pub fn seats(&self) -> &[Player] {
        &self.players
    }

    /// Returns one seat.
    #[must_use]
    pub fn seat(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    /// Returns the strategy tables.
    #[must_use]
    pub const fn book(&self) -> &StrategyBook {
        &self.book
    }

    /// Returns the round-by-round log.
    #[must_use]
    pub const fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Returns the result of the last settled round.
    #[must_use]
    pub const fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Returns whether insurance was offered this round.
    #[must_use]
    pub const fn insurance_offered(&self) -> bool {
        self.insurance_offered
    }

    /// Takes every event emitted since the last call, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..)
    }

    /// Bet sizing analysis for a seat at the current true count.
    #[must_use]
    pub fn bet_recommendation(&self, seat: usize) -> Option<BetRecommendation> {
        let player = self.players.get(seat)?;
        let ramp = match player.config().betting {
            BettingSystem::Count(ramp) => ramp,
            _ => Ramp::Standard,
        };
        Some(recommend_bet(
            self.session.true_count(),
            player.config().base_bet,
            player.balance(),
            player.initial_balance(),
            ramp,
        ))
    }

    /// Read-only view of the table for rendering.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        let cards_remaining = self.session.shoe().remaining();
        TableSnapshot {
            round: self.round,
            state: self.state,
            dealer_cards: self.dealer.visible_cards().to_vec(),
            dealer_value: self.dealer.visible_value(),
            seats: self
                .players
                .iter()
                .enumerate()
                .map(|(seat, player)| SeatView {
                    seat,
                    balance: player.balance(),
                    hands: player.hands().to_vec(),
                    stats: player.stats().clone(),
                })
                .collect(),
            running_count: self.session.counter().running_count(),
            true_count: self.session.true_count(),
            count_status: self.session.counter().status(cards_remaining),
            cards_remaining,
            autoplay: self.autoplay,
        }
    }

    fn emit(&mut self, event: Event) {
        log::debug!("{event:?}");
        self.events.push_back(event);
    }
}
