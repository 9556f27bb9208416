//! Seats at the table.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::betting::{BetInputs, BettingSystem, SeatOutcome};
use crate::hand::{Hand, HandStatus};
use crate::result::HandResult;
use crate::stats::PlayerStatistics;
use crate::strategy::DEFAULT_STRATEGY;

/// How a seat plays and bets.
///
/// ```
/// use bjtrainer::{BettingSystem, SeatConfig};
///
/// let seat = SeatConfig::default()
///     .with_balance(500)
///     .with_base_bet(25)
///     .with_betting(BettingSystem::Martingale)
///     .with_skill(0.8);
/// assert_eq!(seat.base_bet, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatConfig {
    /// Starting balance.
    pub balance: usize,
    /// Base betting unit.
    pub base_bet: usize,
    /// Bet sizing system.
    pub betting: BettingSystem,
    /// Name of the playing strategy table.
    pub strategy: String,
    /// Probability (0 to 1) that a simulated seat follows the recommendation.
    pub skill: f64,
    /// Whether the engine always plays this seat itself.
    pub autoplay: bool,
}

impl Default for SeatConfig {
    fn default() -> Self {
        Self {
            balance: 1_000,
            base_bet: 10,
            betting: BettingSystem::Flat,
            strategy: DEFAULT_STRATEGY.to_owned(),
            skill: 1.0,
            autoplay: false,
        }
    }
}

impl SeatConfig {
    /// Sets the starting balance.
    #[must_use]
    pub fn with_balance(mut self, balance: usize) -> Self {
        self.balance = balance;
        self
    }

    /// Sets the base bet.
    #[must_use]
    pub fn with_base_bet(mut self, base_bet: usize) -> Self {
        self.base_bet = base_bet;
        self
    }

    /// Sets the betting system.
    #[must_use]
    pub fn with_betting(mut self, betting: BettingSystem) -> Self {
        self.betting = betting;
        self
    }

    /// Sets the playing strategy by table name.
    #[must_use]
    pub fn with_strategy(mut self, name: &str) -> Self {
        name.clone_into(&mut self.strategy);
        self
    }

    /// Sets the skill level, clamped to `0..=1`.
    #[must_use]
    pub fn with_skill(mut self, skill: f64) -> Self {
        self.skill = skill.clamp(0.0, 1.0);
        self
    }

    /// Makes this a simulated seat.
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }
}

/// A seat: balance, this round's hands and running statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    config: SeatConfig,
    balance: usize,
    initial_balance: usize,
    hands: Vec<Hand>,
    stats: PlayerStatistics,
    pending_bet: Option<usize>,
    round_bet: usize,
    previous: Option<(SeatOutcome, usize)>,
}

impl Player {
    /// Seats a player with its configuration.
    #[must_use]
    pub fn new(config: SeatConfig) -> Self {
        Self {
            balance: config.balance,
            initial_balance: config.balance,
            config,
            hands: Vec::new(),
            stats: PlayerStatistics::default(),
            pending_bet: None,
            round_bet: 0,
            previous: None,
        }
    }

    /// Returns the seat configuration.
    #[must_use]
    pub const fn config(&self) -> &SeatConfig {
        &self.config
    }

    pub(crate) const fn config_mut(&mut self) -> &mut SeatConfig {
        &mut self.config
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> usize {
        self.balance
    }

    /// Returns the balance the seat started with.
    #[must_use]
    pub const fn initial_balance(&self) -> usize {
        self.initial_balance
    }

    /// Returns this round's hands.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns one of this round's hands.
    #[must_use]
    pub fn hand(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }

    pub(crate) const fn hands_mut(&mut self) -> &mut Vec<Hand> {
        &mut self.hands
    }

    /// Returns the running statistics.
    #[must_use]
    pub const fn stats(&self) -> &PlayerStatistics {
        &self.stats
    }

    pub(crate) const fn stats_mut(&mut self) -> &mut PlayerStatistics {
        &mut self.stats
    }

    /// Returns the bet placed for the next round, if one was placed manually.
    #[must_use]
    pub const fn pending_bet(&self) -> Option<usize> {
        self.pending_bet
    }

    pub(crate) const fn set_pending_bet(&mut self, amount: Option<usize>) {
        self.pending_bet = amount;
    }

    /// Returns the opening bet of the current or last round.
    #[must_use]
    pub const fn round_bet(&self) -> usize {
        self.round_bet
    }

    /// Returns the last round's outcome and opening bet.
    #[must_use]
    pub const fn previous(&self) -> Option<(SeatOutcome, usize)> {
        self.previous
    }

    /// Number of splits made this round.
    #[must_use]
    pub fn splits(&self) -> usize {
        self.hands.len().saturating_sub(1)
    }

    /// Bet for the next round: the manual bet if one was placed, otherwise
    /// whatever the betting system asks for.
    #[must_use]
    pub fn next_bet(&self, true_count: f64) -> usize {
        if let Some(amount) = self.pending_bet {
            return amount;
        }
        let inputs = BetInputs {
            previous: self.previous,
            base: self.config.base_bet,
            balance: self.balance,
            initial_balance: self.initial_balance,
            true_count,
        };
        self.config.betting.next_bet(&inputs)
    }

    /// Debits a stake. Returns `false`, leaving the balance untouched, if the
    /// seat cannot cover it.
    pub(crate) const fn debit(&mut self, amount: usize) -> bool {
        if amount > self.balance {
            return false;
        }
        self.balance -= amount;
        true
    }

    pub(crate) const fn credit(&mut self, amount: usize) {
        self.balance += amount;
    }

    /// Opens a round with a single empty hand carrying `bet`.
    pub(crate) fn open_round(&mut self, bet: usize) {
        self.hands.clear();
        self.hands.push(Hand::new(bet));
        self.round_bet = bet;
        self.pending_bet = None;
    }

    pub(crate) const fn close_round(&mut self, net: isize) {
        self.previous = Some((SeatOutcome::from_net(net), self.round_bet));
    }

    /// Tallies this round's settled hands, paired in order with `results`.
    pub(crate) fn record_results(&mut self, results: &[HandResult]) {
        for (hand, result) in self.hands.iter().zip(results) {
            self.stats.record_hand(
                result.outcome,
                hand.status() == HandStatus::Bust,
                result.bet,
                result.returned,
                hand.decisions(),
            );
        }
    }
}
