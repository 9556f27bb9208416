//! Bet sizing: progression systems, the true-count ramp, Kelly sizing and
//! risk of ruin.

use alloc::borrow::ToOwned;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math;

/// Blackjack variance per hand used by the Kelly fraction.
pub const VARIANCE: f64 = 1.26;

/// Fraction of full Kelly actually bet.
pub const KELLY_FACTOR: f64 = 0.25;

/// Player advantage per point of true count.
pub const ADVANTAGE_PER_COUNT: f64 = 0.005;

/// Net result of a seat's previous round, as seen by a progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatOutcome {
    /// The seat finished the round ahead.
    Win,
    /// The seat finished the round behind.
    Loss,
    /// The seat broke even.
    Push,
}

impl SeatOutcome {
    /// Classifies a round's net result.
    #[must_use]
    pub const fn from_net(net: isize) -> Self {
        if net > 0 {
            Self::Win
        } else if net < 0 {
            Self::Loss
        } else {
            Self::Push
        }
    }
}

/// True-count betting ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ramp {
    /// 1-2-4-6-8-10 units, topping out above a true count of 5.
    #[default]
    Standard,
    /// 1-2-4-6-8 units, topping out above a true count of 4.
    Conservative,
}

impl Ramp {
    /// Units of the base bet for a true count.
    #[must_use]
    pub fn units(self, true_count: f64) -> usize {
        let ceiling = match self {
            Self::Standard => 10,
            Self::Conservative => 8,
        };
        let units = if true_count <= 1.0 {
            1
        } else if true_count <= 2.0 {
            2
        } else if true_count <= 3.0 {
            4
        } else if true_count <= 4.0 {
            6
        } else if true_count <= 5.0 {
            8
        } else {
            10
        };
        units.min(ceiling)
    }
}

/// How a seat sizes its next bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BettingSystem {
    /// Always the base bet.
    #[default]
    Flat,
    /// Double after every loss, back to base after a win.
    Martingale,
    /// Double after every win for up to three wins, back to base after a loss.
    Paroli,
    /// 1, 3, 2, 6 units across consecutive wins.
    OneThreeTwoSix,
    /// Size by the true count, capped by Kelly and the bankroll.
    Count(Ramp),
}

impl BettingSystem {
    /// Parses a betting system name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownBettingSystem`] for an unrecognised name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "martingale" => Ok(Self::Martingale),
            "paroli" => Ok(Self::Paroli),
            "1-3-2-6" | "1326" | "one_three_two_six" => Ok(Self::OneThreeTwoSix),
            "count" | "hi-lo" | "hilo" => Ok(Self::Count(Ramp::Standard)),
            "count_conservative" | "conservative" => Ok(Self::Count(Ramp::Conservative)),
            _ => Err(ConfigError::UnknownBettingSystem(name.to_owned())),
        }
    }

    /// Parses a name, falling back to [`BettingSystem::Flat`].
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|err| {
            log::warn!("{err}; using flat betting");
            Self::Flat
        })
    }

    /// Next bet for a progression system, before clamping.
    ///
    /// `previous` is the last round's outcome and bet; `None` starts at the
    /// base bet. Count-based sizing ignores the progression and returns the
    /// base bet here; see [`BetInputs`].
    #[must_use]
    pub fn progression(self, previous: Option<(SeatOutcome, usize)>, base: usize) -> usize {
        let Some((outcome, last)) = previous else {
            return base;
        };
        if last == 0 {
            return base;
        }
        match (self, outcome) {
            (Self::Flat | Self::Count(_), _) => base,
            (_, SeatOutcome::Push) => last,
            (Self::Martingale, SeatOutcome::Loss) => last.saturating_mul(2),
            (Self::Martingale, SeatOutcome::Win) => base,
            (Self::Paroli, SeatOutcome::Win) => {
                if last < base.saturating_mul(4) {
                    last.saturating_mul(2)
                } else {
                    base
                }
            }
            (Self::Paroli, SeatOutcome::Loss) => base,
            (Self::OneThreeTwoSix, SeatOutcome::Win) => {
                let units = if base == 0 { 0 } else { last / base };
                let next = match units {
                    1 => 3,
                    3 => 2,
                    2 => 6,
                    _ => 1,
                };
                base.saturating_mul(next)
            }
            (Self::OneThreeTwoSix, SeatOutcome::Loss) => base,
        }
    }

    /// Computes the next bet, clamped to the available balance.
    #[must_use]
    pub fn next_bet(self, inputs: &BetInputs) -> usize {
        let bet = match self {
            Self::Count(ramp) => {
                let recommendation = recommend_bet(
                    inputs.true_count,
                    inputs.base,
                    inputs.balance,
                    inputs.initial_balance,
                    ramp,
                );
                math::round_amount(recommendation.recommended, crate::rules::RoundingMode::Down)
                    .max(1)
            }
            _ => self.progression(inputs.previous, inputs.base),
        };
        bet.min(inputs.balance)
    }
}

/// Everything a betting system may look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetInputs {
    /// Previous round outcome and bet.
    pub previous: Option<(SeatOutcome, usize)>,
    /// Base betting unit.
    pub base: usize,
    /// Current balance.
    pub balance: usize,
    /// Balance at the start of the session.
    pub initial_balance: usize,
    /// Current true count.
    pub true_count: f64,
}

/// Bet sizing analysis for a true count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetRecommendation {
    /// `min(count_based, kelly, bankroll)`.
    pub recommended: f64,
    /// Ramp units times the base bet.
    pub count_based: f64,
    /// Quarter-Kelly bet.
    pub kelly: f64,
    /// The base bet used.
    pub base_bet: f64,
    /// The true count used.
    pub true_count: f64,
    /// Estimated player advantage, in percent.
    pub advantage: f64,
    /// Risk of ruin at the recommended bet, in percent.
    pub risk_of_ruin: f64,
    /// Recommended bet as a percentage of the bankroll.
    pub percent_of_bankroll: f64,
}

/// Betting unit: 1% of the bankroll, never below 1% of the starting bankroll.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "f64 has sufficient precision for monetary values"
)]
pub fn base_unit(bankroll: usize, initial_bankroll: usize) -> f64 {
    (initial_bankroll as f64 / 100.0).max(bankroll as f64 / 100.0)
}

/// Quarter-Kelly bet for an advantage (as a fraction, e.g. 0.01 for 1%).
///
/// With no advantage this is the base unit.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "f64 has sufficient precision for monetary values"
)]
pub fn kelly_bet(advantage: f64, bankroll: usize, base_unit: f64) -> f64 {
    if advantage <= 0.0 {
        return base_unit;
    }
    let fraction = advantage / VARIANCE * KELLY_FACTOR;
    base_unit.max(bankroll as f64 * fraction)
}

/// Probability of losing the whole bankroll, in percent.
///
/// Saturates instead of failing: 100 when the bet covers the bankroll, 0 when
/// the advantage is not negative or nothing is bet.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "f64 has sufficient precision for monetary values"
)]
pub fn risk_of_ruin(bet: f64, bankroll: usize, advantage: f64) -> f64 {
    let bankroll = bankroll as f64;
    if bet >= bankroll {
        return 100.0;
    }
    if bet <= 0.0 || advantage >= 0.0 || advantage.is_nan() {
        return 0.0;
    }
    let edge = math::abs(advantage);
    if edge >= 1.0 {
        return 100.0;
    }
    let ratio = (1.0 - edge) / (1.0 + edge);
    let ror = math::powf(ratio, bankroll / bet) * 100.0;
    if ror.is_nan() { 100.0 } else { ror.clamp(0.0, 100.0) }
}

/// Full bet sizing analysis.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "f64 has sufficient precision for monetary values"
)]
pub fn recommend_bet(
    true_count: f64,
    base_bet: usize,
    bankroll: usize,
    initial_bankroll: usize,
    ramp: Ramp,
) -> BetRecommendation {
    let base = base_bet as f64;
    let count_based = base * ramp.units(true_count) as f64;
    let advantage = true_count * ADVANTAGE_PER_COUNT;
    let kelly = kelly_bet(advantage, bankroll, base_unit(bankroll, initial_bankroll));
    let recommended = count_based.min(kelly).min(bankroll as f64);

    let percent_of_bankroll = if bankroll == 0 {
        0.0
    } else {
        recommended / bankroll as f64 * 100.0
    };

    BetRecommendation {
        recommended,
        count_based,
        kelly,
        base_bet: base,
        true_count,
        advantage: advantage * 100.0,
        risk_of_ruin: risk_of_ruin(recommended, bankroll, advantage),
        percent_of_bankroll,
    }
}
