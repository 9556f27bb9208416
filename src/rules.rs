//! Casino rule variations.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::round_amount;
use crate::shoe::DEFAULT_DECKS;

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// When surrender may be offered relative to the dealer's blackjack check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurrenderKind {
    /// After the dealer has checked for blackjack.
    #[default]
    Late,
    /// Before the dealer checks; honoured even against a dealer blackjack.
    Early,
}

/// Blackjack payout as a ratio of the bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayoutRatio {
    /// Numerator.
    pub numerator: u16,
    /// Denominator.
    pub denominator: u16,
}

impl PayoutRatio {
    /// Pays 3 to 2.
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    /// Pays 6 to 5.
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };

    /// Returns the ratio as a multiplier of the bet.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Winnings (excluding the returned stake) for `bet`, rounded with `mode`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    pub fn winnings(&self, bet: usize, mode: RoundingMode) -> usize {
        round_amount(bet as f64 * self.multiplier(), mode)
    }
}

impl Default for PayoutRatio {
    fn default() -> Self {
        Self::THREE_TO_TWO
    }
}

/// One rule's effect on the house edge, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeImpact {
    /// Human-readable rule name.
    pub rule: &'static str,
    /// Change in house edge; positive favours the house.
    pub points: f64,
}

/// Casino rules for a session.
///
/// Use the builder methods to customize rules:
///
/// ```
/// use bjtrainer::{PayoutRatio, RulesConfig};
///
/// let rules = RulesConfig::default()
///     .with_decks(6)
///     .with_dealer_hits_soft_17(true)
///     .with_blackjack_payout(PayoutRatio::SIX_TO_FIVE);
/// assert_eq!(rules.decks, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Whether the dealer hits soft 17.
    pub dealer_hits_soft_17: bool,
    /// Whether the dealer checks for blackjack under an Ace or ten up card.
    pub dealer_peeks: bool,
    /// Whether insurance is offered.
    pub insurance: bool,
    /// Whether surrender is allowed.
    pub surrender: bool,
    /// Late or early surrender.
    pub surrender_kind: SurrenderKind,
    /// Whether double down is allowed after split.
    pub double_after_split: bool,
    /// Whether split Aces may be split again.
    pub resplit_aces: bool,
    /// Blackjack payout ratio.
    pub blackjack_payout: PayoutRatio,
    /// Maximum number of splits per seat per round.
    pub max_splits: u8,
    /// Reshuffle before a round when fewer cards than this remain.
    pub reshuffle_threshold: usize,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Rounding mode for surrender refunds.
    pub rounding_surrender: RoundingMode,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            decks: DEFAULT_DECKS,
            dealer_hits_soft_17: false,
            dealer_peeks: true,
            insurance: true,
            surrender: true,
            surrender_kind: SurrenderKind::Late,
            double_after_split: true,
            resplit_aces: false,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            max_splits: 4,
            reshuffle_threshold: 52,
            rounding_blackjack: RoundingMode::Down,
            rounding_surrender: RoundingMode::Nearest,
        }
    }
}

impl RulesConfig {
    /// Six-deck Las Vegas Strip rules: dealer stands on soft 17, late
    /// surrender, double after split, three splits.
    #[must_use]
    pub fn vegas() -> Self {
        Self::default().with_decks(6).with_max_splits(3)
    }

    /// A 6:5 table where the dealer hits soft 17 and surrender is not offered.
    #[must_use]
    pub fn six_to_five() -> Self {
        Self::default()
            .with_blackjack_payout(PayoutRatio::SIX_TO_FIVE)
            .with_dealer_hits_soft_17(true)
            .with_surrender(false)
    }

    /// Parses rules from JSON. Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the input is not valid rules JSON.
    ///
    /// ```
    /// use bjtrainer::RulesConfig;
    ///
    /// let rules = RulesConfig::from_json(r#"{ "decks": 2, "surrender": false }"#).unwrap();
    /// assert_eq!(rules.decks, 2);
    /// assert!(!rules.surrender);
    /// assert!(rules.insurance);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::Parse(alloc::format!("{err}")))
    }

    /// Sets the number of decks.
    ///
    /// ```
    /// use bjtrainer::RulesConfig;
    ///
    /// let rules = RulesConfig::default().with_decks(6);
    /// assert_eq!(rules.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets whether the dealer hits soft 17.
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets whether the dealer peeks for blackjack.
    #[must_use]
    pub const fn with_dealer_peeks(mut self, peeks: bool) -> Self {
        self.dealer_peeks = peeks;
        self
    }

    /// Sets whether insurance is offered.
    ///
    /// ```
    /// use bjtrainer::RulesConfig;
    ///
    /// let rules = RulesConfig::default().with_insurance(false);
    /// assert!(!rules.insurance);
    /// ```
    #[must_use]
    pub const fn with_insurance(mut self, offered: bool) -> Self {
        self.insurance = offered;
        self
    }

    /// Sets whether surrender is allowed.
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets the surrender kind.
    #[must_use]
    pub const fn with_surrender_kind(mut self, kind: SurrenderKind) -> Self {
        self.surrender_kind = kind;
        self
    }

    /// Sets whether double down is allowed after split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets whether Aces may be resplit.
    #[must_use]
    pub const fn with_resplit_aces(mut self, allowed: bool) -> Self {
        self.resplit_aces = allowed;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// ```
    /// use bjtrainer::{PayoutRatio, RulesConfig};
    ///
    /// let rules = RulesConfig::default().with_blackjack_payout(PayoutRatio::SIX_TO_FIVE);
    /// assert_eq!(rules.blackjack_payout, PayoutRatio::SIX_TO_FIVE);
    /// ```
    #[must_use]
    pub const fn with_blackjack_payout(mut self, ratio: PayoutRatio) -> Self {
        self.blackjack_payout = ratio;
        self
    }

    /// Sets the maximum number of splits.
    #[must_use]
    pub const fn with_max_splits(mut self, splits: u8) -> Self {
        self.max_splits = splits;
        self
    }

    /// Sets the reshuffle threshold in cards.
    #[must_use]
    pub const fn with_reshuffle_threshold(mut self, cards: usize) -> Self {
        self.reshuffle_threshold = cards;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }

    /// Returns whether the dealer must draw on `total`.
    #[must_use]
    pub const fn dealer_hits(&self, total: u8, soft: bool) -> bool {
        total < 17 || (total == 17 && soft && self.dealer_hits_soft_17)
    }

    /// Returns whether insurance is offered against `up_card_class`.
    #[must_use]
    pub const fn offers_insurance(&self, up_card_class: u8) -> bool {
        self.insurance && up_card_class == 1
    }

    /// Returns whether the dealer checks for blackjack against `up_card_class`.
    #[must_use]
    pub const fn peeks_at(&self, up_card_class: u8) -> bool {
        self.dealer_peeks && (up_card_class == 1 || up_card_class == 10)
    }

    /// Lists how each rule in this configuration moves the house edge.
    #[must_use]
    pub fn house_edge_impact(&self) -> Vec<EdgeImpact> {
        let mut impact = Vec::new();
        let mut push = |rule, points| impact.push(EdgeImpact { rule, points });

        if self.dealer_hits_soft_17 {
            push("Dealer hits soft 17", 0.22);
        } else {
            push("Dealer stands on soft 17", 0.0);
        }
        if self.surrender {
            match self.surrender_kind {
                SurrenderKind::Late => push("Late surrender", -0.08),
                SurrenderKind::Early => push("Early surrender", -0.39),
            }
        }
        if !self.double_after_split {
            push("No double after split", 0.14);
        }
        if !self.resplit_aces {
            push("No resplit aces", 0.03);
        }
        if self.blackjack_payout == PayoutRatio::SIX_TO_FIVE {
            push("Blackjack pays 6:5", 1.39);
        }

        impact
    }

    /// Sum of [`Self::house_edge_impact`].
    #[must_use]
    pub fn house_edge_adjustment(&self) -> f64 {
        self.house_edge_impact().iter().map(|i| i.points).sum()
    }
}
