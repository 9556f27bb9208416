//! Basic-strategy recommendations.
//!
//! A [`StrategyTable`] maps a hand and the dealer's up card to an [`Action`].
//! Tables are selected by name from a [`StrategyBook`]; an unknown name falls
//! back to [`DEFAULT_STRATEGY`].

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Card;
use crate::error::ConfigError;
use crate::hand::{HandValue, evaluate};

mod explain;
mod tables;

pub use explain::explain;
pub use tables::{Row, StrategyTable};

/// Name of the table used when none (or an unknown one) is selected.
pub const DEFAULT_STRATEGY: &str = "basic";

/// Name of the aggressive team-play table.
pub const TEAM_PLAY_STRATEGY: &str = "team_play";

/// A playing decision.
///
/// Tables only ever recommend `Hit`, `Stand`, `Double` or `Split`;
/// `Surrender` exists so a seat's chosen actions can be recorded alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take another card.
    Hit,
    /// Keep the current hand.
    Stand,
    /// Double the bet and take exactly one card.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Give up half the bet.
    Surrender,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "Hit",
            Self::Stand => "Stand",
            Self::Double => "Double Down",
            Self::Split => "Split",
            Self::Surrender => "Surrender",
        })
    }
}

/// The dealer's up card as a strategy-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Upcard {
    /// 2.
    Two,
    /// 3.
    Three,
    /// 4.
    Four,
    /// 5.
    Five,
    /// 6.
    Six,
    /// 7.
    Seven,
    /// 8.
    Eight,
    /// 9.
    Nine,
    /// 10, J, Q or K.
    Ten,
    /// Ace.
    Ace,
}

impl Upcard {
    /// All columns in table order.
    pub const ALL: [Self; 10] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Ace,
    ];

    /// Returns the column for a dealer card.
    #[must_use]
    pub const fn of(card: &Card) -> Self {
        match card.class() {
            1 => Self::Ace,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            5 => Self::Five,
            6 => Self::Six,
            7 => Self::Seven,
            8 => Self::Eight,
            9 => Self::Nine,
            _ => Self::Ten,
        }
    }

    /// Column index, 0 for a 2 up to 9 for an Ace.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank class of the up card (1 for an Ace).
    #[must_use]
    pub const fn class(self) -> u8 {
        match self {
            Self::Ace => 1,
            other => other as u8 + 2,
        }
    }

    /// Returns whether the dealer shows 2 through 6.
    #[must_use]
    pub const fn is_weak(self) -> bool {
        (self as u8) <= (Self::Six as u8)
    }
}

impl fmt::Display for Upcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ace => f.write_str("A"),
            other => write!(f, "{}", other.class()),
        }
    }
}

/// Which table a hand is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandKind {
    /// No Ace counted as 11.
    Hard,
    /// An Ace counted as 11.
    Soft,
    /// Two cards of the same rank class.
    Pair,
}

impl HandKind {
    /// Classifies a hand, treating pairs as hard/soft when `ignore_pairs`.
    #[must_use]
    pub fn classify(cards: &[Card], ignore_pairs: bool) -> Self {
        if !ignore_pairs && is_pair(cards) {
            Self::Pair
        } else if evaluate(cards).soft {
            Self::Soft
        } else {
            Self::Hard
        }
    }

    /// Short description such as `Pair of 8s`, `Soft 17` or `Hard 12`.
    #[must_use]
    pub fn describe(cards: &[Card]) -> String {
        let value = evaluate(cards);
        match Self::classify(cards, false) {
            Self::Pair => match cards[0].class() {
                1 => "Pair of Aces".to_owned(),
                class => alloc::format!("Pair of {class}s"),
            },
            Self::Soft => alloc::format!("Soft {}", value.total),
            Self::Hard => alloc::format!("Hard {}", value.total),
        }
    }
}

fn is_pair(cards: &[Card]) -> bool {
    cards.len() == 2 && cards[0].class() == cards[1].class()
}

/// What the current hand may structurally do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    /// Splitting is legal (pair, funds, split limit).
    pub can_split: bool,
    /// Doubling is legal (two cards, funds, double-after-split rule).
    pub can_double: bool,
}

impl Availability {
    /// Everything allowed.
    pub const ALL: Self = Self {
        can_split: true,
        can_double: true,
    };
}

/// A recommendation together with the table it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    /// The advised action.
    pub action: Action,
    /// The table the action was read from.
    pub kind: HandKind,
    /// The evaluated hand.
    pub value: HandValue,
}

impl StrategyTable {
    /// Raw table lookup with the forced overrides applied: 21 or more
    /// stands, a hard 8 or less hits. Cells outside the table hit.
    #[must_use]
    pub fn lookup(&self, cards: &[Card], upcard: Upcard, ignore_pairs: bool) -> Recommendation {
        let value = evaluate(cards);
        let kind = HandKind::classify(cards, ignore_pairs);

        let row = match kind {
            HandKind::Pair => Row::Pair(cards[0].class()),
            HandKind::Soft => Row::Soft(value.total),
            HandKind::Hard => Row::Hard(value.total),
        };
        let mut action = self.get(row, upcard).unwrap_or(Action::Hit);

        if value.total >= 21 {
            action = Action::Stand;
        } else if kind == HandKind::Hard && value.total <= 8 {
            action = Action::Hit;
        }

        Recommendation { action, kind, value }
    }

    /// Recommends an action that is legal for the hand.
    ///
    /// A `Split` the seat cannot make is replaced by the hard/soft table
    /// action; a `Double` it cannot make becomes `Hit`, or `Stand` on soft
    /// 18 and above.
    #[must_use]
    pub fn recommend(
        &self,
        cards: &[Card],
        upcard: Upcard,
        availability: Availability,
    ) -> Recommendation {
        let mut recommendation = self.lookup(cards, upcard, false);

        if recommendation.action == Action::Split && !availability.can_split {
            recommendation = self.lookup(cards, upcard, true);
        }

        if recommendation.action == Action::Double && !availability.can_double {
            let value = recommendation.value;
            recommendation.action = if value.soft && value.total >= 18 {
                Action::Stand
            } else {
                Action::Hit
            };
        }

        recommendation
    }
}

/// Named strategy tables.
#[derive(Debug, Clone)]
pub struct StrategyBook {
    tables: HashMap<String, StrategyTable>,
}

impl StrategyBook {
    /// Creates a book holding the built-in `basic` and `team_play` tables.
    #[must_use]
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        tables.insert(DEFAULT_STRATEGY.to_owned(), StrategyTable::basic());
        tables.insert(TEAM_PLAY_STRATEGY.to_owned(), StrategyTable::team_play());
        Self { tables }
    }

    /// Adds or replaces a named table.
    pub fn register(&mut self, name: &str, table: StrategyTable) {
        self.tables.insert(name.to_owned(), table);
    }

    /// Returns whether a table with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Looks up a table by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownStrategy`] if no table has that name.
    pub fn get(&self, name: &str) -> Result<&StrategyTable, ConfigError> {
        self.tables
            .get(name)
            .ok_or_else(|| ConfigError::UnknownStrategy(name.to_owned()))
    }

    /// Looks up a table by name, falling back to [`DEFAULT_STRATEGY`].
    #[must_use]
    pub fn resolve(&self, name: &str) -> &StrategyTable {
        match self.get(name) {
            Ok(table) => table,
            Err(err) => {
                log::warn!("{err}; using `{DEFAULT_STRATEGY}`");
                self.tables
                    .get(DEFAULT_STRATEGY)
                    .unwrap_or(&StrategyTable::BASIC)
            }
        }
    }
}

impl Default for StrategyBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn cards(ranks: &[u8]) -> alloc::vec::Vec<Card> {
        ranks.iter().map(|&rank| Card::new(Suit::Diamonds, rank)).collect()
    }

    #[test]
    fn soft_seventeen_doubles_against_six() {
        let table = StrategyTable::basic();
        let rec = table.recommend(&cards(&[1, 6]), Upcard::Six, Availability::ALL);
        assert_eq!(rec.kind, HandKind::Soft);
        assert_eq!(rec.action, Action::Double);
    }

    #[test]
    fn eights_split_against_five() {
        let table = StrategyTable::basic();
        let rec = table.recommend(&cards(&[8, 8]), Upcard::Five, Availability::ALL);
        assert_eq!(rec.kind, HandKind::Pair);
        assert_eq!(rec.action, Action::Split);
    }

    #[test]
    fn unavailable_split_falls_back_to_totals() {
        let table = StrategyTable::basic();
        let no_split = Availability {
            can_split: false,
            can_double: true,
        };
        let rec = table.recommend(&cards(&[8, 8]), Upcard::Five, no_split);
        assert_eq!(rec.kind, HandKind::Hard);
        assert_eq!(rec.action, Action::Stand);

        let rec = table.recommend(&cards(&[1, 1]), Upcard::Six, no_split);
        assert_eq!(rec.kind, HandKind::Soft);
        assert_eq!(rec.action, Action::Hit);
    }

    #[test]
    fn unavailable_double_hits_or_stands() {
        let table = StrategyTable::basic();
        let no_double = Availability {
            can_split: true,
            can_double: false,
        };
        assert_eq!(
            table.recommend(&cards(&[6, 5]), Upcard::Four, no_double).action,
            Action::Hit
        );
        assert_eq!(
            table.recommend(&cards(&[1, 7]), Upcard::Four, no_double).action,
            Action::Stand
        );
    }

    #[test]
    fn overrides_apply_to_totals() {
        let table = StrategyTable::basic();
        assert_eq!(
            table.lookup(&cards(&[7, 7, 7]), Upcard::Ace, false).action,
            Action::Stand
        );
        assert_eq!(
            table.lookup(&cards(&[3, 5]), Upcard::Six, false).action,
            Action::Hit
        );
        // A pair of 4s is read from the pair table, not forced to hit.
        assert_eq!(
            table.lookup(&cards(&[4, 4]), Upcard::Five, false).action,
            Action::Split
        );
    }

    #[test]
    fn court_cards_pair_with_tens() {
        let table = StrategyTable::basic();
        let rec = table.lookup(&cards(&[10, 13]), Upcard::Six, false);
        assert_eq!(rec.kind, HandKind::Pair);
        assert_eq!(rec.action, Action::Stand);
    }

    #[test]
    fn unknown_strategy_falls_back_to_basic() {
        let book = StrategyBook::new();
        assert!(matches!(
            book.get("martian"),
            Err(ConfigError::UnknownStrategy(_))
        ));
        assert_eq!(book.resolve("martian"), &StrategyTable::basic());
        assert_eq!(book.resolve(TEAM_PLAY_STRATEGY), &StrategyTable::team_play());
    }

    #[test]
    fn upcard_columns() {
        assert_eq!(Upcard::of(&Card::new(Suit::Clubs, 12)), Upcard::Ten);
        assert_eq!(Upcard::of(&Card::new(Suit::Clubs, 1)), Upcard::Ace);
        assert_eq!(Upcard::Seven.class(), 7);
        assert_eq!(Upcard::Ace.class(), 1);
        assert!(Upcard::Six.is_weak());
        assert!(!Upcard::Seven.is_weak());
    }

    #[test]
    fn descriptions() {
        assert_eq!(HandKind::describe(&cards(&[8, 8])), "Pair of 8s");
        assert_eq!(HandKind::describe(&cards(&[1, 1])), "Pair of Aces");
        assert_eq!(HandKind::describe(&cards(&[1, 6])), "Soft 17");
        assert_eq!(HandKind::describe(&cards(&[10, 2])), "Hard 12");
    }
}
