use serde::{Deserialize, Serialize};

use super::{Action, Upcard};
use crate::error::ConfigError;

const H: Action = Action::Hit;
const S: Action = Action::Stand;
const D: Action = Action::Double;
const P: Action = Action::Split;

const HARD_MIN: u8 = 4;
const SOFT_MIN: u8 = 12;

type Line = [Action; 10];

/// A row of a strategy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Row {
    /// Hard total, 4 to 21.
    Hard(u8),
    /// Soft total, 12 to 21.
    Soft(u8),
    /// Pair of a rank class, 1 (Aces) to 10.
    Pair(u8),
}

/// A complete playing strategy: hard totals, soft totals and pairs, each
/// against the ten dealer up-card columns (2 through Ace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyTable {
    hard: [Line; 18],
    soft: [Line; 10],
    pairs: [Line; 10],
}

impl StrategyTable {
    /// Standard multi-deck basic strategy (dealer stands on soft 17).
    //
    //                2  3  4  5  6  7  8  9  T  A
    pub const BASIC: Self = Self {
        hard: [
            [H, H, H, H, H, H, H, H, H, H], // 4
            [H, H, H, H, H, H, H, H, H, H], // 5
            [H, H, H, H, H, H, H, H, H, H], // 6
            [H, H, H, H, H, H, H, H, H, H], // 7
            [H, H, H, H, H, H, H, H, H, H], // 8
            [H, D, D, D, D, H, H, H, H, H], // 9
            [D, D, D, D, D, D, D, D, H, H], // 10
            [D, D, D, D, D, D, D, D, D, D], // 11
            [H, H, S, S, S, H, H, H, H, H], // 12
            [S, S, S, S, S, H, H, H, H, H], // 13
            [S, S, S, S, S, H, H, H, H, H], // 14
            [S, S, S, S, S, H, H, H, H, H], // 15
            [S, S, S, S, S, H, H, H, H, H], // 16
            [S, S, S, S, S, S, S, S, S, S], // 17
            [S, S, S, S, S, S, S, S, S, S], // 18
            [S, S, S, S, S, S, S, S, S, S], // 19
            [S, S, S, S, S, S, S, S, S, S], // 20
            [S, S, S, S, S, S, S, S, S, S], // 21
        ],
        soft: [
            [H, H, H, H, H, H, H, H, H, H], // A,A played as a total
            [H, H, H, D, D, H, H, H, H, H], // A,2
            [H, H, H, D, D, H, H, H, H, H], // A,3
            [H, H, D, D, D, H, H, H, H, H], // A,4
            [H, H, D, D, D, H, H, H, H, H], // A,5
            [H, D, D, D, D, H, H, H, H, H], // A,6
            [S, D, D, D, D, S, S, H, H, H], // A,7
            [S, S, S, S, S, S, S, S, S, S], // A,8
            [S, S, S, S, S, S, S, S, S, S], // A,9
            [S, S, S, S, S, S, S, S, S, S], // 21
        ],
        pairs: [
            [P, P, P, P, P, P, P, P, P, P], // A,A
            [P, P, P, P, P, H, H, H, H, H], // 2,2
            [P, P, P, P, P, H, H, H, H, H], // 3,3
            [H, H, H, P, P, H, H, H, H, H], // 4,4
            [D, D, D, D, D, D, D, D, D, D], // 5,5
            [P, P, P, P, P, H, H, H, H, H], // 6,6
            [P, P, P, P, P, P, H, H, H, H], // 7,7
            [P, P, P, P, P, P, P, P, P, P], // 8,8
            [P, P, P, P, P, S, P, P, S, S], // 9,9
            [S, S, S, S, S, S, S, S, S, S], // T,T
        ],
    };

    /// Aggressive team-play variant: doubles and splits more often against
    /// weak dealer cards, intended for positive counts.
    //
    //                2  3  4  5  6  7  8  9  T  A
    pub const TEAM_PLAY: Self = Self {
        hard: [
            [H, H, H, H, H, H, H, H, H, H], // 4
            [H, H, H, H, H, H, H, H, H, H], // 5
            [H, H, H, H, H, H, H, H, H, H], // 6
            [H, H, H, H, H, H, H, H, H, H], // 7
            [H, H, H, H, H, H, H, H, H, H], // 8
            [D, D, D, D, D, H, H, H, H, H], // 9
            [D, D, D, D, D, D, D, D, D, H], // 10
            [D, D, D, D, D, D, D, D, D, D], // 11
            [H, S, S, S, S, H, H, H, H, H], // 12
            [S, S, S, S, S, H, H, H, H, H], // 13
            [S, S, S, S, S, H, H, H, H, H], // 14
            [S, S, S, S, S, H, H, H, S, H], // 15
            [S, S, S, S, S, H, H, S, S, S], // 16
            [S, S, S, S, S, S, S, S, S, S], // 17
            [S, S, S, S, S, S, S, S, S, S], // 18
            [S, S, S, S, S, S, S, S, S, S], // 19
            [S, S, S, S, S, S, S, S, S, S], // 20
            [S, S, S, S, S, S, S, S, S, S], // 21
        ],
        soft: [
            [H, H, H, H, H, H, H, H, H, H], // A,A played as a total
            [H, H, D, D, D, H, H, H, H, H], // A,2
            [H, H, D, D, D, H, H, H, H, H], // A,3
            [H, H, D, D, D, H, H, H, H, H], // A,4
            [H, H, D, D, D, H, H, H, H, H], // A,5
            [D, D, D, D, D, H, H, H, H, H], // A,6
            [D, D, D, D, D, S, S, H, H, H], // A,7
            [S, S, S, D, D, S, S, S, S, S], // A,8
            [S, S, S, S, S, S, S, S, S, S], // A,9
            [S, S, S, S, S, S, S, S, S, S], // 21
        ],
        pairs: [
            [P, P, P, P, P, P, P, P, P, P], // A,A
            [P, P, P, P, P, P, H, H, H, H], // 2,2
            [P, P, P, P, P, P, H, H, H, H], // 3,3
            [H, H, P, P, P, H, H, H, H, H], // 4,4
            [D, D, D, D, D, D, D, D, H, H], // 5,5
            [P, P, P, P, P, P, H, H, H, H], // 6,6
            [P, P, P, P, P, P, P, H, H, H], // 7,7
            [P, P, P, P, P, P, P, P, P, P], // 8,8
            [P, P, P, P, P, P, P, P, S, S], // 9,9
            [S, S, S, P, P, S, S, S, S, S], // T,T
        ],
    };

    /// Returns the standard basic-strategy table.
    #[must_use]
    pub const fn basic() -> Self {
        Self::BASIC
    }

    /// Returns the team-play table.
    #[must_use]
    pub const fn team_play() -> Self {
        Self::TEAM_PLAY
    }

    fn line(&self, row: Row) -> Option<&Line> {
        match row {
            Row::Hard(total) => self.hard.get(usize::from(total.checked_sub(HARD_MIN)?)),
            Row::Soft(total) => self.soft.get(usize::from(total.checked_sub(SOFT_MIN)?)),
            Row::Pair(class) => self.pairs.get(usize::from(class.checked_sub(1)?)),
        }
    }

    /// Returns the action in a cell, or `None` if the row is outside the table.
    #[must_use]
    pub fn get(&self, row: Row, upcard: Upcard) -> Option<Action> {
        self.line(row).map(|line| line[upcard.index()])
    }

    /// Overrides one cell.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCell`] if the row is outside the table
    /// or the action is `Surrender`.
    pub fn set(&mut self, row: Row, upcard: Upcard, action: Action) -> Result<(), ConfigError> {
        if action == Action::Surrender {
            return Err(ConfigError::InvalidCell);
        }
        let line = match row {
            Row::Hard(total) => total
                .checked_sub(HARD_MIN)
                .and_then(|i| self.hard.get_mut(usize::from(i))),
            Row::Soft(total) => total
                .checked_sub(SOFT_MIN)
                .and_then(|i| self.soft.get_mut(usize::from(i))),
            Row::Pair(class) => class
                .checked_sub(1)
                .and_then(|i| self.pairs.get_mut(usize::from(i))),
        }
        .ok_or(ConfigError::InvalidCell)?;
        line[upcard.index()] = action;
        Ok(())
    }

    /// Builder form of [`Self::set`] that ignores invalid cells.
    #[must_use]
    pub fn with(mut self, row: Row, upcard: Upcard, action: Action) -> Self {
        if self.set(row, upcard, action).is_err() {
            log::warn!("ignoring invalid strategy cell {row:?} vs {upcard}");
        }
        self
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::BASIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_is_covered() {
        let table = StrategyTable::basic();
        for upcard in Upcard::ALL {
            for total in 4..=21 {
                assert!(table.get(Row::Hard(total), upcard).is_some());
            }
            for total in 12..=21 {
                assert!(table.get(Row::Soft(total), upcard).is_some());
            }
            for class in 1..=10 {
                assert!(table.get(Row::Pair(class), upcard).is_some());
            }
        }
        assert_eq!(table.get(Row::Hard(3), Upcard::Two), None);
        assert_eq!(table.get(Row::Soft(22), Upcard::Two), None);
    }

    #[test]
    fn known_cells() {
        let table = StrategyTable::basic();
        assert_eq!(table.get(Row::Hard(12), Upcard::Four), Some(Action::Stand));
        assert_eq!(table.get(Row::Hard(12), Upcard::Three), Some(Action::Hit));
        assert_eq!(table.get(Row::Hard(10), Upcard::Ten), Some(Action::Hit));
        assert_eq!(table.get(Row::Soft(18), Upcard::Nine), Some(Action::Hit));
        assert_eq!(table.get(Row::Pair(9), Upcard::Seven), Some(Action::Stand));
    }

    #[test]
    fn team_play_doubles_more() {
        let basic = StrategyTable::basic();
        let team = StrategyTable::team_play();
        assert_eq!(basic.get(Row::Hard(9), Upcard::Two), Some(Action::Hit));
        assert_eq!(team.get(Row::Hard(9), Upcard::Two), Some(Action::Double));
        assert_eq!(team.get(Row::Pair(10), Upcard::Six), Some(Action::Split));
    }

    #[test]
    fn cells_can_be_overridden() {
        let table = StrategyTable::basic().with(Row::Hard(16), Upcard::Ten, Action::Stand);
        assert_eq!(table.get(Row::Hard(16), Upcard::Ten), Some(Action::Stand));

        let mut table = StrategyTable::basic();
        assert_eq!(
            table.set(Row::Pair(11), Upcard::Two, Action::Split),
            Err(ConfigError::InvalidCell)
        );
        assert_eq!(
            table.set(Row::Hard(16), Upcard::Ten, Action::Surrender),
            Err(ConfigError::InvalidCell)
        );
    }
}
