//! Error types for trainer operations.

use alloc::string::String;

use thiserror::Error;

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Seat not found.
    #[error("seat not found")]
    SeatNotFound,
    /// A seat cannot cover its bet; the round is aborted.
    #[error("seat {seat} cannot cover its bet")]
    InsufficientFunds {
        /// Index of the first seat that could not pay.
        seat: usize,
    },
    /// Invalid round state for betting.
    #[error("invalid round state for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// No seats have joined the table.
    #[error("no seats at the table")]
    NoSeats,
}

/// Errors that can occur during seat actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid round state for this action.
    #[error("invalid round state for this action")]
    InvalidState,
    /// Not this seat's turn.
    #[error("not this seat's turn")]
    NotYourTurn,
    /// Seat not found.
    #[error("seat not found")]
    SeatNotFound,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// Hand is not active.
    #[error("hand is not active")]
    HandNotActive,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Maximum splits reached.
    #[error("maximum splits reached")]
    MaxSplitsReached,
    /// Cannot surrender at this point.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
}

/// Errors that can occur during the insurance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsuranceError {
    /// Invalid round state for insurance.
    #[error("invalid round state for insurance")]
    InvalidState,
    /// Insurance is not offered this round.
    #[error("insurance is not offered this round")]
    NotOffered,
    /// Only the first seat in turn order decides insurance.
    #[error("seat {0} does not decide insurance")]
    NotDecider(usize),
    /// Insufficient funds for insurance.
    #[error("insufficient funds for insurance")]
    InsufficientFunds,
}

/// Errors that can occur while resolving the dealer and settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// Invalid round state for settlement.
    #[error("invalid round state for settlement")]
    InvalidState,
}

/// Configuration problems. Setters recover from these with a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No strategy table has this name.
    #[error("unknown playing strategy `{0}`")]
    UnknownStrategy(String),
    /// No betting system has this name.
    #[error("unknown betting system `{0}`")]
    UnknownBettingSystem(String),
    /// A strategy cell is outside the table or holds an action tables cannot recommend.
    #[error("invalid strategy table cell")]
    InvalidCell,
    /// Rules could not be parsed.
    #[error("invalid rules: {0}")]
    Parse(String),
    /// Seat not found.
    #[error("seat not found")]
    SeatNotFound,
    /// Rules can only change between rounds.
    #[error("rules cannot change during a round")]
    RoundInProgress,
}

/// Errors that can occur when preparing the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// More cards were stacked than the shoe holds.
    #[error("cannot stack {cards} cards in a shoe of {capacity}")]
    Overfull {
        /// Cards given.
        cards: usize,
        /// Shoe capacity.
        capacity: usize,
    },
}

/// Any error raised while the engine advances itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    /// Betting failed.
    #[error(transparent)]
    Bet(#[from] BetError),
    /// An autoplayed action failed.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// An autoplayed insurance decision failed.
    #[error(transparent)]
    Insurance(#[from] InsuranceError),
    /// Dealer play or settlement failed.
    #[error(transparent)]
    Settlement(#[from] SettlementError),
    /// A seat that is not autoplayed has to decide before the round can go on.
    #[error("waiting for seat {0} to decide")]
    AwaitingInput(usize),
}
