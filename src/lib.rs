//! A multi-seat blackjack trainer core with optional `no_std` support.
//!
//! The crate provides a [`RoundEngine`] that runs rounds for any number of
//! seats against one dealer: betting, dealing, insurance, seat turns with
//! splits, dealer play and settlement. Alongside it sit the pieces a trainer
//! needs: basic-strategy recommendations, a Hi-Lo running and true count,
//! betting systems, and per-seat statistics with a session export.
//!
//! The engine never blocks. Presentation code submits intents and calls
//! [`RoundEngine::step`] to advance autoplayed seats and the dealer one
//! transition at a time.
//!
//! # Example
//!
//! ```
//! use bjtrainer::{RoundEngine, RulesConfig, SeatConfig};
//!
//! let mut engine = RoundEngine::new(RulesConfig::vegas(), 42);
//! let seat = engine.join(SeatConfig::default().with_balance(500));
//! engine.place_bet(seat, 25).unwrap();
//! engine.start_round().unwrap();
//! engine.deal().unwrap();
//! assert_eq!(engine.seat(seat).unwrap().round_bet(), 25);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod betting;
pub mod card;
pub mod count;
pub mod engine;
pub mod error;
pub mod hand;
mod math;
pub mod odds;
pub mod player;
pub mod policy;
pub mod result;
pub mod rules;
pub mod session;
pub mod shoe;
pub mod stats;
pub mod strategy;

// Re-export main types
pub use betting::{BetRecommendation, BettingSystem, Ramp};
pub use card::{Card, DECK_SIZE, Suit};
pub use count::{CardCounter, CountStatus};
pub use engine::{
    DealerStep, Event, Recipient, RoundEngine, RoundState, Step, TableSnapshot, TurnPosition,
};
pub use error::{
    ActionError, BetError, ConfigError, InsuranceError, SettlementError, ShoeError, StepError,
};
pub use hand::{DealerHand, Decision, Hand, HandStatus, HandValue, evaluate};
pub use player::{Player, SeatConfig};
pub use result::{HandOutcome, HandResult, RoundResult, SeatResult};
pub use rules::{PayoutRatio, RoundingMode, RulesConfig, SurrenderKind};
pub use session::Session;
pub use shoe::Shoe;
pub use stats::{PlayerStatistics, SessionLog, SessionSummary};
pub use strategy::{Action, HandKind, Recommendation, StrategyBook, StrategyTable, Upcard};
