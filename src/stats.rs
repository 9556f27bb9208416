//! Per-seat statistics and the session log.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::hand::Decision;
use crate::result::HandOutcome;

/// Source of Unix timestamps in seconds.
pub type Clock = fn() -> u64;

/// Reads the system clock.
#[cfg(feature = "std")]
#[must_use]
pub fn system_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Without `std` there is no wall clock; timestamps stay at zero unless a
/// clock is injected.
#[cfg(not(feature = "std"))]
#[must_use]
pub const fn system_clock() -> u64 {
    0
}

/// One settled hand, kept in a seat's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    /// How the hand finished.
    pub outcome: HandOutcome,
    /// Whether the hand busted.
    pub bust: bool,
    /// Final bet on the hand.
    pub bet: usize,
    /// Amount credited, stake included.
    pub returned: usize,
    /// Whether every decision on the hand followed the recommendation.
    pub followed_strategy: bool,
}

/// Running statistics for one seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    /// Hands won, blackjacks included.
    pub wins: u32,
    /// Hands lost, busts and surrenders included.
    pub losses: u32,
    /// Hands pushed.
    pub pushes: u32,
    /// Blackjacks paid.
    pub blackjacks: u32,
    /// Hands busted.
    pub busts: u32,
    /// Hands surrendered.
    pub surrenders: u32,
    /// Doubles taken.
    pub doubles: u32,
    /// Splits made.
    pub splits: u32,
    /// Insurance bets taken.
    pub insurance_taken: u32,
    /// Insurance bets that paid.
    pub insurance_won: u32,
    /// Hands settled.
    pub total_hands: u32,
    /// Everything staked, insurance included.
    pub total_wagered: usize,
    /// Everything credited back, stakes included.
    pub total_returned: usize,
    /// Decisions that matched the recommendation.
    pub correct_decisions: u32,
    /// Decisions that did not.
    pub mistakes: u32,
    /// Settled hands, oldest first.
    pub history: Vec<HandRecord>,
}

impl PlayerStatistics {
    /// Records a settled hand and the decisions taken on it.
    pub fn record_hand(
        &mut self,
        outcome: HandOutcome,
        bust: bool,
        bet: usize,
        returned: usize,
        decisions: &[Decision],
    ) {
        self.total_hands += 1;
        self.total_wagered += bet;
        self.total_returned += returned;

        match outcome {
            HandOutcome::Win => self.wins += 1,
            HandOutcome::Blackjack => {
                self.wins += 1;
                self.blackjacks += 1;
            }
            HandOutcome::Loss => self.losses += 1,
            HandOutcome::Surrendered => {
                self.losses += 1;
                self.surrenders += 1;
            }
            HandOutcome::Push => self.pushes += 1,
        }
        if bust {
            self.busts += 1;
        }

        let mut followed_strategy = true;
        for decision in decisions {
            if decision.followed() {
                self.correct_decisions += 1;
            } else {
                self.mistakes += 1;
                followed_strategy = false;
            }
        }

        self.history.push(HandRecord {
            outcome,
            bust,
            bet,
            returned,
            followed_strategy,
        });
    }

    /// Records a double down.
    pub const fn record_double(&mut self) {
        self.doubles += 1;
    }

    /// Records a split.
    pub const fn record_split(&mut self) {
        self.splits += 1;
    }

    /// Records a settled insurance bet.
    pub const fn record_insurance(&mut self, stake: usize, returned: usize) {
        self.insurance_taken += 1;
        if returned > 0 {
            self.insurance_won += 1;
        }
        self.total_wagered += stake;
        self.total_returned += returned;
    }

    /// Wins as a percentage of decided hands (pushes excluded).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(decided) * 100.0
    }

    /// Return to player: credited over staked, as a percentage.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    pub fn rtp(&self) -> f64 {
        if self.total_wagered == 0 {
            return 0.0;
        }
        self.total_returned as f64 / self.total_wagered as f64 * 100.0
    }

    /// Share of decisions that followed the recommendation; 100 with none.
    #[must_use]
    pub fn adherence(&self) -> f64 {
        let decisions = self.correct_decisions + self.mistakes;
        if decisions == 0 {
            return 100.0;
        }
        f64::from(self.correct_decisions) / f64::from(decisions) * 100.0
    }

    /// Credited minus staked.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "monetary totals fit in isize")]
    pub const fn profit_loss(&self) -> isize {
        self.total_returned as isize - self.total_wagered as isize
    }
}

/// A seat's figures at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    /// Seat index.
    pub seat: usize,
    /// Balance after settlement.
    pub balance: usize,
    /// Win rate in percent.
    pub win_rate: f64,
    /// Return to player in percent.
    pub rtp: f64,
    /// Strategy adherence in percent.
    pub adherence: f64,
}

impl SeatSnapshot {
    /// Takes a snapshot of a seat's statistics.
    #[must_use]
    pub fn of(seat: usize, balance: usize, stats: &PlayerStatistics) -> Self {
        Self {
            seat,
            balance,
            win_rate: stats.win_rate(),
            rtp: stats.rtp(),
            adherence: stats.adherence(),
        }
    }
}

/// One line of the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number, starting at 1.
    pub round: u32,
    /// Unix seconds when the round was settled.
    pub timestamp: u64,
    /// Net result of the round over all seats.
    pub total_pl: isize,
    /// Per-seat figures.
    pub seats: Vec<SeatSnapshot>,
}

/// Aggregate view of a session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Rounds played.
    pub total_rounds: u32,
    /// Net result over all rounds.
    pub total_pl: isize,
    /// Average net result per round.
    pub avg_pl_per_round: f64,
    /// Rounds that ended ahead.
    pub winning_rounds: u32,
    /// Rounds that ended behind.
    pub losing_rounds: u32,
    /// Rounds that broke even.
    pub even_rounds: u32,
    /// Winning rounds as a percentage of all rounds.
    pub win_rate: f64,
    /// Seconds from the first to the last round.
    pub duration_secs: u64,
}

#[derive(Serialize)]
struct Export<'a> {
    session_start: u64,
    session_end: u64,
    summary: SessionSummary,
    rounds: &'a [RoundRecord],
}

/// Round-by-round record of a session, exportable as JSON or CSV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    started_at: u64,
    rounds: Vec<RoundRecord>,
}

impl SessionLog {
    /// Starts an empty log.
    #[must_use]
    pub const fn new(started_at: u64) -> Self {
        Self {
            started_at,
            rounds: Vec::new(),
        }
    }

    /// Appends a round.
    pub fn record(&mut self, record: RoundRecord) {
        self.rounds.push(record);
    }

    /// Returns the recorded rounds.
    #[must_use]
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Returns when the session started.
    #[must_use]
    pub const fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Summarises the recorded rounds.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    pub fn summary(&self) -> SessionSummary {
        let (Some(first), Some(last)) = (self.rounds.first(), self.rounds.last()) else {
            return SessionSummary::default();
        };

        let mut summary = SessionSummary {
            duration_secs: last.timestamp.saturating_sub(first.timestamp),
            ..SessionSummary::default()
        };
        for round in &self.rounds {
            summary.total_rounds += 1;
            summary.total_pl += round.total_pl;
            match round.total_pl {
                pl if pl > 0 => summary.winning_rounds += 1,
                pl if pl < 0 => summary.losing_rounds += 1,
                _ => summary.even_rounds += 1,
            }
        }
        let rounds = f64::from(summary.total_rounds);
        summary.avg_pl_per_round = summary.total_pl as f64 / rounds;
        summary.win_rate = f64::from(summary.winning_rounds) / rounds * 100.0;
        summary
    }

    /// Renders the log as pretty-printed JSON with a summary.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let export = Export {
            session_start: self.started_at,
            session_end: self.rounds.last().map_or(self.started_at, |r| r.timestamp),
            summary: self.summary(),
            rounds: &self.rounds,
        };
        serde_json::to_string_pretty(&export)
    }

    /// Writes the log as CSV, one row per seat per round.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    #[cfg(feature = "std")]
    pub fn write_csv<W: std::io::Write>(&self, out: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record([
            "Round",
            "Timestamp",
            "Total P/L",
            "Player",
            "Balance",
            "Win Rate",
            "RTP",
            "Strategy %",
        ])?;
        for round in &self.rounds {
            for seat in &round.seats {
                writer.write_record([
                    round.round.to_string(),
                    round.timestamp.to_string(),
                    round.total_pl.to_string(),
                    seat.seat.to_string(),
                    seat.balance.to_string(),
                    format!("{:.2}", seat.win_rate),
                    format!("{:.2}", seat.rtp),
                    format!("{:.2}", seat.adherence),
                ])?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Renders the log as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be written.
    #[cfg(feature = "std")]
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut out = Vec::new();
        self.write_csv(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
