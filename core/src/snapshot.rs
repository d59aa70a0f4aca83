//! Immutable state snapshots handed to drivers.
//!
//! A snapshot is an owned copy: holding one never aliases live engine
//! state, and no snapshot can reflect a tick that is half applied.

use crate::types::{TimestampMillis, DEFAULT_BALANCE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundResult {
    Win,
    Loss,
}

impl RoundResult {
    pub fn is_win(&self) -> bool {
        matches!(self, Self::Win)
    }
}

/// One settled round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundRecord {
    /// Uniform draw in [0, 100). Wins iff strictly above 50.
    pub roll:                f64,
    pub result:              RoundResult,
    /// Signed: +stake on a win, -stake on a loss.
    pub profit:              f64,
    pub timestamp:           TimestampMillis,
    pub balance_after_round: f64,
}

impl RoundRecord {
    /// Wager used for this round.
    pub fn stake(&self) -> f64 {
        self.profit.abs()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateSnapshot {
    pub balance:     f64,
    pub current_bet: f64,
    pub wins:        u64,
    pub losses:      u64,
    /// Newest first, at most 50.
    pub history:     Vec<RoundRecord>,
    /// Newest first, at most 50.
    pub logs:        Vec<String>,
}

impl StateSnapshot {
    pub fn rounds(&self) -> u64 {
        self.wins + self.losses
    }

    /// Win percentage, `0.0` before the first round.
    pub fn win_rate(&self) -> f64 {
        match self.rounds() {
            0 => 0.0,
            n => self.wins as f64 / n as f64 * 100.0,
        }
    }

    /// Profit against the default bankroll, as the dashboard reports it.
    pub fn session_profit(&self) -> f64 {
        self.balance - DEFAULT_BALANCE
    }

    pub fn latest_round(&self) -> Option<&RoundRecord> {
        self.history.first()
    }
}
