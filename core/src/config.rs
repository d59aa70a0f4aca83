//! Engine configuration: strategy selection, risk level, bankroll.

use crate::{
    error::SimError,
    types::{DEFAULT_BALANCE, DEFAULT_BASE_BET},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Bet-sizing rule applied from the second tick onward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Double the stake after a loss, back to the base bet after a win.
    #[default]
    Martingale,
    /// Simplified Kelly: 5% of balance on a confident "higher" prediction.
    Kelly,
    /// Carry the previous stake forward unchanged.
    Flat,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Martingale, Strategy::Kelly, Strategy::Flat];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Martingale => "martingale",
            Self::Kelly      => "kelly",
            Self::Flat       => "flat",
        }
    }

    /// Lenient parse for driver input. Anything unrecognized applies no
    /// sizing adjustment, which is exactly what `Flat` does.
    pub fn parse_or_flat(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: SimError| {
            log::warn!("{e}; falling back to flat sizing");
            Self::Flat
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
    }
}

impl FromStr for Strategy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|st| st.name() == wanted)
            .ok_or_else(|| SimError::UnknownStrategy(s.to_string()))
    }
}

/// Stored for interface parity with the dashboard's risk selector.
/// No sizing computation reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low    => "low",
            Self::Medium => "medium",
            Self::High   => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
    }
}

impl FromStr for RiskLevel {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| SimError::UnknownRiskLevel(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_balance: f64,
    /// Wager unit used on the first tick and whenever a rule resets the stake.
    /// Not validated: a non-positive value flows straight into the clamp.
    pub base_bet:        f64,
    pub strategy:        Strategy,
    pub risk_level:      RiskLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_BALANCE,
            base_bet:        DEFAULT_BASE_BET,
            strategy:        Strategy::default(),
            risk_level:      RiskLevel::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))
    }

    pub fn from_json(content: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(content)?)
    }
}
