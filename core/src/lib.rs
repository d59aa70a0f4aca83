//! Tick-driven wagering simulator.
//!
//! A `SimulationEngine` draws a roll each tick, sizes a stake with the
//! active strategy, settles it against a running balance, and keeps the
//! last 50 rounds and log lines. Drivers read it only through snapshots.

pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod ring;
pub mod rng;
pub mod shared;
pub mod snapshot;
pub mod strategy;
pub mod types;

pub use config::{EngineConfig, RiskLevel, Strategy};
pub use engine::SimulationEngine;
pub use shared::SharedEngine;
pub use snapshot::{RoundRecord, RoundResult, StateSnapshot};
