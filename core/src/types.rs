//! Shared primitive types used across the simulator.

/// Count of simulation steps taken since construction or the last reset.
pub type Tick = u64;

/// Milliseconds since the UNIX epoch, as stamped on each round record.
pub type TimestampMillis = i64;

/// Starting bankroll used by `SimulationEngine::new` defaults and by `reset()`.
pub const DEFAULT_BALANCE: f64 = 1000.0;

/// Default wager unit.
pub const DEFAULT_BASE_BET: f64 = 1.0;
