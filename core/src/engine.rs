//! The simulation engine: one stateful unit, advanced one round per tick.
//!
//! TICK ORDER (fixed, never reordered; the draw order is part of what
//! makes a seeded run reproducible):
//!   1. Roll            (draw #1, scaled to [0, 100))
//!   2. Confidence      (draw #2, decorative)
//!   3. Prediction      (draw #3, decorative)
//!   4. Size the stake  (strategy rule, skipped on the first round)
//!   5. Clamp the stake
//!   6. Settle: balance, current bet, win/loss counters
//!   7. Record the round, then the narrative log line
//!
//! RULES:
//!   - State is mutated only through `&mut self` methods on this type.
//!   - Every read returns an owned `StateSnapshot`.
//!   - No operation fails; numeric anomalies are clamped.

use crate::{
    clock::{SystemClock, WallClock},
    config::{EngineConfig, RiskLevel, Strategy},
    ring::{BoundedLog, HISTORY_CAPACITY, LOG_CAPACITY},
    rng::{RandomSource, SeededRng},
    snapshot::{RoundRecord, RoundResult, StateSnapshot},
    strategy::{clamp_bet, size_bet, SizingInputs},
    types::{Tick, DEFAULT_BALANCE},
};

/// A roll strictly above this wins.
pub const WIN_THRESHOLD: f64 = 50.0;
/// A prediction draw strictly above this predicts "higher" (p = 0.55).
pub const PREDICTION_THRESHOLD: f64 = 0.45;

const INIT_LOGS:  [&str; 2] = ["[SYSTEM] Bot initialized.", "[SYSTEM] Waiting for activation..."];
const RESET_LOGS: [&str; 2] = ["[SYSTEM] Bot reset.", "[SYSTEM] Ready."];

/// The mutable record. Never leaves the engine by reference.
#[derive(Debug, Clone)]
struct EngineState {
    balance:     f64,
    current_bet: f64,
    wins:        u64,
    losses:      u64,
    history:     BoundedLog<RoundRecord>,
    logs:        BoundedLog<String>,
}

impl EngineState {
    fn new(balance: f64, base_bet: f64, seed_logs: [&str; 2]) -> Self {
        let mut logs = BoundedLog::with_capacity(LOG_CAPACITY);
        // Seed lines are listed newest-first; push oldest first.
        for line in seed_logs.iter().rev() {
            logs.push_front((*line).to_string());
        }
        Self {
            balance,
            current_bet: base_bet,
            wins: 0,
            losses: 0,
            history: BoundedLog::with_capacity(HISTORY_CAPACITY),
            logs,
        }
    }

    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            balance:     self.balance,
            current_bet: self.current_bet,
            wins:        self.wins,
            losses:      self.losses,
            history:     self.history.to_vec(),
            logs:        self.logs.to_vec(),
        }
    }
}

pub struct SimulationEngine {
    state:      EngineState,
    base_bet:   f64,
    strategy:   Strategy,
    risk_level: RiskLevel,
    rng:        Box<dyn RandomSource>,
    clock:      Box<dyn WallClock>,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BALANCE, EngineConfig::default().base_bet)
    }
}

impl SimulationEngine {
    /// Engine with an entropy-seeded RNG and the system clock.
    pub fn new(initial_balance: f64, base_bet: f64) -> Self {
        Self::with_sources(
            initial_balance,
            base_bet,
            Box::new(SeededRng::from_entropy()),
            Box::new(SystemClock),
        )
    }

    /// Engine with injected randomness and time. Use this in tests and
    /// anywhere a run must be replayable.
    pub fn with_sources(
        initial_balance: f64,
        base_bet: f64,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn WallClock>,
    ) -> Self {
        Self {
            state: EngineState::new(initial_balance, base_bet, INIT_LOGS),
            base_bet,
            strategy: Strategy::default(),
            risk_level: RiskLevel::default(),
            rng,
            clock,
        }
    }

    /// Engine built from a config. The configured strategy and risk level
    /// are applied silently; only the seed lines appear in the log.
    pub fn from_config(
        config: &EngineConfig,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn WallClock>,
    ) -> Self {
        let mut engine = Self::with_sources(config.initial_balance, config.base_bet, rng, clock);
        engine.strategy = config.strategy;
        engine.risk_level = config.risk_level;
        engine
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn base_bet(&self) -> f64 {
        self.base_bet
    }

    /// Rounds settled since construction or the last reset.
    pub fn ticks(&self) -> Tick {
        self.state.wins + self.state.losses
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
        log::info!("strategy -> {}", strategy.name());
        self.log(format!("[CONFIG] Strategy changed to {strategy}"));
    }

    /// Stored only; no sizing rule reads the risk level.
    pub fn set_risk(&mut self, level: RiskLevel) {
        self.risk_level = level;
        log::info!("risk level -> {}", level.name());
        self.log(format!("[CONFIG] Risk level set to {level}"));
    }

    /// Prepend a line to the log buffer, evicting the oldest past capacity.
    pub fn log(&mut self, message: impl Into<String>) {
        self.state.logs.push_front(message.into());
    }

    /// Advance one round. This is the core simulation step.
    pub fn tick(&mut self) -> StateSnapshot {
        let roll = self.rng.next_f64() * 100.0;
        let is_win = roll > WIN_THRESHOLD;

        let confidence = self.rng.next_f64();
        let predicted_win = self.rng.next_f64() > PREDICTION_THRESHOLD;

        let state = &mut self.state;
        let proposed = size_bet(
            self.strategy,
            &SizingInputs {
                current_bet: state.current_bet,
                base_bet: self.base_bet,
                balance: state.balance,
                last_round: state.history.front(),
                predicted_win,
                confidence,
            },
        );
        let bet = clamp_bet(proposed, state.balance, self.base_bet);

        let profit = if is_win { bet } else { -bet };
        state.balance += profit;
        state.current_bet = bet;
        if is_win {
            state.wins += 1;
        } else {
            state.losses += 1;
        }

        state.history.push_front(RoundRecord {
            roll,
            result: if is_win { RoundResult::Win } else { RoundResult::Loss },
            profit,
            timestamp: self.clock.now_millis(),
            balance_after_round: state.balance,
        });

        log::debug!(
            "tick={} roll={roll:.2} bet={bet:.2} (proposed {proposed:.2}) balance={:.2}",
            state.wins + state.losses,
            state.balance
        );

        self.log(format!(
            "[ML-CORE] Confidence: {}% | Pred: {} | Roll: {} | {} {}",
            to_fixed(confidence * 100.0, 1),
            if predicted_win { "HIGHER" } else { "LOWER" },
            to_fixed(roll, 2),
            if is_win { "WIN" } else { "LOSS" },
            to_fixed(profit, 2),
        ));

        self.state.snapshot()
    }

    pub fn get_state(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// Back to the default bankroll with empty history. Strategy and risk
    /// level are kept; `initial_balance` from construction is not.
    pub fn reset(&mut self) -> StateSnapshot {
        self.state = EngineState::new(DEFAULT_BALANCE, self.base_bet, RESET_LOGS);
        log::info!("engine reset, balance={DEFAULT_BALANCE}");
        self.state.snapshot()
    }
}

/// Fixed-point text for log lines. Ties round away from zero on the exact
/// binary value (0.125 -> "0.13"), unlike `{:.2}` which rounds to even.
fn to_fixed(value: f64, digits: usize) -> String {
    const SLACK: usize = 64;
    if !value.is_finite() {
        return value.to_string();
    }
    let exact = format!("{:.*}", digits + SLACK, value.abs());
    let cut = exact.len() - SLACK;
    let mut kept = exact.as_bytes()[..cut].to_vec();
    if digits == 0 {
        kept.pop(); // trailing '.'
    }

    if exact.as_bytes()[cut] >= b'5' {
        let mut carry = true;
        for b in kept.iter_mut().rev() {
            match *b {
                b'.' => continue,
                b'9' => *b = b'0',
                _ => {
                    *b += 1;
                    carry = false;
                    break;
                }
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let mut out = String::with_capacity(kept.len() + 1);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept.into_iter().map(char::from));
    out
}
