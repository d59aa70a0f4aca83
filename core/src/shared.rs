//! Serialized access to one engine from several threads.
//!
//! A single lock covers each whole operation, so two `tick()` calls can
//! never interleave their read-modify-write of balance, stake and history.

use crate::{
    config::{RiskLevel, Strategy},
    engine::SimulationEngine,
    snapshot::StateSnapshot,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<SimulationEngine>>,
}

impl SharedEngine {
    pub fn new(engine: SimulationEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // A panic while holding the lock cannot leave a half-applied tick:
    // every mutation path completes without unwinding. Recover the guard.
    fn lock(&self) -> MutexGuard<'_, SimulationEngine> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::warn!("engine lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    pub fn tick(&self) -> StateSnapshot {
        self.lock().tick()
    }

    pub fn get_state(&self) -> StateSnapshot {
        self.lock().get_state()
    }

    pub fn reset(&self) -> StateSnapshot {
        self.lock().reset()
    }

    pub fn set_strategy(&self, strategy: Strategy) {
        self.lock().set_strategy(strategy);
    }

    pub fn set_risk(&self, level: RiskLevel) {
        self.lock().set_risk(level);
    }

    pub fn log(&self, message: impl Into<String>) {
        self.lock().log(message);
    }

    pub fn strategy(&self) -> Strategy {
        self.lock().strategy()
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.lock().risk_level()
    }

    /// Run `f` with exclusive access, for multi-step reads that must see
    /// one consistent state.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut SimulationEngine) -> R) -> R {
        f(&mut *self.lock())
    }
}
