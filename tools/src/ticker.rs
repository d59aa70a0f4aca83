//! Repeating tick trigger on a background thread.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wager_sim_core::SharedEngine;

/// Calls `tick()` every `interval` until stopped or dropped.
pub struct Ticker {
    interval: Duration,
    stop_tx:  Option<Sender<()>>,
    handle:   Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start(engine: SharedEngine, interval_ms: u64) -> Self {
        let interval = Duration::from_millis(interval_ms.max(1));
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    let snap = engine.tick();
                    log::debug!("auto tick: balance={:.2}", snap.balance);
                }
                // Explicit stop or the sender was dropped.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        log::info!("ticker started, interval={}ms", interval.as_millis());
        Self {
            interval,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop and wait for the thread. No tick runs after this returns.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("ticker thread panicked");
            }
            log::info!("ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
