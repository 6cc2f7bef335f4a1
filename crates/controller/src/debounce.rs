//! Debounced validation controller
//!
//! Every value or configuration change starts a new cycle: cancel the armed
//! timer, go `loading` (or `idle` when there is nothing to check), arm a new
//! timer, dispatch the check when it fires, classify the reply.
//!
//! Each cycle carries a generation number. A cycle's task commits its result
//! only while its generation is still current, under the same lock the
//! controller takes to start a new cycle, so a superseded reply can never
//! overwrite a newer state.

use crate::{ControllerError, Result};
use check_core::config::MAX_DELAY_MS;
use check_core::{CheckResult, ConfigError, ControllerConfig, Markers, SharedCheck};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Latest input seen by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// Raw field value, untrimmed
    pub value: Option<String>,
    /// Gate: when false nothing is checked
    pub should_check: bool,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            value: None,
            should_check: true,
        }
    }
}

impl Input {
    /// The trimmed value to check, or `None` when the cycle goes idle
    pub fn checkable(&self) -> Option<&str> {
        if !self.should_check {
            return None;
        }
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No timer armed, no call outstanding
    Settled,
    /// Waiting out the quiet period
    Armed,
    /// Check function dispatched, awaiting its reply
    InFlight,
}

struct Cycle {
    generation: u64,
    phase: Phase,
}

struct Shared {
    cycle: Mutex<Cycle>,
    result_tx: watch::Sender<CheckResult>,
    dispatched: AtomicU64,
}

/// Debounced validation controller
///
/// Owns one timer, at most one tracked check and the published
/// [`CheckResult`]. Dropping the controller cancels anything outstanding.
pub struct ValidationController {
    shared: Arc<Shared>,
    check: SharedCheck,
    config: ControllerConfig,
    runtime: Handle,
    input: Input,
    /// Task of the current cycle; replaced on every restart
    task: Option<JoinHandle<()>>,
    /// Superseded checks still in flight, aborted on teardown
    detached: Vec<JoinHandle<()>>,
}

impl ValidationController {
    /// Create a controller bound to the ambient tokio runtime
    pub fn new(check: SharedCheck, config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| ControllerError::NoRuntime)?;
        let (result_tx, _) = watch::channel(CheckResult::idle());

        Ok(Self {
            shared: Arc::new(Shared {
                cycle: Mutex::new(Cycle {
                    generation: 0,
                    phase: Phase::Settled,
                }),
                result_tx,
                dispatched: AtomicU64::new(0),
            }),
            check,
            config,
            runtime,
            input: Input::default(),
            task: None,
            detached: Vec::new(),
        })
    }

    /// Feed a new value and gate
    ///
    /// Returns the state published synchronously: `loading` when a check
    /// was scheduled, `idle` otherwise. Repeating the previous input is not
    /// a change and leaves the running cycle alone.
    pub fn update(&mut self, value: Option<&str>, should_check: bool) -> CheckResult {
        let input = Input {
            value: value.map(str::to_string),
            should_check,
        };
        if input == self.input {
            return self.result();
        }

        self.input = input;
        self.restart()
    }

    /// Change the value, keeping the current gate
    pub fn set_value(&mut self, value: Option<&str>) -> CheckResult {
        let should_check = self.input.should_check;
        self.update(value, should_check)
    }

    /// Open or close the gate, keeping the current value
    pub fn set_gate(&mut self, should_check: bool) -> CheckResult {
        let value = self.input.value.clone();
        self.update(value.as_deref(), should_check)
    }

    /// Change the debounce delay and restart the cycle for the current input
    pub fn set_delay(&mut self, delay: Duration) -> Result<CheckResult> {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        if delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::DelayOutOfRange {
                got: delay_ms,
                max: MAX_DELAY_MS,
            }
            .into());
        }
        if delay_ms == self.config.delay_ms {
            return Ok(self.result());
        }

        self.config.delay_ms = delay_ms;
        Ok(self.restart())
    }

    /// Swap the check function and restart the cycle for the current input
    pub fn set_check_fn(&mut self, check: SharedCheck) -> CheckResult {
        if Arc::ptr_eq(&self.check, &check) {
            return self.result();
        }

        self.check = check;
        self.restart()
    }

    /// Current published state
    pub fn result(&self) -> CheckResult {
        self.shared.result_tx.borrow().clone()
    }

    /// Receive every published state change
    pub fn subscribe(&self) -> watch::Receiver<CheckResult> {
        self.shared.result_tx.subscribe()
    }

    /// Number of check calls actually dispatched
    pub fn dispatched(&self) -> u64 {
        self.shared.dispatched.load(Ordering::Relaxed)
    }

    /// Last value and gate fed to the controller
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Active configuration, including any delay set since construction
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Tear the controller down, cancelling anything outstanding
    pub fn shutdown(self) {
        drop(self);
    }

    fn restart(&mut self) -> CheckResult {
        let shared = Arc::clone(&self.shared);
        let mut cycle = shared.cycle.lock();

        cycle.generation += 1;
        let generation = cycle.generation;
        let previous = std::mem::replace(&mut cycle.phase, Phase::Settled);
        self.cancel(previous);

        let result = match self.input.checkable() {
            Some(value) => {
                let value = value.to_string();
                debug!(generation, value = %value, delay_ms = self.config.delay_ms, "arming check");

                cycle.phase = Phase::Armed;
                self.task = Some(self.runtime.spawn(run_cycle(
                    Arc::clone(&self.shared),
                    Arc::clone(&self.check),
                    self.config.markers.clone(),
                    value,
                    self.config.delay(),
                    generation,
                )));
                CheckResult::loading()
            }
            None => {
                debug!(generation, "nothing to check");
                CheckResult::idle()
            }
        };

        shared.result_tx.send_replace(result.clone());
        result
    }

    fn cancel(&mut self, phase: Phase) {
        let Some(task) = self.task.take() else {
            return;
        };

        match phase {
            Phase::Armed => {
                debug!("cancelling armed timer");
                task.abort();
            }
            Phase::InFlight if self.config.abort_in_flight => {
                debug!("aborting in-flight check");
                task.abort();
            }
            Phase::InFlight => {
                // Left running; its generation is stale so the reply is dropped
                debug!("superseding in-flight check");
                self.detached.retain(|handle| !handle.is_finished());
                self.detached.push(task);
            }
            Phase::Settled => {}
        }
    }
}

impl Drop for ValidationController {
    fn drop(&mut self) {
        let mut cycle = self.shared.cycle.lock();
        cycle.generation += 1;
        cycle.phase = Phase::Settled;

        if let Some(task) = self.task.take() {
            task.abort();
        }
        for task in self.detached.drain(..) {
            task.abort();
        }
    }
}

async fn run_cycle(
    shared: Arc<Shared>,
    check: SharedCheck,
    markers: Markers,
    value: String,
    delay: Duration,
    generation: u64,
) {
    tokio::time::sleep(delay).await;

    {
        let mut cycle = shared.cycle.lock();
        if cycle.generation != generation {
            return;
        }
        cycle.phase = Phase::InFlight;
    }

    shared.dispatched.fetch_add(1, Ordering::Relaxed);
    debug!(generation, value = %value, "dispatching check");

    let result = match check.check(&value).await {
        Ok(reply) => markers.classify(&reply),
        Err(err) => {
            warn!(generation, error = %err, "check failed");
            markers.classify_failure(&err)
        }
    };

    let mut cycle = shared.cycle.lock();
    if cycle.generation != generation {
        debug!(generation, current = cycle.generation, "discarding stale check result");
        return;
    }

    cycle.phase = Phase::Settled;
    debug!(generation, status = %result.status, "check settled");
    shared.result_tx.send_replace(result);
}
