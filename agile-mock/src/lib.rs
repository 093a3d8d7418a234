//! Scripted rate source for tests and runnable examples.
//!
//! [`MockSource`] defers every call to rules set through its
//! [`MockController`]. Rules are queued per [`FetchTarget`]; the last queued
//! behavior for a target repeats once the queue is down to one entry.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use agile_core::{AgileError, FetchTarget, RateSource, RatesPage};
use async_trait::async_trait;
use tokio::sync::{Mutex, watch};
use tokio::time::Instant;

pub mod fixtures;

/// Instruction for how a fetch should behave.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// Return the provided page immediately.
    Return(RatesPage),
    /// Fail immediately with the provided error.
    Fail(AgileError),
    /// Hang indefinitely (simulate a stuck request).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<FetchTarget, VecDeque<MockBehavior>>,
    calls: Vec<(FetchTarget, Instant)>,
}

/// Controller handle used by tests to drive a [`MockSource`] from the outside.
pub struct MockController {
    state: Arc<Mutex<InternalState>>,
    gate: watch::Sender<bool>,
}

impl MockController {
    /// Queue one behavior for `target`.
    pub async fn push(&self, target: FetchTarget, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.entry(target).or_default().push_back(behavior);
    }

    /// Replace everything queued for `target` with `behaviors`, in order.
    pub async fn script(&self, target: FetchTarget, behaviors: Vec<MockBehavior>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(target, behaviors.into());
    }

    /// Targets requested so far, in call order.
    pub async fn calls(&self) -> Vec<FetchTarget> {
        let guard = self.state.lock().await;
        guard.calls.iter().map(|(t, _)| t.clone()).collect()
    }

    /// Instants at which calls for `target` arrived.
    pub async fn call_times(&self, target: &FetchTarget) -> Vec<Instant> {
        let guard = self.state.lock().await;
        guard
            .calls
            .iter()
            .filter(|(t, _)| t == target)
            .map(|(_, at)| *at)
            .collect()
    }

    /// Total number of calls received.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Hold every subsequent call after it is logged, until [`resume`](Self::resume).
    pub fn pause(&self) {
        self.gate.send_replace(false);
    }

    /// Release held calls.
    pub fn resume(&self) {
        self.gate.send_replace(true);
    }

    /// Clear all rules and the call log.
    pub async fn clear(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.calls.clear();
    }
}

/// A source that defers all behavior to an external controller.
pub struct MockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    gate: watch::Receiver<bool>,
}

impl MockSource {
    /// Create a new mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn RateSource>, MockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let (gate_tx, gate_rx) = watch::channel(true);
        let controller = MockController {
            state: Arc::clone(&state),
            gate: gate_tx,
        };
        let me = Arc::new(Self {
            name,
            state,
            gate: gate_rx,
        });
        (me as Arc<dyn RateSource>, controller)
    }
}

#[async_trait]
impl RateSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn fetch_page(&self, target: &FetchTarget) -> Result<RatesPage, AgileError> {
        {
            let mut guard = self.state.lock().await;
            guard.calls.push((target.clone(), Instant::now()));
        }

        let mut gate = self.gate.clone();
        if gate.wait_for(|open| *open).await.is_err() {
            return Err(AgileError::unexpected("mock controller dropped"));
        }

        // Take the behavior without holding the lock across the hang
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.rules.get_mut(target).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };

        match behavior {
            Some(MockBehavior::Return(page)) => Ok(page),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(AgileError::http_status(404)),
        }
    }
}
