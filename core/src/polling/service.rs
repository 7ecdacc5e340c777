use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use crate::ports::GameDataPort;
use crate::scheduler::{Scheduler, SchedulerError};

use super::machine::{MatchPhase, PollingStateMachine, TickOutcome};

/// Drives a [`PollingStateMachine`] from a [`Scheduler`].
pub struct PollingService<P> {
    pub(super) machine: Arc<Mutex<PollingStateMachine<P>>>,
    /// Bumped by every `stop` while holding the machine lock. A poll started
    /// under an older value is dropped once it gets the lock.
    pub(super) stops: Arc<AtomicU64>,
    scheduler: Scheduler,
}

impl<P: GameDataPort> PollingService<P> {
    pub fn new(machine: PollingStateMachine<P>, interval: Duration) -> Self {
        Self {
            machine: Arc::new(Mutex::new(machine)),
            stops: Arc::new(AtomicU64::new(0)),
            scheduler: Scheduler::new(interval),
        }
    }

    /// Begin polling. The first poll happens immediately.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        let machine = Arc::clone(&self.machine);
        let stops = Arc::clone(&self.stops);
        let generation = self.stops.load(Ordering::Acquire);
        self.scheduler.start(move || {
            let machine = Arc::clone(&machine);
            let stops = Arc::clone(&stops);
            async move {
                poll_once(&machine, &stops, generation).await;
            }
        })
    }

    /// Stop polling. Waits for an in-flight poll, then closes the match
    /// session (publishing `GameStopped` if one was open). No poll runs
    /// after this returns, even one already waiting for the machine.
    pub async fn stop(&mut self) {
        self.scheduler.stop();
        let mut machine = self.machine.lock().await;
        self.stops.fetch_add(1, Ordering::AcqRel);
        machine.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub async fn phase(&self) -> MatchPhase {
        self.machine.lock().await.phase()
    }
}

/// Tick the machine unless the service was stopped since `generation` was
/// read. Returns `None` for a skipped poll.
pub(super) async fn poll_once<P: GameDataPort>(
    machine: &Mutex<PollingStateMachine<P>>,
    stops: &AtomicU64,
    generation: u64,
) -> Option<TickOutcome> {
    let mut machine = machine.lock().await;
    if stops.load(Ordering::Acquire) != generation {
        debug!(generation, "Dropping poll queued behind stop");
        return None;
    }
    Some(machine.tick().await)
}
