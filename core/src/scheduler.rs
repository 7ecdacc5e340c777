//! Drift-compensated periodic scheduler.
//!
//! Tick `n` is due at `start + n * interval`. After each callback completes
//! the loop sleeps until the next due instant (or not at all if it already
//! passed), so a slow callback delays ticks without making the cadence drift.
//! The callback is awaited before the next tick is scheduled: ticks never
//! overlap and are never skipped.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("scheduler is already running")]
    AlreadyRunning,
}

struct Running {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

pub struct Scheduler {
    interval: Duration,
    running: Option<Running>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: None,
        }
    }

    /// Start firing `callback`. The first tick fires immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<F, Fut>(&mut self, mut callback: F) -> Result<(), SchedulerError>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticks: u32 = 0;

            loop {
                if *stop_rx.borrow() {
                    break;
                }

                callback().await;
                ticks = ticks.saturating_add(1);

                let next_due = started + interval * ticks;
                let now = Instant::now();
                if now > next_due {
                    trace!(
                        tick = ticks,
                        late_ms = (now - next_due).as_millis() as u64,
                        "Tick overran its slot"
                    );
                }

                tokio::select! {
                    _ = tokio::time::sleep_until(next_due) => {}
                    changed = stop_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }

            debug!(ticks, "Scheduler stopped");
        });

        self.running = Some(Running { stop_tx, handle });
        Ok(())
    }

    /// Stop firing. Idempotent. An in-flight callback runs to completion;
    /// no further tick starts after it.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.stop_tx.send(true);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<(Instant, Instant)>>>;

    /// Callback that sleeps for the next scripted duration and records its
    /// (start, end) instants.
    fn scripted(
        log: Log,
        durations: Vec<u64>,
    ) -> impl FnMut() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + 'static {
        let mut durations = durations.into_iter();
        move || {
            let log = Arc::clone(&log);
            let busy = Duration::from_millis(durations.next().unwrap_or(0));
            Box::pin(async move {
                let start = Instant::now();
                tokio::time::sleep(busy).await;
                log.lock().unwrap().push((start, Instant::now()));
            })
        }
    }

    fn offsets_ms(log: &Log, origin: Instant) -> Vec<u64> {
        log.lock()
            .unwrap()
            .iter()
            .map(|(start, _)| (*start - origin).as_millis() as u64)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_on_cadence() {
        let log: Log = Arc::default();
        let origin = Instant::now();
        let mut scheduler = Scheduler::new(Duration::from_millis(1000));

        scheduler.start(scripted(Arc::clone(&log), vec![])).unwrap();
        tokio::time::sleep(Duration::from_millis(3500)).await;
        scheduler.stop();

        assert_eq!(offsets_ms(&log, origin), vec![0, 1000, 2000, 3000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_callback_does_not_compound_drift() {
        let log: Log = Arc::default();
        let origin = Instant::now();
        let mut scheduler = Scheduler::new(Duration::from_millis(1000));

        // Every callback takes 300ms: ticks still start on the 1s grid.
        scheduler
            .start(scripted(Arc::clone(&log), vec![300; 10]))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(4500)).await;
        scheduler.stop();

        assert_eq!(offsets_ms(&log, origin), vec![0, 1000, 2000, 3000, 4000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrun_delays_but_never_skips_or_overlaps() {
        let log: Log = Arc::default();
        let origin = Instant::now();
        let mut scheduler = Scheduler::new(Duration::from_millis(1000));

        scheduler
            .start(scripted(Arc::clone(&log), vec![1500, 100, 100, 100, 100]))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(4500)).await;
        scheduler.stop();

        // Second tick is late (1500 instead of 1000), then the grid resumes.
        assert_eq!(offsets_ms(&log, origin), vec![0, 1500, 2000, 3000, 4000]);

        let entries = log.lock().unwrap().clone();
        for pair in entries.windows(2) {
            assert!(pair[0].1 <= pair[1].0, "ticks overlapped");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticks_and_allows_restart() {
        let log: Log = Arc::default();
        let mut scheduler = Scheduler::new(Duration::from_millis(1000));

        scheduler.start(scripted(Arc::clone(&log), vec![])).unwrap();
        assert_eq!(
            scheduler.start(scripted(Arc::clone(&log), vec![])),
            Err(SchedulerError::AlreadyRunning)
        );

        tokio::time::sleep(Duration::from_millis(1500)).await;
        scheduler.stop();
        scheduler.stop();
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(log.lock().unwrap().len(), 2);
        assert!(!scheduler.is_running());

        scheduler.start(scripted(Arc::clone(&log), vec![])).unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_lets_in_flight_tick_finish() {
        let log: Log = Arc::default();
        let mut scheduler = Scheduler::new(Duration::from_millis(1000));

        scheduler
            .start(scripted(Arc::clone(&log), vec![800]))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        scheduler.stop();

        tokio::time::sleep(Duration::from_millis(3000)).await;
        let entries = log.lock().unwrap().clone();
        assert_eq!(entries.len(), 1);
        assert_eq!((entries[0].1 - entries[0].0).as_millis(), 800);
    }
}
