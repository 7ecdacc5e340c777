//! Sequential cue playback.
//!
//! Cues are played one at a time in FIFO order by a drain task that exists
//! only while there is work. A failed playback is logged and the drain moves
//! on to the next cue.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tracing::{debug, warn};
use warden_types::AudioSettings;

use crate::context::SettingsRepository;
use crate::cues::Cue;
use crate::ports::AudioPlayer;

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<Cue>,
    /// A drain task is alive. At most one exists at a time.
    draining: bool,
    /// Set by `clear`; the drain exits at its next boundary.
    stopped: bool,
}

struct Shared<A, S> {
    player: A,
    settings: S,
    state: Mutex<QueueState>,
    idle: Notify,
}

impl<A, S> Shared<A, S> {
    fn state(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cheap to clone; clones share the same queue.
pub struct CuePlaybackQueue<A, S> {
    shared: Arc<Shared<A, S>>,
}

impl<A, S> Clone for CuePlaybackQueue<A, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A: AudioPlayer, S: SettingsRepository> CuePlaybackQueue<A, S> {
    pub fn new(player: A, settings: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                player,
                settings,
                state: Mutex::new(QueueState::default()),
                idle: Notify::new(),
            }),
        }
    }

    /// Append `cue` and start draining if nothing is playing. Never waits for
    /// playback. Lifts a previous `clear`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn enqueue(&self, cue: Cue) {
        let start_drain = {
            let mut state = self.shared.state();
            state.stopped = false;
            state.pending.push_back(cue);
            !std::mem::replace(&mut state.draining, true)
        };

        if start_drain {
            let shared = Arc::clone(&self.shared);
            tokio::spawn(drain(shared));
        }
    }

    /// Drop every pending cue. The cue currently playing finishes; nothing
    /// queued before this call plays afterwards.
    pub fn clear(&self) {
        let mut state = self.shared.state();
        let dropped = state.pending.len();
        state.pending.clear();
        state.stopped = true;
        if dropped > 0 {
            debug!(dropped, "Cleared playback queue");
        }
    }

    pub fn pending(&self) -> usize {
        self.shared.state().pending.len()
    }

    pub fn is_draining(&self) -> bool {
        self.shared.state().draining
    }

    /// Resolve once no drain task is running.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.shared.idle.notified();
            if !self.is_draining() {
                return;
            }
            notified.await;
        }
    }
}

async fn drain<A: AudioPlayer, S: SettingsRepository>(shared: Arc<Shared<A, S>>) {
    loop {
        let cue = {
            let mut state = shared.state();
            let next = if state.stopped {
                None
            } else {
                state.pending.pop_front()
            };
            if next.is_none() {
                state.draining = false;
            }
            next
        };
        let Some(cue) = cue else {
            break;
        };

        let audio = match shared.settings.load().await {
            Ok(audio) => audio,
            Err(e) => {
                warn!(error = %e, cue_id = %cue.id, "Failed to load audio settings, using defaults");
                AudioSettings::default()
            }
        };

        if !audio.enabled {
            debug!(cue_id = %cue.id, "Audio disabled, skipping cue");
            continue;
        }

        match shared.player.play(&cue.audio, audio.gain()).await {
            Ok(()) => debug!(cue_id = %cue.id, audio = %cue.audio, "Played cue"),
            Err(e) => warn!(
                error = %e,
                cue_id = %cue.id,
                audio = %cue.audio,
                "Cue playback failed"
            ),
        }
    }

    shared.idle.notify_waiters();
}
