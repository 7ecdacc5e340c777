//! Connects match events to cue playback.
//!
//! On every tick the configured cues and reminders are evaluated against the
//! new state and the due ones are queued. When the match ends or polling is
//! stopped, anything still queued is dropped.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::SettingsRepository;
use crate::events::{EventBus, MatchEvent, MatchEventKind, SubscriptionId};
use crate::game::GameState;
use crate::playback::CuePlaybackQueue;
use crate::ports::AudioPlayer;

use super::repository::CueRepository;
use super::triggers::due_cues;

pub struct CueDispatcher {
    bus: Arc<EventBus>,
    subscriptions: Vec<SubscriptionId>,
}

impl CueDispatcher {
    /// Subscribe to `bus`. Stays attached until [`detach`](Self::detach) or
    /// drop.
    pub fn attach<C, R, A, S>(
        bus: Arc<EventBus>,
        cues: C,
        reminders: R,
        queue: CuePlaybackQueue<A, S>,
    ) -> Self
    where
        C: CueRepository,
        R: CueRepository,
        A: AudioPlayer,
        S: SettingsRepository,
    {
        let tick_queue = queue.clone();
        let on_tick = bus.subscribe(MatchEventKind::GameTick, move |event| {
            if let MatchEvent::GameTick { state } = event {
                dispatch(state, &cues, &reminders, &tick_queue);
            }
        });

        let ended_queue = queue.clone();
        let on_ended = bus.subscribe(MatchEventKind::GameEnded, move |_| ended_queue.clear());
        let on_stopped = bus.subscribe(MatchEventKind::GameStopped, move |_| queue.clear());

        Self {
            bus,
            subscriptions: vec![on_tick, on_ended, on_stopped],
        }
    }

    pub fn detach(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}

impl Drop for CueDispatcher {
    fn drop(&mut self) {
        self.detach();
    }
}

fn dispatch<C, R, A, S>(
    state: &GameState,
    cues: &C,
    reminders: &R,
    queue: &CuePlaybackQueue<A, S>,
) where
    C: CueRepository,
    R: CueRepository,
    A: AudioPlayer,
    S: SettingsRepository,
{
    let cues = match cues.all() {
        Ok(cues) => cues,
        Err(e) => {
            warn!(error = %e, game_time = state.game_time, "Failed to load cues, skipping tick");
            return;
        }
    };
    let reminders = match reminders.all() {
        Ok(reminders) => reminders,
        Err(e) => {
            warn!(error = %e, game_time = state.game_time, "Failed to load reminders, skipping tick");
            return;
        }
    };

    for cue in due_cues(state, &cues).into_iter().chain(due_cues(state, &reminders)) {
        debug!(cue_id = %cue.id, game_time = state.game_time, "Cue due");
        queue.enqueue(cue.clone());
    }
}
