//! Match lifecycle state machine.
//!
//! Each tick polls the game data port once and moves between two phases:
//! - NotStarted: no match is being reported
//! - Active: a match session is open; its dedup set and objective state live
//!   in the session and are dropped with it
//!
//! Transitions publish lifecycle events on the bus. Port failures count as
//! "no match" and never escape the tick.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::events::{EventBus, MatchEvent};
use crate::game::GameState;
use crate::objectives::{self, ObjectiveState};
use crate::ports::{GameDataPort, PortError};
use crate::snapshot::{RawSnapshot, SnapshotAssembler, peek_game_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    NotStarted,
    Active,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No match before or after the tick.
    Idle,
    /// A session was opened.
    Started,
    /// Fresh state was published.
    Ticked,
    /// The game clock did not move; nothing was published or consumed.
    Paused,
    /// The session was closed.
    Ended,
}

/// State scoped to one match session.
#[derive(Debug, Default)]
struct Session {
    assembler: SnapshotAssembler,
    objectives: Option<ObjectiveState>,
    last_published: Option<u32>,
}

impl Session {
    /// Fold `raw` into the session. `None` if no match is loaded.
    fn advance(&mut self, raw: &RawSnapshot) -> Option<Arc<GameState>> {
        let snapshot = self.assembler.assemble(raw)?;
        let objectives = objectives::track(self.objectives.as_ref(), &snapshot);
        self.objectives = Some(objectives.clone());
        self.last_published = Some(snapshot.game_time);
        Some(Arc::new(GameState::new(snapshot, objectives)))
    }
}

pub struct PollingStateMachine<P> {
    port: P,
    bus: Arc<EventBus>,
    session: Option<Session>,
    port_timeout: Option<Duration>,
}

impl<P: GameDataPort> PollingStateMachine<P> {
    pub fn new(port: P, bus: Arc<EventBus>) -> Self {
        Self {
            port,
            bus,
            session: None,
            port_timeout: None,
        }
    }

    /// Give up on a port request after `timeout` and treat it as no match.
    pub fn with_port_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.port_timeout = timeout;
        self
    }

    pub fn phase(&self) -> MatchPhase {
        if self.session.is_some() {
            MatchPhase::Active
        } else {
            MatchPhase::NotStarted
        }
    }

    /// Poll once and apply the resulting transition.
    pub async fn tick(&mut self) -> TickOutcome {
        let raw = self.fetch().await;
        let available = raw
            .as_ref()
            .and_then(|raw| peek_game_time(raw).map(|game_time| (raw, game_time)));

        match (self.session.is_some(), available) {
            (false, None) => TickOutcome::Idle,
            (false, Some((raw, _))) => self.handle_start(raw),
            (true, None) => {
                self.end_session();
                TickOutcome::Ended
            }
            (true, Some((raw, game_time))) => self.handle_active(raw, game_time),
        }
    }

    /// Close the session, if any, publishing `GameStopped`.
    pub fn stop(&mut self) {
        if self.session.take().is_some() {
            info!("Polling stopped during a match");
            self.bus.publish(&MatchEvent::GameStopped);
        }
    }

    async fn fetch(&self) -> Option<RawSnapshot> {
        let result = match self.port_timeout {
            Some(limit) => tokio::time::timeout(limit, self.port.game_data())
                .await
                .unwrap_or(Err(PortError::Timeout(limit.as_millis() as u64))),
            None => self.port.game_data().await,
        };

        match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Game data unavailable");
                None
            }
        }
    }

    fn handle_start(&mut self, raw: &RawSnapshot) -> TickOutcome {
        let mut session = Session::default();
        let Some(state) = session.advance(raw) else {
            return TickOutcome::Idle;
        };
        self.session = Some(session);

        if state.game_time == 0 {
            info!("Match started");
            self.bus.publish(&MatchEvent::GameStarted { game_time: 0 });
        } else {
            info!(game_time = state.game_time, "Joined match in progress");
            self.bus.publish(&MatchEvent::GameTick { state });
        }
        TickOutcome::Started
    }

    fn handle_active(&mut self, raw: &RawSnapshot, game_time: u32) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Idle;
        };

        let last_published = session.last_published;
        match last_published {
            Some(last) if game_time == last => {
                debug!(game_time, "Game clock paused");
                return TickOutcome::Paused;
            }
            // A clock that runs backwards belongs to a different match.
            Some(last) if game_time < last => {
                info!(game_time, last, "Game clock went backwards, starting a new session");
                self.end_session();
                return self.handle_start(raw);
            }
            _ => {}
        }

        let Some(state) = session.advance(raw) else {
            return TickOutcome::Paused;
        };
        self.bus.publish(&MatchEvent::GameTick { state });
        TickOutcome::Ticked
    }

    fn end_session(&mut self) {
        if let Some(session) = self.session.take() {
            info!(
                last_game_time = session.last_published,
                events = session.assembler.processed().len(),
                "Match ended"
            );
            self.bus.publish(&MatchEvent::GameEnded);
        }
    }
}
