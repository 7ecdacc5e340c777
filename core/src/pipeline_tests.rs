//! Whole-pipeline tests: port → state machine → bus → dispatcher → queue.

use std::sync::{Arc, Mutex};

use crate::context::StaticSettings;
use crate::cues::{Cue, CueDispatcher, CueEvent, CueTrigger, MemoryCueRepository};
use crate::events::EventBus;
use crate::game::Objective;
use crate::playback::CuePlaybackQueue;
use crate::polling::{PollingStateMachine, TickOutcome};
use crate::ports::{AudioPlayer, AudioRef, GameDataPort, PlaybackError, PortError};
use crate::snapshot::{RawEvent, RawGameData, RawPlayer, RawSnapshot};

/// Live client whose document the test edits between ticks.
#[derive(Clone, Default)]
struct FakeClient {
    document: Arc<Mutex<Option<RawSnapshot>>>,
}

impl FakeClient {
    fn set_time(&self, game_time: f64) {
        let mut document = self.document.lock().unwrap();
        let raw = document.get_or_insert_with(|| RawSnapshot {
            all_players: vec![RawPlayer {
                summoner_name: "Top".to_string(),
                team: "CHAOS".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        });
        raw.game_data = Some(RawGameData {
            game_time,
            ..Default::default()
        });
    }

    fn push_event(&self, id: u64, name: &str, time: f64, killer: &str) {
        let mut document = self.document.lock().unwrap();
        if let Some(raw) = document.as_mut() {
            raw.events.events.push(RawEvent {
                event_id: id,
                event_name: name.to_string(),
                event_time: time,
                killer_name: Some(killer.to_string()),
                ..Default::default()
            });
        }
    }

    fn close(&self) {
        *self.document.lock().unwrap() = None;
    }
}

impl GameDataPort for FakeClient {
    async fn game_data(&self) -> Result<Option<RawSnapshot>, PortError> {
        Ok(self.document.lock().unwrap().clone())
    }
}

#[derive(Clone, Default)]
struct RecordingPlayer {
    played: Arc<Mutex<Vec<AudioRef>>>,
}

impl RecordingPlayer {
    fn played(&self) -> Vec<AudioRef> {
        self.played.lock().unwrap().clone()
    }
}

impl AudioPlayer for RecordingPlayer {
    async fn play(&self, audio: &AudioRef, _volume: f32) -> Result<(), PlaybackError> {
        self.played.lock().unwrap().push(audio.clone());
        Ok(())
    }
}

fn cue(id: &str, trigger: CueTrigger) -> Cue {
    Cue {
        id: id.to_string(),
        text: id.to_string(),
        audio: AudioRef::new(format!("/sounds/{id}.wav")),
        trigger,
    }
}

struct Pipeline {
    client: FakeClient,
    player: RecordingPlayer,
    queue: CuePlaybackQueue<RecordingPlayer, StaticSettings>,
    machine: PollingStateMachine<FakeClient>,
    _dispatcher: CueDispatcher,
}

impl Pipeline {
    fn new(cues: Vec<Cue>) -> Self {
        let bus = Arc::new(EventBus::new());
        let client = FakeClient::default();
        let player = RecordingPlayer::default();
        let queue = CuePlaybackQueue::new(player.clone(), StaticSettings::default());
        let dispatcher = CueDispatcher::attach(
            Arc::clone(&bus),
            MemoryCueRepository::new(cues),
            MemoryCueRepository::default(),
            queue.clone(),
        );
        Self {
            machine: PollingStateMachine::new(client.clone(), bus),
            client,
            player,
            queue,
            _dispatcher: dispatcher,
        }
    }

    /// One poll per game second in `from..=to`.
    async fn play_seconds(&mut self, from: u32, to: u32) {
        for t in from..=to {
            self.client.set_time(f64::from(t) + 0.25);
            self.machine.tick().await;
        }
        self.queue.wait_idle().await;
    }
}

#[tokio::test]
async fn test_interval_cue_plays_every_ninety_seconds() {
    let mut pipeline = Pipeline::new(vec![cue("map", CueTrigger::Interval { interval: 90 })]);

    pipeline.play_seconds(0, 90).await;
    assert_eq!(pipeline.player.played(), vec![AudioRef::new("/sounds/map.wav")]);

    pipeline.play_seconds(91, 180).await;
    assert_eq!(
        pipeline.player.played(),
        vec![
            AudioRef::new("/sounds/map.wav"),
            AudioRef::new("/sounds/map.wav")
        ]
    );
}

#[tokio::test]
async fn test_objective_cue_follows_dragon_kill() {
    let mut pipeline = Pipeline::new(vec![cue(
        "dragon",
        CueTrigger::Objective {
            objective: Objective::Dragon,
            seconds_before_objective: 30,
        },
    )]);

    // First dragon: 300 - 30.
    pipeline.play_seconds(0, 300).await;
    assert_eq!(pipeline.player.played().len(), 1);

    // Killed at 400 by red side: next spawn 700, cue at 670.
    pipeline.client.set_time(400.5);
    pipeline.client.push_event(7, "DragonKill", 400.2, "Top");
    pipeline.play_seconds(400, 669).await;
    assert_eq!(pipeline.player.played().len(), 1);

    pipeline.play_seconds(670, 670).await;
    assert_eq!(pipeline.player.played().len(), 2);
}

#[tokio::test]
async fn test_match_end_stops_cues_until_next_match() {
    let mut pipeline = Pipeline::new(vec![
        cue("once", CueTrigger::OneTime { trigger_at: 5 }),
        cue(
            "cannon",
            CueTrigger::Event {
                event: CueEvent::CannonWave,
            },
        ),
    ]);

    pipeline.play_seconds(0, 10).await;
    assert_eq!(pipeline.player.played().len(), 1);

    pipeline.client.close();
    assert_eq!(pipeline.machine.tick().await, TickOutcome::Ended);

    // A new match replays its own one-time cue.
    pipeline.play_seconds(0, 125).await;
    let played = pipeline.player.played();
    assert_eq!(played.len(), 3);
    assert_eq!(played[2], AudioRef::new("/sounds/cannon.wav"));
}
