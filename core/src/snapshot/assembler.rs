use hashbrown::HashSet;

use crate::game::{ActivePlayer, DomainEvent, MatchSnapshot, Team};

use super::raw::{RawActivePlayer, RawPlayer, RawSnapshot};

/// Event ids already delivered in the current match session.
///
/// Once an id is in the set it is never delivered again; the set is only
/// emptied when the session ends.
#[derive(Debug, Clone, Default)]
pub struct ProcessedEventIds {
    ids: HashSet<u64>,
}

impl ProcessedEventIds {
    /// Record `id`. Returns `true` if it had not been seen before.
    pub fn insert(&mut self, id: u64) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Whole game seconds of `raw`, or `None` if no match is loaded.
///
/// Does not touch any dedup state, so callers can look at the clock before
/// deciding whether to consume the snapshot.
pub fn peek_game_time(raw: &RawSnapshot) -> Option<u32> {
    raw.game_data
        .as_ref()
        .map(|data| data.game_time.max(0.0).floor() as u32)
}

/// Map `raw` into a domain snapshot carrying only events absent from
/// `processed`, recording the delivered ids.
///
/// Returns `None` when the document signals that no match is loaded.
pub fn assemble(raw: &RawSnapshot, processed: &mut ProcessedEventIds) -> Option<MatchSnapshot> {
    let game_time = peek_game_time(raw)?;

    let team_of = |name: &str| {
        raw.all_players
            .iter()
            .find(|p| p.answers_to(name))
            .and_then(|p| Team::from_side(&p.team))
    };

    let events = raw
        .events
        .events
        .iter()
        .filter(|event| processed.insert(event.event_id))
        .map(|event| DomainEvent::from_raw(event, team_of))
        .collect();

    Some(MatchSnapshot {
        game_time,
        events,
        active_player: active_player(raw),
    })
}

fn active_player(raw: &RawSnapshot) -> ActivePlayer {
    let Some(active) = raw.active_player.as_ref() else {
        return ActivePlayer {
            is_alive: true,
            ..Default::default()
        };
    };

    let roster_entry = find_in_roster(active, &raw.all_players);
    let is_dead = roster_entry.is_some_and(|p| p.is_dead);
    let respawns_in = match roster_entry {
        Some(p) if p.is_dead => p.respawn_timer.max(0.0).ceil() as u32,
        _ => 0,
    };

    let mana = active.champion_stats.as_ref().and_then(|stats| {
        let is_mana = stats
            .resource_type
            .as_deref()
            .is_none_or(|t| t.eq_ignore_ascii_case("MANA"));
        if is_mana { stats.resource_value } else { None }
    });

    ActivePlayer {
        is_alive: !is_dead,
        respawns_in,
        mana,
        gold: active.current_gold,
        items: roster_entry.map(|p| p.items.iter().map(|item| item.item_id).collect()),
    }
}

fn find_in_roster<'a>(active: &RawActivePlayer, roster: &'a [RawPlayer]) -> Option<&'a RawPlayer> {
    let names = [
        active.riot_id.as_deref(),
        Some(active.summoner_name.as_str()),
        active.riot_id_game_name.as_deref(),
    ];
    names
        .into_iter()
        .flatten()
        .find_map(|name| roster.iter().find(|p| p.answers_to(name)))
}

/// Stateful wrapper owning the processed-id set for one session.
#[derive(Debug, Default)]
pub struct SnapshotAssembler {
    processed: ProcessedEventIds,
}

impl SnapshotAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`assemble`].
    pub fn assemble(&mut self, raw: &RawSnapshot) -> Option<MatchSnapshot> {
        assemble(raw, &mut self.processed)
    }

    /// Forget every delivered id. Called when the match session ends.
    pub fn reset(&mut self) {
        self.processed.clear();
    }

    pub fn processed(&self) -> &ProcessedEventIds {
        &self.processed
    }
}
