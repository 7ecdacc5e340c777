//! Snapshot assembly: raw live client documents in, deduplicated domain
//! snapshots out.

mod assembler;
mod raw;

pub use assembler::{ProcessedEventIds, SnapshotAssembler, assemble, peek_game_time};
pub use raw::{
    RawActivePlayer, RawChampionStats, RawEvent, RawEventList, RawGameData, RawItem, RawPlayer,
    RawSnapshot,
};
