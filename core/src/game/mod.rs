//! Domain types produced by the snapshot assembler and consumed downstream.

mod event;
mod state;

pub use event::{DomainEvent, EventKind, Objective, Team};
pub use state::{ActivePlayer, GameState, MatchSnapshot};
