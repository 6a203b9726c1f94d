//! Minimum-move planner for the radioisotope elevator puzzle: paired generator/microchip items
//! spread across ordered floors, a capacity-two elevator, and a safety invariant forbidding an
//! exposed microchip from sharing a floor with a foreign generator.
//!
//! The pipeline is `item` (arrangement text -> items) -> `state` (bit-packed state keys) ->
//! `safety` + `moves` (legal successor enumeration) -> `search` (branch-and-bound breadth-first
//! exploration).

pub use {
    error::Error,
    item::{parse_records, Arrangement, Item, ItemKind, ItemRecord, EXTRA_ELEMENTS},
    moves::{push_successors, Direction, Successor},
    safety::{is_valid_floor, is_valid_state},
    search::{minimum_moves, Planner},
    state::{Diagram, StateKey},
    util::open_utf8_file,
};

mod error;
mod item;
mod moves;
mod safety;
mod search;
mod state;
mod util;
