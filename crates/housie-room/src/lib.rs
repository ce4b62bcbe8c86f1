//! Room lifecycle and turn arbitration for Housie.
//!
//! This crate is the authoritative core of the server: pure in-memory
//! state machines with no I/O. The server layer feeds it one event at a
//! time and dispatches whatever it returns.
//!
//! # Key types
//!
//! - [`Room`] — the per-match state machine: participants, turn pointer,
//!   marked-number pool, win/draw resolution, rematch negotiation
//! - [`RoomRegistry`] — owns `code → Room`, generates collision-free
//!   codes, evicts empty rooms
//! - [`RoomPhase`] — derived lifecycle phase (lobby / in progress /
//!   concluded)
//! - [`RoomError`] — non-fatal guard failures

mod error;
mod registry;
mod room;

pub use error::RoomError;
pub use registry::RoomRegistry;
pub use room::{
    Outbox, Participant, Room, RoomPhase, DEFAULT_CAPACITY, MAX_NUMBER,
    MIN_NUMBER,
};
