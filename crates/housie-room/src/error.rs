//! Error types for the room layer.
//!
//! Every variant here is a non-fatal guard failure: the hub forwards it
//! to the offending sender as a `RoomError` event and room state is left
//! untouched.

use housie_protocol::{PlayerId, RoomCode};

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No room exists under the given code.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// The room has no free seat.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// The round is already running (join/start while in progress).
    #[error("round already started")]
    AlreadyStarted,

    /// Not enough participants to start a round.
    #[error("need {needed} players to start")]
    NotEnoughPlayers { needed: usize },

    /// The operation requires a running round.
    #[error("no active round")]
    RoundNotActive,

    /// The sender is not the current turn holder.
    #[error("not your turn")]
    NotYourTurn,

    /// The number was already marked this round.
    #[error("number {0} already called")]
    AlreadyMarked(u8),

    /// The number is outside the shared pool.
    #[error("number {0} is outside the 1-25 pool")]
    OutOfRange(u8),

    /// A win claim that is a duplicate, or arrived with no round to
    /// claim (lobby, already-drawn, or sender already the winner).
    #[error("no win can be declared right now")]
    CannotDeclare,

    /// Rematch negotiation requires a concluded round.
    #[error("no concluded round to rematch")]
    NoConcludedRound,

    /// At most one rematch request may be outstanding.
    #[error("a rematch request is already pending")]
    RematchAlreadyRequested,

    /// Accept/decline with nothing outstanding.
    #[error("no rematch request is pending")]
    NoRematchRequested,

    /// The requester cannot accept or decline their own request.
    #[error("cannot answer your own rematch request")]
    OwnRematchRequest,

    /// The sender is not a participant of this room.
    #[error("player {0} is not in this room")]
    NotInRoom(PlayerId),

    /// The sender already holds a seat in this room.
    #[error("player {0} is already in this room")]
    AlreadyJoined(PlayerId),

    /// Display names must be non-empty.
    #[error("username cannot be empty")]
    EmptyUsername,
}
