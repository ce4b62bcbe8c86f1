//! Error types for the session layer.

use housie_protocol::PlayerId;

/// Errors that can occur while binding connections to rooms.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The connection is already bound to a room. A player can be in at
    /// most one room at a time.
    #[error("already in a room")]
    AlreadyInRoom(PlayerId),

    /// The connection is not bound to any room, but the event it sent
    /// is room-scoped.
    #[error("not in a room")]
    NotInRoom(PlayerId),
}
