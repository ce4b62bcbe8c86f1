//! The connection → room binding table.

use std::collections::HashMap;

use housie_protocol::{PlayerId, RoomCode};

use crate::SessionError;

/// Binds each live connection to at most one room code.
///
/// Every room-scoped inbound event is resolved through this table: the
/// sender's binding names the room the event applies to, replacing any
/// ambient "current connection" notion. The table is owned and mutated
/// only by the single event-processing task.
pub struct SessionMap {
    bindings: HashMap<PlayerId, RoomCode>,
}

impl SessionMap {
    /// Creates an empty binding table.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds a connection to a room.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyInRoom`] if the connection is
    /// already bound — a player must leave before joining elsewhere.
    pub fn bind(
        &mut self,
        player: PlayerId,
        code: RoomCode,
    ) -> Result<(), SessionError> {
        if self.bindings.contains_key(&player) {
            return Err(SessionError::AlreadyInRoom(player));
        }
        tracing::debug!(%player, %code, "bound to room");
        self.bindings.insert(player, code);
        Ok(())
    }

    /// Removes a connection's binding, returning the room it was bound
    /// to. Unbinding an unbound connection is a no-op returning `None`.
    pub fn unbind(&mut self, player: PlayerId) -> Option<RoomCode> {
        let code = self.bindings.remove(&player);
        if let Some(code) = &code {
            tracing::debug!(%player, %code, "unbound from room");
        }
        code
    }

    /// The room this connection is bound to, if any.
    pub fn room_of(&self, player: PlayerId) -> Option<&RoomCode> {
        self.bindings.get(&player)
    }

    /// Whether the connection is bound to any room.
    pub fn is_bound(&self, player: PlayerId) -> bool {
        self.bindings.contains_key(&player)
    }

    /// Number of bound connections.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for SessionMap {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
