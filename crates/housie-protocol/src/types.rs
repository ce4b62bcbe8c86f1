//! Wire types for Housie.
//!
//! Everything here travels between client and server as tagged JSON.
//! The inbound side is [`ClientEvent`], the outbound side is
//! [`ServerEvent`], and [`RoomSnapshot`] is the canonical authoritative
//! state the server re-broadcasts after every accepted mutation.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a connected player.
///
/// Assigned per connection when the socket is accepted. A player's
/// identity is scoped to their connection: a reconnect is a new player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A short shareable room code, e.g. `"K4TQ2Z"`.
///
/// Codes are generated by the registry from an uppercase-letters-plus-
/// digits alphabet and are unique among live rooms. Serialized as a
/// plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Wraps an existing code string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Recipient — who should receive an outbound event?
// ---------------------------------------------------------------------------

/// Specifies who should receive a server event.
///
/// Room operations return a list of `(Recipient, ServerEvent)` pairs;
/// the broadcaster resolves each recipient against the room's current
/// participant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Every participant in the room.
    All,
    /// One specific player.
    Player(PlayerId),
    /// Everyone except the specified player (e.g. "X joined" goes to
    /// everyone who was already there).
    AllExcept(PlayerId),
}

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// A participant as exposed on the wire: identity, display name, and
/// a 1-based seat number used only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub id: PlayerId,
    pub username: String,
    pub seat_number: u8,
}

/// An outstanding rematch request. At most one per room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RematchRequest {
    pub requester_id: PlayerId,
    pub requester_username: String,
}

/// The canonical authoritative room state, broadcast to every member
/// after each accepted mutation.
///
/// `winner_id` and `draw` describe the round outcome together: a draw
/// retains the first winner's id for display alongside `draw = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub code: RoomCode,
    pub participants: Vec<ParticipantInfo>,
    pub started: bool,
    pub current_turn_holder: Option<PlayerId>,
    pub marked_numbers: Vec<u8>,
    pub winner_id: Option<PlayerId>,
    pub draw: bool,
    pub pending_rematch: Option<RematchRequest>,
}

// ---------------------------------------------------------------------------
// ClientEvent — inbound
// ---------------------------------------------------------------------------

/// Events a client can send.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON, e.g.
/// `{ "type": "MarkNumber", "number": 17 }`, which is what browser
/// clients find easiest to produce and parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Create a fresh room and join it as the first participant.
    CreateRoom { username: String },

    /// Join an existing room by its shared code.
    JoinRoom { code: RoomCode, username: String },

    /// Start a round. Requires a full room.
    StartRound,

    /// Mark a number from the shared 1..=25 pool. Only legal for the
    /// current turn holder.
    MarkNumber { number: u8 },

    /// Claim a win. The server arbitrates ordering, not board validity.
    DeclareWin,

    /// Ask the other participant for a rematch after a concluded round.
    RequestRematch,

    /// Accept the outstanding rematch request (resets the room).
    AcceptRematch,

    /// Decline the outstanding rematch request.
    DeclineRematch,

    /// Leave the current room.
    LeaveRoom,

    /// Send a chat message to the room.
    Chat { text: String },
}

// ---------------------------------------------------------------------------
// ServerEvent — outbound
// ---------------------------------------------------------------------------

/// Events the server sends.
///
/// Most mutations are followed by a `RoomState` broadcast carrying the
/// full [`RoomSnapshot`]; the event-specific variants exist so clients
/// can animate the delta without diffing snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// Sent to the creator with the shareable code.
    RoomCreated { code: RoomCode },

    /// Sent to a joiner on success.
    RoomJoined { code: RoomCode },

    /// Someone else joined the room.
    UserJoined { username: String },

    /// A participant left (or disconnected).
    UserLeft { username: String },

    /// A number was marked this turn.
    NumberMarked { number: u8 },

    /// A win claim was accepted; the round is concluded.
    PlayerDeclaredWin { player_id: PlayerId, username: String },

    /// A second win claim arrived before any reset: the outcome is a
    /// draw. `number` is the last marked number, if any was marked.
    GameDraw { number: Option<u8> },

    /// The room was reset for a new round (rematch accepted).
    GameReset,

    /// The other participant asked for a rematch.
    NewMatchRequested { player_id: PlayerId, username: String },

    /// The rematch request was declined.
    NewMatchDeclined { username: String },

    /// A chat message from a participant.
    Chat { username: String, text: String },

    /// The authoritative state snapshot.
    RoomState { room: RoomSnapshot },

    /// A non-fatal, sender-only error notification. State is unchanged.
    RoomError { message: String },
}

// =========================================================================
// Tests
// =========================================================================
