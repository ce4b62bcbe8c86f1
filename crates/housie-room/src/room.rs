//! The room state machine: participants, turn sequencing, win/draw
//! arbitration, and rematch negotiation.
//!
//! A [`Room`] is an owned aggregate — every mutation goes through its
//! methods, and each method either completes fully or returns a
//! [`RoomError`] with state untouched. Operations return the outbound
//! events they produced as `(Recipient, ServerEvent)` pairs; the caller
//! dispatches them *after* the mutation, so partial state is never
//! broadcast.

use housie_protocol::{
    ParticipantInfo, PlayerId, Recipient, RematchRequest, RoomCode,
    RoomSnapshot, ServerEvent,
};
use rand::Rng;

use crate::RoomError;

/// Default seat count. The reference game is head-to-head.
pub const DEFAULT_CAPACITY: usize = 2;

/// A match needs at least this many participants to keep running.
const MIN_PLAYERS: usize = 2;

/// Bounds of the shared number pool, inclusive.
pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 25;

/// Outbound events produced by a room operation, paired with who
/// should receive each.
pub type Outbox = Vec<(Recipient, ServerEvent)>;

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// A connection's membership record within a room.
///
/// Owned exclusively by its [`Room`]; created on join, destroyed on
/// leave or disconnect, never shared across rooms.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: PlayerId,
    pub username: String,
    /// 1-based seat position, display only. Assigned at join time and
    /// renumbered on reset.
    pub seat_number: u8,
}

impl Participant {
    fn info(&self) -> ParticipantInfo {
        ParticipantInfo {
            id: self.id,
            username: self.username.clone(),
            seat_number: self.seat_number,
        }
    }
}

// ---------------------------------------------------------------------------
// RoomPhase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a room, derived from its outcome fields.
///
/// ```text
/// Lobby ──(start)──→ InProgress ──(declare_win)──→ Concluded
///   ↑                     │                            │
///   └──(force reset on ───┘                            │
///       departure)                                     │
///   └────────────────(accept_rematch)──────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Not started, no outcome. Accepting joins.
    Lobby,
    /// A round is running.
    InProgress,
    /// A round ended in a win or draw; rematch not yet resolved.
    Concluded,
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// One match instance, identified by a short shareable code.
///
/// Invariants maintained by the methods below:
/// - `participants.len() <= capacity`
/// - while `started`, `turn_index` addresses a live participant (or the
///   room is empty and the turn holder is `None`)
/// - `marked_numbers` holds unique values and only grows while a round
///   is started and unresolved
/// - at most one of `winner_id` / `draw` describes the outcome, and a
///   draw never erases the original `winner_id`
#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    capacity: usize,
    participants: Vec<Participant>,
    started: bool,
    turn_index: usize,
    marked_numbers: Vec<u8>,
    winner_id: Option<PlayerId>,
    draw: bool,
    pending_rematch: Option<RematchRequest>,
}

impl Room {
    /// Creates an empty two-seat room.
    pub fn new(code: RoomCode) -> Self {
        Self::with_capacity(code, DEFAULT_CAPACITY)
    }

    /// Creates an empty room with a custom seat count.
    pub fn with_capacity(code: RoomCode, capacity: usize) -> Self {
        Self {
            code,
            capacity,
            participants: Vec::with_capacity(capacity),
            started: false,
            turn_index: 0,
            marked_numbers: Vec::new(),
            winner_id: None,
            draw: false,
            pending_rematch: None,
        }
    }

    // -- Accessors -----------------------------------------------------

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }

    /// IDs of all current participants, in seat order.
    pub fn participant_ids(&self) -> Vec<PlayerId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    fn username_of(&self, id: PlayerId) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.username.as_str())
    }

    /// The participant currently authorized to mark a number.
    ///
    /// `None` outside a running round, or if everyone left.
    pub fn current_turn_holder(&self) -> Option<PlayerId> {
        if !self.started {
            return None;
        }
        self.participants.get(self.turn_index).map(|p| p.id)
    }

    /// The derived lifecycle phase.
    pub fn phase(&self) -> RoomPhase {
        if self.started {
            RoomPhase::InProgress
        } else if self.winner_id.is_some() || self.draw {
            RoomPhase::Concluded
        } else {
            RoomPhase::Lobby
        }
    }

    /// Builds the canonical snapshot broadcast to every member.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            code: self.code.clone(),
            participants: self.participants.iter().map(Participant::info).collect(),
            started: self.started,
            current_turn_holder: self.current_turn_holder(),
            marked_numbers: self.marked_numbers.clone(),
            winner_id: self.winner_id,
            draw: self.draw,
            pending_rematch: self.pending_rematch.clone(),
        }
    }

    // -- Joining -------------------------------------------------------

    /// Seats a new participant.
    ///
    /// Rejected while a round is running or when the room is full.
    pub fn join(
        &mut self,
        id: PlayerId,
        username: impl Into<String>,
    ) -> Result<Outbox, RoomError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(RoomError::EmptyUsername);
        }
        if self.started {
            return Err(RoomError::AlreadyStarted);
        }
        if self.participants.len() >= self.capacity {
            return Err(RoomError::RoomFull(self.code.clone()));
        }
        if self.contains(id) {
            return Err(RoomError::AlreadyJoined(id));
        }

        let seat_number = self.participants.len() as u8 + 1;
        self.participants.push(Participant {
            id,
            username: username.clone(),
            seat_number,
        });
        tracing::info!(code = %self.code, %id, %username, "participant joined");

        Ok(vec![(
            Recipient::AllExcept(id),
            ServerEvent::UserJoined { username },
        )])
    }

    // -- Round lifecycle -----------------------------------------------

    /// Starts a round: clears the pool and outcome fields and picks the
    /// initial turn holder uniformly at random among participants.
    pub fn start_round(&mut self) -> Result<(), RoomError> {
        if self.started {
            return Err(RoomError::AlreadyStarted);
        }
        if self.participants.len() < self.capacity {
            return Err(RoomError::NotEnoughPlayers {
                needed: self.capacity,
            });
        }

        self.marked_numbers.clear();
        self.winner_id = None;
        self.draw = false;
        self.pending_rematch = None;
        self.turn_index = rand::rng().random_range(0..self.participants.len());
        self.started = true;
        tracing::info!(
            code = %self.code,
            first_turn = %self.participants[self.turn_index].id,
            "round started"
        );
        Ok(())
    }

    /// Marks a number from the shared pool and advances the turn.
    pub fn mark_number(
        &mut self,
        sender: PlayerId,
        number: u8,
    ) -> Result<Outbox, RoomError> {
        if !self.started {
            return Err(RoomError::RoundNotActive);
        }
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) {
            return Err(RoomError::OutOfRange(number));
        }
        if self.current_turn_holder() != Some(sender) {
            return Err(RoomError::NotYourTurn);
        }
        if self.marked_numbers.contains(&number) {
            return Err(RoomError::AlreadyMarked(number));
        }

        self.marked_numbers.push(number);
        self.advance_turn();

        Ok(vec![(Recipient::All, ServerEvent::NumberMarked { number })])
    }

    /// Arbitrates a win claim.
    ///
    /// The first claim in a running round wins outright and concludes
    /// the round. A second claim from a *different* participant before
    /// any reset degrades the outcome to a draw — the original winner
    /// id is kept so no outcome is ever lost. Anything else is a
    /// duplicate or out-of-round claim and is rejected.
    pub fn declare_win(&mut self, sender: PlayerId) -> Result<Outbox, RoomError> {
        if self.started {
            let username = self
                .username_of(sender)
                .ok_or(RoomError::NotInRoom(sender))?
                .to_owned();
            self.winner_id = Some(sender);
            self.started = false;
            tracing::info!(code = %self.code, winner = %sender, "win declared");
            return Ok(vec![(
                Recipient::All,
                ServerEvent::PlayerDeclaredWin {
                    player_id: sender,
                    username,
                },
            )]);
        }

        match self.winner_id {
            Some(winner) if winner != sender && !self.draw => {
                if !self.contains(sender) {
                    return Err(RoomError::NotInRoom(sender));
                }
                self.draw = true;
                tracing::info!(code = %self.code, "concurrent claim, round drawn");
                Ok(vec![(
                    Recipient::All,
                    ServerEvent::GameDraw {
                        number: self.marked_numbers.last().copied(),
                    },
                )])
            }
            _ => Err(RoomError::CannotDeclare),
        }
    }

    // -- Rematch negotiation --------------------------------------------

    /// Asks the other participant(s) for a rematch.
    pub fn request_rematch(&mut self, sender: PlayerId) -> Result<Outbox, RoomError> {
        if self.phase() != RoomPhase::Concluded {
            return Err(RoomError::NoConcludedRound);
        }
        if self.pending_rematch.is_some() {
            return Err(RoomError::RematchAlreadyRequested);
        }
        let username = self
            .username_of(sender)
            .ok_or(RoomError::NotInRoom(sender))?
            .to_owned();

        self.pending_rematch = Some(RematchRequest {
            requester_id: sender,
            requester_username: username.clone(),
        });

        Ok(vec![(
            Recipient::AllExcept(sender),
            ServerEvent::NewMatchRequested {
                player_id: sender,
                username,
            },
        )])
    }

    /// Accepts the outstanding rematch request and resets the room to
    /// the lobby with seats renumbered.
    pub fn accept_rematch(&mut self, sender: PlayerId) -> Result<Outbox, RoomError> {
        let request = self
            .pending_rematch
            .as_ref()
            .ok_or(RoomError::NoRematchRequested)?;
        if request.requester_id == sender {
            return Err(RoomError::OwnRematchRequest);
        }
        if !self.contains(sender) {
            return Err(RoomError::NotInRoom(sender));
        }

        self.reset_round();
        tracing::info!(code = %self.code, "rematch accepted, room reset");

        Ok(vec![(Recipient::All, ServerEvent::GameReset)])
    }

    /// Declines the outstanding rematch request. Both sides are told;
    /// the room stays concluded.
    pub fn decline_rematch(&mut self, sender: PlayerId) -> Result<Outbox, RoomError> {
        let request = self
            .pending_rematch
            .as_ref()
            .ok_or(RoomError::NoRematchRequested)?;
        if request.requester_id == sender {
            return Err(RoomError::OwnRematchRequest);
        }
        let username = self
            .username_of(sender)
            .ok_or(RoomError::NotInRoom(sender))?
            .to_owned();

        self.pending_rematch = None;

        Ok(vec![(
            Recipient::All,
            ServerEvent::NewMatchDeclined { username },
        )])
    }

    // -- Chat ----------------------------------------------------------

    /// Relays a chat message to the whole room.
    pub fn chat(&self, sender: PlayerId, text: String) -> Result<Outbox, RoomError> {
        let username = self
            .username_of(sender)
            .ok_or(RoomError::NotInRoom(sender))?
            .to_owned();
        Ok(vec![(Recipient::All, ServerEvent::Chat { username, text })])
    }

    // -- Departure & turn maintenance -----------------------------------

    /// Removes a participant (leave or disconnect) and repairs the turn
    /// state so `turn_index` never references a stale seat.
    ///
    /// Returns the departed participant's username for the leave
    /// notification, or `None` if they weren't a member. The caller is
    /// responsible for destroying the room once it is empty.
    pub fn remove_participant(&mut self, id: PlayerId) -> Option<String> {
        let holder_before = self.current_turn_holder();
        let pos = self.participants.iter().position(|p| p.id == id)?;
        let departed = self.participants.remove(pos);
        tracing::info!(
            code = %self.code,
            %id,
            remaining = self.participants.len(),
            "participant left"
        );

        // An orphaned rematch request cannot be answered.
        if self
            .pending_rematch
            .as_ref()
            .is_some_and(|r| r.requester_id == id)
        {
            self.pending_rematch = None;
        }

        if self.started {
            if self.participants.len() < MIN_PLAYERS {
                // A one-player match cannot continue.
                self.reset_round();
            } else if let Some(holder) = holder_before {
                // Re-locate the turn holder in the shrunk list. If the
                // holder is the one who left, hand the turn onward from
                // seat zero.
                match self.participants.iter().position(|p| p.id == holder) {
                    Some(i) => self.turn_index = i,
                    None => {
                        self.turn_index = 0;
                        self.advance_turn();
                    }
                }
            }
        }

        Some(departed.username)
    }

    /// Moves the turn to the next seat, wrapping around.
    fn advance_turn(&mut self) {
        if self.participants.is_empty() {
            return;
        }
        self.turn_index = (self.turn_index + 1) % self.participants.len();
    }

    /// Clears every round field and renumbers seats: back to the lobby.
    fn reset_round(&mut self) {
        self.started = false;
        self.turn_index = 0;
        self.marked_numbers.clear();
        self.winner_id = None;
        self.draw = false;
        self.pending_rematch = None;
        for (i, p) in self.participants.iter_mut().enumerate() {
            p.seat_number = i as u8 + 1;
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
