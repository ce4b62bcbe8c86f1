//! The game hub: the single event-processing loop.
//!
//! One hub task owns the room registry, the session bindings, and the
//! broadcaster, and processes every inbound event for the whole process
//! strictly one at a time. That ordering is the concurrency model:
//! "simultaneous" win claims are just two events arriving close
//! together, and whichever the hub processes first wins. No handler
//! awaits between mutation and fan-out — broadcasts go through
//! unbounded channels, so each transition is atomic.

use housie_protocol::{ClientEvent, PlayerId, Recipient, RoomCode, ServerEvent};
use housie_room::{Outbox, Room, RoomError, RoomRegistry, DEFAULT_CAPACITY};
use housie_session::{SessionError, SessionMap};
use tokio::sync::mpsc;

use crate::broadcast::{Broadcaster, EventSender};

/// Events fed into the hub by connection handler tasks.
pub enum HubEvent {
    /// A connection was accepted; `outbox` is where its server events go.
    Connected {
        player: PlayerId,
        outbox: EventSender,
    },

    /// A decoded client event from a connection.
    Inbound {
        player: PlayerId,
        event: ClientEvent,
    },

    /// The connection went away (clean close or error). Equivalent to a
    /// leave plus forgetting the connection.
    Disconnected { player: PlayerId },
}

/// Handle for sending events to the running hub task.
///
/// Cheap to clone — one per connection handler.
#[derive(Clone)]
pub struct HubHandle {
    sender: mpsc::Sender<HubEvent>,
}

impl HubHandle {
    /// Queues an event for the hub. If the hub is gone the event is
    /// dropped — the process is shutting down anyway.
    pub async fn send(&self, event: HubEvent) {
        if self.sender.send(event).await.is_err() {
            tracing::debug!("hub closed, dropping event");
        }
    }
}

/// Spawns the hub task and returns a handle to feed it.
///
/// `channel_size` bounds the inbound queue; senders wait when it fills,
/// which is the only backpressure a human-paced game needs.
pub fn spawn_hub(room_capacity: usize, channel_size: usize) -> HubHandle {
    let (tx, mut rx) = mpsc::channel(channel_size);
    let mut hub = GameHub::with_room_capacity(room_capacity);

    tokio::spawn(async move {
        tracing::info!("game hub started");
        while let Some(event) = rx.recv().await {
            hub.process(event);
        }
        tracing::info!("game hub stopped");
    });

    HubHandle { sender: tx }
}

/// Coordinator state: every mutable structure of the server, owned by
/// one task.
pub struct GameHub {
    registry: RoomRegistry,
    sessions: SessionMap,
    broadcaster: Broadcaster,
}

impl GameHub {
    /// Creates a hub producing default two-seat rooms.
    pub fn new() -> Self {
        Self::with_room_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a hub producing rooms with `capacity` seats.
    pub fn with_room_capacity(capacity: usize) -> Self {
        Self {
            registry: RoomRegistry::with_room_capacity(capacity),
            sessions: SessionMap::new(),
            broadcaster: Broadcaster::new(),
        }
    }

    /// Processes one event to completion. Never panics on bad input;
    /// guard failures turn into sender-only error notifications.
    pub fn process(&mut self, event: HubEvent) {
        match event {
            HubEvent::Connected { player, outbox } => {
                self.broadcaster.register(player, outbox);
            }
            HubEvent::Inbound { player, event } => {
                self.handle_client(player, event);
            }
            HubEvent::Disconnected { player } => {
                self.handle_leave(player);
                self.broadcaster.unregister(player);
            }
        }
    }

    fn handle_client(&mut self, player: PlayerId, event: ClientEvent) {
        match event {
            ClientEvent::CreateRoom { username } => {
                self.handle_create(player, username);
            }
            ClientEvent::JoinRoom { code, username } => {
                self.handle_join(player, code, username);
            }
            ClientEvent::StartRound => {
                self.room_scoped(player, true, |room, _| {
                    room.start_round().map(|()| Vec::new())
                });
            }
            ClientEvent::MarkNumber { number } => {
                self.room_scoped(player, true, |room, sender| {
                    room.mark_number(sender, number)
                });
            }
            ClientEvent::DeclareWin => {
                self.room_scoped(player, true, Room::declare_win);
            }
            ClientEvent::RequestRematch => {
                self.room_scoped(player, true, Room::request_rematch);
            }
            ClientEvent::AcceptRematch => {
                self.room_scoped(player, true, Room::accept_rematch);
            }
            // Declining only notifies; the snapshot is unchanged except
            // for the cleared request, which the decline event conveys.
            ClientEvent::DeclineRematch => {
                self.room_scoped(player, false, Room::decline_rematch);
            }
            ClientEvent::Chat { text } => {
                self.room_scoped(player, false, |room, sender| {
                    room.chat(sender, text)
                });
            }
            ClientEvent::LeaveRoom => {
                self.handle_leave(player);
            }
        }
    }

    fn handle_create(&mut self, player: PlayerId, username: String) {
        if self.sessions.is_bound(player) {
            self.reject(player, SessionError::AlreadyInRoom(player).to_string());
            return;
        }

        let code = self.registry.create_room();
        let room = self
            .registry
            .get_mut(&code)
            .expect("just created this room");

        match room.join(player, username) {
            Ok(_outbox) => {
                // First seat: no one else to notify.
                if let Err(e) = self.sessions.bind(player, code.clone()) {
                    // Gated by is_bound above.
                    tracing::warn!(%player, error = %e, "bind failed after create");
                }
                self.broadcaster
                    .send_to(player, ServerEvent::RoomCreated { code: code.clone() });
                self.broadcaster.emit_state(room);
            }
            Err(e) => {
                // Nothing joined the fresh room; don't leak it.
                self.registry.remove(&code);
                self.reject(player, e.to_string());
            }
        }
    }

    fn handle_join(&mut self, player: PlayerId, code: RoomCode, username: String) {
        if self.sessions.is_bound(player) {
            self.reject(player, SessionError::AlreadyInRoom(player).to_string());
            return;
        }

        let Some(room) = self.registry.get_mut(&code) else {
            self.broadcaster.send_to(
                player,
                ServerEvent::RoomError {
                    message: RoomError::NotFound(code).to_string(),
                },
            );
            return;
        };

        match room.join(player, username) {
            Ok(outbox) => {
                let participants = room.participant_ids();
                if let Err(e) = self.sessions.bind(player, code.clone()) {
                    tracing::warn!(%player, error = %e, "bind failed after join");
                }
                self.broadcaster
                    .send_to(player, ServerEvent::RoomJoined { code });
                self.broadcaster.dispatch(&participants, outbox);
                self.broadcaster.emit_state(room);
            }
            Err(e) => self.reject(player, e.to_string()),
        }
    }

    /// Resolves the sender's binding, runs `op` on their room, and
    /// dispatches the result. Guard failures go back to the sender
    /// only; events for rooms that vanished mid-flight are dropped.
    fn room_scoped<F>(&mut self, player: PlayerId, broadcast_state: bool, op: F)
    where
        F: FnOnce(&mut Room, PlayerId) -> Result<Outbox, RoomError>,
    {
        let Some(code) = self.sessions.room_of(player).cloned() else {
            self.reject(player, SessionError::NotInRoom(player).to_string());
            return;
        };
        let Some(room) = self.registry.get_mut(&code) else {
            // Teardown race: the binding outlived the room.
            tracing::debug!(%player, %code, "event for vanished room dropped");
            return;
        };

        match op(room, player) {
            Ok(outbox) => {
                let participants = room.participant_ids();
                self.broadcaster.dispatch(&participants, outbox);
                if broadcast_state {
                    self.broadcaster.emit_state(room);
                }
            }
            Err(e) => self.reject(player, e.to_string()),
        }
    }

    /// Leave or disconnect: removes the participant, notifies the
    /// remainder, and tears the room down when it empties. Never
    /// produces an error response.
    fn handle_leave(&mut self, player: PlayerId) {
        let Some(code) = self.sessions.unbind(player) else {
            return;
        };
        let Some(room) = self.registry.get_mut(&code) else {
            tracing::debug!(%player, %code, "leave for vanished room dropped");
            return;
        };
        let Some(username) = room.remove_participant(player) else {
            return;
        };

        if room.is_empty() {
            self.registry.remove(&code);
        } else {
            let participants = room.participant_ids();
            self.broadcaster.dispatch(
                &participants,
                vec![(Recipient::All, ServerEvent::UserLeft { username })],
            );
            self.broadcaster.emit_state(room);
        }
    }

    /// Sender-only, non-fatal error notification.
    fn reject(&self, player: PlayerId, message: String) {
        tracing::debug!(%player, %message, "event rejected");
        self.broadcaster
            .send_to(player, ServerEvent::RoomError { message });
    }
}

impl Default for GameHub {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
