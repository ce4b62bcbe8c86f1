//! Fan-out of server events to connected clients.
//!
//! The broadcaster owns one unbounded channel sender per live
//! connection. Sends never await and never fail loudly — a closed
//! receiver means the connection is tearing down, which is an expected
//! race, not an error.

use std::collections::HashMap;

use housie_protocol::{PlayerId, Recipient, ServerEvent};
use housie_room::{Outbox, Room};
use tokio::sync::mpsc;

/// Channel sender delivering outbound events to one connection's writer
/// task.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Fans events out to connections by player id.
pub struct Broadcaster {
    senders: HashMap<PlayerId, EventSender>,
}

impl Broadcaster {
    /// Creates an empty broadcaster.
    pub fn new() -> Self {
        Self {
            senders: HashMap::new(),
        }
    }

    /// Registers a connection's outbound channel.
    pub fn register(&mut self, player: PlayerId, sender: EventSender) {
        self.senders.insert(player, sender);
    }

    /// Forgets a connection. Idempotent.
    pub fn unregister(&mut self, player: PlayerId) {
        self.senders.remove(&player);
    }

    /// Sends one event to one connection. Silently drops it if the
    /// connection is gone.
    pub fn send_to(&self, player: PlayerId, event: ServerEvent) {
        match self.senders.get(&player) {
            Some(sender) => {
                let _ = sender.send(event);
            }
            None => {
                tracing::debug!(%player, "dropping event for gone connection");
            }
        }
    }

    /// Resolves each event's [`Recipient`] against the room's current
    /// participant list and delivers it.
    pub fn dispatch(&self, participants: &[PlayerId], outbox: Outbox) {
        for (recipient, event) in outbox {
            match recipient {
                Recipient::All => {
                    for &pid in participants {
                        self.send_to(pid, event.clone());
                    }
                }
                Recipient::Player(pid) => {
                    self.send_to(pid, event);
                }
                Recipient::AllExcept(excluded) => {
                    for &pid in participants {
                        if pid != excluded {
                            self.send_to(pid, event.clone());
                        }
                    }
                }
            }
        }
    }

    /// Sends the canonical state snapshot to every room member.
    pub fn emit_state(&self, room: &Room) {
        let snapshot = room.snapshot();
        for pid in room.participant_ids() {
            self.send_to(
                pid,
                ServerEvent::RoomState {
                    room: snapshot.clone(),
                },
            );
        }
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
