//! Room registry: owns every live room, keyed by shareable code.

use std::collections::HashMap;

use housie_protocol::RoomCode;
use rand::Rng;

use crate::room::{Room, DEFAULT_CAPACITY};

/// Characters a room code is drawn from: uppercase letters and digits.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Room codes are six characters, short enough to read out loud.
const CODE_LENGTH: usize = 6;

/// Owns the `code → Room` mapping and generates collision-free codes.
///
/// An entry is created by [`create_room`](Self::create_room) and removed
/// by [`remove`](Self::remove) when the last participant leaves. The
/// registry is only ever touched by the single event-processing task,
/// so no locking is involved.
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, Room>,
    capacity: usize,
}

impl RoomRegistry {
    /// Creates an empty registry producing two-seat rooms.
    pub fn new() -> Self {
        Self::with_room_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty registry producing rooms with `capacity` seats.
    pub fn with_room_capacity(capacity: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            capacity,
        }
    }

    /// Registers a fresh, empty room under a newly generated code.
    ///
    /// Retries generation until the code is absent from the registry, so
    /// the returned code is unique among live rooms at call time.
    pub fn create_room(&mut self) -> RoomCode {
        loop {
            let code = generate_code();
            if self.rooms.contains_key(&code) {
                continue;
            }
            self.rooms
                .insert(code.clone(), Room::with_capacity(code.clone(), self.capacity));
            tracing::info!(%code, "room created");
            return code;
        }
    }

    /// Looks up a room. Absence means "room not found" — a non-fatal,
    /// user-facing condition for the caller.
    pub fn get(&self, code: &RoomCode) -> Option<&Room> {
        self.rooms.get(code)
    }

    /// Mutable lookup.
    pub fn get_mut(&mut self, code: &RoomCode) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    /// Removes a room. Idempotent.
    pub fn remove(&mut self, code: &RoomCode) {
        if self.rooms.remove(code).is_some() {
            tracing::info!(%code, "room destroyed");
        }
    }

    /// Number of live rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws a random code from the alphabet.
fn generate_code() -> RoomCode {
    let mut rng = rand::rng();
    let code: String = (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    RoomCode::new(code)
}

// =========================================================================
// Tests
// =========================================================================
