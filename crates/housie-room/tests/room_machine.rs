//! Integration tests for the room state machine: full-round scenarios
//! driven through the public API the server layer uses.

use housie_protocol::{PlayerId, RoomCode, ServerEvent};
use housie_room::{Room, RoomError, RoomPhase, RoomRegistry};

// =========================================================================
// Helpers
// =========================================================================

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

/// A full two-seat room with alice (1) and bob (2).
fn seated_room() -> Room {
    let mut room = Room::new(RoomCode::new("ITESTA"));
    room.join(pid(1), "alice").unwrap();
    room.join(pid(2), "bob").unwrap();
    room
}

fn started_room() -> Room {
    let mut room = seated_room();
    room.start_round().unwrap();
    room
}

/// Marks `count` numbers starting at 1, letting whoever holds the turn
/// mark each one.
fn mark_sequence(room: &mut Room, count: u8) {
    for n in 1..=count {
        let holder = room.current_turn_holder().unwrap();
        room.mark_number(holder, n).unwrap();
    }
}

// =========================================================================
// Capacity
// =========================================================================

#[test]
fn test_participant_count_never_exceeds_capacity() {
    let mut room = Room::new(RoomCode::new("ITESTB"));
    room.join(pid(1), "alice").unwrap();
    room.join(pid(2), "bob").unwrap();

    // Every further join attempt fails and mutates nothing.
    for attempt in 3..10 {
        assert!(matches!(
            room.join(pid(attempt), "late"),
            Err(RoomError::RoomFull(_))
        ));
        assert_eq!(room.participant_ids().len(), 2);
    }
}

// =========================================================================
// Turn alternation
// =========================================================================

#[test]
fn test_turn_alternates_strictly_between_both_players() {
    let mut room = started_room();
    let first = room.current_turn_holder().unwrap();
    let second = room
        .participant_ids()
        .into_iter()
        .find(|id| *id != first)
        .unwrap();

    for n in 1..=10u8 {
        let expected = if n % 2 == 1 { second } else { first };
        let holder = room.current_turn_holder().unwrap();
        room.mark_number(holder, n).unwrap();
        assert_eq!(room.current_turn_holder(), Some(expected));
    }
}

#[test]
fn test_marked_pool_never_contains_duplicates() {
    let mut room = started_room();
    mark_sequence(&mut room, 12);

    let marked = room.snapshot().marked_numbers;
    let mut deduped = marked.clone();
    deduped.dedup();
    assert_eq!(marked, deduped);
    assert_eq!(marked.len(), 12);

    // Re-marking any of them is rejected regardless of whose turn it is.
    let holder = room.current_turn_holder().unwrap();
    assert!(matches!(
        room.mark_number(holder, 5),
        Err(RoomError::AlreadyMarked(5))
    ));
}

// =========================================================================
// Win / draw arbitration
// =========================================================================

#[test]
fn test_win_then_counter_win_produces_draw() {
    let mut room = started_room();
    mark_sequence(&mut room, 4);

    // First claim wins outright.
    let out = room.declare_win(pid(1)).unwrap();
    assert!(matches!(
        out[0].1,
        ServerEvent::PlayerDeclaredWin { player_id, .. } if player_id == pid(1)
    ));

    // Counter-claim before any reset degrades to a draw tagged with the
    // last marked number; the original winner is still reported.
    let out = room.declare_win(pid(2)).unwrap();
    assert!(matches!(out[0].1, ServerEvent::GameDraw { number: Some(4) }));

    let snap = room.snapshot();
    assert!(snap.draw);
    assert_eq!(snap.winner_id, Some(pid(1)));

    // A third claim from either side is a no-op error.
    assert!(matches!(room.declare_win(pid(1)), Err(RoomError::CannotDeclare)));
    assert!(matches!(room.declare_win(pid(2)), Err(RoomError::CannotDeclare)));
}

// =========================================================================
// Departure handling
// =========================================================================

#[test]
fn test_turn_holder_disconnect_mid_round_resets_to_lobby() {
    let mut room = started_room();
    mark_sequence(&mut room, 3);

    let holder = room.current_turn_holder().unwrap();
    let survivor = room
        .participant_ids()
        .into_iter()
        .find(|id| *id != holder)
        .unwrap();

    room.remove_participant(holder).unwrap();

    let snap = room.snapshot();
    assert_eq!(snap.participants.len(), 1);
    assert_eq!(snap.participants[0].id, survivor);
    assert!(!snap.started);
    assert!(snap.marked_numbers.is_empty());
    assert_eq!(room.phase(), RoomPhase::Lobby);
}

#[test]
fn test_survivor_can_host_a_fresh_opponent_after_departure() {
    let mut room = started_room();
    room.remove_participant(pid(2)).unwrap();

    // Round was force-reset, so the seat is open again.
    room.join(pid(3), "carol").unwrap();
    room.start_round().unwrap();
    assert_eq!(room.phase(), RoomPhase::InProgress);
}

// =========================================================================
// Rematch round-trip
// =========================================================================

#[test]
fn test_rematch_round_trip_resets_all_round_fields() {
    let mut room = started_room();
    mark_sequence(&mut room, 6);
    room.declare_win(pid(2)).unwrap();

    room.request_rematch(pid(2)).unwrap();
    room.accept_rematch(pid(1)).unwrap();

    let snap = room.snapshot();
    assert!(snap.marked_numbers.is_empty());
    assert_eq!(snap.winner_id, None);
    assert!(!snap.draw);
    assert!(!snap.started);
    assert_eq!(
        snap.participants
            .iter()
            .map(|p| p.seat_number)
            .collect::<Vec<_>>(),
        vec![1, 2]
    );

    // And the reset room can run another full round.
    room.start_round().unwrap();
    let holder = room.current_turn_holder().unwrap();
    room.mark_number(holder, 1).unwrap();
    assert_eq!(room.phase(), RoomPhase::InProgress);
}

// =========================================================================
// Registry lifecycle
// =========================================================================

#[test]
fn test_last_leave_empties_room_and_registry_evicts() {
    let mut registry = RoomRegistry::new();
    let code = registry.create_room();

    let room = registry.get_mut(&code).unwrap();
    room.join(pid(1), "alice").unwrap();
    room.join(pid(2), "bob").unwrap();
    room.remove_participant(pid(1)).unwrap();
    room.remove_participant(pid(2)).unwrap();
    assert!(room.is_empty());

    // The caller's contract: an emptied room is removed from the registry.
    registry.remove(&code);
    assert!(registry.get(&code).is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_snapshot_shape_is_wire_stable() {
    // The snapshot is the broadcast payload; make sure the field names
    // clients rely on are present.
    let room = started_room();
    let json = serde_json::to_value(room.snapshot()).unwrap();
    for field in [
        "code",
        "participants",
        "started",
        "current_turn_holder",
        "marked_numbers",
        "winner_id",
        "draw",
        "pending_rematch",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
}
