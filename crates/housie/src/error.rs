//! Unified error type for the Housie server.

use housie_protocol::ProtocolError;
use housie_room::RoomError;
use housie_session::SessionError;
use housie_transport::TransportError;

/// Top-level error that wraps all layer-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HousieError {
    /// A transport-level error (accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid event).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (binding violations).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A room-level error (guard failures).
    #[error(transparent)]
    Room(#[from] RoomError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use housie_protocol::{PlayerId, RoomCode};

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::AcceptFailed(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "taken",
        ));
        let housie_err: HousieError = err.into();
        assert!(matches!(housie_err, HousieError::Transport(_)));
        assert!(housie_err.to_string().contains("accept failed"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidEvent("bad".into());
        let housie_err: HousieError = err.into();
        assert!(matches!(housie_err, HousieError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::NotInRoom(PlayerId(1));
        let housie_err: HousieError = err.into();
        assert_eq!(housie_err.to_string(), "not in a room");
    }

    #[test]
    fn test_from_room_error() {
        let err = RoomError::NotFound(RoomCode::new("AAAAAA"));
        let housie_err: HousieError = err.into();
        assert!(matches!(housie_err, HousieError::Room(_)));
    }
}
