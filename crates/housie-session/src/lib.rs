//! Connection session tracking for Housie.
//!
//! A "session" here is deliberately small: the server trusts a
//! client-supplied display name and identifies players by their
//! connection, so all this crate tracks is *which room, if any, a
//! connection is currently bound to* ([`SessionMap`]).
//!
//! ```text
//! Room layer (above)   ← resolves events against the sender's binding
//!     ↕
//! Session layer (this crate)
//!     ↕
//! Protocol layer (below) ← provides PlayerId, RoomCode
//! ```

mod binding;
mod error;

pub use binding::SessionMap;
pub use error::SessionError;
