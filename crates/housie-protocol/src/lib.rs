//! Wire protocol for Housie.
//!
//! This crate defines the language clients and the server speak:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`RoomSnapshot`],
//!   [`PlayerId`], [`RoomCode`]) — the structures that travel on the
//!   wire, plus [`Recipient`] for addressing fan-out.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those events are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong doing so.
//!
//! The protocol layer knows nothing about connections or rooms; it only
//! serializes and deserializes.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ClientEvent, ParticipantInfo, PlayerId, Recipient, RematchRequest,
    RoomCode, RoomSnapshot, ServerEvent,
};
