//! # Housie
//!
//! Real-time room coordinator for a two-player number-calling game.
//!
//! Clients connect over WebSocket, create or join six-character room
//! codes, and play turn-based rounds of calling numbers from a shared
//! 1–25 pool. The server is authoritative: every transition is applied
//! by a single hub task and the resulting state is broadcast to the
//! whole room, so all clients converge on the same view and racing win
//! claims are arbitrated by arrival order.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use housie::HousieServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), housie::HousieError> {
//!     let server = HousieServer::builder()
//!         .bind("0.0.0.0:8080")
//!         .build()
//!         .await?;
//!     server.run().await
//! }
//! ```

mod broadcast;
mod error;
mod handler;
mod hub;
mod server;

pub use broadcast::{Broadcaster, EventSender};
pub use error::HousieError;
pub use hub::{spawn_hub, GameHub, HubEvent, HubHandle};
pub use server::{HousieServer, HousieServerBuilder};
