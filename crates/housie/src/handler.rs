//! Per-connection handler: decode, forward to the hub, write back.
//!
//! Each accepted connection gets one Tokio task running this handler
//! plus one writer task. The handler never touches game state — it
//! decodes client events and forwards them to the hub; the writer task
//! drains the connection's outbox channel and serializes server events
//! onto the wire. Splitting reads and writes this way means hub fan-out
//! never blocks on a peer that is slow to send us anything.

use housie_protocol::{ClientEvent, Codec, JsonCodec, PlayerId, ServerEvent};
use housie_transport::WebSocketConnection;
use tokio::sync::mpsc;

use crate::hub::{HubEvent, HubHandle};
use crate::HousieError;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    hub: HubHandle,
) -> Result<(), HousieError> {
    let player = PlayerId(conn.id().into_inner());
    tracing::debug!(%player, "handling new connection");

    let (tx, rx) = mpsc::unbounded_channel();
    spawn_writer(conn.clone(), player, rx);
    hub.send(HubEvent::Connected {
        player,
        outbox: tx.clone(),
    })
    .await;

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%player, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%player, error = %e, "recv error");
                break;
            }
        };

        let event: ClientEvent = match JsonCodec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%player, error = %e, "failed to decode event");
                // Malformed input is the sender's problem, not the room's.
                let _ = tx.send(ServerEvent::RoomError {
                    message: format!("invalid event: {e}"),
                });
                continue;
            }
        };

        hub.send(HubEvent::Inbound { player, event }).await;
    }

    // Covers clean leaves too: the hub's leave path is idempotent.
    hub.send(HubEvent::Disconnected { player }).await;
    Ok(())
}

/// Spawns the writer task: drains the outbox, encodes, sends.
///
/// Exits when the hub unregisters the connection (channel closes) or
/// the peer stops accepting frames.
fn spawn_writer(
    conn: WebSocketConnection,
    player: PlayerId,
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let bytes = match JsonCodec.encode(&event) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!(%player, error = %e, "failed to encode event");
                    continue;
                }
            };
            if let Err(e) = conn.send(&bytes).await {
                tracing::debug!(%player, error = %e, "send failed, writer exiting");
                break;
            }
        }
        let _ = conn.close().await;
        tracing::debug!(%player, "writer task finished");
    });
}
