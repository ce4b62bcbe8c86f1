//! `HousieServer` builder and accept loop.
//!
//! This is the entry point for running a Housie server. It ties the
//! layers together: transport → protocol → hub (sessions + rooms).

use housie_transport::WebSocketListener;

use crate::handler::handle_connection;
use crate::hub::{spawn_hub, HubHandle};
use crate::HousieError;

/// Capacity of the hub's inbound event queue. Generous for a game
/// paced by humans clicking numbers.
const HUB_CHANNEL_SIZE: usize = 64;

/// Builder for configuring and starting a Housie server.
///
/// # Example
///
/// ```rust,ignore
/// let server = HousieServer::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct HousieServerBuilder {
    bind_addr: String,
    room_capacity: usize,
}

impl HousieServerBuilder {
    /// Creates a new builder with default settings: localhost bind,
    /// two-seat rooms.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            room_capacity: housie_room::DEFAULT_CAPACITY,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets how many seats each room has.
    pub fn room_capacity(mut self, capacity: usize) -> Self {
        self.room_capacity = capacity;
        self
    }

    /// Binds the listener and spawns the game hub.
    pub async fn build(self) -> Result<HousieServer, HousieError> {
        let listener = WebSocketListener::bind(&self.bind_addr).await?;
        let hub = spawn_hub(self.room_capacity, HUB_CHANNEL_SIZE);
        Ok(HousieServer { listener, hub })
    }
}

impl Default for HousieServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Housie server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct HousieServer {
    listener: WebSocketListener,
    hub: HubHandle,
}

impl HousieServer {
    /// Creates a new builder.
    pub fn builder() -> HousieServerBuilder {
        HousieServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop: one handler task per connection. Runs
    /// until the process is terminated.
    pub async fn run(mut self) -> Result<(), HousieError> {
        tracing::info!("Housie server running");

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let hub = self.hub.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, hub).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
