use housie::{HousieError, HousieServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), HousieError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("HOUSIE_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let server = HousieServer::builder().bind(&addr).build().await?;
    tracing::info!(%addr, "Housie listening");
    server.run().await
}
