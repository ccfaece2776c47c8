//! Datagen Worker Service Entry Point
//!
//! Loads configuration and starts the HTTP server.

use datagen_worker::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
