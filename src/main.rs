//! The main entry point for the k3-console application.
mod app;
mod logging;
mod net;
mod session;
mod ui;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    app::launch().await
}
