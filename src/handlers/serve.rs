//! Server handler: run the Python companion server.

use anyhow::Result;

use crate::config::Config;
use crate::server;

pub async fn run(cfg: &Config, port: u16) -> Result<()> {
    server::serve(cfg, port).await
}
