//! michi demo server.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -- --addr 127.0.0.1:3333
//!
//! Try:
//!   curl http://localhost:3333/hey/Keiko
//!   curl http://localhost:3333/mdtest
//!   curl -X PUT -d "key_a=value_b" http://localhost:3333/articles/1

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use michi::Server;
use michi::config::Config;
use michi::demo::{self, ArticleStore};

#[derive(Debug, Parser)]
#[command(version, about = "Articles demo server")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file.
    #[arg(short, long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(addr) = args.addr {
        config.addr = addr;
    }

    // RUST_LOG wins over the config file.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log).context("invalid log filter")?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Arc::new(ArticleStore::seeded());
    Server::bind(config.addr)
        .serve(demo::router(store))
        .await?;
    Ok(())
}
