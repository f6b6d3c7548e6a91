//! Replays a captured FIX log to the acceptor in small chunks.
//!
//! Usage: `cargo run --example replay -- <path> [chunk-size]`
use anyhow::Context;
use fixframe::prelude::*;
use fixframe_example::{ExampleConfig, init_logging};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::info;

const DEFAULT_CHUNK: usize = 17;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cfg = ExampleConfig::from_env();
    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: replay <path> [chunk-size]")?;
    let chunk = args
        .next()
        .and_then(|c| c.parse().ok())
        .filter(|&c: &usize| c > 0)
        .unwrap_or(DEFAULT_CHUNK);

    let mut decoder = FrameDecoder::new(cfg.decoder_config())?;
    let messages = decoder.extract_messages(&path)?;
    info!("Replaying {} messages from {} to {}", messages.len(), path, cfg.addr());

    let mut sock = TcpStream::connect(&cfg.addr()).await?;
    let mut wire = Vec::new();
    for message in &messages {
        wire.extend_from_slice(message.as_bytes());
        wire.extend_from_slice(b"10=000");
        wire.push(cfg.delimiter);
    }
    for piece in wire.chunks(chunk) {
        sock.write_all(piece).await?;
    }
    sock.shutdown().await?;
    Ok(())
}
