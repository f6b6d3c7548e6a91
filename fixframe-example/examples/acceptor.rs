//! TCP acceptor that frames inbound FIX streams.
//!
//! Every connection gets its own decoder forked from one validated
//! template. Corrupt streams are dropped.
use bytes::{Buf, BytesMut};
use fixframe::prelude::*;
use fixframe_example::{ExampleConfig, init_logging, printable};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cfg = ExampleConfig::from_env();
    let template = FrameDecoder::new(cfg.decoder_config())?;
    let registry = Arc::new(MessageRegistry::with_all_versions());

    info!("Listening on {}", cfg.addr());
    let listener = TcpListener::bind(&cfg.addr()).await?;
    loop {
        let (socket, addr) = listener.accept().await?;
        info!("Connection from {}", addr);
        let decoder = template.fork();
        let registry = Arc::clone(&registry);
        let delimiter = cfg.delimiter;
        tokio::spawn(async move {
            match handle(socket, decoder, &registry, delimiter).await {
                Ok(count) => info!("{} closed after {} messages", addr, count),
                Err(e) => error!("{} dropped: {}", addr, e),
            }
        });
    }
}

async fn handle(
    mut sock: TcpStream,
    mut decoder: FrameDecoder,
    registry: &MessageRegistry,
    delimiter: u8,
) -> anyhow::Result<usize> {
    let mut buf = BytesMut::with_capacity(4096);
    let mut framed: Vec<String> = Vec::new();
    let mut count = 0;
    loop {
        if sock.read_buf(&mut buf).await? == 0 {
            decoder.finish();
            return Ok(count);
        }
        if decoder.probe(&buf) == Decodability::Corrupt {
            anyhow::bail!("{} bytes without a FIX header", buf.len());
        }

        let status = decoder.decode(&buf, &mut framed)?;
        buf.advance(status.consumed());

        for text in framed.drain(..) {
            count += 1;
            match registry.parse(&text, delimiter) {
                Ok(msg) => info!(msg_type = %msg.msg_type(), "{}", printable(&text, delimiter)),
                Err(e) => warn!(error = %e, "unparseable message"),
            }
        }
    }
}
