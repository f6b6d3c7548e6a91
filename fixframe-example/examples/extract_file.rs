//! Frames every message in a captured FIX log.
//!
//! Usage: `cargo run --example extract_file -- <path>`
use anyhow::Context;
use fixframe::prelude::*;
use fixframe_example::{ExampleConfig, init_logging, printable};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_logging();
    let cfg = ExampleConfig::from_env();
    let path = std::env::args()
        .nth(1)
        .context("usage: extract_file <path>")?;

    let mut decoder = FrameDecoder::new(cfg.decoder_config())?;
    let registry = MessageRegistry::with_all_versions();

    let mut seen = 0usize;
    let framed = decoder.extract_messages_with(&path, &mut |text: String| {
        seen += 1;
        match registry.parse(&text, cfg.delimiter) {
            Ok(msg) => info!(
                n = seen,
                msg_type = %msg.msg_type(),
                fields = msg.field_count(),
                "{}",
                printable(&text, cfg.delimiter)
            ),
            Err(e) => warn!(n = seen, error = %e, "framed message does not parse"),
        }
    })?;

    info!(%path, framed, "done");
    Ok(())
}
