//! Restore a call from a stored document file and print its graph.
//!
//! ```text
//! call-restore --call-id abc@example.com dump.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use rvoip_call_restore::logging::setup_logging;
use rvoip_call_restore::{Call, CallRestorer, RestoreConfig, parse_document};

#[derive(Parser, Debug)]
#[command(name = "call-restore", about = "Rebuild a call from its persisted document")]
struct Args {
    /// Call-ID the document was stored under
    #[arg(long)]
    call_id: String,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Document to restore
    document: PathBuf,
}

fn print_call(call: &Call) {
    println!("call {} created={} last_signal={}", call.call_id, call.created, call.last_signal);
    if call.deleted || call.ml_deleted {
        println!("  deleted={} ml_deleted={}", call.deleted, call.ml_deleted);
    }
    for (idx, tag) in call.tags.iter().enumerate() {
        let other = call
            .other_tag(tag)
            .map(|t| t.unique_id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  tag {} '{}' label={} other={}",
            idx,
            tag.tag.as_deref().unwrap_or(""),
            tag.label.as_deref().unwrap_or("-"),
            other
        );
    }
    for media in &call.media {
        let tag = media.tag.map(|t| t.0.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "  media {} {} {} tag={} ptime={}",
            media.unique_id,
            media.media_type.as_deref().unwrap_or("?"),
            media.protocol.as_deref().unwrap_or("?"),
            tag,
            media.ptime
        );
        let codecs: Vec<&str> = media.codec_prefs_recv.iter().map(|p| p.encoded.as_str()).collect();
        println!("    recv [{}]", codecs.join(", "));
        let codecs: Vec<&str> = media.codec_prefs_send.iter().map(|p| p.encoded.as_str()).collect();
        println!("    send [{}]", codecs.join(", "));
        for stream in &media.streams {
            println!(
                "    stream {} component={} endpoint={} rtp_sink={} rtcp_sink={} sfds={}",
                stream.unique_id,
                stream.component,
                stream.endpoint.as_deref().unwrap_or("-"),
                stream.rtp_sink,
                stream.rtcp_sink,
                stream.fds.len()
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = RestoreConfig::load(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.log.level = level;
    }
    setup_logging(&config.log)?;

    let raw = std::fs::read_to_string(&args.document)
        .with_context(|| format!("reading {}", args.document.display()))?;
    let document = parse_document(&raw)?;

    let restorer = CallRestorer::new(config);
    let call = restorer.restore(&args.call_id, &document)?;
    info!("Restored call {} with {} media", call.call_id, call.media.len());
    print_call(&call);
    Ok(())
}
