//! Media legs (`media-<i>`) and their companion documents

use std::sync::Arc;

use tracing::debug;

use crate::document::{DocumentNode, indexed, unique_id};
use crate::error::{BuildError, BuildResult};
use crate::fields::FieldReader;
use crate::model::{Media, Stream, Tag, TagId};
use crate::payload::read_payloads;

const STREAM_IDS: &str = "streams";
const ENDPOINT_MAPS: &str = "maps";
const PAYLOADS_RECV: &str = "payload_types";
const PAYLOADS_SEND: &str = "payload_types_send";

/// The documents stored next to `media-<i>`
struct Companions<'a, N> {
    // Presence is required; content is owned by the relay layer
    _stream_ids: &'a N,
    _endpoint_maps: &'a N,
    payloads_recv: &'a N,
    payloads_send: &'a N,
}

impl<'a, N: DocumentNode> Companions<'a, N> {
    fn fetch(root: &'a N, idx: usize) -> BuildResult<Self> {
        let get = |document: &'static str| {
            root.member(&indexed(document, idx))
                .ok_or(BuildError::MissingCompanion { document, index: idx })
        };
        Ok(Self {
            _stream_ids: get(STREAM_IDS)?,
            _endpoint_maps: get(ENDPOINT_MAPS)?,
            payloads_recv: get(PAYLOADS_RECV)?,
            payloads_send: get(PAYLOADS_SEND)?,
        })
    }
}

fn build_media<N: DocumentNode>(
    idx: usize,
    node: &N,
    companions: &Companions<'_, N>,
    tags: &[Tag],
    streams: &[Arc<Stream>],
) -> BuildResult<Media> {
    let reader = FieldReader::new(node, "media", idx);
    let mut media = Media {
        unique_id: unique_id(idx),
        ..Default::default()
    };

    if let Some(tag_ref) = reader.index_ref("tag") {
        let tag_idx = usize::try_from(tag_ref)
            .ok()
            .filter(|i| *i < tags.len())
            .ok_or_else(|| BuildError::dangling("media", idx, "tag", tag_ref))?;
        media.tag = Some(TagId(tag_idx));
    }
    reader.optional("index", &mut media.index)?;
    media.media_type = reader.text("type");
    media.protocol = reader.text("protocol");
    media.desired_family = reader.text("desired_family");
    media.logical_intf = reader.text("logical_intf");
    reader.optional("ptime", &mut media.ptime)?;
    reader.optional("media_flags", &mut media.media_flags)?;
    media.rtpe_addr = reader.text("rtpe_addr");

    media.streams = streams
        .iter()
        .filter(|stream| stream.media_unique_id == media.unique_id)
        .cloned()
        .collect();

    media.codec_prefs_recv = read_payloads(companions.payloads_recv, idx, PAYLOADS_RECV)?;
    media.codec_prefs_send = read_payloads(companions.payloads_send, idx, PAYLOADS_SEND)?;

    Ok(media)
}

/// Read `media-0`, `media-1`, ... against the already built tags and
/// streams. Every present media must have all four companion documents.
pub(crate) fn read_media<N: DocumentNode>(
    root: &N,
    tags: &[Tag],
    streams: &[Arc<Stream>],
) -> BuildResult<Vec<Media>> {
    let mut media = Vec::new();
    for idx in 0.. {
        let Some(node) = root.member(&indexed("media", idx)) else {
            break;
        };
        let companions = Companions::fetch(root, idx)?;
        media.push(build_media(idx, node, &companions, tags, streams)?);
    }

    debug!("Read {} media", media.len());
    Ok(media)
}
