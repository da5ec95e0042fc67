//! Codec preference tables
//!
//! Each media leg stores two lists of `"<payload type>/<codec>"` strings,
//! one per direction. A single bad entry invalidates the whole table.

use tracing::trace;

use crate::document::DocumentNode;
use crate::error::{BuildError, BuildResult};
use crate::model::PayloadType;

const ENTITY: &str = "payload";

/// Parse one stored entry such as `8/PCMA/8000`.
///
/// The payload type must be plain decimal digits. The codec part may be
/// empty (`8/`); the table keeps whatever name was stored.
pub fn parse_payload_type(encoded: &str) -> Option<PayloadType> {
    let (pt, codec) = encoded.split_once('/')?;
    if pt.is_empty() || !pt.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let payload_type = pt.parse::<u32>().ok()?;
    Some(PayloadType {
        payload_type,
        codec: codec.to_string(),
        encoded: encoded.to_string(),
    })
}

/// Build an ordered payload table from an array node.
///
/// `field` names the companion document for error reporting and
/// `media_idx` is the media leg it belongs to.
pub(crate) fn read_payloads<N: DocumentNode>(
    node: &N,
    media_idx: usize,
    field: &'static str,
) -> BuildResult<Vec<PayloadType>> {
    if !node.is_array() {
        return Err(BuildError::malformed(ENTITY, media_idx, field, "not a list"));
    }

    let mut payloads = Vec::with_capacity(node.len());
    for idx in 0..node.len() {
        let encoded = node
            .element(idx)
            .and_then(|element| element.as_string())
            .ok_or_else(|| {
                let details = format!("entry {} is not a string", idx);
                BuildError::malformed(ENTITY, media_idx, field, details)
            })?;

        let payload = parse_payload_type(&encoded).ok_or_else(|| {
            BuildError::malformed(ENTITY, media_idx, field, format!("bad entry '{}'", encoded))
        })?;
        trace!("media {}: {} PT:{} -> {}", media_idx, field, payload.payload_type, payload.codec);
        payloads.push(payload);
    }

    Ok(payloads)
}
