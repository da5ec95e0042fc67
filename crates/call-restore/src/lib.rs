//! # Call Restore
//!
//! Rebuilds the in-memory state of a relayed call from the document it was
//! persisted as, typically after a restart or failover.
//!
//! The stored document is flat: lists are encoded as numbered fields
//! (`tag-0`, `tag-1`, ...) and relations as indices or foreign keys. This
//! crate turns it back into a linked [`Call`]:
//!
//! ```text
//! Call ─┬─ tags: [Tag] ◄─── other_tag (TagId)
//!       └─ media: [Media] ─┬─ tag (TagId)
//!                          ├─ codec_prefs_recv / codec_prefs_send
//!                          └─ streams: [Stream] ── fds: [SocketDescriptor]
//! ```
//!
//! Restoration is all-or-nothing: a document with a missing required
//! field, a dangling reference, a malformed payload entry or a missing
//! companion document yields an error and no call.
//!
//! ## Example
//!
//! ```
//! use rvoip_call_restore::{parse_document, reconstruct};
//!
//! let raw = r#"{
//!     "json": {"created": "1700000000"},
//!     "tag-0": {"created": "1700000000", "tag": "a1"},
//!     "media-0": {"tag": "0", "type": "audio"},
//!     "streams-0": [], "maps-0": [],
//!     "payload_types-0": ["0/PCMU"], "payload_types_send-0": ["0/PCMU"]
//! }"#;
//!
//! let doc = parse_document(raw).unwrap();
//! let call = reconstruct("abc@example.com", &doc).unwrap();
//! assert_eq!(call.media.len(), 1);
//! assert_eq!(call.media_tag(&call.media[0]).unwrap().tag.as_deref(), Some("a1"));
//! ```

pub mod call;
pub mod config;
pub mod document;
pub mod error;
pub mod fields;
pub mod logging;
pub mod model;
pub mod payload;

mod media;
mod socket;
mod stream;
mod tag;

pub use call::{CallRestorer, reconstruct};
pub use config::{LogSettings, RestoreConfig};
pub use document::{DocumentNode, parse_document};
pub use error::{BuildError, RestoreError, Result};
pub use fields::{SIGNED_ID_CAP, SignedId};
pub use model::{
    Call, Media, PayloadType, SocketDescriptor, Stream, Tag, TagId, streams_of,
};
