//! Restored call graph
//!
//! A [`Call`] owns its media legs and its tag arena. Streams and socket
//! descriptors are shared through `Arc` so a flat view of them can be
//! handed out without copying. Tag links are indices into the arena.

use std::sync::Arc;

use crate::fields::SignedId;

/// Position of a tag in its call's tag arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub usize);

/// One local socket endpoint usable by a stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketDescriptor {
    pub unique_id: u32,
    /// Owning stream (foreign key)
    pub stream_unique_id: u32,
    pub pref_family: Option<String>,
    pub local_port: u32,
    pub logical_intf: Option<String>,
    pub logical_intf_uid: u32,
}

/// One RTP or RTCP flow within a media leg
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stream {
    pub unique_id: u32,
    /// Owning media (foreign key)
    pub media_unique_id: u32,
    pub selected_sfd: u32,
    pub rtp_sink: SignedId,
    pub rtcp_sink: SignedId,
    pub rtcp_sibling: SignedId,
    pub last_packet: u64,
    pub ps_flags: u32,
    pub component: u32,
    pub endpoint: Option<String>,
    pub advertised_endpoint: Option<String>,
    pub stats_packets: u64,
    pub stats_bytes: u64,
    pub stats_errors: u64,
    /// Descriptors whose `stream_unique_id` matches this stream, in
    /// declaration order
    pub fds: Vec<Arc<SocketDescriptor>>,
}

/// A signaling-side identity within a call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub unique_id: u32,
    pub created: u64,
    pub active: bool,
    pub deleted: bool,
    pub block_dtmf: bool,
    pub block_media: bool,
    pub tag: Option<String>,
    pub via_branch: Option<String>,
    pub label: Option<String>,
    /// Paired tag on the other side of the leg
    pub other_tag: Option<TagId>,
}

/// A negotiated codec entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadType {
    pub payload_type: u32,
    /// Everything after the first `/`, e.g. `opus/48000/2`
    pub codec: String,
    /// The stored entry as written, e.g. `111/opus/48000/2`
    pub encoded: String,
}

/// One negotiated media leg
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media {
    pub index: u32,
    pub unique_id: u32,
    pub media_type: Option<String>,
    pub protocol: Option<String>,
    pub desired_family: Option<String>,
    pub logical_intf: Option<String>,
    pub ptime: u32,
    pub media_flags: u32,
    pub rtpe_addr: Option<String>,
    pub tag: Option<TagId>,
    pub streams: Vec<Arc<Stream>>,
    pub codec_prefs_recv: Vec<PayloadType>,
    pub codec_prefs_send: Vec<PayloadType>,
}

/// A fully linked call restored from the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Call {
    pub call_id: String,
    pub created: u64,
    pub last_signal: u64,
    pub tos: u32,
    pub deleted: bool,
    pub ml_deleted: bool,
    pub created_from: Option<String>,
    pub created_from_addr: Option<String>,
    pub redis_hosted_db: u32,
    pub recording_metadata: Option<String>,
    pub block_dtmf: bool,
    pub block_media: bool,
    pub media: Vec<Media>,
    pub tags: Vec<Tag>,
}

impl Call {
    /// Look up a tag by arena index
    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(id.0)
    }

    /// The tag owning a media leg
    pub fn media_tag(&self, media: &Media) -> Option<&Tag> {
        media.tag.and_then(|id| self.tag(id))
    }

    /// The tag paired with `tag`
    pub fn other_tag(&self, tag: &Tag) -> Option<&Tag> {
        tag.other_tag.and_then(|id| self.tag(id))
    }

    /// All streams across all media, media order first, then stream order.
    /// The returned list is new; it shares the streams but not the media's
    /// own lists.
    pub fn streams(&self) -> Vec<Arc<Stream>> {
        self.media
            .iter()
            .flat_map(|media| media.streams.iter().cloned())
            .collect()
    }

    /// Resolve a sink or sibling id to the stream it names
    pub fn stream_by_id(&self, id: SignedId) -> Option<Arc<Stream>> {
        let id = id.get()?;
        self.media
            .iter()
            .flat_map(|media| media.streams.iter())
            .find(|stream| stream.unique_id == id)
            .cloned()
    }
}

/// Flat list of every stream in the call
pub fn streams_of(call: &Call) -> Vec<Arc<Stream>> {
    call.streams()
}
