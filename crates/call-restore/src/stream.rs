//! Transport streams (`stream-<i>`)

use std::sync::Arc;

use tracing::debug;

use crate::document::{DocumentNode, scan, unique_id};
use crate::error::BuildResult;
use crate::fields::FieldReader;
use crate::model::{SocketDescriptor, Stream};

fn build_stream<N: DocumentNode>(
    idx: usize,
    node: &N,
    sockets: &[Arc<SocketDescriptor>],
) -> BuildResult<Stream> {
    let reader = FieldReader::new(node, "stream", idx);
    let mut stream = Stream {
        unique_id: unique_id(idx),
        media_unique_id: reader.required("media")?,
        ..Default::default()
    };
    reader.optional("sfd", &mut stream.selected_sfd)?;
    reader.capped_signed("rtp_sink", &mut stream.rtp_sink);
    reader.capped_signed("rtcp_sink", &mut stream.rtcp_sink);
    reader.capped_signed("rtcp_sibling", &mut stream.rtcp_sibling);
    reader.optional("last_packet", &mut stream.last_packet)?;
    reader.optional("ps_flags", &mut stream.ps_flags)?;
    reader.optional("component", &mut stream.component)?;
    stream.endpoint = reader.text("endpoint");
    stream.advertised_endpoint = reader.text("advertised_endpoint");
    reader.optional("stats-packets", &mut stream.stats_packets)?;
    reader.optional("stats-bytes", &mut stream.stats_bytes)?;
    reader.optional("stats-errors", &mut stream.stats_errors)?;

    stream.fds = sockets
        .iter()
        .filter(|sfd| sfd.stream_unique_id == stream.unique_id)
        .cloned()
        .collect();

    Ok(stream)
}

/// Read every stream of the call, attaching the socket descriptors that
/// name it as their owner.
pub(crate) fn read_streams<N: DocumentNode>(
    root: &N,
    sockets: &[Arc<SocketDescriptor>],
) -> BuildResult<Vec<Arc<Stream>>> {
    let streams = scan(root, "stream")
        .map(|(idx, node)| build_stream(idx, node, sockets).map(Arc::new))
        .collect::<BuildResult<Vec<_>>>()?;
    debug!("Read {} streams", streams.len());
    Ok(streams)
}
