//! Socket descriptors (`sfd-<i>`)

use std::sync::Arc;

use tracing::debug;

use crate::document::{DocumentNode, scan, unique_id};
use crate::error::BuildResult;
use crate::fields::FieldReader;
use crate::model::SocketDescriptor;

fn build_socket<N: DocumentNode>(idx: usize, node: &N) -> BuildResult<SocketDescriptor> {
    let reader = FieldReader::new(node, "sfd", idx);
    let mut sfd = SocketDescriptor {
        unique_id: unique_id(idx),
        stream_unique_id: reader.required("stream")?,
        ..Default::default()
    };
    sfd.pref_family = reader.text("pref_family");
    reader.optional("localport", &mut sfd.local_port)?;
    sfd.logical_intf = reader.text("logical_intf");
    reader.optional("local_intf_uid", &mut sfd.logical_intf_uid)?;
    Ok(sfd)
}

/// Read every socket descriptor of the call into a flat list
pub(crate) fn read_sockets<N: DocumentNode>(root: &N) -> BuildResult<Vec<Arc<SocketDescriptor>>> {
    let sockets = scan(root, "sfd")
        .map(|(idx, node)| build_socket(idx, node).map(Arc::new))
        .collect::<BuildResult<Vec<_>>>()?;
    debug!("Read {} socket descriptors", sockets.len());
    Ok(sockets)
}
