//! Call restoration entry point
//!
//! Builds the whole graph in dependency order: call metadata, tags, socket
//! descriptors, streams, then media. Any failure drops everything built so
//! far and reports a single warning naming the call.

use tracing::{debug, warn};

use crate::config::RestoreConfig;
use crate::document::DocumentNode;
use crate::error::{BuildError, BuildResult, CALL_ENTITY, RestoreError, Result};
use crate::fields::FieldReader;
use crate::media::read_media;
use crate::model::Call;
use crate::socket::read_sockets;
use crate::stream::read_streams;
use crate::tag::read_tags;

/// Restores calls from their persisted documents.
///
/// Holds no per-call state; one restorer can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct CallRestorer {
    config: RestoreConfig,
}

impl CallRestorer {
    pub fn new(config: RestoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RestoreConfig {
        &self.config
    }

    /// Rebuild the call stored under `call_id`.
    ///
    /// Returns either a fully linked [`Call`] or the reason it could not be
    /// built; partial graphs are never returned.
    pub fn restore<N: DocumentNode>(&self, call_id: &str, document: &N) -> Result<Call> {
        self.build(call_id, document).inspect_err(|err| {
            warn!(
                target: "restore",
                call_id = %call_id,
                error = %err,
                "Failed to read call data '{}' from store: {}",
                call_id,
                err
            );
        })
    }

    fn build<N: DocumentNode>(&self, call_id: &str, document: &N) -> Result<Call> {
        if call_id.is_empty() {
            return Err(RestoreError::CallData(BuildError::missing(
                CALL_ENTITY,
                0,
                "call_id",
            )));
        }
        let data = document
            .member(&self.config.root_section)
            .ok_or(RestoreError::CallDataNotFound)?;

        let mut call = read_metadata(call_id, data).map_err(RestoreError::CallData)?;
        read_graph(document, &mut call).map_err(RestoreError::CallMedia)?;

        debug!(
            call_id = %call_id,
            media = call.media.len(),
            tags = call.tags.len(),
            "Restored call"
        );
        Ok(call)
    }
}

fn read_metadata<N: DocumentNode>(call_id: &str, node: &N) -> BuildResult<Call> {
    let reader = FieldReader::new(node, CALL_ENTITY, 0);
    let mut call = Call {
        call_id: call_id.to_string(),
        created: reader.required("created")?,
        ..Default::default()
    };
    reader.optional("last_signal", &mut call.last_signal)?;
    reader.optional("tos", &mut call.tos)?;
    reader.flag("deleted", &mut call.deleted);
    reader.flag("ml_deleted", &mut call.ml_deleted);
    call.created_from = reader.text("created_from");
    call.created_from_addr = reader.text("created_from_addr");
    reader.optional("redis_hosted_db", &mut call.redis_hosted_db)?;
    call.recording_metadata = reader.text("recording_metadata");
    reader.flag("block_dtmf", &mut call.block_dtmf);
    reader.flag("block_media", &mut call.block_media);
    Ok(call)
}

/// Tags and sockets first, then streams over sockets, then media over
/// tags and streams. The flat stream list is dropped once the media hold
/// their own references.
fn read_graph<N: DocumentNode>(root: &N, call: &mut Call) -> BuildResult<()> {
    let tags = read_tags(root)?;
    let sockets = read_sockets(root)?;
    let streams = read_streams(root, &sockets)?;
    call.media = read_media(root, &tags, &streams)?;
    call.tags = tags;
    Ok(())
}

/// Restore a call with the default configuration
pub fn reconstruct<N: DocumentNode>(call_id: &str, document: &N) -> Result<Call> {
    CallRestorer::default().restore(call_id, document)
}
