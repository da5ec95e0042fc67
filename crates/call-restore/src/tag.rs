//! Signaling tags and their pairings

use tracing::debug;

use crate::document::{DocumentNode, indexed, scan, unique_id};
use crate::error::{BuildError, BuildResult};
use crate::fields::FieldReader;
use crate::model::{Tag, TagId};

fn build_tag<N: DocumentNode>(idx: usize, node: &N) -> BuildResult<Tag> {
    let reader = FieldReader::new(node, "tag", idx);
    let mut tag = Tag {
        unique_id: unique_id(idx),
        created: reader.required("created")?,
        ..Default::default()
    };
    reader.flag("active", &mut tag.active);
    reader.flag("deleted", &mut tag.deleted);
    reader.flag("block_dtmf", &mut tag.block_dtmf);
    reader.flag("block_media", &mut tag.block_media);
    tag.tag = reader.text("tag");
    tag.via_branch = reader.text("viabranch");
    tag.label = reader.text("label");
    Ok(tag)
}

/// Pair `tags[idx]` with every tag listed in `partners`. Both sides point
/// at each other; a later pairing replaces an earlier one.
fn match_tags<N: DocumentNode>(tags: &mut [Tag], idx: usize, partners: &N) -> BuildResult<()> {
    if !partners.is_array() {
        return Err(BuildError::malformed("tag", idx, "other_tags", "not a list"));
    }

    for pos in 0..partners.len() {
        let other = partners
            .element(pos)
            .and_then(|e| e.as_int())
            .filter(|v| *v >= 0)
            .ok_or_else(|| {
                let details = format!("entry {} is not a tag index", pos);
                BuildError::malformed("tag", idx, "other_tags", details)
            })?;
        let other_idx = usize::try_from(other)
            .ok()
            .filter(|i| *i < tags.len())
            .ok_or_else(|| BuildError::dangling("tag", idx, "tag", other))?;

        tags[idx].other_tag = Some(TagId(other_idx));
        tags[other_idx].other_tag = Some(TagId(idx));
    }

    Ok(())
}

/// Read `tag-0`, `tag-1`, ... then resolve `other_tags-<i>` pairings.
pub(crate) fn read_tags<N: DocumentNode>(root: &N) -> BuildResult<Vec<Tag>> {
    let mut tags = scan(root, "tag")
        .map(|(idx, node)| build_tag(idx, node))
        .collect::<BuildResult<Vec<_>>>()?;

    for idx in 0..tags.len() {
        // A missing list means the tag has no partners
        if let Some(partners) = root.member(&indexed("other_tags", idx)) {
            match_tags(&mut tags, idx, partners)?;
        }
    }

    debug!("Read {} tags", tags.len());
    Ok(tags)
}
