//! Field update policies shared by every entity builder
//!
//! The store writes "not set" as a missing field or a negative number.
//! Each policy decides what that means for one field: keep the default,
//! fail the entity, or map to the unset sentinel.

use std::fmt;

use crate::document::DocumentNode;
use crate::error::{BuildError, BuildResult};

/// Values at or above this are stored as "unset" for capped signed ids
pub const SIGNED_ID_CAP: i64 = 1000;

/// Signed identifier where -1 means "not set".
///
/// Persisted as an unsigned number; anything at or above
/// [`SIGNED_ID_CAP`] is read back as unset. The default is 0, matching a
/// field that was never written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SignedId(i32);

impl SignedId {
    pub const UNSET: SignedId = SignedId(-1);

    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw value including the -1 sentinel
    pub fn raw(self) -> i32 {
        self.0
    }

    pub fn is_set(self) -> bool {
        self.0 >= 0
    }

    /// The id, or `None` when unset
    pub fn get(self) -> Option<u32> {
        u32::try_from(self.0).ok()
    }

    fn from_stored(value: i64) -> Self {
        if value < SIGNED_ID_CAP {
            // value is in 0..SIGNED_ID_CAP, always fits
            Self(value as i32)
        } else {
            Self::UNSET
        }
    }
}

impl fmt::Display for SignedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "unset"),
        }
    }
}

/// Reads typed fields of one entity's sub-document
pub(crate) struct FieldReader<'a, N: DocumentNode> {
    node: &'a N,
    entity: &'static str,
    index: usize,
}

impl<'a, N: DocumentNode> FieldReader<'a, N> {
    pub fn new(node: &'a N, entity: &'static str, index: usize) -> Self {
        Self { node, entity, index }
    }

    /// Non-negative integer value of a field; negative counts as absent
    fn present(&self, key: &str) -> Option<i64> {
        self.node.int(key).filter(|v| *v >= 0)
    }

    fn convert<T: TryFrom<i64>>(&self, key: &'static str, value: i64) -> BuildResult<T> {
        T::try_from(value).map_err(|_| {
            BuildError::malformed(self.entity, self.index, key, format!("{} out of range", value))
        })
    }

    /// Assign when present, otherwise keep the current value
    pub fn optional<T: TryFrom<i64>>(&self, key: &'static str, field: &mut T) -> BuildResult<()> {
        if let Some(value) = self.present(key) {
            *field = self.convert(key, value)?;
        }
        Ok(())
    }

    /// Nonzero means true; absent keeps the current value
    pub fn flag(&self, key: &str, field: &mut bool) {
        if let Some(value) = self.present(key) {
            *field = value != 0;
        }
    }

    /// Capped signed id; absent keeps the current value
    pub fn capped_signed(&self, key: &str, field: &mut SignedId) {
        if let Some(value) = self.present(key) {
            *field = SignedId::from_stored(value);
        }
    }

    /// Field that must be present for the entity to exist
    pub fn required<T: TryFrom<i64>>(&self, key: &'static str) -> BuildResult<T> {
        let value = self
            .present(key)
            .ok_or_else(|| BuildError::missing(self.entity, self.index, key))?;
        self.convert(key, value)
    }

    /// Raw optional index; negative or absent means "none"
    pub fn index_ref(&self, key: &str) -> Option<i64> {
        self.present(key)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.node.string(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capped_signed() {
        let doc = json!({"low": 999, "cap": 1000, "high": 65535, "neg": -5});
        let reader = FieldReader::new(&doc, "stream", 0);

        let mut id = SignedId::default();
        reader.capped_signed("low", &mut id);
        assert_eq!(id.get(), Some(999));

        reader.capped_signed("cap", &mut id);
        assert_eq!(id, SignedId::UNSET);

        let mut id = SignedId::default();
        reader.capped_signed("high", &mut id);
        assert_eq!(id.raw(), -1);

        let mut id = SignedId::default();
        reader.capped_signed("neg", &mut id);
        reader.capped_signed("absent", &mut id);
        assert_eq!(id.raw(), 0);
        assert!(id.is_set());
    }

    #[test]
    fn test_optional_keeps_default() {
        let doc = json!({"port": "4000", "neg": -1});
        let reader = FieldReader::new(&doc, "sfd", 1);

        let mut port: u32 = 0;
        reader.optional("port", &mut port).unwrap();
        assert_eq!(port, 4000);

        let mut other: u32 = 7;
        reader.optional("neg", &mut other).unwrap();
        reader.optional("absent", &mut other).unwrap();
        assert_eq!(other, 7);
    }

    #[test]
    fn test_optional_out_of_range() {
        let doc = json!({"port": 5_000_000_000i64});
        let reader = FieldReader::new(&doc, "sfd", 2);
        let mut port: u32 = 0;
        let err = reader.optional("port", &mut port).unwrap_err();
        assert!(matches!(err, BuildError::MalformedValue { field: "port", index: 2, .. }));
    }

    #[test]
    fn test_flag() {
        let doc = json!({"on": 5, "off": "0", "bool": true});
        let reader = FieldReader::new(&doc, "tag", 0);
        let mut on = false;
        let mut off = true;
        let mut b = false;
        let mut untouched = true;
        reader.flag("on", &mut on);
        reader.flag("off", &mut off);
        reader.flag("bool", &mut b);
        reader.flag("absent", &mut untouched);
        assert!(on);
        assert!(!off);
        assert!(b);
        assert!(untouched);
    }

    #[test]
    fn test_required() {
        let doc = json!({"created": 1700000000});
        let reader = FieldReader::new(&doc, "tag", 3);
        let created: u64 = reader.required("created").unwrap();
        assert_eq!(created, 1700000000);

        let err = reader.required::<u64>("missing").unwrap_err();
        assert_eq!(err, BuildError::missing("tag", 3, "missing"));
    }
}
