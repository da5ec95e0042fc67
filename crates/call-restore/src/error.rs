//! Error types for call restoration
//!
//! Two layers: [`BuildError`] describes why a single entity could not be
//! built, and [`RestoreError`] is what callers of the restore entry point
//! see, naming the stage of the document that was being read.

use thiserror::Error;

/// Result type for restore operations
pub type Result<T> = std::result::Result<T, RestoreError>;

/// Result type used by the individual entity builders
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Entity name of the call-level metadata; there is only ever one
pub(crate) const CALL_ENTITY: &str = "call";

fn location(entity: &str, index: &usize) -> String {
    if entity == CALL_ENTITY {
        entity.to_string()
    } else {
        format!("{} {}", entity, index)
    }
}

/// Reasons an entity of the call graph could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A field documented as required was absent
    #[error("{}: missing required field '{field}'", location(.entity, .index))]
    MissingField {
        entity: &'static str,
        index: usize,
        field: &'static str,
    },

    /// An index or foreign key points to an entity that does not exist
    #[error(
        "{}: {target} reference {reference} does not exist",
        location(.entity, .index)
    )]
    DanglingReference {
        entity: &'static str,
        index: usize,
        target: &'static str,
        reference: i64,
    },

    /// A value is present but cannot be interpreted
    #[error("{}: malformed '{field}': {details}", location(.entity, .index))]
    MalformedValue {
        entity: &'static str,
        index: usize,
        field: &'static str,
        details: String,
    },

    /// One of the per-media companion documents is absent
    #[error("media {index}: companion document '{document}-{index}' is missing")]
    MissingCompanion {
        document: &'static str,
        index: usize,
    },
}

impl BuildError {
    pub(crate) fn missing(entity: &'static str, index: usize, field: &'static str) -> Self {
        Self::MissingField { entity, index, field }
    }

    pub(crate) fn dangling(
        entity: &'static str,
        index: usize,
        target: &'static str,
        reference: i64,
    ) -> Self {
        Self::DanglingReference {
            entity,
            index,
            target,
            reference,
        }
    }

    pub(crate) fn malformed(
        entity: &'static str,
        index: usize,
        field: &'static str,
        details: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            entity,
            index,
            field,
            details: details.into(),
        }
    }
}

/// Errors returned from the restore entry points
#[derive(Debug, Error)]
pub enum RestoreError {
    /// The root document has no call section
    #[error("Could not find call data")]
    CallDataNotFound,

    /// The call-level metadata could not be read
    #[error("Failed to read call data: {0}")]
    CallData(#[source] BuildError),

    /// Tags, sockets, streams or media could not be read
    #[error("Failed to read call media: {0}")]
    CallMedia(#[source] BuildError),

    /// The raw document text is not valid JSON
    #[error("Document parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RestoreError {
    /// The underlying build failure, if the document itself was inconsistent
    pub fn build_error(&self) -> Option<&BuildError> {
        match self {
            Self::CallData(e) | Self::CallMedia(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for RestoreError {
    fn from(err: config::ConfigError) -> Self {
        RestoreError::Config(err.to_string())
    }
}
