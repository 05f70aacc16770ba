//! Optional per-instance context handed to a creator.

use crate::cause::Cause;
use crate::instance::VariantError;
use serde_json::Value;

/// Metadata and cause for one instance.
///
/// Creators take `impl Into<Details>`, so the common shapes read naturally:
///
/// ```rust
/// use serde_json::json;
/// use taxon::Details;
///
/// let storage = taxon::create("StorageError", [("NotFound", "record not found")]).unwrap();
/// let not_found = storage.creator("NotFound").unwrap();
///
/// let bare = not_found.create(());
/// let with_meta = not_found.create(json!({ "id": 7 }));
/// let wrapped = not_found.create(bare.clone());       // an error becomes the cause
/// let both = not_found.create(Details::new().with_metadata(json!(7)).with_cause(with_meta));
///
/// assert!(wrapped.metadata().is_none());
/// assert!(both.cause().is_some_and(|c| c.is_variant()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Details {
    pub metadata: Option<Value>,
    pub cause: Option<Cause>,
}

impl Details {
    /// No metadata, no cause
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: impl Into<Value>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// Attach a cause
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

impl From<()> for Details {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

/// A bare value is metadata.
impl From<Value> for Details {
    fn from(metadata: Value) -> Self {
        Self::new().with_metadata(metadata)
    }
}

/// A bare error is the cause, with metadata left unset.
impl From<Cause> for Details {
    fn from(cause: Cause) -> Self {
        Self::new().with_cause(cause)
    }
}

impl From<VariantError> for Details {
    fn from(err: VariantError) -> Self {
        Self::new().with_cause(err)
    }
}

impl From<anyhow::Error> for Details {
    fn from(err: anyhow::Error) -> Self {
        Self::new().with_cause(err)
    }
}

impl From<std::io::Error> for Details {
    fn from(err: std::io::Error) -> Self {
        Self::new().with_cause(err)
    }
}

impl From<(Value, Cause)> for Details {
    fn from((metadata, cause): (Value, Cause)) -> Self {
        Self::new().with_metadata(metadata).with_cause(cause)
    }
}
