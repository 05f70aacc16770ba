//! # Variant Instances
//!
//! `VariantError` is the value a creator hands back: the error an
//! application actually returns, wraps, and logs.

use crate::cause::Cause;
use crate::stack;
use crate::variant::ErrorVariant;
use crate::Details;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// One error built from an [`ErrorVariant`].
///
/// Immutable after construction. Clones share the same instance, so a cause
/// chain always points at the original error rather than a copy.
#[derive(Clone)]
pub struct VariantError {
    repr: Arc<Repr>,
}

struct Repr {
    variant: ErrorVariant,
    code: Arc<str>,
    metadata: Option<Value>,
    cause: Option<Cause>,
    stack: String,
}

impl VariantError {
    #[track_caller]
    pub(crate) fn construct(variant: ErrorVariant, code: Arc<str>, details: Details) -> Self {
        let caller = Location::caller();

        let header = match variant.message(&code) {
            Some(message) => format!("{}: {}", variant.name(), message),
            None => variant.name().to_string(),
        };
        let stack = stack::capture(variant.capture(), &header, caller);

        tracing::trace!(
            variant = %variant.name(),
            code = %code,
            location = %caller,
            "error instance created"
        );

        Self {
            repr: Arc::new(Repr {
                variant,
                code,
                metadata: details.metadata,
                cause: details.cause,
                stack,
            }),
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// The variant's name
    pub fn name(&self) -> &str {
        self.repr.variant.name()
    }

    /// The code this instance was built with
    pub fn code(&self) -> &str {
        &self.repr.code
    }

    /// Current message for this instance's code, read from the variant's
    /// table on every call. `None` when the table has no entry.
    pub fn message(&self) -> Option<String> {
        self.repr.variant.message(&self.repr.code)
    }

    /// Attached metadata
    pub fn metadata(&self) -> Option<&Value> {
        self.repr.metadata.as_ref()
    }

    /// The triggering error or value
    pub fn cause(&self) -> Option<&Cause> {
        self.repr.cause.as_ref()
    }

    /// Stack captured at construction
    pub fn stack(&self) -> &str {
        &self.repr.stack
    }

    /// The variant that built this instance
    pub fn variant(&self) -> &ErrorVariant {
        &self.repr.variant
    }

    /// Per-code predicate
    pub fn is(&self, code: &str) -> bool {
        *self.repr.code == *code
    }

    /// True when this instance was built by `variant`
    pub fn is_instance_of(&self, variant: &ErrorVariant) -> bool {
        variant.owns(self)
    }

    /// True when `other` is this very instance (or a clone of it)
    pub fn ptr_eq(&self, other: &VariantError) -> bool {
        Arc::ptr_eq(&self.repr, &other.repr)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Diagnostic structure: `{ name, code, metadata?, cause?, stack }`.
    ///
    /// `metadata` and `cause` are left out when absent or `null`. A variant
    /// cause is expanded through its own `to_json`, any other error is
    /// reduced to `{ code?, message, stack? }`, and plain values are kept
    /// as they are.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name().to_string()));
        map.insert("code".to_string(), Value::String(self.code().to_string()));

        if let Some(metadata) = self.metadata().filter(|m| !m.is_null()) {
            map.insert("metadata".to_string(), metadata.clone());
        }

        if let Some(cause) = self.cause().filter(|c| !c.is_null()) {
            map.insert("cause".to_string(), cause.to_json());
        }

        map.insert("stack".to_string(), Value::String(self.stack().to_string()));
        Value::Object(map)
    }

    /// The full captured stack
    pub fn to_detailed_string(&self) -> String {
        self.repr.stack.clone()
    }
}

// =============================================================================
// Display - "<name>: <message>"
// =============================================================================

impl fmt::Display for VariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {}", self.name(), message),
            None => write!(f, "{}", self.name()),
        }
    }
}

impl fmt::Debug for VariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("VariantError");
        d.field("name", &self.name());
        d.field("code", &self.code());
        d.field("message", &self.message());
        if let Some(metadata) = self.metadata() {
            d.field("metadata", metadata);
        }
        if let Some(cause) = self.cause() {
            d.field("cause", cause);
        }
        d.finish()
    }
}

impl std::error::Error for VariantError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause().and_then(Cause::as_error)
    }
}

impl Serialize for VariantError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
