//! # Error Variant
//!
//! A variant is the type one factory call produces: a name, a closed set of
//! declared codes, a shared message table, and a stack capture policy.
//! Variants are cheap handles; clones share identity, separate factory calls
//! never do.

use crate::error::{self, Result};
use crate::instance::VariantError;
use crate::stack::StackCapture;
use crate::table::MessageTable;
use crate::Details;
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::sync::Arc;

/// An error type bound to one name and one set of codes.
#[derive(Clone)]
pub struct ErrorVariant {
    inner: Arc<VariantInner>,
}

struct VariantInner {
    name: String,
    declared: IndexSet<Arc<str>>,
    messages: Arc<MessageTable>,
    capture: StackCapture,
}

impl ErrorVariant {
    /// Start building a variant
    pub fn builder(name: impl Into<String>) -> VariantBuilder {
        VariantBuilder::new(name)
    }

    fn from_parts(name: String, messages: Arc<MessageTable>, capture: StackCapture) -> Self {
        let declared = messages.codes().into_iter().map(Arc::from).collect::<IndexSet<_>>();
        tracing::debug!(variant = %name, codes = declared.len(), ?capture, "error variant created");
        Self {
            inner: Arc::new(VariantInner {
                name,
                declared,
                messages,
                capture,
            }),
        }
    }

    #[doc(hidden)]
    pub fn __from_static(
        name: &'static str,
        codes: &[(&'static str, &'static str)],
        capture: StackCapture,
    ) -> Self {
        let messages = Arc::new(MessageTable::from_pairs(codes.iter().copied()));
        Self::from_parts(name.to_string(), messages, capture)
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// The variant's name, shared by every instance
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Codes declared at factory time, in declaration order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.inner.declared.iter().map(|code| code.as_ref())
    }

    /// Whether `code` was declared when the variant was created
    pub fn is_declared(&self, code: &str) -> bool {
        self.inner.declared.contains(code)
    }

    /// The late-bound message table
    pub fn messages(&self) -> &Arc<MessageTable> {
        &self.inner.messages
    }

    /// Current message for `code`
    pub fn message(&self, code: &str) -> Option<String> {
        self.inner.messages.get(code)
    }

    /// Stack capture policy
    pub fn capture(&self) -> StackCapture {
        self.inner.capture
    }

    /// True when `err` was built by this variant (or a clone of it)
    pub fn owns(&self, err: &VariantError) -> bool {
        self.same_variant(err.variant())
    }

    pub(crate) fn same_variant(&self, other: &ErrorVariant) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // =========================================================================
    // Creators
    // =========================================================================

    /// The creator for a declared code
    pub fn creator(&self, code: &str) -> Option<Creator> {
        self.inner.declared.get(code).map(|code| Creator {
            variant: self.clone(),
            code: code.clone(),
        })
    }

    /// One creator per declared code, in declaration order
    pub fn creators(&self) -> impl Iterator<Item = Creator> + '_ {
        self.inner.declared.iter().map(move |code| Creator {
            variant: self.clone(),
            code: code.clone(),
        })
    }

    /// Low-level constructor. `code` is not checked against the declared
    /// set; an undeclared code yields an instance whose message is `None`.
    #[track_caller]
    pub fn new_error(&self, code: impl AsRef<str>, details: impl Into<Details>) -> VariantError {
        let code = code.as_ref();
        let code = match self.inner.declared.get(code) {
            Some(declared) => declared.clone(),
            None => {
                tracing::debug!(variant = %self.name(), code, "constructing undeclared code");
                Arc::from(code)
            }
        };
        VariantError::construct(self.clone(), code, details.into())
    }

    /// Checked constructor: fails with `UnknownCode` for an undeclared code.
    #[track_caller]
    pub fn try_new_error(
        &self,
        code: impl AsRef<str>,
        details: impl Into<Details>,
    ) -> Result<VariantError> {
        let code = code.as_ref();
        match self.inner.declared.get(code) {
            Some(declared) => Ok(VariantError::construct(self.clone(), declared.clone(), details.into())),
            None => Err(error::unknown_code(self.name(), code).with_operation("try_new_error")),
        }
    }
}

impl PartialEq for ErrorVariant {
    fn eq(&self, other: &Self) -> bool {
        self.same_variant(other)
    }
}

impl Eq for ErrorVariant {}

impl fmt::Debug for ErrorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorVariant")
            .field("name", &self.inner.name)
            .field("codes", &self.inner.declared)
            .field("capture", &self.inner.capture)
            .finish()
    }
}

// =============================================================================
// Creator
// =============================================================================

/// Builds instances of one declared code.
#[derive(Clone)]
pub struct Creator {
    variant: ErrorVariant,
    code: Arc<str>,
}

impl Creator {
    /// The code every instance from this creator carries
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The variant this creator belongs to
    pub fn variant(&self) -> &ErrorVariant {
        &self.variant
    }

    /// Build an instance
    #[track_caller]
    pub fn create(&self, details: impl Into<Details>) -> VariantError {
        VariantError::construct(self.variant.clone(), self.code.clone(), details.into())
    }

    /// The per-code predicate: same variant and same code
    pub fn matches(&self, err: &VariantError) -> bool {
        self.variant.owns(err) && err.is(&self.code)
    }
}

impl fmt::Debug for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Creator")
            .field("variant", &self.variant.name())
            .field("code", &self.code)
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Configures and validates a new variant.
///
/// ```rust
/// use taxon::{ErrorVariant, StackCapture};
///
/// let variant = ErrorVariant::builder("QueueError")
///     .code("Full", "queue is full")
///     .code("Closed", "queue was closed")
///     .capture(StackCapture::Caller)
///     .build()
///     .unwrap();
///
/// assert_eq!(variant.codes().collect::<Vec<_>>(), ["Full", "Closed"]);
/// ```
#[derive(Debug)]
pub struct VariantBuilder {
    name: String,
    codes: IndexMap<String, String>,
    table: Option<Arc<MessageTable>>,
    capture: StackCapture,
}

impl VariantBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            codes: IndexMap::new(),
            table: None,
            capture: StackCapture::default(),
        }
    }

    /// Declare one code
    pub fn code(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.codes.insert(code.into(), message.into());
        self
    }

    /// Declare several codes
    pub fn codes<I, K, V>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.codes
            .extend(codes.into_iter().map(|(code, message)| (code.into(), message.into())));
        self
    }

    /// Use a caller-owned table. Codes declared with [`code`](Self::code)
    /// are written into it on `build`.
    pub fn table(mut self, table: Arc<MessageTable>) -> Self {
        self.table = Some(table);
        self
    }

    /// Set the stack capture policy
    pub fn capture(mut self, capture: StackCapture) -> Self {
        self.capture = capture;
        self
    }

    /// Validate and create the variant
    pub fn build(self) -> Result<ErrorVariant> {
        if self.name.is_empty() {
            tracing::debug!("rejected variant with empty name");
            return Err(
                error::invalid_argument("name", "non-empty string", "string (\"\")").with_operation("create"),
            );
        }

        let table = self.table.unwrap_or_default();
        for (code, message) in self.codes {
            table.set(code, message);
        }

        Ok(ErrorVariant::from_parts(self.name, table, self.capture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    fn storage() -> ErrorVariant {
        ErrorVariant::builder("StorageError")
            .code("NotFound", "record not found")
            .code("Conflict", "write conflict")
            .build()
            .unwrap()
    }

    #[test]
    fn test_creator_per_declared_code() {
        let variant = storage();
        let codes: Vec<_> = variant.creators().map(|c| c.code().to_string()).collect();
        assert_eq!(codes, ["NotFound", "Conflict"]);
        assert!(variant.creator("Missing").is_none());
    }

    #[test]
    fn test_creator_builds_owned_instance() {
        let variant = storage();
        let err = variant.creator("Conflict").unwrap().create(json!({ "row": 3 }));

        assert!(variant.owns(&err));
        assert_eq!(err.code(), "Conflict");
        assert_eq!(err.metadata(), Some(&json!({ "row": 3 })));
        assert_eq!(err.message().as_deref(), Some("write conflict"));
    }

    #[test]
    fn test_creator_matches() {
        let variant = storage();
        let not_found = variant.creator("NotFound").unwrap();
        let conflict = variant.creator("Conflict").unwrap();

        let err = not_found.create(());
        assert!(not_found.matches(&err));
        assert!(!conflict.matches(&err));
    }

    #[test]
    fn test_new_error_accepts_undeclared_code() {
        let variant = storage();
        let err = variant.new_error("Corrupted", ());

        assert_eq!(err.code(), "Corrupted");
        assert!(err.message().is_none());
        assert!(variant.owns(&err));
    }

    #[test]
    fn test_try_new_error_rejects_undeclared_code() {
        let variant = storage();
        let result = variant.try_new_error("Corrupted", ());

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCode);
        assert_eq!(err.context_value("code"), Some("Corrupted"));
        assert!(variant.try_new_error("NotFound", ()).is_ok());
    }

    #[test]
    fn test_separate_builds_are_distinct() {
        let a = storage();
        let b = storage();
        let err = a.creator("NotFound").unwrap().create(());

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert!(!b.owns(&err));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ErrorVariant::builder("").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.context_value("parameter"), Some("name"));
        assert_eq!(err.operation(), "create");
    }

    #[test]
    fn test_declared_codes_fixed_at_build() {
        let variant = storage();
        variant.messages().set("Late", "added later");

        assert!(!variant.is_declared("Late"));
        assert!(variant.creator("Late").is_none());
        assert_eq!(variant.new_error("Late", ()).message().as_deref(), Some("added later"));
    }

    #[test]
    fn test_builder_writes_into_shared_table() {
        let table = Arc::new(MessageTable::from_pairs([("A", "a")]));
        let variant = ErrorVariant::builder("Shared")
            .table(table.clone())
            .code("B", "b")
            .build()
            .unwrap();

        assert_eq!(variant.codes().collect::<Vec<_>>(), ["A", "B"]);
        assert!(Arc::ptr_eq(variant.messages(), &table));
    }
}
