//! # Cause
//!
//! The upstream error or value that triggered an instance. Causes are held
//! by reference and only reshaped when the instance is serialized.

use crate::instance::VariantError;
use serde_json::{Map, Value};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

/// What triggered a [`VariantError`].
#[derive(Clone)]
pub enum Cause {
    /// An instance of a taxon variant. Serializes through its own `to_json`.
    Variant(VariantError),
    /// Any other error. Serializes to `{ code?, message, stack? }`.
    Error(Arc<anyhow::Error>),
    /// An arbitrary value, embedded as-is.
    Value(Value),
}

impl Cause {
    /// Wrap a foreign error. A `VariantError` hidden inside is recovered as
    /// [`Cause::Variant`].
    pub fn error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from(anyhow::Error::new(error))
    }

    /// Wrap an arbitrary value
    pub fn value(value: impl Into<Value>) -> Self {
        Cause::Value(value.into())
    }

    /// True when the cause is an instance of a taxon variant
    pub fn is_variant(&self) -> bool {
        matches!(self, Cause::Variant(_))
    }

    /// The cause as a variant instance, if it is one
    pub fn as_variant(&self) -> Option<&VariantError> {
        match self {
            Cause::Variant(err) => Some(err),
            _ => None,
        }
    }

    /// The cause as an error trait object; `None` for plain values
    pub fn as_error(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Cause::Variant(err) => Some(err),
            Cause::Error(err) => {
                let inner: &(dyn std::error::Error + Send + Sync + 'static) = (**err).as_ref();
                Some(inner)
            }
            Cause::Value(_) => None,
        }
    }

    /// Diagnostic shape of the cause, resolved recursively
    pub fn to_json(&self) -> Value {
        match self {
            Cause::Variant(err) => err.to_json(),
            Cause::Error(err) => summarize(err),
            Cause::Value(value) => value.clone(),
        }
    }

    /// `null` values are treated as an absent cause when serializing
    pub(crate) fn is_null(&self) -> bool {
        matches!(self, Cause::Value(Value::Null))
    }
}

/// Reduce a generic error to `{ code, message, stack }`, carrying only the
/// parts the error actually has. The message includes any context chain.
fn summarize(err: &anyhow::Error) -> Value {
    let mut map = Map::new();

    if let Some(code) = generic_code(err) {
        map.insert("code".to_string(), Value::String(code));
    }
    map.insert("message".to_string(), Value::String(format!("{:#}", err)));

    if let Some(stack) = captured_stack(err.backtrace()) {
        map.insert("stack".to_string(), Value::String(stack));
    }

    Value::Object(map)
}

fn captured_stack(backtrace: &Backtrace) -> Option<String> {
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}

fn generic_code(err: &anyhow::Error) -> Option<String> {
    if let Some(e) = err.downcast_ref::<taxon_error::Error>() {
        return Some(e.kind().as_str().to_string());
    }
    if let Some(e) = err.downcast_ref::<std::io::Error>() {
        return Some(format!("{:?}", e.kind()));
    }
    None
}

// =============================================================================
// Conversions
// =============================================================================

impl From<VariantError> for Cause {
    fn from(err: VariantError) -> Self {
        Cause::Variant(err)
    }
}

/// Only a bare `VariantError` is recovered. One wrapped in context stays a
/// generic error so the context text is kept in the summary.
impl From<anyhow::Error> for Cause {
    fn from(err: anyhow::Error) -> Self {
        let outer: &(dyn std::error::Error + Send + Sync + 'static) = err.as_ref();
        if !outer.is::<VariantError>() {
            return Cause::Error(Arc::new(err));
        }
        match err.downcast::<VariantError>() {
            Ok(variant) => Cause::Variant(variant),
            Err(other) => Cause::Error(Arc::new(other)),
        }
    }
}

impl From<taxon_error::Error> for Cause {
    fn from(err: taxon_error::Error) -> Self {
        Cause::Error(Arc::new(anyhow::Error::new(err)))
    }
}

impl From<std::io::Error> for Cause {
    fn from(err: std::io::Error) -> Self {
        Cause::Error(Arc::new(anyhow::Error::new(err)))
    }
}

impl From<Value> for Cause {
    fn from(value: Value) -> Self {
        Cause::Value(value)
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Variant(err) => f.debug_tuple("Variant").field(err).finish(),
            Cause::Error(err) => f.debug_tuple("Error").field(&err.to_string()).finish(),
            Cause::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Variant(err) => write!(f, "{}", err),
            Cause::Error(err) => write!(f, "{}", err),
            Cause::Value(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_cause_embeds_as_is() {
        let cause = Cause::value("plain-value");
        assert!(!cause.is_variant());
        assert!(cause.as_error().is_none());
        assert_eq!(cause.to_json(), json!("plain-value"));
    }

    #[test]
    fn test_io_error_summary_carries_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.json missing");
        let summary = Cause::from(io).to_json();

        assert_eq!(summary["code"], json!("NotFound"));
        assert_eq!(summary["message"], json!("config.json missing"));
    }

    #[test]
    fn test_plain_error_summary_has_no_code() {
        let parse = serde_json::from_str::<Value>("{").unwrap_err();
        let summary = Cause::error(parse).to_json();

        let object = summary.as_object().unwrap();
        assert!(!object.contains_key("code"));
        assert!(object["message"].as_str().unwrap().contains("EOF"));
    }

    #[test]
    fn test_taxon_error_summary_uses_kind_as_code() {
        let err = taxon_error::Error::invalid_argument("name", "string", "null");
        let summary = Cause::from(err).to_json();
        assert_eq!(summary["code"], json!("InvalidArgument"));
    }

    #[test]
    fn test_summary_key_order() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let summary = Cause::from(io).to_json();
        let keys: Vec<_> = summary.as_object().unwrap().keys().cloned().collect();
        assert_eq!(&keys[..2], &["code", "message"]);
    }

    #[test]
    fn test_context_wrapped_variant_stays_generic() {
        let auth = crate::create("AuthError", [("Revoked", "token revoked")]).unwrap();
        let inner = auth.creator("Revoked").unwrap().create(());
        let cause = Cause::from(anyhow::Error::new(inner).context("while loading user 7"));

        assert!(!cause.is_variant());
        let summary = cause.to_json();
        assert_eq!(summary["message"], json!("while loading user 7: AuthError: token revoked"));
        assert!(!summary.as_object().unwrap().contains_key("code"));
    }

    #[test]
    fn test_bare_anyhow_variant_is_recovered() {
        let auth = crate::create("AuthError", [("Revoked", "token revoked")]).unwrap();
        let inner = auth.creator("Revoked").unwrap().create(());
        let cause = Cause::from(anyhow::Error::new(inner.clone()));

        assert!(cause.is_variant());
        assert!(auth.owns(cause.as_variant().unwrap()));
    }

    #[test]
    fn test_context_wrapped_io_error_keeps_code() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.json missing");
        let cause = Cause::from(anyhow::Error::new(io).context("loading settings"));
        let summary = cause.to_json();

        assert_eq!(summary["code"], json!("NotFound"));
        assert_eq!(summary["message"], json!("loading settings: config.json missing"));
    }

    #[test]
    fn test_captured_stack_only_when_captured() {
        assert!(captured_stack(&Backtrace::force_capture()).is_some_and(|s| !s.is_empty()));
        assert_eq!(captured_stack(&Backtrace::disabled()), None);
    }

    #[test]
    fn test_as_error_exposes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let cause = Cause::from(io);
        assert_eq!(cause.as_error().unwrap().to_string(), "disk full");
        assert_eq!(cause.to_string(), "disk full");
    }
}
