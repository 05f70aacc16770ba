//! # Error Variant Factory
//!
//! Entry points that turn a name and a `code -> message` mapping into a new
//! [`ErrorVariant`]. Every call yields an independent variant; nothing is
//! registered globally, so two calls with the same name never share identity.

use crate::error::{self, Result};
use crate::table::MessageTable;
use crate::variant::ErrorVariant;
use serde_json::Value;
use std::sync::Arc;

/// Create a variant from a name and `(code, message)` pairs.
///
/// ```rust
/// let http = taxon::create("HttpError", [
///     ("BadGateway", "upstream returned an invalid response"),
///     ("Timeout", "upstream timed out"),
/// ])
/// .unwrap();
///
/// let err = http.creator("Timeout").unwrap().create(());
/// assert_eq!(err.to_string(), "HttpError: upstream timed out");
/// ```
pub fn create<I, K, V>(name: impl Into<String>, codes: I) -> Result<ErrorVariant>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    ErrorVariant::builder(name).codes(codes).build()
}

/// Create a variant over a table the caller keeps a handle to. Editing that
/// table later changes the messages of instances that already exist.
pub fn create_with_table(name: impl Into<String>, table: Arc<MessageTable>) -> Result<ErrorVariant> {
    ErrorVariant::builder(name).table(table).build()
}

/// Create a variant from untyped arguments, as received from a config file
/// or a scripting boundary. `None` stands for a missing argument.
///
/// `name` must be a string and `codes` an object whose values are strings.
/// Anything else fails with `InvalidArgument` naming the parameter, the
/// expected type, and what was received. Arrays are rejected for `codes`.
pub fn create_from_values(name: Option<&Value>, codes: Option<&Value>) -> Result<ErrorVariant> {
    let name = match name {
        Some(Value::String(name)) => name,
        other => return Err(reject("name", "string", other)),
    };

    let codes = match codes {
        Some(Value::Object(codes)) => codes,
        other => return Err(reject("codes", "object", other)),
    };

    let mut pairs = Vec::with_capacity(codes.len());
    for (code, message) in codes {
        match message {
            Value::String(message) => pairs.push((code.clone(), message.clone())),
            other => {
                return Err(reject("codes", "object of string messages", Some(other))
                    .with_context("code", code.clone()))
            }
        }
    }

    create(name.clone(), pairs)
}

fn reject(parameter: &'static str, expected: &str, actual: Option<&Value>) -> error::Error {
    let actual = describe(actual);
    tracing::debug!(parameter, expected, actual = %actual, "rejected factory argument");
    error::invalid_argument(parameter, expected, actual).with_operation("create")
}

/// Type and value of an argument, for error context
fn describe(value: Option<&Value>) -> String {
    match value {
        None => "nothing (missing argument)".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => format!("boolean ({})", b),
        Some(Value::Number(n)) => format!("number ({})", n),
        Some(Value::String(s)) => format!("string ({:?})", s),
        Some(Value::Array(items)) => format!("array ({} items)", items.len()),
        Some(Value::Object(map)) => format!("object ({} keys)", map.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    fn assert_invalid(name: Option<Value>, codes: Option<Value>, parameter: &str) {
        let err = create_from_values(name.as_ref(), codes.as_ref()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.context_value("parameter"), Some(parameter));
        assert_eq!(err.operation(), "create");
    }

    #[test]
    fn test_malformed_inputs_rejected() {
        assert_invalid(None, None, "name");
        assert_invalid(Some(Value::Null), None, "name");
        assert_invalid(Some(json!("X")), None, "codes");
        assert_invalid(Some(json!(42)), Some(json!({})), "name");
        assert_invalid(Some(json!({})), Some(json!({})), "name");
        assert_invalid(Some(json!([])), Some(json!({})), "name");
        assert_invalid(Some(Value::Null), Some(Value::Null), "name");
    }

    #[test]
    fn test_array_codes_rejected() {
        assert_invalid(Some(json!("X")), Some(json!(["A", "B"])), "codes");
    }

    #[test]
    fn test_non_string_message_rejected() {
        let err = create_from_values(Some(&json!("X")), Some(&json!({ "A": 1 }))).unwrap_err();
        assert_eq!(err.context_value("parameter"), Some("codes"));
        assert_eq!(err.context_value("code"), Some("A"));
        assert_eq!(err.context_value("actual"), Some("number (1)"));
    }

    #[test]
    fn test_error_reports_expected_and_actual() {
        let err = create_from_values(Some(&json!(42)), Some(&json!({}))).unwrap_err();
        assert_eq!(err.context_value("expected"), Some("string"));
        assert_eq!(err.context_value("actual"), Some("number (42)"));

        let err = create_from_values(Some(&json!("X")), None).unwrap_err();
        assert_eq!(err.context_value("actual"), Some("nothing (missing argument)"));
    }

    #[test]
    fn test_valid_values_create_variant() {
        let variant = create_from_values(
            Some(&json!("ParseError")),
            Some(&json!({ "Eof": "unexpected end of input", "Token": "unexpected token" })),
        )
        .unwrap();

        assert_eq!(variant.name(), "ParseError");
        assert_eq!(variant.codes().collect::<Vec<_>>(), ["Eof", "Token"]);
    }

    #[test]
    fn test_same_name_creates_distinct_variants() {
        let a = create("Foo", [("A", "a")]).unwrap();
        let b = create("Foo", [("A", "a")]).unwrap();

        let from_a = a.creator("A").unwrap().create(());
        let from_b = b.creator("A").unwrap().create(());

        assert!(!from_a.is_instance_of(&b));
        assert!(!from_b.is_instance_of(&a));
        assert!(from_a.is_instance_of(&a));
    }

    #[test]
    fn test_create_with_table_late_binding() {
        let table = Arc::new(MessageTable::from_pairs([("Busy", "resource busy")]));
        let variant = create_with_table("LockError", table.clone()).unwrap();
        let err = variant.creator("Busy").unwrap().create(());

        table.set("Busy", "resource locked by another writer");
        assert_eq!(err.to_string(), "LockError: resource locked by another writer");
    }

    #[test]
    fn test_empty_codes_allowed() {
        let variant = create("Empty", Vec::<(String, String)>::new()).unwrap();
        assert_eq!(variant.creators().count(), 0);
    }
}
