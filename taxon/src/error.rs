//! Taxon error types
//!
//! Re-exports taxon-error and provides the constructors the factory uses.

pub use taxon_error::{Error, ErrorKind, Result};

/// Create an InvalidArgument error
pub fn invalid_argument(
    parameter: &'static str,
    expected: impl Into<String>,
    actual: impl Into<String>,
) -> Error {
    Error::invalid_argument(parameter, expected, actual)
}

/// Create an UnknownCode error
pub fn unknown_code(variant: impl Into<String>, code: impl Into<String>) -> Error {
    Error::unknown_code(variant, code)
}
