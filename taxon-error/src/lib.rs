//! # taxon-error
//!
//! Failure types for the taxon error-variant factory.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what went wrong (e.g., InvalidArgument, UnknownCode)
//! - **Error Context**: `parameter` / `expected` / `actual` pairs locate the misuse
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! These errors only report misuse of the factory. The errors an application
//! builds *with* the factory are `taxon::VariantError` values.
//!
//! ## Usage
//!
//! ```rust
//! use taxon_error::{Error, ErrorKind};
//!
//! fn check_name(name: &str) -> taxon_error::Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::invalid_argument("name", "non-empty string", "string (\"\")")
//!             .with_operation("create"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_name("").is_err_and(|e| e.kind() == ErrorKind::InvalidArgument));
//! ```

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using taxon Error
pub type Result<T> = std::result::Result<T, Error>;
