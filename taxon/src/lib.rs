//! # Taxon
//!
//! A factory for structured, taxonomy-bound error types.
//!
//! ## Core Concepts
//! - **Variant**: the error type one factory call produces, bound to a name
//!   and a closed set of codes
//! - **Creator**: builds instances of one declared code
//! - **Instance**: a `VariantError` carrying code, metadata, cause and stack
//! - **Message table**: the shared `code -> message` map, read on every
//!   `message()` call
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//!
//! let storage = taxon::create("StorageError", [
//!     ("NotFound", "record not found"),
//!     ("Conflict", "write conflict"),
//! ])
//! .unwrap();
//!
//! let missing = storage.creator("NotFound").unwrap().create(json!({ "id": 7 }));
//! let conflict = storage.creator("Conflict").unwrap().create(missing.clone());
//!
//! assert_eq!(conflict.to_string(), "StorageError: write conflict");
//! assert_eq!(conflict.to_json()["cause"], missing.to_json());
//! ```

pub mod cause;
pub mod definition;
pub mod details;
pub mod error;
pub mod factory;
pub mod instance;
mod macros;
pub mod stack;
pub mod table;
pub mod variant;

pub use cause::Cause;
pub use definition::VariantDefinition;
pub use details::Details;
pub use error::{Error, ErrorKind, Result};
pub use factory::{create, create_from_values, create_with_table};
pub use instance::VariantError;
pub use stack::{StackCapture, MAX_STACK_FRAMES};
pub use table::MessageTable;
pub use variant::{Creator, ErrorVariant, VariantBuilder};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
