//! # Variant Definitions
//!
//! Serializable description of a variant, for taxonomies kept in config
//! files rather than in code.

use crate::error::Result;
use crate::stack::StackCapture;
use crate::variant::ErrorVariant;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name, codes and capture policy of one variant.
///
/// ```rust
/// let definition: taxon::VariantDefinition = serde_json::from_str(r#"{
///     "name": "BillingError",
///     "codes": { "CardDeclined": "card was declined" },
///     "capture": "caller"
/// }"#).unwrap();
///
/// let billing = definition.build().unwrap();
/// assert!(billing.is_declared("CardDeclined"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDefinition {
    pub name: String,
    pub codes: IndexMap<String, String>,
    #[serde(default)]
    pub capture: StackCapture,
}

impl VariantDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            codes: IndexMap::new(),
            capture: StackCapture::default(),
        }
    }

    /// Add a code
    pub fn with_code(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.codes.insert(code.into(), message.into());
        self
    }

    /// Create the variant this definition describes
    pub fn build(&self) -> Result<ErrorVariant> {
        ErrorVariant::builder(self.name.clone())
            .codes(self.codes.clone())
            .capture(self.capture)
            .build()
    }
}
