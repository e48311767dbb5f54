//! Quote types
//!
//! Defines the quote record shared across the application.

use serde::{Deserialize, Serialize};

/// A single quote
///
/// Quotes carry no identifier; two quotes are the same quote exactly when
/// both text and category match (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote text
    #[serde(default)]
    pub text: String,
    /// Free-form category label
    #[serde(default)]
    pub category: String,
}

impl Quote {
    /// Create a new quote
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}
