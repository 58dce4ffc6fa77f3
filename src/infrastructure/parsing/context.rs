//! Parsing context for cart page extraction
//!
//! Carries caller-supplied labels so log lines can be tied back to the page
//! (and account) a document came from.

use std::collections::HashMap;

/// Context information for parsing operations
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Where the document came from, e.g. a URL or a file path
    pub source: String,

    /// Additional metadata
    pub metadata: HashMap<String, String>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new("<document>")
    }
}

impl ParseContext {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to context
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
