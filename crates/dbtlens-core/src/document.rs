//! Text documents returned to the calling agent

use serde::{Deserialize, Serialize};

/// A UTF-8 text document wrapping a JSON-serialized payload.
///
/// Every tool call produces one of these; the agent runtime sees only the
/// `text` as its observation. `source` carries the artifact path the text was
/// read from, relative to the project directory, when one applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document body
    pub text: String,

    /// Artifact path the content came from (relative to the project dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Document {
    /// Create a document with no source attribution
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    /// Set the source artifact path
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Concatenate the texts of several documents into one.
    ///
    /// Used by tools that gather more than one artifact (project info,
    /// schema scan) but must hand the agent a single observation.
    pub fn joined(docs: &[Document]) -> Document {
        let text = docs
            .iter()
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join("");
        Document::new(text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::new(text)
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_concatenates_in_order() {
        let docs = vec![
            Document::new("- Schema a.yml: {}\n"),
            Document::new("- Schema b.yml: {}\n"),
        ];

        let joined = Document::joined(&docs);
        assert_eq!(joined.text, "- Schema a.yml: {}\n- Schema b.yml: {}\n");
        assert!(joined.source.is_none());
    }

    #[test]
    fn joined_of_nothing_is_empty() {
        let joined = Document::joined(&[]);
        assert!(joined.text.is_empty());
    }

    #[test]
    fn source_survives_serialization() {
        let doc = Document::new("payload").with_source("dbt_project.yml");
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("dbt_project.yml"));

        let bare = Document::new("payload");
        let json = serde_json::to_string(&bare).unwrap();
        assert!(!json.contains("source"));
    }
}
