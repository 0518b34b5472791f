use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Open map of scalar values attached to a document.
pub type Metadata = serde_json::Map<String, Value>;

/// A stored piece of text together with its embedding.
///
/// Documents are never edited in place; replacing one means removing it and
/// adding a new one. The embedding is shared with the store's vector index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(skip)]
    pub embedding: Arc<[f32]>,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(content: String, embedding: Vec<f32>, metadata: Metadata) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            embedding: embedding.into(),
            metadata,
            created_at: Utc::now(),
        }
    }

    /// Size of the content in bytes.
    pub fn byte_len(&self) -> usize {
        self.content.len()
    }
}

/// One ranked match returned by a similarity search. The embedding is not included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub content: String,
    pub score: f64,
    pub metadata: Metadata,
}

impl SearchHit {
    pub fn from_document(doc: &Document, score: f64) -> Self {
        Self {
            id: doc.id.clone(),
            content: doc.content.clone(),
            score,
            metadata: doc.metadata.clone(),
        }
    }
}

/// Rejects metadata holding arrays or objects.
pub fn validate_metadata(metadata: &Metadata) -> Result<(), String> {
    for (key, value) in metadata {
        if matches!(value, Value::Array(_) | Value::Object(_)) {
            return Err(format!(
                "Metadata value for '{key}' must be a string, number, bool or null"
            ));
        }
    }
    Ok(())
}
