use crate::domain::entities::document::SearchHit;
use crate::domain::ports::vector_store::StoreStats;
use serde::Serialize;

pub const NO_DOCUMENTS_MESSAGE: &str = "No documents found";

/// Outcome of a retrieval call. Capability failures come back here with
/// `success: false` instead of as an `Err`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RagResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SearchHit>>,
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StoreStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RagResult {
    pub fn no_documents() -> Self {
        Self {
            success: true,
            results: Some(Vec::new()),
            answer: None,
            stats: None,
            message: Some(NO_DOCUMENTS_MESSAGE.to_string()),
        }
    }

    pub fn found(results: Vec<SearchHit>, answer: Option<String>, stats: StoreStats) -> Self {
        Self {
            success: true,
            results: Some(results),
            answer,
            stats: Some(stats),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            results: None,
            answer: None,
            stats: None,
            message: Some(message.into()),
        }
    }
}

/// Outcome of an ingestion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResult {
    pub success: bool,
    pub document_ids: Vec<String>,
    pub message: String,
    pub stats: StoreStats,
}

impl AddResult {
    pub fn added(document_ids: Vec<String>, stats: StoreStats) -> Self {
        let message = format!("Added {} document(s)", document_ids.len());
        Self {
            success: true,
            document_ids,
            message,
            stats,
        }
    }
}
