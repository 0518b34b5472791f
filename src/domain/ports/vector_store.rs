use crate::domain::entities::document::{Document, Metadata, SearchHit};
use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub document_count: usize,
    /// Sum of content lengths in bytes.
    pub total_size: usize,
    pub oldest_document: Option<DateTime<Utc>>,
    pub newest_document: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    pub dimensions: usize,
}

/// Holds documents with their embeddings and ranks them against a query.
#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    /// Embeds `content` and stores it. Returns the new document id.
    async fn add_document(&self, content: &str, metadata: Metadata) -> Result<String, DomainError>;

    /// `false` when the id is unknown.
    async fn remove_document(&self, id: &str) -> bool;

    /// Top `top_k` documents by cosine similarity, best first.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, DomainError>;

    async fn clear(&self);

    async fn size(&self) -> usize;

    async fn has_document(&self, id: &str) -> bool;

    async fn get_document(&self, id: &str) -> Option<Document>;

    async fn stats(&self) -> StoreStats;

    fn provider_info(&self) -> ProviderInfo;
}
