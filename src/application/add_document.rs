use crate::application::chunking::chunk_words;
use crate::application::envelope::AddResult;
use crate::domain::entities::document::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// One entry of a bulk ingestion request.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDocument {
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl BulkDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), metadata: None }
    }

    pub fn with_metadata(content: impl Into<String>, metadata: Metadata) -> Self {
        Self { content: content.into(), metadata: Some(metadata) }
    }
}

/// Ingestion paths. Each call either stores every document it produced or,
/// on error, removes the ones it already stored and returns the error.
#[derive(Default)]
pub struct AddDocumentUseCase;

impl AddDocumentUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Stores `content` whole, or split into `chunk_size`-word chunks when
    /// `chunk_size` is `Some`. Chunks carry `chunkIndex` and `totalChunks`
    /// next to the caller's metadata.
    pub async fn execute(
        &self,
        store: &dyn VectorStore,
        content: &str,
        metadata: Metadata,
        chunk_size: Option<usize>,
    ) -> Result<AddResult, DomainError> {
        let Some(chunk_size) = chunk_size else {
            let id = store.add_document(content, metadata).await?;
            return Ok(AddResult::added(vec![id], store.stats().await));
        };

        let chunks = chunk_words(content, chunk_size)?;
        let total = chunks.len();
        let mut ids = Vec::with_capacity(total);
        for (i, chunk) in chunks.iter().enumerate() {
            let mut chunk_meta = metadata.clone();
            chunk_meta.insert("chunkIndex".to_string(), Value::from(i));
            chunk_meta.insert("totalChunks".to_string(), Value::from(total));
            match store.add_document(chunk, chunk_meta).await {
                Ok(id) => ids.push(id),
                Err(e) => {
                    rollback(store, &ids).await;
                    return Err(e);
                }
            }
        }

        info!(chunks = total, chunk_size, "chunked document ingested");
        Ok(AddResult::added(ids, store.stats().await))
    }

    /// Stores every entry with non-blank content. Blank entries are skipped silently.
    pub async fn execute_bulk(
        &self,
        store: &dyn VectorStore,
        documents: Vec<BulkDocument>,
    ) -> Result<AddResult, DomainError> {
        let submitted = documents.len();
        let mut ids = Vec::with_capacity(submitted);
        for doc in documents {
            if doc.content.trim().is_empty() {
                continue;
            }
            match store.add_document(&doc.content, doc.metadata.unwrap_or_default()).await {
                Ok(id) => ids.push(id),
                Err(e) => {
                    rollback(store, &ids).await;
                    return Err(e);
                }
            }
        }

        info!(submitted, added = ids.len(), "bulk ingestion complete");
        Ok(AddResult::added(ids, store.stats().await))
    }
}

async fn rollback(store: &dyn VectorStore, ids: &[String]) {
    if ids.is_empty() {
        return;
    }
    warn!(documents = ids.len(), "ingestion failed, removing partially added documents");
    for id in ids {
        store.remove_document(id).await;
    }
}
