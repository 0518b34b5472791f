use crate::domain::entities::document::{validate_metadata, Document, Metadata, SearchHit};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::vector_store::{ProviderInfo, StoreStats, VectorStore};
use crate::domain::values::similarity::cosine_similarity;
use crate::infrastructure::memory::vector_index::VectorIndex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Adds beyond this count fail with `CapacityExceeded`. `None` is unbounded.
    pub max_documents: Option<usize>,
}

#[derive(Default)]
struct StoreState {
    documents: HashMap<String, Document>,
    index: VectorIndex,
}

/// Session-scoped document store searched by linear cosine scan.
///
/// Mutations hold `writer` from start to finish, embedding call included, so
/// two adds never interleave. The document map and index sit behind a single
/// `RwLock`; a search scores against whatever state was committed when it
/// took the read lock.
pub struct InMemoryVectorStore {
    session_id: String,
    embedder: Arc<dyn EmbeddingProvider>,
    options: StoreOptions,
    state: RwLock<StoreState>,
    writer: Mutex<()>,
}

impl InMemoryVectorStore {
    pub fn new(session_id: impl Into<String>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_options(session_id, embedder, StoreOptions::default())
    }

    pub fn with_options(
        session_id: impl Into<String>,
        embedder: Arc<dyn EmbeddingProvider>,
        options: StoreOptions,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            embedder,
            options,
            state: RwLock::new(StoreState::default()),
            writer: Mutex::new(()),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Lengths of the index's id and embedding columns.
    pub async fn index_lengths(&self) -> (usize, usize) {
        let state = self.state.read().await;
        (state.index.len(), state.index.embedding_count())
    }

    async fn embed_one(&self, text: &str, input_type: InputType) -> Result<Vec<f32>, DomainError> {
        let mut vectors = self.embedder.embed(&[text.to_string()], input_type).await?;
        if vectors.len() != 1 {
            return Err(DomainError::Embedding(format!(
                "Provider {} returned {} vectors for 1 input",
                self.embedder.name(),
                vectors.len()
            )));
        }
        let vector = vectors.remove(0);
        if vector.is_empty() {
            return Err(DomainError::Embedding(format!(
                "Provider {} returned an empty vector",
                self.embedder.name()
            )));
        }
        let expected = self.embedder.dimension();
        if expected > 0 && vector.len() != expected {
            return Err(DomainError::Embedding(format!(
                "Dimension mismatch: provider {} declares {expected}, returned {}",
                self.embedder.name(),
                vector.len()
            )));
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(DomainError::Embedding(
                "Embedding contains NaN or infinite values".to_string(),
            ));
        }
        Ok(vector)
    }
}

#[async_trait::async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add_document(&self, content: &str, metadata: Metadata) -> Result<String, DomainError> {
        validate_metadata(&metadata).map_err(DomainError::InvalidInput)?;

        let _writer = self.writer.lock().await;

        if let Some(limit) = self.options.max_documents {
            if self.state.read().await.documents.len() >= limit {
                return Err(DomainError::CapacityExceeded { limit });
            }
        }

        let embedding = self.embed_one(content, InputType::Document).await?;
        let doc = Document::new(content.to_string(), embedding, metadata);
        let id = doc.id.clone();

        let mut state = self.state.write().await;
        state.index.push(id.clone(), Arc::clone(&doc.embedding));
        state.documents.insert(id.clone(), doc);
        debug!(session = %self.session_id, document = %id, size = state.documents.len(), "document added");

        Ok(id)
    }

    async fn remove_document(&self, id: &str) -> bool {
        let _writer = self.writer.lock().await;
        let mut state = self.state.write().await;

        let Some(_) = state.documents.remove(id) else {
            return false;
        };
        // The bool return cannot carry `Invariant`; the next search reports the
        // desync through its length check.
        if state.index.remove(id).is_none() {
            error!(session = %self.session_id, document = %id, "document had no index entry");
            debug_assert!(false, "document {id} had no index entry");
        }
        debug!(session = %self.session_id, document = %id, size = state.documents.len(), "document removed");
        true
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, DomainError> {
        if top_k == 0 || self.state.read().await.documents.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embed_one(query, InputType::Query).await?;

        let state = self.state.read().await;
        if state.index.len() != state.index.embedding_count()
            || state.index.len() != state.documents.len()
        {
            return Err(DomainError::Invariant(format!(
                "Index holds {} ids and {} embeddings for {} documents",
                state.index.len(),
                state.index.embedding_count(),
                state.documents.len()
            )));
        }

        let mut scored = Vec::with_capacity(state.index.len());
        for (id, embedding) in state.index.iter() {
            let doc = state.documents.get(id).ok_or_else(|| {
                DomainError::Invariant(format!("Index entry {id} has no matching document"))
            })?;
            scored.push((doc, cosine_similarity(&query_vector, embedding)));
        }

        // Stable sort: equal scores keep insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        debug!(session = %self.session_id, hits = scored.len(), "search complete");
        Ok(scored
            .into_iter()
            .map(|(doc, score)| SearchHit::from_document(doc, score))
            .collect())
    }

    async fn clear(&self) {
        let _writer = self.writer.lock().await;
        let mut state = self.state.write().await;
        state.documents.clear();
        state.index.clear();
        debug!(session = %self.session_id, "store cleared");
    }

    async fn size(&self) -> usize {
        self.state.read().await.documents.len()
    }

    async fn has_document(&self, id: &str) -> bool {
        self.state.read().await.documents.contains_key(id)
    }

    async fn get_document(&self, id: &str) -> Option<Document> {
        self.state.read().await.documents.get(id).cloned()
    }

    async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        let docs = state.documents.values();
        StoreStats {
            document_count: state.documents.len(),
            total_size: docs.clone().map(Document::byte_len).sum(),
            oldest_document: docs.clone().map(|d| d.created_at).min(),
            newest_document: docs.map(|d| d.created_at).max(),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo {
            name: self.embedder.name().to_string(),
            dimensions: self.embedder.dimension(),
        }
    }
}
