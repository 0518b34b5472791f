use crate::application::add_document::{AddDocumentUseCase, BulkDocument};
use crate::application::envelope::{AddResult, RagResult};
use crate::application::search::{GenerationSettings, SearchUseCase};
use crate::domain::entities::document::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::generation_port::GenerationProvider;
use crate::domain::ports::vector_store::VectorStore;
use std::sync::Arc;

/// Retrieval plus optional answer generation over any `VectorStore`.
pub struct RetrievalOrchestrator {
    search_uc: SearchUseCase,
    add_document_uc: AddDocumentUseCase,
}

impl RetrievalOrchestrator {
    pub fn new(generator: Option<Arc<dyn GenerationProvider>>, settings: GenerationSettings) -> Self {
        Self {
            search_uc: SearchUseCase::new(generator, settings),
            add_document_uc: AddDocumentUseCase::new(),
        }
    }

    pub async fn search(
        &self,
        store: &dyn VectorStore,
        query: &str,
        top_k: usize,
        generate_answer: bool,
    ) -> Result<RagResult, DomainError> {
        self.search_uc.execute(store, query, top_k, generate_answer).await
    }

    pub async fn add_document(
        &self,
        store: &dyn VectorStore,
        content: &str,
        metadata: Metadata,
        chunk_size: Option<usize>,
    ) -> Result<AddResult, DomainError> {
        self.add_document_uc.execute(store, content, metadata, chunk_size).await
    }

    pub async fn bulk_add_documents(
        &self,
        store: &dyn VectorStore,
        documents: Vec<BulkDocument>,
    ) -> Result<AddResult, DomainError> {
        self.add_document_uc.execute_bulk(store, documents).await
    }
}
