pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::add_document::BulkDocument;
use crate::application::envelope::{AddResult, RagResult};
use crate::application::orchestrator::RetrievalOrchestrator;
use crate::config::RagConfig;
use crate::domain::entities::document::{Metadata, SearchHit};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::generation_port::GenerationProvider;
use crate::domain::ports::vector_store::VectorStore;
use crate::infrastructure::memory::session_registry::SessionStoreRegistry;
use crate::infrastructure::memory::vector_store::InMemoryVectorStore;
use crate::infrastructure::providers::{EmbeddingSource, ProviderRegistry};
use std::sync::Arc;
use tracing::info;

/// Composition root: one session registry and one orchestrator sharing the
/// configured providers.
pub struct MemRag {
    config: RagConfig,
    registry: SessionStoreRegistry,
    orchestrator: RetrievalOrchestrator,
}

impl MemRag {
    /// Builds providers by name from the default `ProviderRegistry`.
    pub fn new(config: RagConfig) -> Result<Self, DomainError> {
        Self::with_registry(config, &ProviderRegistry::with_defaults())
    }

    pub fn with_registry(config: RagConfig, providers: &ProviderRegistry) -> Result<Self, DomainError> {
        config.validate()?;

        let embedder = providers.resolve_embedding(
            EmbeddingSource::Named(config.embedding_provider.clone()),
            &config.embedding_settings(),
        )?;
        let generator = config
            .generation_provider
            .as_deref()
            .map(|name| providers.resolve_generation(name, &config.generation_settings()))
            .transpose()?;

        info!(
            embedding = embedder.name(),
            dimensions = embedder.dimension(),
            generation = generator.as_ref().map(|g| g.name()).unwrap_or("disabled"),
            "providers resolved"
        );
        Self::with_providers(embedder, generator, config)
    }

    pub fn with_providers(
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Option<Arc<dyn GenerationProvider>>,
        config: RagConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self {
            registry: SessionStoreRegistry::with_options(embedder, config.store_options()),
            orchestrator: RetrievalOrchestrator::new(generator, config.sampling()),
            config,
        })
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    pub fn registry(&self) -> &SessionStoreRegistry {
        &self.registry
    }

    pub fn orchestrator(&self) -> &RetrievalOrchestrator {
        &self.orchestrator
    }

    // Delegating methods. `session` of `None` means the global store.
    pub async fn store(&self, session: Option<&str>) -> Arc<InMemoryVectorStore> {
        self.registry.get_store(session, None).await
    }

    /// Adds `content`, chunked by the configured chunk size when `chunked` is set.
    pub async fn add_document(
        &self,
        session: Option<&str>,
        content: &str,
        metadata: Metadata,
        chunked: bool,
    ) -> Result<AddResult, DomainError> {
        let store = self.store(session).await;
        let chunk_size = chunked.then_some(self.config.chunk_size);
        self.orchestrator
            .add_document(store.as_ref(), content, metadata, chunk_size)
            .await
    }

    pub async fn bulk_add_documents(
        &self,
        session: Option<&str>,
        documents: Vec<BulkDocument>,
    ) -> Result<AddResult, DomainError> {
        let store = self.store(session).await;
        self.orchestrator.bulk_add_documents(store.as_ref(), documents).await
    }

    /// Retrieval plus optional answer. `top_k` of `None` uses the configured default.
    pub async fn search(
        &self,
        session: Option<&str>,
        query: &str,
        top_k: Option<usize>,
        generate_answer: bool,
    ) -> Result<RagResult, DomainError> {
        let store = self.store(session).await;
        let top_k = top_k.unwrap_or(self.config.top_k);
        self.orchestrator
            .search(store.as_ref(), query, top_k, generate_answer)
            .await
    }

    /// Pure retrieval against the session store, no envelope.
    pub async fn retrieve(
        &self,
        session: Option<&str>,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<SearchHit>, DomainError> {
        let store = self.store(session).await;
        store.search(query, top_k.unwrap_or(self.config.top_k)).await
    }

    pub async fn clear_session(&self, session: &str) -> bool {
        self.registry.clear_session(session).await
    }

    pub async fn clear_all_sessions(&self) {
        self.registry.clear_all_sessions().await
    }

    pub async fn session_count(&self) -> usize {
        self.registry.session_count().await
    }
}
