use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::vector_store::VectorStore;
use crate::infrastructure::memory::vector_store::{InMemoryVectorStore, StoreOptions};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Name of the shared partition used when no session id is given.
pub const GLOBAL_SESSION: &str = "global";

/// Owns one `InMemoryVectorStore` per session id plus the shared global store.
///
/// Stores are created lazily on first lookup. Lookups of the same id return
/// the same `Arc` until the session is cleared.
pub struct SessionStoreRegistry {
    default_embedder: Arc<dyn EmbeddingProvider>,
    options: StoreOptions,
    global: Mutex<Option<Arc<InMemoryVectorStore>>>,
    sessions: Mutex<HashMap<String, Arc<InMemoryVectorStore>>>,
}

impl SessionStoreRegistry {
    pub fn new(default_embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_options(default_embedder, StoreOptions::default())
    }

    pub fn with_options(default_embedder: Arc<dyn EmbeddingProvider>, options: StoreOptions) -> Self {
        Self {
            default_embedder,
            options,
            global: Mutex::new(None),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn is_global(session_id: Option<&str>) -> bool {
        match session_id {
            None => true,
            Some(id) => id.is_empty() || id == GLOBAL_SESSION,
        }
    }

    /// Store for `session_id`, created on first access.
    ///
    /// `embedder` only matters when the store is created; an existing store
    /// keeps the provider it was built with. `None` falls back to the
    /// registry's default provider.
    pub async fn get_store(
        &self,
        session_id: Option<&str>,
        embedder: Option<Arc<dyn EmbeddingProvider>>,
    ) -> Arc<InMemoryVectorStore> {
        let embedder = embedder.unwrap_or_else(|| Arc::clone(&self.default_embedder));

        if Self::is_global(session_id) {
            let mut global = self.global.lock().await;
            let store = global.get_or_insert_with(|| {
                info!(session = GLOBAL_SESSION, "creating global store");
                Arc::new(InMemoryVectorStore::with_options(GLOBAL_SESSION, embedder, self.options))
            });
            return Arc::clone(store);
        }

        let id = session_id.unwrap_or(GLOBAL_SESSION);
        let mut sessions = self.sessions.lock().await;
        let store = sessions.entry(id.to_string()).or_insert_with(|| {
            info!(session = %id, "creating session store");
            Arc::new(InMemoryVectorStore::with_options(id, embedder, self.options))
        });
        Arc::clone(store)
    }

    /// Registered non-global sessions plus one for the permanent global slot.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len() + 1
    }

    /// Session ids currently registered, excluding the global one.
    pub async fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.lock().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Empties a session. The global store is cleared in place and always
    /// reports `true`; any other session is cleared and dropped from the
    /// registry, so the next lookup builds a fresh store.
    pub async fn clear_session(&self, session_id: &str) -> bool {
        if Self::is_global(Some(session_id)) {
            if let Some(store) = self.global.lock().await.as_ref() {
                store.clear().await;
            }
            return true;
        }

        let removed = self.sessions.lock().await.remove(session_id);
        match removed {
            Some(store) => {
                store.clear().await;
                info!(session = %session_id, "session cleared");
                true
            }
            None => false,
        }
    }

    /// Clears and evicts every store, global included.
    pub async fn clear_all_sessions(&self) {
        let evicted: Vec<Arc<InMemoryVectorStore>> =
            self.sessions.lock().await.drain().map(|(_, store)| store).collect();
        for store in &evicted {
            store.clear().await;
        }

        if let Some(global) = self.global.lock().await.take() {
            global.clear().await;
        }
        info!(sessions = evicted.len(), "all sessions cleared");
    }
}
