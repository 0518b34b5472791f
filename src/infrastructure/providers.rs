//! Name-to-factory lookup for embedding and generation backends.
//!
//! The registry is a plain value owned by whoever composes the application.
//! Nothing registers itself globally; callers build one with
//! [`ProviderRegistry::with_defaults`] or [`ProviderRegistry::new`] and add
//! their own factories.

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingModel, EmbeddingProvider};
use crate::domain::ports::generation_port::GenerationProvider;
use crate::infrastructure::embeddings::hashing::{HashingModel, DEFAULT_DIMENSIONS};
use crate::infrastructure::embeddings::model::ModelEmbedder;
use crate::infrastructure::embeddings::openai::OpenAiEmbedder;
use crate::infrastructure::embeddings::voyage::VoyageEmbedder;
use crate::infrastructure::generation::openai::OpenAiGenerator;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Everything a factory may need to build a backend.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub api_key: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Only read by local models. Zero means the model's default.
    pub dimensions: usize,
}

pub type EmbeddingFactory =
    Arc<dyn Fn(&ProviderSettings) -> Result<Arc<dyn EmbeddingProvider>, DomainError> + Send + Sync>;
pub type GenerationFactory =
    Arc<dyn Fn(&ProviderSettings) -> Result<Arc<dyn GenerationProvider>, DomainError> + Send + Sync>;

/// The three ways to hand the library an embedding capability.
pub enum EmbeddingSource {
    /// Look the name up in a `ProviderRegistry`.
    Named(String),
    /// Use this provider as is.
    Provider(Arc<dyn EmbeddingProvider>),
    /// Wrap a local model in a `ModelEmbedder`.
    Model(Arc<dyn EmbeddingModel>),
}

#[derive(Default)]
pub struct ProviderRegistry {
    embedding: HashMap<String, EmbeddingFactory>,
    generation: HashMap<String, GenerationFactory>,
    fallback_model: Option<Arc<dyn EmbeddingModel>>,
}

fn require_api_key(provider: &str, settings: &ProviderSettings) -> Result<(), DomainError> {
    if settings.api_key.trim().is_empty() {
        return Err(DomainError::Config(format!("Provider {provider} requires an API key")));
    }
    Ok(())
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with `hashing`, `openai`, `voyage` embedders and
    /// the `openai` generator.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_embedding("hashing", |s: &ProviderSettings| {
            let dims = if s.dimensions == 0 { DEFAULT_DIMENSIONS } else { s.dimensions };
            let model = HashingModel::new(dims).map_err(DomainError::Config)?;
            let provider: Arc<dyn EmbeddingProvider> = Arc::new(ModelEmbedder::new(Arc::new(model)));
            Ok(provider)
        });
        registry.register_embedding("openai", |s: &ProviderSettings| {
            require_api_key("openai", s)?;
            let provider: Arc<dyn EmbeddingProvider> =
                Arc::new(OpenAiEmbedder::new(s.api_key.clone(), s.model.clone(), s.base_url.clone()));
            Ok(provider)
        });
        registry.register_embedding("voyage", |s: &ProviderSettings| {
            require_api_key("voyage", s)?;
            let provider: Arc<dyn EmbeddingProvider> =
                Arc::new(VoyageEmbedder::new(s.api_key.clone(), s.model.clone(), s.base_url.clone()));
            Ok(provider)
        });
        registry.register_generation("openai", |s: &ProviderSettings| {
            require_api_key("openai", s)?;
            let provider: Arc<dyn GenerationProvider> =
                Arc::new(OpenAiGenerator::new(s.api_key.clone(), s.model.clone(), s.base_url.clone()));
            Ok(provider)
        });

        registry
    }

    pub fn register_embedding<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&ProviderSettings) -> Result<Arc<dyn EmbeddingProvider>, DomainError> + Send + Sync + 'static,
    {
        self.embedding.insert(name.to_lowercase(), Arc::new(factory));
    }

    pub fn register_generation<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&ProviderSettings) -> Result<Arc<dyn GenerationProvider>, DomainError> + Send + Sync + 'static,
    {
        self.generation.insert(name.to_lowercase(), Arc::new(factory));
    }

    /// Model used when a named embedding provider is not registered.
    pub fn with_fallback_model(mut self, model: Arc<dyn EmbeddingModel>) -> Self {
        self.fallback_model = Some(model);
        self
    }

    pub fn embedding_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.embedding.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn generation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.generation.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn resolve_embedding(
        &self,
        source: EmbeddingSource,
        settings: &ProviderSettings,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        match source {
            EmbeddingSource::Provider(provider) => Ok(provider),
            EmbeddingSource::Model(model) => Ok(Arc::new(ModelEmbedder::new(model))),
            EmbeddingSource::Named(name) => {
                if let Some(factory) = self.embedding.get(&name.to_lowercase()) {
                    return factory(settings);
                }
                match &self.fallback_model {
                    Some(model) => {
                        warn!(provider = %name, fallback = model.name(), "unknown embedding provider, using fallback model");
                        Ok(Arc::new(ModelEmbedder::new(Arc::clone(model))))
                    }
                    None => Err(DomainError::Config(format!(
                        "Unknown embedding provider: {name} (registered: {})",
                        self.embedding_names().join(", ")
                    ))),
                }
            }
        }
    }

    pub fn resolve_generation(
        &self,
        name: &str,
        settings: &ProviderSettings,
    ) -> Result<Arc<dyn GenerationProvider>, DomainError> {
        let factory = self.generation.get(&name.to_lowercase()).ok_or_else(|| {
            DomainError::Config(format!(
                "Unknown generation provider: {name} (registered: {})",
                self.generation_names().join(", ")
            ))
        })?;
        factory(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let registry = ProviderRegistry::with_defaults();
        assert_eq!(registry.embedding_names(), vec!["hashing", "openai", "voyage"]);
        assert_eq!(registry.generation_names(), vec!["openai"]);
    }

    #[test]
    fn test_named_hashing_uses_dimensions() {
        let registry = ProviderRegistry::with_defaults();
        let settings = ProviderSettings { dimensions: 32, ..Default::default() };
        let provider = registry
            .resolve_embedding(EmbeddingSource::Named("Hashing".into()), &settings)
            .unwrap();
        assert_eq!(provider.dimension(), 32);
        assert_eq!(provider.name(), "hashing");
    }

    #[test]
    fn test_unknown_name_without_fallback_is_config_error() {
        let registry = ProviderRegistry::with_defaults();
        let err = registry
            .resolve_embedding(EmbeddingSource::Named("nope".into()), &ProviderSettings::default())
            .err()
            .unwrap();
        assert!(matches!(err, DomainError::Config(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_unknown_name_uses_fallback_model() {
        let registry = ProviderRegistry::new().with_fallback_model(Arc::new(HashingModel::new(16).unwrap()));
        let provider = registry
            .resolve_embedding(EmbeddingSource::Named("nope".into()), &ProviderSettings::default())
            .unwrap();
        assert_eq!(provider.dimension(), 16);
    }

    #[test]
    fn test_model_source_is_wrapped() {
        let registry = ProviderRegistry::new();
        let provider = registry
            .resolve_embedding(
                EmbeddingSource::Model(Arc::new(HashingModel::new(8).unwrap())),
                &ProviderSettings::default(),
            )
            .unwrap();
        assert_eq!(provider.name(), "hashing");
        assert_eq!(provider.dimension(), 8);
    }

    #[test]
    fn test_remote_providers_need_api_key() {
        let registry = ProviderRegistry::with_defaults();
        let err = registry
            .resolve_embedding(EmbeddingSource::Named("openai".into()), &ProviderSettings::default())
            .err()
            .unwrap();
        assert!(matches!(err, DomainError::Config(_)));
        assert!(registry.resolve_generation("openai", &ProviderSettings::default()).is_err());

        let settings = ProviderSettings { api_key: "sk-test".into(), ..Default::default() };
        assert!(registry.resolve_generation("openai", &settings).is_ok());
        assert!(registry.resolve_generation("claude", &settings).is_err());
    }
}
