use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Document,
    Query,
}

/// Turns text into fixed-length vectors.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: &[String], input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Declared vector length. Zero means the provider does not know in advance.
    fn dimension(&self) -> usize;

    fn name(&self) -> &str {
        "unknown"
    }
}

/// A local, synchronous embedding model that is not itself a provider.
/// Wrap it with `ModelEmbedder` to use it wherever a provider is expected.
pub trait EmbeddingModel: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>, String>;

    fn dimension(&self) -> usize;

    fn name(&self) -> &str {
        "local-model"
    }
}
