use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingModel, EmbeddingProvider, InputType};
use std::sync::Arc;

/// Exposes a local `EmbeddingModel` through the `EmbeddingProvider` port.
pub struct ModelEmbedder {
    model: Arc<dyn EmbeddingModel>,
}

impl ModelEmbedder {
    pub fn new(model: Arc<dyn EmbeddingModel>) -> Self {
        Self { model }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for ModelEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        texts
            .iter()
            .map(|t| self.model.encode(t).map_err(DomainError::Embedding))
            .collect()
    }

    fn dimension(&self) -> usize {
        self.model.dimension()
    }

    fn name(&self) -> &str {
        self.model.name()
    }
}
