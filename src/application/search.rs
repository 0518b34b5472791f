use crate::application::envelope::RagResult;
use crate::domain::entities::document::SearchHit;
use crate::domain::error::DomainError;
use crate::domain::ports::generation_port::{ChatMessage, GenerationProvider, GenerationRequest};
use crate::domain::ports::vector_store::VectorStore;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sampling parameters sent with every answer request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { temperature: 0.7, max_tokens: 500 }
    }
}

pub struct SearchUseCase {
    generator: Option<Arc<dyn GenerationProvider>>,
    settings: GenerationSettings,
}

impl SearchUseCase {
    pub fn new(generator: Option<Arc<dyn GenerationProvider>>, settings: GenerationSettings) -> Self {
        Self { generator, settings }
    }

    /// Retrieves the best `top_k` matches and, when asked, an answer grounded in them.
    ///
    /// Embedding and generation failures are reported in the returned
    /// `RagResult`. Any other error, such as a corrupt index, is returned as `Err`.
    pub async fn execute(
        &self,
        store: &dyn VectorStore,
        query: &str,
        top_k: usize,
        generate_answer: bool,
    ) -> Result<RagResult, DomainError> {
        let results = match store.search(query, top_k).await {
            Ok(results) => results,
            Err(e) if e.is_capability_failure() => {
                warn!(error = %e, "retrieval failed");
                return Ok(RagResult::failure(e.to_string()));
            }
            Err(e) => return Err(e),
        };

        if results.is_empty() {
            return Ok(RagResult::no_documents());
        }

        let answer = if generate_answer {
            let Some(generator) = &self.generator else {
                return Ok(RagResult::failure(
                    "Answer generation requested but no generation provider is configured",
                ));
            };
            let request = build_request(query, &results, self.settings);
            match generator.generate(&request).await {
                Ok(answer) => Some(answer),
                Err(e) if e.is_capability_failure() => {
                    warn!(provider = generator.name(), error = %e, "answer generation failed");
                    return Ok(RagResult::failure(e.to_string()));
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        debug!(hits = results.len(), answered = answer.is_some(), "rag search complete");
        Ok(RagResult::found(results, answer, store.stats().await))
    }
}

/// Ranked hits rendered as numbered source excerpts.
pub fn build_context(results: &[SearchHit]) -> String {
    let mut context = String::new();
    for (i, hit) in results.iter().enumerate() {
        if i > 0 {
            context.push_str("\n\n");
        }
        let _ = write!(context, "[Source {}] (relevance {:.3})\n{}", i + 1, hit.score, hit.content);
    }
    context
}

pub fn build_request(query: &str, results: &[SearchHit], settings: GenerationSettings) -> GenerationRequest {
    let system = format!(
        "You are a helpful assistant. Answer the user's question using only the context below. \
         If the context does not contain the answer, say that you don't know.\n\n\
         Context:\n{}",
        build_context(results)
    );
    GenerationRequest {
        messages: vec![ChatMessage::system(system), ChatMessage::user(query)],
        temperature: Some(settings.temperature),
        max_tokens: Some(settings.max_tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::document::Metadata;
    use crate::domain::ports::generation_port::Role;

    fn hit(content: &str, score: f64) -> SearchHit {
        SearchHit {
            id: content.to_string(),
            content: content.to_string(),
            score,
            metadata: Metadata::new(),
        }
    }

    #[test]
    fn test_context_keeps_rank_order() {
        let context = build_context(&[hit("first", 0.9), hit("second", 0.5)]);
        assert_eq!(context, "[Source 1] (relevance 0.900)\nfirst\n\n[Source 2] (relevance 0.500)\nsecond");
    }

    #[test]
    fn test_request_layout() {
        let request = build_request("what?", &[hit("fact", 1.0)], GenerationSettings::default());
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0].content.contains("[Source 1]"));
        assert!(request.messages[0].content.contains("fact"));
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "what?");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(500));
    }
}
