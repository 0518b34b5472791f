//! Shared test helpers: deterministic embedding and generation fakes.

#![allow(dead_code)]

use memrag::config::RagConfig;
use memrag::domain::error::DomainError;
use memrag::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use memrag::domain::ports::generation_port::{GenerationProvider, GenerationRequest};
use memrag::MemRag;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const VOCAB: &[&str] = &[
    "cat", "dog", "mouse", "mat", "park", "sat", "ran", "chased", "on", "in", "rust", "python",
];

/// Counts occurrences of each vocabulary word. Words outside the vocabulary are ignored.
pub struct KeywordEmbedder {
    vocab: Vec<String>,
    calls: AtomicUsize,
    fail_from_call: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new() -> Self {
        Self {
            vocab: VOCAB.iter().map(|w| w.to_string()).collect(),
            calls: AtomicUsize::new(0),
            fail_from_call: AtomicUsize::new(usize::MAX),
        }
    }

    pub fn failing() -> Self {
        let embedder = Self::new();
        embedder.fail_from(0);
        embedder
    }

    /// Calls numbered `n` and later (0-based) fail.
    pub fn fail_from(&self, n: usize) {
        self.fail_from_call.store(n, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0; self.vocab.len()];
        for token in text.split_whitespace() {
            let token = token.to_lowercase();
            if let Some(i) = self.vocab.iter().position(|w| *w == token) {
                v[i] += 1.0;
            }
        }
        v
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.fail_from_call.load(Ordering::SeqCst) {
            return Err(DomainError::Embedding("keyword embedder offline".into()));
        }
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.vocab.len()
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

/// Replays queued `embed` outputs in order, regardless of input.
/// Once the queue is empty every call fails.
pub struct ScriptedEmbedder {
    dimension: usize,
    responses: Mutex<VecDeque<Vec<Vec<f32>>>>,
}

impl ScriptedEmbedder {
    pub fn new(dimension: usize, responses: Vec<Vec<Vec<f32>>>) -> Self {
        Self { dimension, responses: Mutex::new(responses.into()) }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for ScriptedEmbedder {
    async fn embed(&self, _texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DomainError::Embedding("script exhausted".into()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Returns a canned answer and records every request.
pub struct FakeGenerator {
    answer: Result<String, String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn answering(answer: &str) -> Self {
        Self { answer: Ok(answer.to_string()), requests: Mutex::new(Vec::new()) }
    }

    pub fn failing(message: &str) -> Self {
        Self { answer: Err(message.to_string()), requests: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl GenerationProvider for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.clone().map_err(DomainError::Generation)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

pub fn setup() -> (MemRag, Arc<KeywordEmbedder>, Arc<FakeGenerator>) {
    setup_with(RagConfig::default())
}

pub fn setup_with(config: RagConfig) -> (MemRag, Arc<KeywordEmbedder>, Arc<FakeGenerator>) {
    let embedder = Arc::new(KeywordEmbedder::new());
    let generator = Arc::new(FakeGenerator::answering("The cat is on the mat."));
    let rag = MemRag::with_providers(embedder.clone(), Some(generator.clone()), config).unwrap();
    (rag, embedder, generator)
}
