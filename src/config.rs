//! Runtime configuration.
//!
//! Priority: defaults < TOML file named by `MEMRAG_CONFIG` < `MEMRAG_*` env vars.

use crate::application::search::GenerationSettings;
use crate::domain::error::DomainError;
use crate::infrastructure::embeddings::hashing::DEFAULT_DIMENSIONS;
use crate::infrastructure::memory::vector_store::StoreOptions;
use crate::infrastructure::providers::ProviderSettings;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

pub const CONFIG_PATH_VAR: &str = "MEMRAG_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub embedding_provider: String,
    pub embedding_model: Option<String>,
    pub embedding_api_key: Option<String>,
    pub embedding_base_url: Option<String>,
    /// Vector length for local models.
    pub embedding_dimensions: usize,

    /// `None` disables answer generation.
    pub generation_provider: Option<String>,
    pub generation_model: Option<String>,
    pub generation_api_key: Option<String>,
    pub generation_base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,

    pub top_k: usize,
    pub chunk_size: usize,
    /// Per-store document limit. Adds past it are rejected.
    pub max_documents: Option<usize>,
}

impl Default for RagConfig {
    fn default() -> Self {
        let sampling = GenerationSettings::default();
        Self {
            embedding_provider: "hashing".to_string(),
            embedding_model: None,
            embedding_api_key: None,
            embedding_base_url: None,
            embedding_dimensions: DEFAULT_DIMENSIONS,
            generation_provider: None,
            generation_model: None,
            generation_api_key: None,
            generation_base_url: None,
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
            top_k: 5,
            chunk_size: 500,
            max_documents: None,
        }
    }
}

fn parse_number<T>(name: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DomainError::Config(format!("Invalid {name} value '{value}': {e}")))
}

/// Empty strings clear an optional setting.
fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

impl RagConfig {
    /// Defaults, then the optional config file, then the process environment.
    pub fn load() -> Result<Self, DomainError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            DomainError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Overlays `MEMRAG_*` values returned by `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MEMRAG_EMBEDDING_PROVIDER").and_then(non_empty) {
            self.embedding_provider = v;
        }
        if let Some(v) = lookup("MEMRAG_EMBEDDING_MODEL") {
            self.embedding_model = non_empty(v);
        }
        if let Some(v) = lookup("MEMRAG_EMBEDDING_API_KEY") {
            self.embedding_api_key = non_empty(v);
        }
        if let Some(v) = lookup("MEMRAG_EMBEDDING_BASE_URL") {
            self.embedding_base_url = non_empty(v);
        }
        if let Some(v) = lookup("MEMRAG_EMBEDDING_DIMENSIONS") {
            self.embedding_dimensions = parse_number("MEMRAG_EMBEDDING_DIMENSIONS", &v)?;
        }
        if let Some(v) = lookup("MEMRAG_GENERATION_PROVIDER") {
            self.generation_provider = non_empty(v);
        }
        if let Some(v) = lookup("MEMRAG_GENERATION_MODEL") {
            self.generation_model = non_empty(v);
        }
        if let Some(v) = lookup("MEMRAG_GENERATION_API_KEY") {
            self.generation_api_key = non_empty(v);
        }
        if let Some(v) = lookup("MEMRAG_GENERATION_BASE_URL") {
            self.generation_base_url = non_empty(v);
        }
        if let Some(v) = lookup("MEMRAG_TEMPERATURE") {
            self.temperature = parse_number("MEMRAG_TEMPERATURE", &v)?;
        }
        if let Some(v) = lookup("MEMRAG_MAX_TOKENS") {
            self.max_tokens = parse_number("MEMRAG_MAX_TOKENS", &v)?;
        }
        if let Some(v) = lookup("MEMRAG_TOP_K") {
            self.top_k = parse_number("MEMRAG_TOP_K", &v)?;
        }
        if let Some(v) = lookup("MEMRAG_CHUNK_SIZE") {
            self.chunk_size = parse_number("MEMRAG_CHUNK_SIZE", &v)?;
        }
        if let Some(v) = lookup("MEMRAG_MAX_DOCUMENTS") {
            self.max_documents = match non_empty(v) {
                Some(v) => Some(parse_number("MEMRAG_MAX_DOCUMENTS", &v)?),
                None => None,
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.embedding_provider.trim().is_empty() {
            return Err(DomainError::Config("embedding_provider cannot be empty".into()));
        }
        if self.embedding_dimensions == 0 {
            return Err(DomainError::Config("embedding_dimensions must be at least 1".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(DomainError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(DomainError::Config("max_tokens must be at least 1".into()));
        }
        if self.top_k == 0 {
            return Err(DomainError::Config("top_k must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(DomainError::Config("chunk_size must be at least 1".into()));
        }
        if self.max_documents == Some(0) {
            return Err(DomainError::Config("max_documents must be at least 1 when set".into()));
        }
        Ok(())
    }

    pub fn embedding_settings(&self) -> ProviderSettings {
        ProviderSettings {
            api_key: self.embedding_api_key.clone().unwrap_or_default(),
            model: self.embedding_model.clone(),
            base_url: self.embedding_base_url.clone(),
            dimensions: self.embedding_dimensions,
        }
    }

    pub fn generation_settings(&self) -> ProviderSettings {
        ProviderSettings {
            api_key: self.generation_api_key.clone().unwrap_or_default(),
            model: self.generation_model.clone(),
            base_url: self.generation_base_url.clone(),
            dimensions: 0,
        }
    }

    pub fn sampling(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions { max_documents: self.max_documents }
    }
}
