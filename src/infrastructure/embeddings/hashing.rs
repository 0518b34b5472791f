//! Offline embedding by feature hashing.
//!
//! Each lowercased alphanumeric token is hashed with FNV-1a into one of
//! `dimensions` buckets; a second hash bit picks the sign so that collisions
//! tend to cancel rather than pile up. Texts sharing words end up with a
//! positive cosine similarity, which is enough for demos and tests that must
//! not touch the network.

use crate::domain::ports::embedding_port::EmbeddingModel;

pub const DEFAULT_DIMENSIONS: usize = 384;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Clone)]
pub struct HashingModel {
    dimensions: usize,
}

impl HashingModel {
    pub fn new(dimensions: usize) -> Result<Self, String> {
        if dimensions == 0 {
            return Err("Hashing model needs at least one dimension".to_string());
        }
        Ok(Self { dimensions })
    }

    fn fnv1a(token: &str) -> u64 {
        token.bytes().fold(FNV_OFFSET, |hash, byte| {
            (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
        })
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

impl Default for HashingModel {
    fn default() -> Self {
        Self { dimensions: DEFAULT_DIMENSIONS }
    }
}

impl EmbeddingModel for HashingModel {
    /// Text with no tokens encodes to the zero vector, which scores 0 against everything.
    fn encode(&self, text: &str) -> Result<Vec<f32>, String> {
        let mut vector = vec![0.0_f32; self.dimensions];
        for token in Self::tokens(text) {
            let hash = Self::fnv1a(&token);
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
