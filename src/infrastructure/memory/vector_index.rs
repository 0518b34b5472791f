use std::sync::Arc;

/// Insertion-ordered (id, embedding) pairs kept in two parallel vectors.
///
/// `ids[i]` owns `embeddings[i]`. Every mutation touches both vectors at the
/// same position so their lengths never drift apart.
#[derive(Debug, Default)]
pub struct VectorIndex {
    ids: Vec<String>,
    embeddings: Vec<Arc<[f32]>>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: String, embedding: Arc<[f32]>) {
        self.ids.push(id);
        self.embeddings.push(embedding);
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|existing| existing == id)
    }

    /// Removes the slot holding `id`, shifting later entries down so
    /// insertion order is preserved.
    pub fn remove(&mut self, id: &str) -> Option<Arc<[f32]>> {
        let pos = self.position(id)?;
        self.ids.remove(pos);
        Some(self.embeddings.remove(pos))
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.embeddings.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Length of the embedding side; differs from `len()` only if the index is corrupt.
    pub fn embedding_count(&self) -> usize {
        self.embeddings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.ids
            .iter()
            .map(String::as_str)
            .zip(self.embeddings.iter().map(|e| &e[..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emb(values: &[f32]) -> Arc<[f32]> {
        values.to_vec().into()
    }

    #[test]
    fn test_push_keeps_lengths_in_step() {
        let mut index = VectorIndex::new();
        index.push("a".into(), emb(&[1.0, 0.0]));
        index.push("b".into(), emb(&[0.0, 1.0]));
        assert_eq!(index.len(), 2);
        assert_eq!(index.embedding_count(), 2);
    }

    #[test]
    fn test_remove_middle_preserves_order() {
        let mut index = VectorIndex::new();
        index.push("a".into(), emb(&[1.0]));
        index.push("b".into(), emb(&[2.0]));
        index.push("c".into(), emb(&[3.0]));

        let removed = index.remove("b").unwrap();
        assert_eq!(&removed[..], &[2.0]);

        let remaining: Vec<(&str, f32)> = index.iter().map(|(id, e)| (id, e[0])).collect();
        assert_eq!(remaining, vec![("a", 1.0), ("c", 3.0)]);
        assert_eq!(index.len(), index.embedding_count());
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let mut index = VectorIndex::new();
        index.push("a".into(), emb(&[1.0]));
        assert!(index.remove("zzz").is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut index = VectorIndex::new();
        index.push("a".into(), emb(&[1.0]));
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.embedding_count(), 0);
    }
}
