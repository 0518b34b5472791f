use crate::domain::error::DomainError;

/// Splits `content` on whitespace into runs of `chunk_size` words.
///
/// Words inside a chunk are rejoined with single spaces. The last chunk may be
/// shorter; text with no words yields no chunks.
pub fn chunk_words(content: &str, chunk_size: usize) -> Result<Vec<String>, DomainError> {
    if chunk_size == 0 {
        return Err(DomainError::InvalidInput("Chunk size must be at least 1 word".to_string()));
    }
    let words: Vec<&str> = content.split_whitespace().collect();
    Ok(words.chunks(chunk_size).map(|c| c.join(" ")).collect())
}
