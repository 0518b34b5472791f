pub mod add_document;
pub mod chunking;
pub mod envelope;
pub mod orchestrator;
pub mod search;
