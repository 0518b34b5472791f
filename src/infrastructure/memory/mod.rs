pub mod session_registry;
pub mod vector_index;
pub mod vector_store;
