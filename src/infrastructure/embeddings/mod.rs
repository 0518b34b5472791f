pub mod hashing;
pub mod model;
pub mod openai;
pub mod voyage;
