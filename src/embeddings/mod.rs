//! Embeddings generation module
//!
//! Generates text embeddings through HTTP providers:
//! - OpenAI-compatible endpoints (text-embedding-3-small, etc.)
//! - Ollama (local models)

pub mod client;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
