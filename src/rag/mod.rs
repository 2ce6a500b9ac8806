//! RAG (Retrieval-Augmented Generation) fallback
//!
//! Catch-all answer path used when no keyword rule matches a chat message:
//! - Semantic retrieval over the dataset's ingredient texts
//! - Context assembly from the retrieved rows
//! - LLM-based answer generation
//!
//! The dispatcher only depends on the [`AnswerProvider`] trait; the real
//! pipeline lives behind it and can be swapped with an in-memory fake in
//! tests.

pub mod pipeline;
pub mod retriever;

pub use pipeline::RagService;
pub use retriever::Retriever;
pub use retriever::VectorIndex;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::CocktailEntry;

/// Narrow interface over the semantic-answer collaborator.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Best-effort natural-language answer for a free-text query, or `None`
    /// when the collaborator has nothing to say.
    async fn answer(&self, query: &str) -> Result<Option<String>>;
}

/// A retrieved dataset row with its relevance score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub entry: CocktailEntry,
    pub score: f32,
}
