//! Semantic retrieval over the dataset snapshot
//!
//! The index is built once at startup by embedding every row's ingredient
//! text; queries embed the question and rank rows by cosine similarity.

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::dataset::DatasetStore;
use crate::embeddings::EmbeddingClient;
use crate::errors::Result;
use crate::rag::SearchResult;

/// In-memory cosine-similarity index over row embeddings.
///
/// Row ids are positions in the dataset snapshot, so the index never
/// outlives or reorders the store it was built from.
#[derive(Debug, Default)]
pub struct VectorIndex {
    embeddings: Vec<Vec<f32>>,
}

impl VectorIndex {
    pub fn new(embeddings: Vec<Vec<f32>>) -> Self {
        Self { embeddings }
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    /// Row ids and similarity scores for the `top_k` closest rows,
    /// best first.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(id, embedding)| (id, cosine_similarity(query, embedding)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        scored
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Retriever pairing the embedding client with the vector index.
pub struct Retriever {
    dataset: Arc<DatasetStore>,
    embedding_client: EmbeddingClient,
    index: VectorIndex,
}

impl Retriever {
    /// Embed every dataset row and build the index.
    ///
    /// # Errors
    /// - Embedding client configuration errors
    /// - Embedding API failures (the backend must be reachable at startup)
    pub async fn build(config: &AppConfig, dataset: Arc<DatasetStore>) -> Result<Self> {
        let embedding_client = EmbeddingClient::from_config(config)?;

        let texts: Vec<&str> = dataset
            .entries()
            .iter()
            .map(|entry| entry.ingredients.as_str())
            .collect();
        let embeddings = embedding_client.generate_batch(texts).await?;
        let index = VectorIndex::new(embeddings);

        info!("Built vector index over {} dataset rows", index.len());

        Ok(Self {
            dataset,
            embedding_client,
            index,
        })
    }

    /// Semantic search over the ingredient texts.
    pub async fn semantic_search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        debug!("Performing semantic search: {query}");

        let query_embedding = self.embedding_client.generate(query).await?;
        let hits = self.index.search(&query_embedding, limit);

        let results = hits
            .into_iter()
            .map(|(id, score)| SearchResult {
                entry: self.dataset.entries()[id].clone(),
                score,
            })
            .collect();

        Ok(results)
    }
}
