//! Complete RAG fallback pipeline: Retrieve -> Assemble -> Generate

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::dataset::DatasetStore;
use crate::errors::Result;
use crate::llm::LlmService;
use crate::rag::AnswerProvider;
use crate::rag::Retriever;
use crate::rag::SearchResult;

/// Retrieval-backed answer service for messages no keyword rule claims.
pub struct RagService {
    retriever: Retriever,
    llm_service: LlmService,
    top_k: usize,
    temperature: f32,
    max_tokens: usize,
}

impl RagService {
    /// Build the full pipeline: embed the dataset, construct the index and
    /// the generation client.
    ///
    /// # Errors
    /// - Embedding backend unreachable or misconfigured (startup is fatal)
    /// - LLM client configuration errors
    pub async fn new(config: &AppConfig, dataset: Arc<DatasetStore>) -> Result<Self> {
        let retriever = Retriever::build(config, dataset).await?;
        let llm_service = LlmService::new(config)?;

        Ok(Self {
            retriever,
            llm_service,
            top_k: config.retrieval.top_k,
            temperature: config.retrieval.temperature,
            max_tokens: config.retrieval.max_tokens,
        })
    }

    /// Answer a free-text question from the retrieved dataset rows.
    ///
    /// Returns `None` when generation produces nothing usable.
    ///
    /// # Errors
    /// - Embedding API failures while embedding the query
    /// - LLM generation failures (API errors, timeouts)
    pub async fn query(&self, question: &str) -> Result<Option<String>> {
        info!("Processing RAG query: {question}");

        debug!("Step 1: Retrieving rows");
        let results = self.retriever.semantic_search(question, self.top_k).await?;
        debug!("Retrieved {} rows", results.len());

        debug!("Step 2: Assembling context");
        let context = assemble_context(&results);

        debug!("Step 3: Generating answer");
        let prompt = build_prompt(question, &context);
        let answer = self
            .llm_service
            .generate_with_params(&prompt, self.temperature, self.max_tokens)
            .await?;

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }
}

#[async_trait]
impl AnswerProvider for RagService {
    async fn answer(&self, query: &str) -> Result<Option<String>> {
        self.query(query).await
    }
}

/// One display line per retrieved row, best match first.
fn assemble_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|result| result.entry.display_line())
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_prompt(question: &str, context: &str) -> String {
    format!(
        r"You are a knowledgeable bartender helping users learn about cocktails.

Context: The following cocktails may be relevant to the question:

{context}

Question: {question}

Instructions:
1. Provide a helpful and accurate answer based on the cocktails above
2. If referencing specific cocktails, mention their name
3. If the cocktails don't contain relevant information, say so
4. Be concise but informative

Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CocktailEntry;

    #[test]
    fn test_assemble_context_lines() {
        let results = vec![
            SearchResult {
                entry: CocktailEntry {
                    name: "Mojito".to_string(),
                    ingredients: "mint, rum, sugar".to_string(),
                    category: "Alcoholic".to_string(),
                },
                score: 0.9,
            },
            SearchResult {
                entry: CocktailEntry {
                    name: "Daiquiri".to_string(),
                    ingredients: "rum, lime, sugar".to_string(),
                    category: "Alcoholic".to_string(),
                },
                score: 0.8,
            },
        ];

        let context = assemble_context(&results);
        assert_eq!(context, "Mojito – mint, rum, sugar\nDaiquiri – rum, lime, sugar");
    }

    #[test]
    fn test_build_prompt_includes_question_and_context() {
        let prompt = build_prompt("what goes in a mojito?", "Mojito – mint, rum, sugar");
        assert!(prompt.contains("what goes in a mojito?"));
        assert!(prompt.contains("Mojito – mint, rum, sugar"));
    }
}
