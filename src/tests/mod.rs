
use std::sync::Arc;

use async_trait::async_trait;

use crate::chat::ChatDispatcher;
use crate::dataset::DatasetStore;
use crate::errors::MixRagError;
use crate::errors::Result;
use crate::models::CocktailEntry;
use crate::preferences::PreferenceStore;
use crate::rag::AnswerProvider;

/// Scripted stand-in for the retrieval fallback.
pub struct ScriptedAnswerer {
    pub reply: Option<String>,
    pub fail: bool,
}

impl ScriptedAnswerer {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            fail: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            reply: None,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            fail: true,
        }
    }
}

#[async_trait]
impl AnswerProvider for ScriptedAnswerer {
    async fn answer(&self, _query: &str) -> Result<Option<String>> {
        if self.fail {
            return Err(MixRagError::Generation("backend unavailable".to_string()));
        }
        Ok(self.reply.clone())
    }
}

/// Test dataset matching the scenarios in the chat tests
pub fn sample_dataset() -> Arc<DatasetStore> {
    let entry = |name: &str, ingredients: &str, category: &str| CocktailEntry {
        name: name.to_string(),
        ingredients: ingredients.to_string(),
        category: category.to_string(),
    };

    Arc::new(DatasetStore::from_entries(vec![
        entry("Mojito", "mint, rum, sugar", "Alcoholic"),
        entry("Virgin Mojito", "mint, lime, soda", "Non alcoholic"),
        entry("Daiquiri", "rum, lime, sugar", "Alcoholic"),
        entry("Lemonade", "lemon, sugar, water", "Non alcoholic"),
    ]))
}

/// Dispatcher over the sample dataset, a fresh preference store and the
/// given fallback
pub fn dispatcher_with(answerer: ScriptedAnswerer) -> ChatDispatcher {
    ChatDispatcher::new(
        sample_dataset(),
        Arc::new(PreferenceStore::new()),
        Arc::new(answerer),
    )
}
