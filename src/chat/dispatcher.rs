//! Intent dispatcher
//!
//! Routes each chat message to exactly one handler and always produces a
//! single response string. Rule handlers are total; only the retrieval
//! fallback can fail, and its error propagates to the HTTP boundary.

use std::sync::Arc;

use tracing::debug;

use crate::chat::rules;
use crate::chat::rules::Intent;
use crate::dataset::DatasetStore;
use crate::errors::Result;
use crate::models::Category;
use crate::models::CocktailEntry;
use crate::preferences::PreferenceStore;
use crate::rag::AnswerProvider;

const NO_PREFERENCES_SAVED: &str = "You haven't shared any favourite ingredients yet.";
const NO_PREFERENCES_FOR_RECOMMEND: &str = "You haven't shared your favourite ingredients yet.";
const NO_RECOMMENDATIONS: &str =
    "Sorry, I couldn't find any recommendations based on your preferences.";
const NO_ANSWER: &str = "Sorry, I couldn't find an answer to your question.";

/// Dispatcher over the dataset snapshot, the preference store and the
/// retrieval fallback collaborator.
pub struct ChatDispatcher {
    dataset: Arc<DatasetStore>,
    preferences: Arc<PreferenceStore>,
    answerer: Arc<dyn AnswerProvider>,
}

impl ChatDispatcher {
    pub fn new(
        dataset: Arc<DatasetStore>,
        preferences: Arc<PreferenceStore>,
        answerer: Arc<dyn AnswerProvider>,
    ) -> Self {
        Self {
            dataset,
            preferences,
            answerer,
        }
    }

    /// Handle one chat message and produce the response string.
    ///
    /// # Errors
    /// Only the retrieval fallback can fail; every rule branch is total.
    pub async fn handle(&self, user_id: &str, message: &str) -> Result<String> {
        let message = message.to_lowercase();
        let intent = rules::classify(&message);
        debug!("Dispatching message for user {user_id}: {intent:?}");

        match intent {
            Intent::SavePreference => Ok(self.save_preference(user_id, &message)),
            Intent::ListPreferences => Ok(self.list_preferences(user_id)),
            Intent::FilterByIngredient => Ok(self.filter_by_ingredient(&message)),
            Intent::Recommend => Ok(self.recommend(user_id)),
            Intent::Fallback => self.fallback(&message).await,
        }
    }

    /// Rule 1: store the text after the last "like" as a preference.
    /// The token may be empty when the user typed nothing after "like";
    /// it is stored verbatim.
    fn save_preference(&self, user_id: &str, message: &str) -> String {
        let ingredient = rules::text_after_last(message, "like");
        self.preferences.append(user_id, ingredient);
        format!("Got it! I saved your preference: {ingredient}")
    }

    /// Rule 2: list stored preferences in insertion order.
    fn list_preferences(&self, user_id: &str) -> String {
        let prefs = self.preferences.get(user_id);
        if prefs.is_empty() {
            NO_PREFERENCES_SAVED.to_string()
        } else {
            format!("Your favourite ingredients are: {}", prefs.join(", "))
        }
    }

    /// Rule 3: filter the dataset by the extracted search term, with an
    /// optional category filter detected on the whole message.
    fn filter_by_ingredient(&self, message: &str) -> String {
        let term = rules::text_after_last(message, "cocktails containing");
        let category = Category::detect(message);

        let matches = self.dataset.filter(term, category);
        if matches.is_empty() {
            format!("Sorry, I couldn't find any cocktails containing {term}.")
        } else {
            format_matches(&matches)
        }
    }

    /// Rule 4: recommend entries matching any stored preference.
    fn recommend(&self, user_id: &str) -> String {
        let prefs = self.preferences.get(user_id);
        if prefs.is_empty() {
            return NO_PREFERENCES_FOR_RECOMMEND.to_string();
        }

        let matches = self.dataset.filter_any(&prefs);
        if matches.is_empty() {
            NO_RECOMMENDATIONS.to_string()
        } else {
            format_matches(&matches)
        }
    }

    /// Rule 5: hand the message to the retrieval fallback collaborator.
    async fn fallback(&self, message: &str) -> Result<String> {
        match self.answerer.answer(message).await? {
            Some(answer) => Ok(answer),
            None => Ok(NO_ANSWER.to_string()),
        }
    }
}

/// One display line per entry, joined by newlines.
fn format_matches(matches: &[&CocktailEntry]) -> String {
    matches
        .iter()
        .map(|entry| entry.display_line())
        .collect::<Vec<_>>()
        .join("\n")
}
