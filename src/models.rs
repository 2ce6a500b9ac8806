use serde::Deserialize;
use serde::Serialize;

/// One row of the cocktail dataset.
///
/// `ingredients` is a free-text, comma-separated list as it appears in the
/// source file. Duplicate names are permitted; identity is positional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocktailEntry {
    pub name: String,
    pub ingredients: String,
    pub category: String,
}

impl CocktailEntry {
    /// Display line used by filter and recommendation responses
    pub fn display_line(&self) -> String {
        format!("{} – {}", self.name, self.ingredients)
    }
}

/// Category filter derived from a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Alcoholic,
    NonAlcoholic,
}

impl Category {
    /// Substring matched against the dataset's category column
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Alcoholic => "Alcoholic",
            Category::NonAlcoholic => "Non alcoholic",
        }
    }

    /// Detect a category filter in a lowercased message.
    ///
    /// "non-alcoholic" must be tested before "alcoholic" since the latter is
    /// a substring of the former.
    pub fn detect(message: &str) -> Option<Self> {
        if message.contains("non-alcoholic") {
            Some(Category::NonAlcoholic)
        } else if message.contains("alcoholic") {
            Some(Category::Alcoholic)
        } else {
            None
        }
    }
}
