//! Cocktail dataset store
//!
//! Loads the tabular cocktail dataset once at startup and serves
//! case-insensitive ingredient lookups over the immutable snapshot.

use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::models::Category;
use crate::models::CocktailEntry;
use crate::MAX_RESULTS;

/// Read-only store of cocktail rows in source order.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    entries: Vec<CocktailEntry>,
}

impl DatasetStore {
    /// Load the dataset from a CSV file with `name,ingredients,category` columns.
    ///
    /// # Errors
    /// - IO errors opening the file
    /// - CSV parsing errors (missing columns, malformed rows)
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;

        let mut entries = Vec::new();
        for row in reader.deserialize() {
            let entry: CocktailEntry = row?;
            entries.push(entry);
        }

        info!(
            "Loaded {} cocktail entries from {}",
            entries.len(),
            path.as_ref().display()
        );

        Ok(Self { entries })
    }

    /// Build a store from rows already in memory
    pub fn from_entries(entries: Vec<CocktailEntry>) -> Self {
        Self { entries }
    }

    /// Number of rows in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All rows in source order
    pub fn entries(&self) -> &[CocktailEntry] {
        &self.entries
    }

    /// Rows whose ingredients contain `term` as a case-insensitive substring,
    /// optionally restricted to rows whose category contains the filter
    /// string. Source order, truncated to the first [`MAX_RESULTS`].
    pub fn filter(&self, term: &str, category: Option<Category>) -> Vec<&CocktailEntry> {
        let term = term.to_lowercase();

        self.entries
            .iter()
            .filter(|entry| entry.ingredients.to_lowercase().contains(&term))
            .filter(|entry| match category {
                Some(filter) => entry
                    .category
                    .to_lowercase()
                    .contains(&filter.as_str().to_lowercase()),
                None => true,
            })
            .take(MAX_RESULTS)
            .collect()
    }

    /// Rows whose ingredients contain any of `terms` as a case-insensitive
    /// substring. Source order, truncated to the first [`MAX_RESULTS`].
    pub fn filter_any(&self, terms: &[String]) -> Vec<&CocktailEntry> {
        let lowered: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();

        self.entries
            .iter()
            .filter(|entry| {
                let ingredients = entry.ingredients.to_lowercase();
                lowered.iter().any(|term| ingredients.contains(term))
            })
            .take(MAX_RESULTS)
            .collect()
    }
}
