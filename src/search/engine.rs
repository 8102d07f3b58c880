//! Search Engine
//!
//! Combines the free-text query and the active tags into one filtering pass
//! over the index. Results keep index order; there is no relevance ranking.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::filters::ActiveFilterSet;
use super::predicates::{matches_query, matches_tags};
use crate::recipes::{Recipe, RecipeIndex};
use crate::text::{is_significant, normalize, normalize_value, MIN_QUERY_CHARS};

/// Which constraints a search applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// No usable query and no tags: everything
    All,
    /// Free-text query only
    Query,
    /// Tags only
    Tags,
    /// Query and tags, both must hold
    Combined,
}

/// Receiver for a finished result list (cards, counters)
pub trait ResultsView {
    fn render_results(&mut self, recipes: &[&Recipe]);
}

/// Search engine over a read-only index
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'a> {
    index: &'a RecipeIndex,
    min_query_chars: usize,
}

impl<'a> SearchEngine<'a> {
    pub fn new(index: &'a RecipeIndex) -> Self {
        Self {
            index,
            min_query_chars: MIN_QUERY_CHARS,
        }
    }

    /// Raise the minimum query length; values below the default are ignored
    pub fn with_min_query_chars(mut self, min_query_chars: usize) -> Self {
        self.min_query_chars = min_query_chars.max(MIN_QUERY_CHARS);
        self
    }

    pub fn index(&self) -> &'a RecipeIndex {
        self.index
    }

    pub fn mode(&self, query: &str, filters: &ActiveFilterSet) -> SearchMode {
        self.mode_for(&normalize(query), filters)
    }

    fn mode_for(&self, normalized_query: &str, filters: &ActiveFilterSet) -> SearchMode {
        let has_query = is_significant(normalized_query, self.min_query_chars);
        match (has_query, filters.has_tags()) {
            (false, false) => SearchMode::All,
            (true, false) => SearchMode::Query,
            (false, true) => SearchMode::Tags,
            (true, true) => SearchMode::Combined,
        }
    }

    /// Filter the index by query and tags
    ///
    /// A query shorter than the minimum length is ignored, so a short query
    /// with no tags returns the whole collection.
    pub fn search(&self, query: &str, filters: &ActiveFilterSet) -> Vec<&'a Recipe> {
        let normalized = normalize(query);
        let mode = self.mode_for(&normalized, filters);

        let all = self.index.get_all();
        let results: Vec<&'a Recipe> = match mode {
            SearchMode::All => all.iter().collect(),
            SearchMode::Query => all.iter().filter(|r| matches_query(r, &normalized)).collect(),
            SearchMode::Tags => all.iter().filter(|r| matches_tags(r, filters)).collect(),
            SearchMode::Combined => all
                .iter()
                .filter(|r| matches_query(r, &normalized) && matches_tags(r, filters))
                .collect(),
        };

        debug!(
            "search mode={:?} query={:?} tags={} -> {}/{} recipes",
            mode,
            normalized,
            filters.len(),
            results.len(),
            all.len()
        );
        results
    }

    /// Same as [`search`](Self::search), returning recipe ids
    pub fn search_ids(&self, query: &str, filters: &ActiveFilterSet) -> Vec<u32> {
        self.search(query, filters).into_iter().map(|r| r.id).collect()
    }

    /// Search and hand the final list to `view` exactly once
    pub fn search_and_render<V>(&self, query: &str, filters: &ActiveFilterSet, view: &mut V) -> Vec<&'a Recipe>
    where
        V: ResultsView + ?Sized,
    {
        let results = self.search(query, filters);
        view.render_results(&results);
        results
    }

    /// Search with untyped inputs
    ///
    /// A non-string query or a malformed filter set yields an empty list; the
    /// caller decides what to tell the user.
    pub fn search_value(&self, query: &Value, filters: &Value) -> Vec<&'a Recipe> {
        let query = match query {
            Value::Null => String::new(),
            other => match normalize_value(other) {
                Ok(q) => q,
                Err(e) => {
                    warn!("Rejected search query: {}", e);
                    return Vec::new();
                }
            },
        };
        let filters = match ActiveFilterSet::from_value(filters) {
            Ok(f) => f,
            Err(e) => {
                warn!("Rejected search filters: {}", e);
                return Vec::new();
            }
        };
        self.search(&query, &filters)
    }
}
