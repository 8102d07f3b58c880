//! Autocomplete suggestions
//!
//! Candidates are recipe names, ingredient names, appliances, utensils and
//! the labels of currently active tags. Matching candidates are deduplicated
//! on their normalized form, sorted by it, and capped.

use tracing::debug;

use super::filters::ActiveFilterSet;
use crate::recipes::RecipeIndex;
use crate::text::{distinct_by_normalized, is_significant, normalize, MIN_QUERY_CHARS};

/// Maximum number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct AutocompleteEngine<'a> {
    index: &'a RecipeIndex,
    min_query_chars: usize,
    max_suggestions: usize,
}

impl<'a> AutocompleteEngine<'a> {
    pub fn new(index: &'a RecipeIndex) -> Self {
        Self {
            index,
            min_query_chars: MIN_QUERY_CHARS,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }

    /// Raise the trigger length; values below the default are ignored
    pub fn with_min_query_chars(mut self, min_query_chars: usize) -> Self {
        self.min_query_chars = min_query_chars.max(MIN_QUERY_CHARS);
        self
    }

    /// Lower the cap; it never exceeds [`MAX_SUGGESTIONS`]
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions.min(MAX_SUGGESTIONS);
        self
    }

    /// Suggestions for a partial query, without active tags
    pub fn suggest(&self, partial_query: &str) -> Vec<String> {
        self.suggest_with_tags(partial_query, &ActiveFilterSet::default())
    }

    /// Suggestions for a partial query, active tag labels included as candidates
    ///
    /// Returns an empty list when the normalized query is below the minimum
    /// length. Display text comes from the first candidate seen in index
    /// order (recipes first, then tags).
    pub fn suggest_with_tags(&self, partial_query: &str, filters: &ActiveFilterSet) -> Vec<String> {
        let needle = normalize(partial_query);
        if !is_significant(&needle, self.min_query_chars) {
            return Vec::new();
        }

        let candidates = self
            .index
            .get_all()
            .iter()
            .flat_map(|recipe| recipe.get_searchable_text())
            .chain(filters.labels().map(|(_, label)| label));

        let suggestions: Vec<String> = distinct_by_normalized(candidates)
            .into_iter()
            .filter(|(key, _)| key.contains(&needle))
            .take(self.max_suggestions)
            .map(|(_, display)| display.trim().to_string())
            .collect();

        debug!("suggest {:?} -> {} suggestions", needle, suggestions.len());
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::TagKind;
    use crate::search::fixtures::{recipe, sample_index, scenario_index};
    use std::collections::HashSet;

    #[test]
    fn test_scenario() {
        let index = scenario_index();
        let engine = AutocompleteEngine::new(&index);
        assert_eq!(engine.suggest("tar"), vec!["Tarte aux pommes"]);
    }

    #[test]
    fn test_short_input_is_empty() {
        let index = sample_index();
        let engine = AutocompleteEngine::new(&index);
        assert!(engine.suggest("").is_empty());
        assert!(engine.suggest("po").is_empty());
        assert!(engine.suggest("  po  ").is_empty());
    }

    #[test]
    fn test_sorted_by_normalized_form() {
        let index = sample_index();
        let engine = AutocompleteEngine::new(&index);
        assert_eq!(
            engine.suggest("pomme"),
            vec!["Compote pomme rhubarbe", "Pomme", "Pommes de terre", "Tarte aux pommes"]
        );
    }

    #[test]
    fn test_dedup_keeps_first_display_value() {
        let index = sample_index();
        let engine = AutocompleteEngine::new(&index);
        // "Crème fraîche" (recipe 2) precedes "creme fraiche" (recipe 4)
        assert_eq!(engine.suggest("fraich"), vec!["Crème fraîche"]);
    }

    #[test]
    fn test_accent_insensitive() {
        let index = sample_index();
        let engine = AutocompleteEngine::new(&index);
        assert_eq!(engine.suggest("ÉCONO"), vec!["Économe"]);
    }

    #[test]
    fn test_active_tags_are_candidates() {
        let index = sample_index();
        let engine = AutocompleteEngine::new(&index);
        let mut filters = ActiveFilterSet::new();
        filters.insert(TagKind::Ingredient, "Pommeau");

        let suggestions = engine.suggest_with_tags("pommea", &filters);
        assert_eq!(suggestions, vec!["Pommeau"]);
    }

    #[test]
    fn test_capped_at_max() {
        let recipes = (1..=25)
            .map(|id| recipe(id, &format!("Salade numéro {:02}", id), &["Laitue"], "Saladier", &[]))
            .collect();
        let index = RecipeIndex::new(recipes).unwrap();
        let engine = AutocompleteEngine::new(&index);

        let suggestions = engine.suggest("salade");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "Salade numéro 01");
        assert_eq!(suggestions[9], "Salade numéro 10");

        let keys: HashSet<_> = suggestions.iter().map(|s| normalize(s)).collect();
        assert_eq!(keys.len(), suggestions.len());
    }

    #[test]
    fn test_custom_limits() {
        let index = sample_index();
        let engine = AutocompleteEngine::new(&index)
            .with_min_query_chars(4)
            .with_max_suggestions(2);
        assert!(engine.suggest("pom").is_empty());
        assert_eq!(engine.suggest("pomme").len(), 2);
    }

    #[test]
    fn test_limits_cannot_be_loosened() {
        let recipes = (1..=25)
            .map(|id| recipe(id, &format!("Salade numéro {:02}", id), &["Laitue"], "Saladier", &[]))
            .collect();
        let index = RecipeIndex::new(recipes).unwrap();
        let engine = AutocompleteEngine::new(&index)
            .with_min_query_chars(1)
            .with_max_suggestions(50);

        assert_eq!(engine.suggest("salade").len(), MAX_SUGGESTIONS);
        assert!(engine.suggest("sa").is_empty());
    }

    #[test]
    fn test_stable_for_identical_input() {
        let index = sample_index();
        let engine = AutocompleteEngine::new(&index);
        assert_eq!(engine.suggest("cre"), engine.suggest("cre"));
    }
}
