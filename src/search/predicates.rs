//! Match predicates
//!
//! Pure containment tests on normalized text. The query predicate ORs across
//! fields; the tag predicate ANDs across groups.

use crate::recipes::{Recipe, TagKind};
use crate::search::filters::ActiveFilterSet;
use crate::text::normalize;

/// Normalized containment test
fn contains(haystack: &str, normalized_needle: &str) -> bool {
    normalize(haystack).contains(normalized_needle)
}

/// True if the query occurs in the name, any ingredient, the appliance or any utensil
///
/// `normalized_query` must already be normalized and non-empty; an empty
/// query means "match all" and is handled by the caller.
pub fn matches_query(recipe: &Recipe, normalized_query: &str) -> bool {
    recipe
        .get_searchable_text()
        .into_iter()
        .any(|text| contains(text, normalized_query))
}

/// True if the recipe satisfies every non-empty tag group
///
/// - ingredients: every tag occurs in at least one ingredient name
/// - appliances: the appliance contains at least one of the tags
/// - ustensils: every tag occurs in at least one utensil
pub fn matches_tags(recipe: &Recipe, filters: &ActiveFilterSet) -> bool {
    every_tag_matches(recipe, filters, TagKind::Ingredient)
        && appliance_matches(recipe, filters)
        && every_tag_matches(recipe, filters, TagKind::Ustensil)
}

fn every_tag_matches(recipe: &Recipe, filters: &ActiveFilterSet, kind: TagKind) -> bool {
    let values = recipe.tag_values(kind);
    filters
        .group(kind)
        .iter()
        .map(|tag| normalize(tag))
        .filter(|tag| !tag.is_empty())
        .all(|tag| values.iter().any(|value| contains(value, &tag)))
}

fn appliance_matches(recipe: &Recipe, filters: &ActiveFilterSet) -> bool {
    let tags: Vec<String> = filters
        .group(TagKind::Appliance)
        .iter()
        .map(|tag| normalize(tag))
        .filter(|tag| !tag.is_empty())
        .collect();
    if tags.is_empty() {
        return true;
    }
    let appliance = normalize(&recipe.appliance);
    tags.iter().any(|tag| appliance.contains(tag.as_str()))
}
