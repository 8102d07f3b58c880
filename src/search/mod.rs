//! Multi-criteria recipe search
//!
//! Free-text query, tag filters and autocomplete over a [`RecipeIndex`](crate::recipes::RecipeIndex).

pub mod autocomplete;
pub mod engine;
pub mod filters;
pub mod predicates;
pub mod tags;

#[cfg(test)]
pub(crate) mod fixtures;


pub use autocomplete::{AutocompleteEngine, MAX_SUGGESTIONS};
pub use engine::{ResultsView, SearchEngine, SearchMode};
pub use filters::ActiveFilterSet;
pub use predicates::{matches_query, matches_tags};
pub use tags::{tag_options, TagOptions};
