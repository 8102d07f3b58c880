//! Recipe search
//!
//! Free-text, tag-filtered and autocompleted search over a static recipe
//! collection. Comparisons are case- and accent-insensitive.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod protocol;
pub mod recipes;
pub mod search;
pub mod text;

pub use error::AppError;
pub use recipes::{Recipe, RecipeIndex};
pub use search::{ActiveFilterSet, AutocompleteEngine, SearchEngine};
pub use text::normalize;
