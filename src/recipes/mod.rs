//! Static recipe collection
//!
//! Record types and the read-only index built once at startup.

pub mod index;
pub mod records;

pub use index::{LoadError, RecipeIndex};
pub use records::{IngredientLine, Recipe, TagKind};
