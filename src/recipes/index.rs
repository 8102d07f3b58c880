//! Read-only recipe index
//!
//! Built once from the static data source; lookups never mutate it.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::records::{Recipe, TagKind};
use crate::error::AppError;
use crate::text::{distinct_by_normalized, normalize};

/// Dataset compiled into the binary
const BUNDLED_RECIPES: &str = include_str!("../../data/recipes.json");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read recipe file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed recipe data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate recipe id {0}")]
    DuplicateId(u32),
    #[error("recipe {0} has an empty name")]
    EmptyName(u32),
}

/// Accepted shapes of a recipe data file
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeFile {
    List(Vec<Recipe>),
    Wrapped { recipes: Vec<Recipe> },
}

/// Static recipe collection with id lookup
#[derive(Debug, Clone, Default)]
pub struct RecipeIndex {
    recipes: Vec<Recipe>,
    by_id: HashMap<u32, usize>,
}

impl RecipeIndex {
    /// Build an index, keeping load order
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(recipes.len());
        for (position, recipe) in recipes.iter().enumerate() {
            if recipe.name.trim().is_empty() {
                return Err(LoadError::EmptyName(recipe.id));
            }
            if by_id.insert(recipe.id, position).is_some() {
                return Err(LoadError::DuplicateId(recipe.id));
            }
        }

        debug!("Indexed {} recipes", recipes.len());
        Ok(Self { recipes, by_id })
    }

    /// Parse a JSON array of recipes, or an object with a `recipes` array
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let recipes = match serde_json::from_str::<RecipeFile>(json)? {
            RecipeFile::List(recipes) => recipes,
            RecipeFile::Wrapped { recipes } => recipes,
        };
        Self::new(recipes)
    }

    /// Load a recipe data file from disk
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let data = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::from_json(&data)?;
        info!("Loaded {} recipes from {}", index.len(), path.display());
        Ok(index)
    }

    /// The dataset shipped with the crate
    pub fn bundled() -> Result<Self, LoadError> {
        Self::from_json(BUNDLED_RECIPES)
    }

    /// All recipes in load order
    pub fn get_all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get_by_id(&self, id: u32) -> Result<&Recipe, AppError> {
        self.by_id
            .get(&id)
            .map(|&position| &self.recipes[position])
            .ok_or_else(|| AppError::NotFound(format!("recipe with id {}", id)))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Distinct values of one tag group across the whole collection
    ///
    /// Deduplicated on normalized form, first spelling kept, sorted by
    /// normalized form.
    pub fn tag_values(&self, kind: TagKind) -> Vec<String> {
        distinct_by_normalized(self.recipes.iter().flat_map(|recipe| recipe.tag_values(kind)))
            .into_values()
            .map(str::to_string)
            .collect()
    }

    /// Whether `value` names a field value of some recipe in this group
    pub fn contains_tag(&self, kind: TagKind, value: &str) -> bool {
        let wanted = normalize(value);
        if wanted.is_empty() {
            return false;
        }
        self.recipes
            .iter()
            .flat_map(|recipe| recipe.tag_values(kind))
            .any(|candidate| normalize(candidate) == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fixtures::{sample_index, scenario_index};
    use std::io::Write;

    #[test]
    fn test_get_all_keeps_load_order() {
        let index = sample_index();
        let ids: Vec<u32> = index.get_all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_get_by_id() {
        let index = scenario_index();
        assert_eq!(index.get_by_id(2).unwrap().name, "Soupe de courge");

        let err = index.get_by_id(99).unwrap_err();
        assert_eq!(err.error_code(), "not_found");
    }

    #[test]
    fn test_empty_collection() {
        let index = RecipeIndex::new(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.get_all().is_empty());
        assert!(index.tag_values(TagKind::Ingredient).is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"[
            {"id": 1, "name": "A", "ingredients": [], "time": 1, "appliance": "Four"},
            {"id": 1, "name": "B", "ingredients": [], "time": 1, "appliance": "Four"}
        ]"#;
        assert!(matches!(RecipeIndex::from_json(json), Err(LoadError::DuplicateId(1))));
    }

    #[test]
    fn test_blank_name_rejected() {
        let json = r#"[{"id": 4, "name": "  ", "ingredients": [], "time": 1, "appliance": "Four"}]"#;
        assert!(matches!(RecipeIndex::from_json(json), Err(LoadError::EmptyName(4))));
    }

    #[test]
    fn test_wrapped_format() {
        let json = r#"{"recipes": [{"id": 9, "name": "Salade", "ingredients": [], "time": 5, "appliance": "Saladier"}]}"#;
        let index = RecipeIndex::from_json(json).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get_by_id(9).unwrap().name, "Salade");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(RecipeIndex::from_json("{not json"), Err(LoadError::Json(_))));
        assert!(matches!(RecipeIndex::from_json(r#"{"id": 1}"#), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 3, "name": "Gratin", "ingredients": [], "time": 40, "appliance": "Four"}}]"#
        )
        .unwrap();

        let index = RecipeIndex::from_path(file.path()).unwrap();
        assert_eq!(index.get_by_id(3).unwrap().name, "Gratin");
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecipeIndex::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let index = RecipeIndex::bundled().unwrap();
        assert!(index.len() >= 10);
        assert!(!index.tag_values(TagKind::Appliance).is_empty());
    }

    #[test]
    fn test_tag_values_dedup_and_sort() {
        let index = sample_index();
        let appliances = index.tag_values(TagKind::Appliance);
        assert_eq!(appliances, vec!["Blender", "Casserole", "Four"]);

        let ingredients = index.tag_values(TagKind::Ingredient);
        // "Crème fraîche" and "creme fraiche" collapse to one entry
        let cremes: Vec<_> = ingredients.iter().filter(|v| normalize(v) == "creme fraiche").collect();
        assert_eq!(cremes, vec!["Crème fraîche"]);
    }

    #[test]
    fn test_contains_tag() {
        let index = sample_index();
        assert!(index.contains_tag(TagKind::Appliance, "four"));
        assert!(index.contains_tag(TagKind::Ingredient, "CREME FRAICHE"));
        assert!(!index.contains_tag(TagKind::Appliance, "Cocotte"));
        assert!(!index.contains_tag(TagKind::Ustensil, ""));
        // Exact normalized match, not substring
        assert!(!index.contains_tag(TagKind::Appliance, "fou"));
    }
}
