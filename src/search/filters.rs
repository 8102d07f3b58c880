//! Active tag filters
//!
//! Three independent groups of selected tags. The set is owned by whoever
//! manages the tag chips; the search core only reads it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::error::AppError;
use crate::recipes::{RecipeIndex, TagKind};
use crate::text::normalize;

/// Selected tags, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ActiveFilterSet {
    #[serde(default)]
    pub ingredients: BTreeSet<String>,
    #[serde(default)]
    pub appliances: BTreeSet<String>,
    #[serde(default)]
    pub ustensils: BTreeSet<String>,
}

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a filter set from untyped JSON
    ///
    /// `null` means no filters. Anything other than an object whose known
    /// keys hold arrays of strings is rejected. Tags go through [`insert`](Self::insert),
    /// so blank values and normalized duplicates are dropped.
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let raw: Self = serde_json::from_value(value.clone())
            .map_err(|e| AppError::InvalidInput(format!("malformed filter set: {}", e)))?;

        let mut filters = Self::default();
        for (kind, tag) in raw.labels() {
            filters.insert(kind, tag);
        }
        Ok(filters)
    }

    pub fn group(&self, kind: TagKind) -> &BTreeSet<String> {
        match kind {
            TagKind::Ingredient => &self.ingredients,
            TagKind::Appliance => &self.appliances,
            TagKind::Ustensil => &self.ustensils,
        }
    }

    fn group_mut(&mut self, kind: TagKind) -> &mut BTreeSet<String> {
        match kind {
            TagKind::Ingredient => &mut self.ingredients,
            TagKind::Appliance => &mut self.appliances,
            TagKind::Ustensil => &mut self.ustensils,
        }
    }

    /// Whether `value` is already selected in the group (normalized comparison)
    pub fn contains(&self, kind: TagKind, value: &str) -> bool {
        let key = normalize(value);
        self.group(kind).iter().any(|tag| normalize(tag) == key)
    }

    /// Add a tag; returns false for blank values and normalized duplicates
    pub fn insert(&mut self, kind: TagKind, value: &str) -> bool {
        let trimmed = value.trim();
        if normalize(trimmed).is_empty() || self.contains(kind, trimmed) {
            return false;
        }
        self.group_mut(kind).insert(trimmed.to_string())
    }

    /// Add a tag only if it corresponds to some recipe value in `index`
    pub fn insert_checked(&mut self, index: &RecipeIndex, kind: TagKind, value: &str) -> Result<bool, AppError> {
        if !index.contains_tag(kind, value) {
            return Err(AppError::InvalidInput(format!(
                "no recipe has {} '{}'",
                kind,
                value.trim()
            )));
        }
        Ok(self.insert(kind, value))
    }

    /// Remove a tag (normalized comparison); returns whether anything was removed
    pub fn remove(&mut self, kind: TagKind, value: &str) -> bool {
        let key = normalize(value);
        let group = self.group_mut(kind);
        let before = group.len();
        group.retain(|tag| normalize(tag) != key);
        group.len() != before
    }

    pub fn clear(&mut self) {
        self.ingredients.clear();
        self.appliances.clear();
        self.ustensils.clear();
    }

    /// Whether any group holds at least one tag
    pub fn has_tags(&self) -> bool {
        !self.ingredients.is_empty() || !self.appliances.is_empty() || !self.ustensils.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_tags()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len() + self.appliances.len() + self.ustensils.len()
    }

    /// All tag labels with their kind, ingredients first
    pub fn labels(&self) -> impl Iterator<Item = (TagKind, &str)> {
        TagKind::ALL
            .into_iter()
            .flat_map(move |kind| self.group(kind).iter().map(move |tag| (kind, tag.as_str())))
    }
}
