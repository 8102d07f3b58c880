//! Tag option lists for the ingredient, appliance and utensil dropdowns
//!
//! Options come from the recipes currently displayed, so every option narrows
//! the result set when selected. Already-active tags are left out.

use schemars::JsonSchema;
use serde::Serialize;

use super::filters::ActiveFilterSet;
use crate::recipes::{Recipe, TagKind};
use crate::text::{capitalize, distinct_by_normalized, normalize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TagOptions {
    pub ingredients: Vec<String>,
    pub appliances: Vec<String>,
    pub ustensils: Vec<String>,
}

impl TagOptions {
    pub fn get(&self, kind: TagKind) -> &[String] {
        match kind {
            TagKind::Ingredient => &self.ingredients,
            TagKind::Appliance => &self.appliances,
            TagKind::Ustensil => &self.ustensils,
        }
    }

    /// Options of one kind containing the dropdown's own input
    ///
    /// Unlike the main search there is no minimum length; blank input keeps
    /// every option.
    pub fn narrow(&self, kind: TagKind, input: &str) -> Vec<String> {
        let needle = normalize(input);
        self.get(kind)
            .iter()
            .filter(|option| normalize(option).contains(&needle))
            .cloned()
            .collect()
    }

    /// Narrow every list with the same input
    pub fn narrowed(&self, input: &str) -> TagOptions {
        TagOptions {
            ingredients: self.narrow(TagKind::Ingredient, input),
            appliances: self.narrow(TagKind::Appliance, input),
            ustensils: self.narrow(TagKind::Ustensil, input),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.appliances.is_empty() && self.ustensils.is_empty()
    }
}

/// Build the dropdown lists from the displayed results
pub fn tag_options(results: &[&Recipe], filters: &ActiveFilterSet) -> TagOptions {
    let options_for = |kind: TagKind| -> Vec<String> {
        distinct_by_normalized(results.iter().flat_map(|recipe| recipe.tag_values(kind)))
            .into_values()
            .filter(|value| !filters.contains(kind, value))
            .map(capitalize)
            .collect()
    };

    TagOptions {
        ingredients: options_for(TagKind::Ingredient),
        appliances: options_for(TagKind::Appliance),
        ustensils: options_for(TagKind::Ustensil),
    }
}
