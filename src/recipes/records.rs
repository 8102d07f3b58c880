//! Recipe record types
//!
//! Field names follow the static data file (`ingredients[].ingredient`,
//! `appliance`, `ustensils`), so records deserialize straight from it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::format::highlight_text;

/// A recipe from the static collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    pub ingredients: Vec<IngredientLine>,
    /// Preparation time in minutes
    pub time: u32,
    #[serde(default)]
    pub description: String,
    pub appliance: String,
    #[serde(default)]
    pub ustensils: Vec<String>,
}

/// One line of a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub ingredient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// The three tag groups a recipe can be filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Ingredient,
    Appliance,
    Ustensil,
}

impl TagKind {
    pub const ALL: [TagKind; 3] = [TagKind::Ingredient, TagKind::Appliance, TagKind::Ustensil];

    /// Name of the filter group holding tags of this kind
    pub fn group_name(self) -> &'static str {
        match self {
            TagKind::Ingredient => "ingredients",
            TagKind::Appliance => "appliances",
            TagKind::Ustensil => "ustensils",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Ingredient => write!(f, "ingredient"),
            TagKind::Appliance => write!(f, "appliance"),
            TagKind::Ustensil => write!(f, "ustensil"),
        }
    }
}

impl FromStr for TagKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingredient" | "ingredients" => Ok(TagKind::Ingredient),
            "appliance" | "appliances" => Ok(TagKind::Appliance),
            "ustensil" | "ustensils" | "utensil" | "utensils" => Ok(TagKind::Ustensil),
            other => Err(AppError::InvalidInput(format!("unknown tag kind '{}'", other))),
        }
    }
}

impl Recipe {
    /// Ingredient names in list order
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|line| line.ingredient.as_str())
    }

    /// Raw field values for one tag group
    pub fn tag_values(&self, kind: TagKind) -> Vec<&str> {
        match kind {
            TagKind::Ingredient => self.ingredient_names().collect(),
            TagKind::Appliance => vec![self.appliance.as_str()],
            TagKind::Ustensil => self.ustensils.iter().map(String::as_str).collect(),
        }
    }

    /// Every text a free-text query is matched against, in matching order
    pub fn get_searchable_text(&self) -> Vec<&str> {
        let mut texts = vec![self.name.as_str()];
        texts.extend(self.ingredient_names());
        texts.push(self.appliance.as_str());
        texts.extend(self.ustensils.iter().map(String::as_str));
        texts
    }

    /// Render the recipe card as markdown, bolding matches of `query` in the name
    pub fn to_markdown(&self, query: &str) -> String {
        let mut markdown = format!("### {}\n\n", highlight_text(&self.name, query));

        markdown.push_str(&format!("**Time:** {} min", self.time));
        if let Some(servings) = self.servings {
            markdown.push_str(&format!(" · **Servings:** {}", servings));
        }
        markdown.push_str("\n\n");

        markdown.push_str("**Ingredients:**\n");
        for line in &self.ingredients {
            let quantity = line.display_quantity();
            if quantity.is_empty() {
                markdown.push_str(&format!("- {}\n", line.ingredient));
            } else {
                markdown.push_str(&format!("- {}: {}\n", line.ingredient, quantity));
            }
        }
        markdown.push('\n');

        markdown.push_str(&format!("**Appliance:** {}\n", self.appliance));
        if !self.ustensils.is_empty() {
            markdown.push_str(&format!("**Ustensils:** {}\n", self.ustensils.join(", ")));
        }

        if !self.description.is_empty() {
            markdown.push('\n');
            markdown.push_str(&self.description);
            markdown.push('\n');
        }

        markdown
    }
}

impl IngredientLine {
    /// Quantity and unit as shown on a card: `"400 ml"`, `"2"`, or empty
    pub fn display_quantity(&self) -> String {
        let amount = match self.quantity {
            Some(q) if q.fract() == 0.0 => format!("{}", q as i64),
            Some(q) => format!("{}", q),
            None => String::new(),
        };

        match self.unit.as_deref().map(str::trim) {
            Some(unit) if !unit.is_empty() && !amount.is_empty() => format!("{} {}", amount, unit),
            Some(unit) if !unit.is_empty() => unit.to_string(),
            _ => amount,
        }
    }
}
