//! Shared test fixtures

use crate::recipes::{IngredientLine, Recipe, RecipeIndex};

pub fn recipe(id: u32, name: &str, ingredients: &[&str], appliance: &str, ustensils: &[&str]) -> Recipe {
    Recipe {
        id,
        name: name.to_string(),
        servings: Some(4),
        ingredients: ingredients
            .iter()
            .map(|ingredient| IngredientLine {
                ingredient: ingredient.to_string(),
                quantity: None,
                unit: None,
            })
            .collect(),
        time: 30,
        description: String::new(),
        appliance: appliance.to_string(),
        ustensils: ustensils.iter().map(|u| u.to_string()).collect(),
    }
}

/// The two-recipe collection from the product examples
pub fn scenario_index() -> RecipeIndex {
    RecipeIndex::new(vec![
        recipe(1, "Tarte aux pommes", &["pomme"], "four", &["moule"]),
        recipe(2, "Soupe de courge", &["courge"], "mixeur", &["louche"]),
    ])
    .unwrap()
}

pub fn sample_index() -> RecipeIndex {
    RecipeIndex::new(vec![
        recipe(
            1,
            "Tarte aux pommes",
            &["Pomme", "Farine", "Beurre", "Sucre", "Œuf"],
            "Four",
            &["Moule à tarte", "Rouleau à pâtisserie"],
        ),
        recipe(
            2,
            "Soupe de courge",
            &["Courge", "Crème fraîche", "Oignon"],
            "Casserole",
            &["Louche", "Couteau"],
        ),
        recipe(
            3,
            "Limonade de Coco",
            &["Lait de coco", "Jus de citron", "Crème de coco", "Sucre", "Glaçons"],
            "Blender",
            &["cuillère à soupe", "verres"],
        ),
        recipe(
            4,
            "Omelette aux champignons",
            &["Œufs", "Champignons de Paris", "creme fraiche", "Beurre"],
            "Casserole",
            &["Fouet", "Spatule"],
        ),
        recipe(
            5,
            "Gratin dauphinois",
            &["Pommes de terre", "Lait", "Crème fraîche", "Ail"],
            "Four",
            &["Couteau", "Plat à gratin"],
        ),
        recipe(
            6,
            "Compote pomme rhubarbe",
            &["Rhubarbe", "Pomme", "Sucre vanillé"],
            "Casserole",
            &["Couteau", "Économe"],
        ),
    ])
    .unwrap()
}

pub fn ids(recipes: &[&Recipe]) -> Vec<u32> {
    recipes.iter().map(|r| r.id).collect()
}
