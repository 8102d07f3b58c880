//! CLI mode implementation
//!
//! Provides the command-line interface over the search core

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::error::AppError;
use crate::recipes::{RecipeIndex, TagKind};
use crate::search::ActiveFilterSet;

/// Recipe search CLI
#[derive(Parser, Debug)]
#[command(name = "recipe-search")]
#[command(about = "Search, filter and autocomplete over a recipe collection", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Recipe data file (JSON); defaults to the configured file, then the bundled recipes
    #[arg(long, global = true, env = "RECIPE_SEARCH_DATA")]
    pub recipes: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search recipes by free text and tags
    Search(SearchArgs),
    /// Autocomplete suggestions for a partial query
    Suggest(SuggestArgs),
    /// Show one recipe
    Show(ShowArgs),
    /// List ingredient, appliance and utensil options for the current results
    Tags(TagsArgs),
    /// Print the comparison form of a string
    Normalize(NormalizeArgs),
    /// Answer JSON requests on stdin, one per line (default when no command is given)
    Serve,
    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Active tags, one flag per tag
#[derive(Args, Clone, Debug, Default)]
pub struct TagArgs {
    /// Ingredient tag (repeatable)
    #[arg(short = 'i', long = "ingredient")]
    pub ingredients: Vec<String>,

    /// Appliance tag (repeatable)
    #[arg(short = 'a', long = "appliance")]
    pub appliances: Vec<String>,

    /// Ustensil tag (repeatable)
    #[arg(short = 'u', long = "ustensil")]
    pub ustensils: Vec<String>,
}

impl TagArgs {
    /// Build a filter set, rejecting tags no recipe carries
    pub fn to_filters(&self, index: &RecipeIndex) -> Result<ActiveFilterSet, AppError> {
        let mut filters = ActiveFilterSet::new();
        let groups = [
            (TagKind::Ingredient, &self.ingredients),
            (TagKind::Appliance, &self.appliances),
            (TagKind::Ustensil, &self.ustensils),
        ];
        for (kind, values) in groups {
            for value in values {
                filters.insert_checked(index, kind, value)?;
            }
        }
        Ok(filters)
    }
}

#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// Search text (case- and accent-insensitive)
    #[arg(short = 'q', long, default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub tags: TagArgs,

    /// Print matching recipe ids as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone, Debug)]
pub struct SuggestArgs {
    /// Partial query
    pub query: String,

    #[command(flatten)]
    pub tags: TagArgs,
}

#[derive(Args, Clone, Debug)]
pub struct ShowArgs {
    /// Recipe id
    pub id: u32,
}

#[derive(Args, Clone, Debug)]
pub struct TagsArgs {
    /// Search text narrowing the results the options come from
    #[arg(short = 'q', long, default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub tags: TagArgs,

    /// Only list one kind (ingredient, appliance, ustensil)
    #[arg(short = 'k', long)]
    pub kind: Option<TagKind>,

    /// Text typed into the dropdown search box
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct NormalizeArgs {
    pub text: String,
}

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    /// Print the configuration in effect
    #[arg(long)]
    pub show: bool,

    /// Write a default configuration file if none exists
    #[arg(long)]
    pub init: bool,
}
