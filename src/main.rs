//! recipe-search CLI & stdio server
//!
//! Dual-mode application:
//! - CLI Mode: one-shot search, suggest, show, tags and normalize commands
//! - Server Mode (default with no command): JSON requests on stdin, responses on stdout

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{debug, info};

use recipe_search::cli::{self, Cli, Commands};
use recipe_search::config::{self, Config};
use recipe_search::error::AppError;
use recipe_search::format::{format_suggestions, format_tag_options, MarkdownView};
use recipe_search::protocol;
use recipe_search::recipes::RecipeIndex;
use recipe_search::search::{tag_options, AutocompleteEngine, SearchEngine, SearchMode};
use recipe_search::text::normalize;

#[tokio::main]
async fn main() {
    // Usage errors exit with 1, help and version with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            if let Err(io) = e.print() {
                eprintln!("Error: {}", io);
            }
            std::process::exit(code);
        }
    };

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match run(cli).await {
        Ok(Some(output)) => print!("{}", output),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> Result<Option<String>> {
    let config = config::load_config()?;
    let command = cli.command.unwrap_or(Commands::Serve);

    if let Commands::Config(args) = &command {
        return execute_config(args, &config).map(Some);
    }

    let index = load_index(cli.recipes.as_deref(), &config)?;
    dispatch(command, &index, &config).await
}

async fn dispatch(command: Commands, index: &RecipeIndex, config: &Config) -> Result<Option<String>> {
    let output = match command {
        Commands::Search(args) => execute_search(args, index, config)?,
        Commands::Suggest(args) => execute_suggest(args, index, config)?,
        Commands::Show(args) => index.get_by_id(args.id)?.to_markdown(""),
        Commands::Tags(args) => execute_tags(args, index, config)?,
        Commands::Normalize(args) => format!("{}\n", normalize(&args.text)),
        Commands::Config(args) => execute_config(&args, config)?,
        Commands::Serve => {
            info!("Starting recipe-search server");
            protocol::handle_stdio(index, config).await?;
            return Ok(None);
        }
    };

    Ok(Some(output))
}

/// Command line path, then configured path, then the bundled dataset
fn load_index(cli_path: Option<&Path>, config: &Config) -> Result<RecipeIndex> {
    let index = match cli_path.or(config.recipes_path.as_deref()) {
        Some(path) => RecipeIndex::from_path(path).map_err(AppError::from)?,
        None => RecipeIndex::bundled().map_err(AppError::from)?,
    };
    debug!("Using {} recipes", index.len());
    Ok(index)
}

fn execute_search(args: cli::SearchArgs, index: &RecipeIndex, config: &Config) -> Result<String> {
    let filters = args.tags.to_filters(index)?;
    let engine = SearchEngine::new(index).with_min_query_chars(config.min_query_chars);

    if args.json {
        let ids = engine.search_ids(&args.query, &filters);
        return Ok(format!("{}\n", serde_json::to_string(&ids)?));
    }

    let highlight = match engine.mode(&args.query, &filters) {
        SearchMode::Query | SearchMode::Combined => args.query.as_str(),
        SearchMode::All | SearchMode::Tags => "",
    };
    let mut view = MarkdownView::new(highlight);
    engine.search_and_render(&args.query, &filters, &mut view);
    info!("{} of {} recipes match", view.count, index.len());

    Ok(view.output)
}

fn execute_suggest(args: cli::SuggestArgs, index: &RecipeIndex, config: &Config) -> Result<String> {
    let filters = args.tags.to_filters(index)?;
    let engine = AutocompleteEngine::new(index)
        .with_min_query_chars(config.min_query_chars)
        .with_max_suggestions(config.max_suggestions);

    Ok(format_suggestions(&engine.suggest_with_tags(&args.query, &filters)))
}

fn execute_tags(args: cli::TagsArgs, index: &RecipeIndex, config: &Config) -> Result<String> {
    let filters = args.tags.to_filters(index)?;
    let engine = SearchEngine::new(index).with_min_query_chars(config.min_query_chars);

    let results = engine.search(&args.query, &filters);
    let mut options = tag_options(&results, &filters);
    if let Some(input) = &args.input {
        options = options.narrowed(input);
    }

    Ok(format_tag_options(&options, args.kind))
}

fn execute_config(args: &cli::ConfigArgs, config: &Config) -> Result<String> {
    let path = config::config_path()?;

    if args.init {
        if path.exists() {
            return Ok(format!("Configuration already exists at {}\n", path.display()));
        }
        config::save_config_to(&path, &Config::default())?;
        return Ok(format!("✓ Wrote default configuration to {}\n", path.display()));
    }

    if args.show {
        return Ok(format!(
            "Configuration file: {}\n{}\n",
            path.display(),
            serde_json::to_string_pretty(config)?
        ));
    }

    Ok("Use --show or --init\n".to_string())
}

/// Map errors to exit codes
fn get_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(app) => app.exit_code(),
        None => 5,
    }
}
