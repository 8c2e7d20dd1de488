mod display;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pantry_core::{
    rank_suggestions, scale_ingredient, scale_recipe, search, Catalog, PreferenceStore,
    RecipeGenerator, Recipe, SearchFilters, SearchRequest, DEFAULT_BASE_SERVINGS,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Find recipes from the ingredients you have", long_about = None)]
struct Cli {
    /// Where ratings and favorites are stored
    #[arg(
        long,
        global = true,
        env = "PANTRY_DATA_FILE",
        default_value = "data/user_data.json"
    )]
    data_file: PathBuf,

    /// Recipe catalog JSON to use instead of the built-in one
    #[arg(long, global = true, env = "PANTRY_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the first 20 recipes in the catalog
    List,
    /// Search recipes by ingredients, generating some if nothing matches
    Search {
        /// Comma-separated ingredients, e.g. "eggs,spinach"
        #[arg(long, short, value_delimiter = ',', required = true)]
        ingredients: Vec<String>,
        /// Easy, Medium or Hard
        #[arg(long)]
        difficulty: Option<String>,
        /// Maximum minutes to make
        #[arg(long)]
        max_time: Option<u32>,
        /// Comma-separated dietary tags; every one must match
        #[arg(long, value_delimiter = ',')]
        dietary: Vec<String>,
        /// Don't let generated recipes assume salt, pepper, oil and water
        #[arg(long)]
        no_pantry_staples: bool,
        /// Scale ingredient amounts to this many servings
        #[arg(long)]
        servings: Option<f64>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one recipe
    Show {
        id: String,
        /// Scale ingredient amounts to this many servings
        #[arg(long)]
        servings: Option<f64>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scale a single ingredient line
    Scale {
        /// Ingredient line, e.g. "1/2 cup milk"
        line: String,
        /// Target servings
        #[arg(long)]
        servings: f64,
        /// Servings the line is written for
        #[arg(long, default_value_t = DEFAULT_BASE_SERVINGS)]
        base: f64,
    },
    /// Show suggested recipes based on favorites and ratings
    Suggest {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rate a recipe from 1 to 5
    Rate { id: String, rating: i64 },
    /// Mark a recipe as a favorite
    Favorite {
        id: String,
        /// Remove the recipe from favorites instead
        #[arg(long)]
        remove: bool,
    },
    /// Show saved ratings and favorites
    Preferences,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::List => {
            let store = load_store(&cli.data_file)?;
            for recipe in catalog.browse() {
                println!("{}", display::summary_line(recipe, Some(store.preferences())));
            }
        }
        Commands::Search {
            ingredients,
            difficulty,
            max_time,
            dietary,
            no_pantry_staples,
            servings,
            json,
        } => {
            let mut request = SearchRequest::new(ingredients).with_filters(SearchFilters {
                difficulty,
                max_time,
                dietary,
            });
            request.allow_pantry_staples = !no_pantry_staples;

            let generator =
                RecipeGenerator::from_env().context("Invalid generator configuration")?;
            let results = search(catalog.recipes(), &generator, &request)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            tracing::debug!(
                source = results.source.as_str(),
                count = results.recipes.len(),
                "Search finished"
            );

            let recipes = match servings {
                Some(servings) => {
                    check_servings(servings)?;
                    results
                        .recipes
                        .iter()
                        .map(|r| scale_recipe(r, servings, DEFAULT_BASE_SERVINGS))
                        .collect()
                }
                None => results.recipes,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&recipes)?);
            } else {
                println!(
                    "{} recipe(s) ({})\n",
                    recipes.len(),
                    results.source.as_str()
                );
                for recipe in &recipes {
                    println!("{}", display::recipe_details(recipe));
                }
            }
        }
        Commands::Show { id, servings, json } => {
            let recipe = find_recipe(&catalog, &id)?;
            let recipe = match servings {
                Some(servings) => {
                    check_servings(servings)?;
                    scale_recipe(recipe, servings, DEFAULT_BASE_SERVINGS)
                }
                None => recipe.clone(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                print!("{}", display::recipe_details(&recipe));
            }
        }
        Commands::Scale {
            line,
            servings,
            base,
        } => {
            check_servings(servings)?;
            check_servings(base)?;
            println!("{}", scale_ingredient(&line, servings, base));
        }
        Commands::Suggest { json } => {
            let store = load_store(&cli.data_file)?;
            let suggestions = rank_suggestions(catalog.recipes(), store.preferences());
            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                for recipe in suggestions {
                    println!("{}", display::summary_line(recipe, Some(store.preferences())));
                }
            }
        }
        Commands::Rate { id, rating } => {
            find_recipe(&catalog, &id)?;
            let mut store = load_store(&cli.data_file)?;
            store.set_rating(&id, rating)?;
            tracing::info!(path = %store.path().display(), "Saved rating");
            println!("Rated {} {}/5", id, rating);
        }
        Commands::Favorite { id, remove } => {
            find_recipe(&catalog, &id)?;
            let mut store = load_store(&cli.data_file)?;
            store.set_favorite(&id, !remove)?;
            tracing::info!(path = %store.path().display(), "Saved favorite");
            if remove {
                println!("Removed {} from favorites", id);
            } else {
                println!("Added {} to favorites", id);
            }
        }
        Commands::Preferences => {
            let store = load_store(&cli.data_file)?;
            println!("{}", serde_json::to_string_pretty(store.preferences())?);
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Catalog::builtin().context("Built-in catalog is invalid"),
    }
}

fn load_store(path: &Path) -> Result<PreferenceStore> {
    PreferenceStore::load(path)
        .with_context(|| format!("Failed to load preferences from {}", path.display()))
}

fn find_recipe<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Recipe> {
    catalog
        .get(id)
        .with_context(|| format!("No recipe with id '{}'", id))
}

fn check_servings(servings: f64) -> Result<()> {
    if !servings.is_finite() || servings <= 0.0 {
        bail!("Servings must be a positive number, got {}", servings);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_arguments() {
        let cli = Cli::try_parse_from([
            "pantry",
            "search",
            "--ingredients",
            "eggs,spinach",
            "--dietary",
            "Vegetarian,Gluten-Free",
            "--max-time",
            "20",
        ])
        .unwrap();
        match cli.command {
            Commands::Search {
                ingredients,
                dietary,
                max_time,
                no_pantry_staples,
                ..
            } => {
                assert_eq!(ingredients, vec!["eggs", "spinach"]);
                assert_eq!(dietary, vec!["Vegetarian", "Gluten-Free"]);
                assert_eq!(max_time, Some(20));
                assert!(!no_pantry_staples);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_global_data_file_after_subcommand() {
        let cli =
            Cli::try_parse_from(["pantry", "suggest", "--data-file", "/tmp/prefs.json"]).unwrap();
        assert_eq!(cli.data_file, PathBuf::from("/tmp/prefs.json"));
    }

    #[test]
    fn test_check_servings() {
        assert!(check_servings(4.0).is_ok());
        assert!(check_servings(0.0).is_err());
        assert!(check_servings(-1.0).is_err());
        assert!(check_servings(f64::NAN).is_err());
    }

    #[test]
    fn test_find_recipe_unknown_id() {
        let catalog = Catalog::builtin().unwrap();
        assert!(find_recipe(&catalog, "classic-omelette").is_ok());
        let err = find_recipe(&catalog, "nope").unwrap_err();
        assert_eq!(err.to_string(), "No recipe with id 'nope'");
    }

    #[test]
    fn test_load_store_reports_path_on_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user_data.json");
        std::fs::write(&path, "not json").unwrap();
        let err = load_store(&path).unwrap_err();
        assert!(err.to_string().contains("user_data.json"));
    }
}
