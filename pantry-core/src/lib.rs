pub mod catalog;
pub mod error;
pub mod generate;
pub mod llm;
pub mod matcher;
pub mod preferences;
pub mod prompts;
pub mod ranker;
pub mod scaler;
pub mod search;
pub mod types;

pub use catalog::{Catalog, BROWSE_LIMIT};
pub use error::{CatalogError, PreferenceError, SearchError};
pub use generate::{parse_generated_recipes, RecipeGenerator};
pub use matcher::{match_recipes, SearchOutcome};
pub use preferences::{PreferenceStore, UserPreferences, MAX_RATING, MIN_RATING};
pub use ranker::{rank_suggestions, SUGGESTION_LIMIT};
pub use scaler::{scale_ingredient, scale_recipe, DEFAULT_BASE_SERVINGS};
pub use search::{search, RecipeSource, SearchResults};
pub use types::{Nutrition, Recipe, SearchFilters, SearchRequest};
