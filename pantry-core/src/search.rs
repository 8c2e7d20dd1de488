//! Search orchestration: local catalog first, generated recipes otherwise.

use serde::Serialize;

use crate::error::SearchError;
use crate::generate::RecipeGenerator;
use crate::matcher::{match_recipes, SearchOutcome};
use crate::types::{Recipe, SearchRequest};

/// Where a set of search results came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
    Local,
    Generated,
}

impl RecipeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeSource::Local => "local",
            RecipeSource::Generated => "generated",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub source: RecipeSource,
    pub recipes: Vec<Recipe>,
}

/// Run a search against `catalog`, falling back to `generator` only when
/// nothing matches locally.
pub async fn search(
    catalog: &[Recipe],
    generator: &RecipeGenerator,
    request: &SearchRequest,
) -> Result<SearchResults, SearchError> {
    match match_recipes(catalog, request)? {
        SearchOutcome::LocalMatches(matches) => Ok(SearchResults {
            source: RecipeSource::Local,
            recipes: matches.into_iter().cloned().collect(),
        }),
        SearchOutcome::FallbackNeeded => {
            let recipes = generator.generate(request).await?;
            Ok(SearchResults {
                source: RecipeSource::Generated,
                recipes,
            })
        }
    }
}
