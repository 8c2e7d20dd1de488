//! Ingredient matching and filtering against the local catalog.
//!
//! Matching is deliberately loose: a recipe qualifies when any of its
//! ingredient lines contains any user ingredient as a case-insensitive
//! substring ("egg" matches "2 eggs, beaten"). Filters then narrow the set.
//! Results keep catalog order.

use crate::error::SearchError;
use crate::types::{Recipe, SearchFilters, SearchRequest};

/// Result of running the matcher.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// At least one catalog recipe matched, in catalog order.
    LocalMatches(Vec<&'a Recipe>),
    /// Nothing matched locally; the caller should try generating recipes.
    FallbackNeeded,
}

impl<'a> SearchOutcome<'a> {
    fn from_matches(matches: Vec<&'a Recipe>) -> Self {
        if matches.is_empty() {
            SearchOutcome::FallbackNeeded
        } else {
            SearchOutcome::LocalMatches(matches)
        }
    }
}

/// Select catalog recipes matching the request's ingredients and filters.
///
/// Returns `InvalidRequest` when the request has no non-blank ingredients.
/// An empty match set is not an error.
pub fn match_recipes<'a>(
    catalog: &'a [Recipe],
    request: &SearchRequest,
) -> Result<SearchOutcome<'a>, SearchError> {
    let terms: Vec<String> = request
        .validated_ingredients()?
        .into_iter()
        .map(str::to_lowercase)
        .collect();

    let matches: Vec<&Recipe> = catalog
        .iter()
        .filter(|recipe| contains_any_ingredient(recipe, &terms))
        .filter(|recipe| passes_filters(recipe, &request.filters))
        .collect();

    tracing::debug!(
        ingredients = terms.len(),
        filtered = !request.filters.is_empty(),
        matches = matches.len(),
        "Matched recipes against catalog"
    );

    Ok(SearchOutcome::from_matches(matches))
}

/// `terms` must already be lowercase.
fn contains_any_ingredient(recipe: &Recipe, terms: &[String]) -> bool {
    recipe.ingredients.iter().any(|line| {
        let line = line.to_lowercase();
        terms.iter().any(|term| line.contains(term.as_str()))
    })
}

fn passes_filters(recipe: &Recipe, filters: &SearchFilters) -> bool {
    if let Some(difficulty) = filters.difficulty() {
        if recipe.difficulty.trim().to_lowercase() != difficulty.to_lowercase() {
            return false;
        }
    }

    if let Some(max_time) = filters.max_time {
        if recipe.time > max_time {
            return false;
        }
    }

    // Every requested tag must be present on the recipe.
    filters.dietary_tags().all(|wanted| {
        let wanted = wanted.to_lowercase();
        recipe
            .dietary
            .iter()
            .any(|tag| tag.trim().to_lowercase() == wanted)
    })
}
