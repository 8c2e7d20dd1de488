//! "Recommended for you" ordering based on stored preferences.

use crate::preferences::UserPreferences;
use crate::types::Recipe;

/// How many recipes the suggestions list returns.
pub const SUGGESTION_LIMIT: usize = 5;

/// Rank the catalog by (favorite, rating), highest first, and keep the top
/// [`SUGGESTION_LIMIT`].
///
/// Favorites always precede non-favorites regardless of rating. Unrated
/// recipes count as 0. The sort is stable, so equal keys keep catalog order.
pub fn rank_suggestions<'a>(catalog: &'a [Recipe], prefs: &UserPreferences) -> Vec<&'a Recipe> {
    let mut ranked: Vec<(SortKey, &Recipe)> = catalog
        .iter()
        .map(|recipe| (SortKey::for_recipe(recipe, prefs), recipe))
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.cmp(a));

    ranked
        .into_iter()
        .take(SUGGESTION_LIMIT)
        .map(|(_, recipe)| recipe)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    favorite: bool,
    rating: u8,
}

impl SortKey {
    fn for_recipe(recipe: &Recipe, prefs: &UserPreferences) -> Self {
        Self {
            favorite: prefs.is_favorite(&recipe.id),
            rating: prefs.rating(&recipe.id).unwrap_or(0),
        }
    }
}
