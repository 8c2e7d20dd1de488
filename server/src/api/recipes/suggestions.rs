use super::get::RecipeResponse;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use pantry_core::rank_suggestions;

/// Favorites first, then by rating, at most five.
#[utoipa::path(
    get,
    path = "/api/recipes/suggestions",
    tag = "recipes",
    responses(
        (status = 200, description = "Top suggested recipes", body = Vec<RecipeResponse>)
    )
)]
pub async fn get_suggestions(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.preferences.lock().await;
    let ranked = rank_suggestions(state.catalog.recipes(), store.preferences());
    let recipes: Vec<RecipeResponse> = ranked.into_iter().map(Into::into).collect();
    Json(recipes)
}
