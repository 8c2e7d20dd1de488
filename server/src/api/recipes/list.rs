use super::get::RecipeResponse;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "First 20 recipes in the catalog", body = Vec<RecipeResponse>)
    )
)]
pub async fn list_recipes(State(state): State<AppState>) -> impl IntoResponse {
    let recipes: Vec<RecipeResponse> = state.catalog.browse().iter().map(Into::into).collect();
    Json(recipes)
}
