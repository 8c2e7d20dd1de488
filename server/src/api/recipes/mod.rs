pub mod favorite;
pub mod get;
pub mod list;
pub mod preferences;
pub mod rate;
pub mod search;
pub mod suggestions;

use crate::api::ErrorResponse;
use crate::AppState;
use axum::http::{HeaderName, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use pantry_core::PreferenceError;
use utoipa::OpenApi;

/// Response header naming where search results came from: `local` or `generated`.
pub const RECIPE_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-recipe-source");

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes))
        .route("/search", post(search::search_recipes))
        .route("/rate/{id}", post(rate::rate_recipe))
        .route("/favorite/{id}", post(favorite::favorite_recipe))
        .route("/suggestions", get(suggestions::get_suggestions))
        .route("/preferences", get(preferences::get_preferences))
        .route("/{id}", get(get::get_recipe))
}

/// Map a store failure onto an HTTP error.
fn preference_error_response(err: PreferenceError) -> Response {
    match err {
        PreferenceError::InvalidRequest(msg) => {
            ErrorResponse::respond(StatusCode::BAD_REQUEST, msg)
        }
        other => {
            tracing::error!(error = %other, "Failed to save preferences");
            ErrorResponse::respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save preferences",
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        search::search_recipes,
        rate::rate_recipe,
        favorite::favorite_recipe,
        suggestions::get_suggestions,
        preferences::get_preferences,
        get::get_recipe,
    ),
    components(schemas(
        get::RecipeResponse,
        get::NutritionResponse,
        search::SearchRecipesRequest,
        search::SearchFiltersRequest,
        rate::RateRecipeRequest,
        rate::RateRecipeResponse,
        favorite::FavoriteRecipeRequest,
        favorite::FavoriteRecipeResponse,
        preferences::PreferencesResponse,
    ))
)]
pub struct ApiDoc;
