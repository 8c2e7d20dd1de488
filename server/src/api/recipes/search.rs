use super::get::RecipeResponse;
use super::RECIPE_SOURCE_HEADER;
use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::{search, SearchError, SearchFilters, SearchRequest};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFiltersRequest {
    /// Easy, Medium or Hard (case-insensitive)
    pub difficulty: Option<String>,
    /// Maximum minutes to make
    pub max_time: Option<u32>,
    /// Every tag must be present on a recipe
    #[serde(default)]
    pub dietary: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecipesRequest {
    /// Ingredients the user has
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub filters: Option<SearchFiltersRequest>,
    /// Let generated recipes assume salt, pepper, oil and water (default: true)
    pub allow_pantry_staples: Option<bool>,
}

impl From<SearchRecipesRequest> for SearchRequest {
    fn from(body: SearchRecipesRequest) -> Self {
        let filters = body.filters.unwrap_or_default();
        let mut request = SearchRequest::new(body.ingredients).with_filters(SearchFilters {
            difficulty: filters.difficulty,
            max_time: filters.max_time,
            dietary: filters.dietary,
        });
        if let Some(allow) = body.allow_pantry_staples {
            request.allow_pantry_staples = allow;
        }
        request
    }
}

/// Search the catalog by ingredients, generating recipes when nothing matches.
#[utoipa::path(
    post,
    path = "/api/recipes/search",
    tag = "recipes",
    request_body = SearchRecipesRequest,
    responses(
        (status = 200, description = "Matching recipes", body = Vec<RecipeResponse>,
            headers(("x-recipe-source" = String, description = "local or generated"))),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Recipe generation failed", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    payload: Result<Json<SearchRecipesRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return ErrorResponse::respond(StatusCode::BAD_REQUEST, rejection.body_text())
        }
    };

    let request = SearchRequest::from(body);

    match search(state.catalog.recipes(), &state.generator, &request).await {
        Ok(results) => {
            let recipes: Vec<RecipeResponse> =
                results.recipes.into_iter().map(RecipeResponse::from).collect();
            (
                [(RECIPE_SOURCE_HEADER, results.source.as_str())],
                Json(recipes),
            )
                .into_response()
        }
        Err(SearchError::InvalidRequest(msg)) => {
            ErrorResponse::respond(StatusCode::BAD_REQUEST, msg)
        }
        Err(e) => {
            tracing::error!(error = %e, "Search failed");
            ErrorResponse::respond(StatusCode::INTERNAL_SERVER_ERROR, e.user_message())
        }
    }
}
