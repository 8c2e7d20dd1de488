use super::preference_error_response;
use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FavoriteRecipeRequest {
    pub favorite: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteRecipeResponse {
    pub id: String,
    pub favorite: bool,
}

#[utoipa::path(
    post,
    path = "/api/recipes/favorite/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = FavoriteRecipeRequest,
    responses(
        (status = 200, description = "Favorite saved", body = FavoriteRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Failed to save", body = ErrorResponse)
    )
)]
pub async fn favorite_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FavoriteRecipeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return ErrorResponse::respond(StatusCode::BAD_REQUEST, rejection.body_text())
        }
    };

    let mut store = state.preferences.lock().await;
    let id = id.trim();
    match store.set_favorite(id, body.favorite) {
        Ok(()) => Json(FavoriteRecipeResponse {
            favorite: store.preferences().is_favorite(id),
            id: id.to_string(),
        })
        .into_response(),
        Err(e) => preference_error_response(e),
    }
}
