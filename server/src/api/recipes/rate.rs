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
pub struct RateRecipeRequest {
    /// 1 to 5
    pub rating: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RateRecipeResponse {
    pub id: String,
    pub rating: u8,
}

#[utoipa::path(
    post,
    path = "/api/recipes/rate/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = RateRecipeRequest,
    responses(
        (status = 200, description = "Rating saved", body = RateRecipeResponse),
        (status = 400, description = "Rating out of range", body = ErrorResponse),
        (status = 500, description = "Failed to save", body = ErrorResponse)
    )
)]
pub async fn rate_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RateRecipeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return ErrorResponse::respond(StatusCode::BAD_REQUEST, rejection.body_text())
        }
    };

    let mut store = state.preferences.lock().await;
    if let Err(e) = store.set_rating(&id, body.rating) {
        return preference_error_response(e);
    }

    let id = id.trim();
    match store.preferences().rating(id) {
        Some(rating) => Json(RateRecipeResponse {
            id: id.to_string(),
            rating,
        })
        .into_response(),
        None => ErrorResponse::respond(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Rating was not recorded",
        ),
    }
}
