use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PreferencesResponse {
    /// Recipe ID to rating (1-5)
    pub ratings: BTreeMap<String, u8>,
    /// Favorited recipe IDs, always `true`
    pub favorites: BTreeMap<String, bool>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/preferences",
    tag = "recipes",
    responses(
        (status = 200, description = "Saved ratings and favorites", body = PreferencesResponse)
    )
)]
pub async fn get_preferences(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.preferences.lock().await;
    Json(PreferencesResponse {
        ratings: store.ratings().clone(),
        favorites: store.favorites().clone(),
    })
}
