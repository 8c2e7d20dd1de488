use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::{scale_recipe, Nutrition, Recipe, DEFAULT_BASE_SERVINGS};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NutritionResponse {
    pub calories: f64,
    pub protein: String,
    pub carbs: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: String,
    pub name: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub nutrition: NutritionResponse,
    /// Easy, Medium or Hard
    pub difficulty: String,
    /// Minutes to make
    pub time: u32,
    pub dietary: Vec<String>,
}

impl From<Nutrition> for NutritionResponse {
    fn from(n: Nutrition) -> Self {
        Self {
            calories: n.calories,
            protein: n.protein,
            carbs: n.carbs,
        }
    }
}

impl From<Recipe> for RecipeResponse {
    fn from(r: Recipe) -> Self {
        Self {
            id: r.id,
            name: r.name,
            image: r.image,
            ingredients: r.ingredients,
            instructions: r.instructions,
            nutrition: r.nutrition.into(),
            difficulty: r.difficulty,
            time: r.time,
            dietary: r.dietary,
        }
    }
}

impl From<&Recipe> for RecipeResponse {
    fn from(r: &Recipe) -> Self {
        r.clone().into()
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ScaleParams {
    /// Servings to scale ingredient amounts to
    pub servings: Option<f64>,
    /// Servings the recipe is written for (default: 2)
    pub base_servings: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID"),
        ScaleParams
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 400, description = "Invalid servings", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<ScaleParams>, QueryRejection>,
) -> impl IntoResponse {
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => {
            return ErrorResponse::respond(StatusCode::BAD_REQUEST, rejection.body_text())
        }
    };

    let Some(recipe) = state.catalog.get(&id) else {
        return ErrorResponse::respond(StatusCode::NOT_FOUND, "Recipe not found");
    };

    let Some(servings) = params.servings else {
        return Json(RecipeResponse::from(recipe)).into_response();
    };

    let base = params.base_servings.unwrap_or(DEFAULT_BASE_SERVINGS);
    if !is_positive(servings) || !is_positive(base) {
        return ErrorResponse::respond(
            StatusCode::BAD_REQUEST,
            "servings and baseServings must be positive numbers",
        );
    }

    Json(RecipeResponse::from(scale_recipe(recipe, servings, base))).into_response()
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
