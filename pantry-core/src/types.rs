//! Recipe and search request types shared by the core and its callers.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Nutrition summary attached to every recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: String,
    pub carbs: String,
}

/// A recipe from the catalog or from the generative fallback. Never mutated
/// once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub nutrition: Nutrition,
    /// Usually "Easy", "Medium" or "Hard", but free text in practice.
    pub difficulty: String,
    /// Minutes to make.
    pub time: u32,
    #[serde(default)]
    pub dietary: Vec<String>,
}

/// Optional constraints applied after ingredient matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub max_time: Option<u32>,
    #[serde(default)]
    pub dietary: Vec<String>,
}

impl SearchFilters {
    /// Difficulty constraint, ignoring blank values.
    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Dietary tags that actually constrain the search.
    pub fn dietary_tags(&self) -> impl Iterator<Item = &str> {
        self.dietary.iter().map(|t| t.trim()).filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.difficulty().is_none()
            && self.max_time.is_none()
            && self.dietary_tags().next().is_none()
    }

    fn validate(&self) -> Result<(), SearchError> {
        if self.max_time == Some(0) {
            return Err(SearchError::InvalidRequest(
                "maxTime must be a positive number of minutes".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_allow_pantry_staples() -> bool {
    true
}

/// What the user has on hand, plus optional filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub filters: SearchFilters,
    /// Lets generated recipes assume salt, pepper, oil and water.
    #[serde(default = "default_allow_pantry_staples")]
    pub allow_pantry_staples: bool,
}

impl SearchRequest {
    pub fn new(ingredients: Vec<String>) -> Self {
        Self {
            ingredients,
            filters: SearchFilters::default(),
            allow_pantry_staples: true,
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Trimmed, non-blank ingredients in request order.
    ///
    /// Fails with `InvalidRequest` when nothing is left after trimming, or
    /// when the filters are out of range.
    pub fn validated_ingredients(&self) -> Result<Vec<&str>, SearchError> {
        self.filters.validate()?;

        let ingredients: Vec<&str> = self
            .ingredients
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .collect();

        if ingredients.is_empty() {
            return Err(SearchError::InvalidRequest(
                "Please provide at least one ingredient".to_string(),
            ));
        }

        Ok(ingredients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_client_json() {
        let json = r#"{
            "ingredients": ["eggs", " cheese "],
            "filters": {"difficulty": "Easy", "maxTime": 30, "dietary": ["Vegetarian"]}
        }"#;
        let request: SearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.filters.max_time, Some(30));
        assert_eq!(request.filters.difficulty(), Some("Easy"));
        assert!(request.allow_pantry_staples);
        assert_eq!(request.validated_ingredients().unwrap(), vec!["eggs", "cheese"]);
    }

    #[test]
    fn test_filters_are_optional() {
        let request: SearchRequest = serde_json::from_str(r#"{"ingredients": ["rice"]}"#).unwrap();
        assert!(request.filters.is_empty());
    }

    #[test]
    fn test_blank_ingredients_rejected() {
        let request = SearchRequest::new(vec!["  ".to_string(), String::new()]);
        assert!(matches!(
            request.validated_ingredients(),
            Err(SearchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_zero_max_time_rejected() {
        let request = SearchRequest::new(vec!["egg".to_string()]).with_filters(SearchFilters {
            max_time: Some(0),
            ..Default::default()
        });
        assert!(matches!(
            request.validated_ingredients(),
            Err(SearchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_blank_difficulty_is_no_constraint() {
        let filters = SearchFilters {
            difficulty: Some("  ".to_string()),
            dietary: vec![" ".to_string()],
            ..Default::default()
        };
        assert!(filters.is_empty());
    }

    #[test]
    fn test_recipe_accepts_mongo_style_id() {
        let json = r#"{
            "_id": "r1", "name": "Omelette", "ingredients": ["2 eggs"],
            "instructions": ["Whisk", "Cook"],
            "nutrition": {"calories": 200, "protein": "12g", "carbs": "1g"},
            "difficulty": "Easy", "time": 10
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, "r1");
        assert!(recipe.dietary.is_empty());
        assert_eq!(recipe.image, "");
    }
}
