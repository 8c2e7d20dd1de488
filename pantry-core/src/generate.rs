//! Generative fallback: asks an LLM for recipes when nothing in the catalog
//! matches.
//!
//! The response must be a JSON array of recipe objects, optionally wrapped in
//! a single markdown code fence. Anything else fails the whole search; a
//! partially valid list is never returned.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::error::SearchError;
use crate::llm::{create_provider, ConfigError, LlmConfig, LlmError, LlmProvider};
use crate::prompts::render_generate_prompt;
use crate::types::{Nutrition, Recipe, SearchRequest};

/// Prefix for ids assigned to generated recipes.
pub const GENERATED_ID_PREFIX: &str = "generated-";

#[derive(Debug)]
enum Backend {
    Ready(Arc<dyn LlmProvider>),
    /// Why generation cannot run, e.g. a missing API key.
    Unavailable(String),
}

/// Generates recipes through an LLM with a bounded wait.
#[derive(Debug)]
pub struct RecipeGenerator {
    backend: Backend,
    timeout: Duration,
}

impl RecipeGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self {
            backend: Backend::Ready(provider),
            timeout,
        }
    }

    /// A generator that fails every request with a configuration error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unavailable(reason.into()),
            timeout: Duration::from_secs(crate::llm::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build from configuration. A provider that cannot be created leaves the
    /// generator unavailable rather than failing start-up.
    pub fn from_config(config: &LlmConfig) -> Self {
        match create_provider(config) {
            Ok(provider) => {
                tracing::info!(
                    provider = provider.provider_name(),
                    model = provider.model_name(),
                    timeout_secs = config.timeout.as_secs(),
                    "Recipe generation enabled"
                );
                Self::new(Arc::from(provider), config.timeout)
            }
            Err(e) => {
                let reason = match e {
                    LlmError::NotConfigured(msg) => msg,
                    other => other.to_string(),
                };
                tracing::warn!(reason = %reason, "Recipe generation unavailable");
                Self::unavailable(reason)
            }
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_config(&LlmConfig::from_env()?))
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    /// Ask the provider for recipes matching `request`.
    ///
    /// Makes exactly one external call, bounded by the configured timeout.
    pub async fn generate(&self, request: &SearchRequest) -> Result<Vec<Recipe>, SearchError> {
        let ingredients = request.validated_ingredients()?;

        let provider = match &self.backend {
            Backend::Ready(provider) => provider,
            Backend::Unavailable(reason) => {
                return Err(SearchError::Configuration(reason.clone()));
            }
        };

        let prompt = render_generate_prompt(
            &ingredients,
            &request.filters,
            request.allow_pantry_staples,
        );

        tracing::info!(
            provider = provider.provider_name(),
            model = provider.model_name(),
            ingredients = ingredients.len(),
            "No local matches, generating recipes"
        );

        let response = tokio::time::timeout(self.timeout, provider.complete(&prompt))
            .await
            .map_err(|_| {
                SearchError::ExternalService(format!(
                    "Request timed out after {} seconds",
                    self.timeout.as_secs_f64()
                ))
            })??;

        let recipes = parse_generated_recipes(&response)?;
        tracing::info!(count = recipes.len(), "Generated recipes");
        Ok(recipes)
    }
}

/// Recipe shape expected from the model. Any `id` it supplies is ignored.
#[derive(Debug, Deserialize)]
struct GeneratedRecipe {
    name: String,
    #[serde(default)]
    image: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    nutrition: Nutrition,
    difficulty: String,
    time: u32,
    #[serde(default)]
    dietary: Vec<String>,
}

impl GeneratedRecipe {
    fn into_recipe(self) -> Result<Recipe, String> {
        if self.name.trim().is_empty() {
            return Err("recipe has no name".to_string());
        }
        if self.ingredients.is_empty() || self.ingredients.iter().any(|i| i.trim().is_empty()) {
            return Err(format!("\"{}\" has missing or blank ingredients", self.name));
        }
        if self.instructions.is_empty() || self.instructions.iter().any(|i| i.trim().is_empty()) {
            return Err(format!("\"{}\" has missing or blank instructions", self.name));
        }
        if self.difficulty.trim().is_empty() {
            return Err(format!("\"{}\" has no difficulty", self.name));
        }

        Ok(Recipe {
            id: format!("{}{}", GENERATED_ID_PREFIX, uuid::Uuid::new_v4().simple()),
            name: self.name,
            image: self.image,
            ingredients: self.ingredients,
            instructions: self.instructions,
            nutrition: self.nutrition,
            difficulty: self.difficulty,
            time: self.time,
            dietary: self.dietary,
        })
    }
}

/// Strictly parse a model response into recipes.
pub fn parse_generated_recipes(response: &str) -> Result<Vec<Recipe>, SearchError> {
    let json = strip_code_fence(response);

    let generated: Vec<GeneratedRecipe> = serde_json::from_str(json).map_err(|e| {
        SearchError::ExternalService(format!(
            "Response was not a JSON array of recipes: {}",
            e
        ))
    })?;

    if generated.is_empty() {
        return Err(SearchError::ExternalService(
            "Response contained no recipes".to_string(),
        ));
    }

    generated
        .into_iter()
        .map(|g| {
            g.into_recipe()
                .map_err(|e| SearchError::ExternalService(format!("Invalid recipe: {}", e)))
        })
        .collect()
}

/// Remove one markdown code fence wrapping the whole response, if present.
///
/// Only a fence that both opens and closes the response is stripped.
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };

    // Drop an info string like "json" after the opening fence, with or
    // without a newline before the payload.
    inner
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;
    use crate::types::SearchFilters;

    const ONE_RECIPE: &str = r#"[{
        "id": "1",
        "name": "Dragonfruit Bowl",
        "ingredients": ["1 dragonfruit", "1/2 cup yogurt"],
        "instructions": ["Slice the fruit.", "Serve over yogurt."],
        "nutrition": {"calories": 210, "protein": "6g", "carbs": "38g"},
        "difficulty": "Easy",
        "time": 5,
        "dietary": ["Vegetarian"]
    }]"#;

    fn request() -> SearchRequest {
        SearchRequest::new(vec!["dragonfruit".to_string()])
    }

    #[test]
    fn test_parse_plain_array() {
        let recipes = parse_generated_recipes(ONE_RECIPE).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Dragonfruit Bowl");
        assert_eq!(recipes[0].time, 5);
    }

    #[test]
    fn test_model_ids_are_replaced() {
        let recipes = parse_generated_recipes(ONE_RECIPE).unwrap();
        assert!(recipes[0].id.starts_with(GENERATED_ID_PREFIX));
        assert_ne!(recipes[0].id, "1");
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{}\n```", ONE_RECIPE);
        assert_eq!(parse_generated_recipes(&fenced).unwrap().len(), 1);

        let bare_fence = format!("  ```\n{}\n```  ", ONE_RECIPE);
        assert_eq!(parse_generated_recipes(&bare_fence).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_single_line_fence() {
        let one_line: String = ONE_RECIPE.lines().map(str::trim).collect();
        let fenced = format!("```json {}```", one_line);
        assert_eq!(parse_generated_recipes(&fenced).unwrap().len(), 1);

        let no_space = format!("```json{}```", one_line);
        assert_eq!(parse_generated_recipes(&no_space).unwrap().len(), 1);
    }

    #[test]
    fn test_unclosed_fence_rejected() {
        let fenced = format!("```json\n{}", ONE_RECIPE);
        assert!(matches!(
            parse_generated_recipes(&fenced),
            Err(SearchError::ExternalService(_))
        ));
    }

    #[test]
    fn test_surrounding_prose_rejected() {
        let chatty = format!("Here are some recipes!\n{}\nEnjoy!", ONE_RECIPE);
        assert!(matches!(
            parse_generated_recipes(&chatty),
            Err(SearchError::ExternalService(_))
        ));
    }

    #[test]
    fn test_non_array_rejected() {
        for bad in ["{}", "not json", "", r#"{"recipes": []}"#] {
            assert!(
                matches!(parse_generated_recipes(bad), Err(SearchError::ExternalService(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_empty_array_rejected() {
        assert!(matches!(
            parse_generated_recipes("[]"),
            Err(SearchError::ExternalService(_))
        ));
    }

    #[test]
    fn test_one_bad_recipe_fails_whole_response() {
        let mixed = r#"[
            {"name": "Good", "ingredients": ["1 egg"], "instructions": ["Boil"],
             "nutrition": {"calories": 70, "protein": "6g", "carbs": "0g"},
             "difficulty": "Easy", "time": 10},
            {"name": "Missing time", "ingredients": ["1 egg"], "instructions": ["Boil"],
             "nutrition": {"calories": 70, "protein": "6g", "carbs": "0g"},
             "difficulty": "Easy"}
        ]"#;
        assert!(parse_generated_recipes(mixed).is_err());

        let blank_name = r#"[{"name": " ", "ingredients": ["1 egg"], "instructions": ["Boil"],
             "nutrition": {"calories": 70, "protein": "6g", "carbs": "0g"},
             "difficulty": "Easy", "time": 10}]"#;
        assert!(parse_generated_recipes(blank_name).is_err());

        let no_ingredients = r#"[{"name": "Air", "ingredients": [], "instructions": ["Breathe"],
             "nutrition": {"calories": 0, "protein": "0g", "carbs": "0g"},
             "difficulty": "Easy", "time": 1}]"#;
        assert!(parse_generated_recipes(no_ingredients).is_err());
    }

    #[tokio::test]
    async fn test_unavailable_generator_is_configuration_error() {
        let generator = RecipeGenerator::unavailable("ANTHROPIC_API_KEY not set");
        assert!(!generator.is_available());

        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_generate_with_fake_provider() {
        let provider = Arc::new(FakeProvider::with_response("dragonfruit", ONE_RECIPE));
        let generator = RecipeGenerator::new(provider.clone(), Duration::from_secs(5));

        let recipes = generator.generate(&request()).await.unwrap();
        assert_eq!(recipes[0].name, "Dragonfruit Bowl");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_filters_reach_the_prompt() {
        let provider = Arc::new(FakeProvider::with_response("at most 20 minutes", ONE_RECIPE));
        let generator = RecipeGenerator::new(provider, Duration::from_secs(5));

        let request = request().with_filters(SearchFilters {
            max_time: Some(20),
            ..Default::default()
        });
        assert!(generator.generate(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_provider_failure_is_external_service_error() {
        let generator = RecipeGenerator::new(Arc::new(FakeProvider::new()), Duration::from_secs(5));
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, SearchError::ExternalService(_)));
    }

    #[tokio::test]
    async fn test_garbled_response_is_external_service_error() {
        let provider = FakeProvider::new().with_default_response("Sorry, I can't help with that.");
        let generator = RecipeGenerator::new(Arc::new(provider), Duration::from_secs(5));
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, SearchError::ExternalService(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out() {
        let provider = FakeProvider::with_sample_recipes().with_delay(Duration::from_secs(60));
        let generator = RecipeGenerator::new(Arc::new(provider), Duration::from_secs(30));

        let err = generator.generate(&request()).await.unwrap_err();
        match err {
            SearchError::ExternalService(msg) => assert!(msg.contains("timed out")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_request_rejected_before_calling_provider() {
        let provider = Arc::new(FakeProvider::with_sample_recipes());
        let generator = RecipeGenerator::new(provider.clone(), Duration::from_secs(5));

        let err = generator
            .generate(&SearchRequest::new(vec![" ".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidRequest(_)));
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_from_config_without_key_is_unavailable() {
        let config = LlmConfig {
            provider: crate::llm::ProviderKind::Claude,
            api_key: None,
            model: "m".to_string(),
            timeout: Duration::from_secs(30),
        };
        assert!(!RecipeGenerator::from_config(&config).is_available());
    }
}
