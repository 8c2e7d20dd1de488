//! End-to-end search tests over the built-in catalog.
//!
//! These exercise the full path a search request takes: validation, local
//! matching with filters, and the generative fallback using a fake provider.

use std::sync::Arc;
use std::time::Duration;

use pantry_core::llm::FakeProvider;
use pantry_core::{
    rank_suggestions, scale_ingredient, search, Catalog, PreferenceStore, RecipeGenerator,
    RecipeSource, SearchError, SearchFilters, SearchRequest, DEFAULT_BASE_SERVINGS,
};
use tempfile::TempDir;

const GENERATED: &str = r#"```json
[
  {
    "name": "Durian Sticky Rice",
    "ingredients": ["1 durian", "1 cup sticky rice", "1/2 cup coconut milk"],
    "instructions": ["Steam the rice.", "Top with durian and coconut milk."],
    "nutrition": {"calories": 520, "protein": "8g", "carbs": "95g"},
    "difficulty": "Medium",
    "time": 40,
    "dietary": ["Vegan"]
  }
]
```"#;

fn request(ingredients: &[&str]) -> SearchRequest {
    SearchRequest::new(ingredients.iter().map(|s| s.to_string()).collect())
}

fn fake_generator(provider: Arc<FakeProvider>) -> RecipeGenerator {
    RecipeGenerator::new(provider, Duration::from_secs(5))
}

#[tokio::test]
async fn test_local_matches_do_not_call_generator() {
    let catalog = Catalog::builtin().unwrap();
    let provider = Arc::new(FakeProvider::with_sample_recipes());
    let generator = fake_generator(provider.clone());

    let results = search(catalog.recipes(), &generator, &request(&["egg"]))
        .await
        .unwrap();

    assert_eq!(results.source, RecipeSource::Local);
    assert!(!results.recipes.is_empty());
    assert!(results
        .recipes
        .iter()
        .all(|r| r.ingredients.iter().any(|i| i.to_lowercase().contains("egg"))));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_every_qualifying_recipe_is_returned() {
    let catalog = Catalog::builtin().unwrap();
    let generator = RecipeGenerator::unavailable("not needed");

    let results = search(catalog.recipes(), &generator, &request(&["Garlic"]))
        .await
        .unwrap();

    let expected: Vec<&str> = catalog
        .recipes()
        .iter()
        .filter(|r| r.ingredients.iter().any(|i| i.to_lowercase().contains("garlic")))
        .map(|r| r.id.as_str())
        .collect();
    let actual: Vec<&str> = results.recipes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_filtered_results_satisfy_filters() {
    let catalog = Catalog::builtin().unwrap();
    let generator = RecipeGenerator::unavailable("not needed");
    let req = request(&["egg", "rice", "onion"]).with_filters(SearchFilters {
        difficulty: Some("easy".to_string()),
        max_time: Some(20),
        dietary: vec!["vegetarian".to_string()],
    });

    let results = search(catalog.recipes(), &generator, &req).await.unwrap();
    assert!(!results.recipes.is_empty());
    for recipe in &results.recipes {
        assert!(recipe.difficulty.eq_ignore_ascii_case("easy"));
        assert!(recipe.time <= 20);
        assert!(recipe
            .dietary
            .iter()
            .any(|t| t.eq_ignore_ascii_case("vegetarian")));
    }
}

#[tokio::test]
async fn test_no_match_uses_generated_recipes() {
    let catalog = Catalog::builtin().unwrap();
    let provider = Arc::new(FakeProvider::with_response("durian", GENERATED));
    let generator = fake_generator(provider.clone());

    let results = search(catalog.recipes(), &generator, &request(&["durian"]))
        .await
        .unwrap();

    assert_eq!(results.source, RecipeSource::Generated);
    assert_eq!(results.recipes.len(), 1);
    assert_eq!(results.recipes[0].name, "Durian Sticky Rice");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_filters_excluding_everything_trigger_fallback() {
    let catalog = Catalog::builtin().unwrap();
    let provider = Arc::new(FakeProvider::with_sample_recipes());
    let generator = fake_generator(provider.clone());

    // Beef appears in the catalog, but never in a vegan recipe.
    let req = request(&["beef"]).with_filters(SearchFilters {
        dietary: vec!["Vegan".to_string()],
        ..Default::default()
    });

    let results = search(catalog.recipes(), &generator, &req).await.unwrap();
    assert_eq!(results.source, RecipeSource::Generated);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_no_match_without_credentials_fails_with_configuration_message() {
    let catalog = Catalog::builtin().unwrap();
    let generator = RecipeGenerator::unavailable("ANTHROPIC_API_KEY not set");

    let err = search(catalog.recipes(), &generator, &request(&["durian"]))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Configuration(_)));
    assert_eq!(
        err.user_message(),
        "Could not generate recipes: ANTHROPIC_API_KEY not set"
    );
}

#[tokio::test]
async fn test_empty_ingredients_rejected() {
    let catalog = Catalog::builtin().unwrap();
    let provider = Arc::new(FakeProvider::with_sample_recipes());
    let generator = fake_generator(provider.clone());

    let err = search(catalog.recipes(), &generator, &request(&["", "   "]))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::InvalidRequest(_)));
    assert_eq!(provider.calls(), 0);
}

#[test]
fn test_rating_and_favorites_drive_suggestions() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::builtin().unwrap();
    let last = catalog.recipes().last().unwrap().id.clone();
    let second_last = catalog.recipes()[catalog.len() - 2].id.clone();

    let mut store = PreferenceStore::load(dir.path().join("user_data.json")).unwrap();
    store.set_rating(&second_last, 5).unwrap();
    store.set_favorite(&last, true).unwrap();

    let reloaded = PreferenceStore::load(dir.path().join("user_data.json")).unwrap();
    let ranked = rank_suggestions(catalog.recipes(), reloaded.preferences());

    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0].id, last);
    assert_eq!(ranked[1].id, second_last);
}

#[test]
fn test_rating_out_of_range_leaves_store_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut store = PreferenceStore::load(dir.path().join("user_data.json")).unwrap();

    assert!(store.set_rating("r1", 6).is_err());
    assert!(store.ratings().is_empty());
}

#[test]
fn test_favorite_then_unfavorite_removes_key() {
    let dir = TempDir::new().unwrap();
    let mut store = PreferenceStore::load(dir.path().join("user_data.json")).unwrap();

    store.set_favorite("r1", true).unwrap();
    store.set_favorite("r1", false).unwrap();
    assert!(!store.favorites().contains_key("r1"));
}

#[test]
fn test_scaling_catalog_ingredients() {
    let catalog = Catalog::builtin().unwrap();
    let omelette = catalog.get("classic-omelette").unwrap();

    let scaled: Vec<String> = omelette
        .ingredients
        .iter()
        .map(|line| scale_ingredient(line, 4.0, DEFAULT_BASE_SERVINGS))
        .collect();

    assert_eq!(scaled[0], "6 eggs");
    assert_eq!(scaled[1], "0.5 cup shredded cheddar cheese");
}
