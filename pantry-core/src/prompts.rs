//! Prompt template for generating recipes from a user's ingredients.

use crate::types::SearchFilters;

/// Render the recipe generation prompt.
///
/// `ingredients` must already be trimmed and non-empty.
pub fn render_generate_prompt(
    ingredients: &[&str],
    filters: &SearchFilters,
    allow_pantry_staples: bool,
) -> String {
    let ingredients_list = ingredients.join(", ");

    let staples = if allow_pantry_staples {
        "You may also assume common pantry staples (salt, pepper, cooking oil, water)."
    } else {
        "Do not use any ingredients beyond the ones listed."
    };

    let mut constraints = Vec::new();
    if let Some(difficulty) = filters.difficulty() {
        constraints.push(format!("- Difficulty must be \"{}\"", difficulty));
    }
    if let Some(max_time) = filters.max_time {
        constraints.push(format!("- Total time must be at most {} minutes", max_time));
    }
    let dietary: Vec<&str> = filters.dietary_tags().collect();
    if !dietary.is_empty() {
        constraints.push(format!(
            "- Every recipe must be: {} (list these in \"dietary\")",
            dietary.join(", ")
        ));
    }
    let constraints = if constraints.is_empty() {
        String::new()
    } else {
        format!("\nConstraints:\n{}\n", constraints.join("\n"))
    };

    format!(
        r#"You are a recipe assistant. Suggest up to 3 recipes that can be made mainly with these ingredients: {ingredients_list}.
{staples}
{constraints}
Each ingredient line should start with its quantity for 2 servings (e.g. "2 cups flour", "1/2 tsp salt").

Respond with ONLY a JSON array, no other text. Each element must have exactly this shape:
[
  {{
    "name": "Recipe name",
    "image": "",
    "ingredients": ["2 eggs", "1/2 cup milk"],
    "instructions": ["Step one.", "Step two."],
    "nutrition": {{"calories": 350, "protein": "20g", "carbs": "10g"}},
    "difficulty": "Easy",
    "time": 15,
    "dietary": ["Vegetarian"]
  }}
]"#
    )
}
