//! Plain-text rendering of recipes for the terminal.

use pantry_core::{Recipe, UserPreferences};
use std::fmt::Write;

/// One-line summary: name, id, difficulty, time and any saved preferences.
pub fn summary_line(recipe: &Recipe, prefs: Option<&UserPreferences>) -> String {
    let mut line = format!(
        "{} [{}] {}, {} min",
        recipe.name, recipe.id, recipe.difficulty, recipe.time
    );
    if !recipe.dietary.is_empty() {
        let _ = write!(line, " ({})", recipe.dietary.join(", "));
    }
    if let Some(prefs) = prefs {
        if prefs.is_favorite(&recipe.id) {
            line.push_str(" *favorite*");
        }
        if let Some(rating) = prefs.rating(&recipe.id) {
            let _ = write!(line, " rated {}/5", rating);
        }
    }
    line
}

/// Full recipe with numbered steps.
pub fn recipe_details(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.name);
    let _ = writeln!(out, "{}", "=".repeat(recipe.name.chars().count()));
    let _ = writeln!(
        out,
        "{} | {} min | {} kcal, {} protein, {} carbs",
        recipe.difficulty,
        recipe.time,
        recipe.nutrition.calories,
        recipe.nutrition.protein,
        recipe.nutrition.carbs
    );
    if !recipe.dietary.is_empty() {
        let _ = writeln!(out, "{}", recipe.dietary.join(", "));
    }

    out.push_str("\nIngredients:\n");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {}", ingredient);
    }

    out.push_str("\nInstructions:\n");
    for (i, step) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::Nutrition;

    fn recipe() -> Recipe {
        Recipe {
            id: "omelette".to_string(),
            name: "Omelette".to_string(),
            image: String::new(),
            ingredients: vec!["3 eggs".to_string(), "1 pinch salt".to_string()],
            instructions: vec!["Whisk.".to_string(), "Cook.".to_string()],
            nutrition: Nutrition {
                calories: 320.0,
                protein: "20g".to_string(),
                carbs: "2g".to_string(),
            },
            difficulty: "Easy".to_string(),
            time: 10,
            dietary: vec!["Vegetarian".to_string()],
        }
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(&recipe(), None),
            "Omelette [omelette] Easy, 10 min (Vegetarian)"
        );
    }

    #[test]
    fn test_summary_line_with_preferences() {
        let mut prefs = UserPreferences::default();
        prefs.ratings.insert("omelette".to_string(), 4);
        prefs.favorites.insert("omelette".to_string(), true);
        assert_eq!(
            summary_line(&recipe(), Some(&prefs)),
            "Omelette [omelette] Easy, 10 min (Vegetarian) *favorite* rated 4/5"
        );
    }

    #[test]
    fn test_recipe_details() {
        let text = recipe_details(&recipe());
        assert!(text.starts_with("Omelette\n========\n"));
        assert!(text.contains("320 kcal, 20g protein, 2g carbs"));
        assert!(text.contains("  - 3 eggs\n"));
        assert!(text.contains("  2. Cook.\n"));
    }
}
