//! Ingredient quantity scaling.
//!
//! Rescales the leading amount of an ingredient line ("1/2 cup sugar") to a
//! different number of servings. Only plain amounts are understood: integers,
//! decimals, `a/b` fractions and mixed numbers like "1 1/2". Anything else
//! leaves the line untouched.

use crate::types::Recipe;

/// Servings the catalog recipes are written for.
pub const DEFAULT_BASE_SERVINGS: f64 = 2.0;

/// Rescale the leading amount of `line` from `base_servings` to
/// `target_servings`.
///
/// The amount is rounded to two decimals with trailing zeros removed, and the
/// rest of the line is kept verbatim. Lines without a leading amount, malformed
/// amounts and nonsensical serving counts all return the input unchanged.
pub fn scale_ingredient(line: &str, target_servings: f64, base_servings: f64) -> String {
    if !target_servings.is_finite()
        || !base_servings.is_finite()
        || base_servings <= 0.0
        || target_servings < 0.0
        || target_servings == base_servings
    {
        return line.to_string();
    }

    let Some((amount, rest)) = split_leading_amount(line) else {
        return line.to_string();
    };

    match format_amount(amount * target_servings / base_servings) {
        Some(formatted) => format!("{}{}", formatted, rest),
        None => line.to_string(),
    }
}

/// Copy of `recipe` with every ingredient line scaled.
pub fn scale_recipe(recipe: &Recipe, target_servings: f64, base_servings: f64) -> Recipe {
    Recipe {
        ingredients: recipe
            .ingredients
            .iter()
            .map(|line| scale_ingredient(line, target_servings, base_servings))
            .collect(),
        ..recipe.clone()
    }
}

/// Split `line` into its numeric amount and the untouched remainder.
fn split_leading_amount(line: &str) -> Option<(f64, &str)> {
    let token_len = line
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '/'))
        .unwrap_or(line.len());
    if token_len == 0 {
        return None;
    }

    let (token, rest) = line.split_at(token_len);
    let amount = parse_amount(token)?;

    // "1 1/2 cups" is one amount, not 1 followed by text.
    if is_whole_number(token) {
        if let Some((fraction, after)) = split_mixed_fraction(rest) {
            return Some((amount + fraction, after));
        }
    }

    Some((amount, rest))
}

fn split_mixed_fraction(rest: &str) -> Option<(f64, &str)> {
    let after_space = rest.strip_prefix(' ')?;
    let len = after_space
        .find(|c: char| !(c.is_ascii_digit() || c == '/'))
        .unwrap_or(after_space.len());
    let (token, after) = after_space.split_at(len);

    if !token.contains('/') || !(after.is_empty() || after.starts_with(char::is_whitespace)) {
        return None;
    }

    parse_fraction(token).map(|fraction| (fraction, after))
}

fn parse_amount(token: &str) -> Option<f64> {
    if token.contains('/') {
        parse_fraction(token)
    } else {
        parse_decimal(token)
    }
}

fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    if !is_whole_number(numerator) || !is_whole_number(denominator) {
        return None;
    }

    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }

    Some(numerator / denominator)
}

fn parse_decimal(token: &str) -> Option<f64> {
    if token.matches('.').count() > 1 || !token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().filter(|v: &f64| v.is_finite())
}

fn is_whole_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Two decimals at most, no trailing zeros or dangling point. `None` when
/// the value does not survive rounding as a finite number.
fn format_amount(value: f64) -> Option<String> {
    let rounded = (value * 100.0).round() / 100.0;
    if !rounded.is_finite() {
        return None;
    }
    let formatted = format!("{:.2}", rounded);
    Some(
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
    )
}
