//! The fixed recipe catalog searched by the matcher and ranker.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::types::Recipe;

/// Number of recipes returned when browsing without a search.
pub const BROWSE_LIMIT: usize = 20;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Immutable, ordered list of recipes loaded once at start-up.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file containing an array of recipes.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            recipes = catalog.len(),
            "Loaded recipe catalog"
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    /// Build a catalog, rejecting empty lists and duplicate ids.
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        if recipes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for recipe in &recipes {
            if !seen.insert(recipe.id.as_str()) {
                return Err(CatalogError::DuplicateId(recipe.id.clone()));
            }
        }

        Ok(Self { recipes })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// The first [`BROWSE_LIMIT`] recipes, in catalog order.
    pub fn browse(&self) -> &[Recipe] {
        &self.recipes[..self.recipes.len().min(BROWSE_LIMIT)]
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
