//! Per-recipe ratings and favorites, persisted to a single JSON file.
//!
//! The file layout is `{ "ratings": {"<id>": 1-5}, "favorites": {"<id>": true} }`.
//! A missing file means no preferences yet. Every mutation rewrites the whole
//! file through a temporary file and a rename, and only then updates the
//! in-memory copy, so a failed write leaves the store exactly as it was.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PreferenceError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Ratings and favorites keyed by recipe id.
///
/// A rating key exists only if it was explicitly set. Unfavoriting removes
/// the key instead of storing `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub ratings: BTreeMap<String, u8>,
    #[serde(default)]
    pub favorites: BTreeMap<String, bool>,
}

impl UserPreferences {
    pub fn rating(&self, id: &str) -> Option<u8> {
        self.ratings.get(id).copied()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.get(id).copied().unwrap_or(false)
    }
}

/// The file as read from disk. Values are loose so that a hand-edited entry
/// like a rating of 300 is dropped instead of failing the whole load.
#[derive(Debug, Default, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    ratings: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    favorites: BTreeMap<String, serde_json::Value>,
}

impl From<StoredPreferences> for UserPreferences {
    fn from(stored: StoredPreferences) -> Self {
        let total = stored.ratings.len();
        let ratings: BTreeMap<String, u8> = stored
            .ratings
            .into_iter()
            .filter_map(|(id, value)| {
                value
                    .as_i64()
                    .and_then(|r| u8::try_from(r).ok())
                    .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
                    .map(|r| (id, r))
            })
            .collect();
        let dropped = total - ratings.len();
        if dropped > 0 {
            tracing::warn!(dropped, "Ignoring out-of-range ratings in preference file");
        }

        let favorites = stored
            .favorites
            .into_iter()
            .filter(|(_, value)| value.as_bool() == Some(true))
            .map(|(id, _)| (id, true))
            .collect();

        Self { ratings, favorites }
    }
}

/// Owns the preference record and the file it lives in.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: UserPreferences,
}

impl PreferenceStore {
    /// Load preferences from `path`, treating a missing file as empty.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();

        let prefs = match fs::read_to_string(&path) {
            Ok(content) => {
                let stored: StoredPreferences = serde_json::from_str(&content).map_err(
                    |source| PreferenceError::Corrupt {
                        path: path.clone(),
                        source,
                    },
                )?;
                UserPreferences::from(stored)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No preference file yet, starting empty");
                UserPreferences::default()
            }
            Err(source) => return Err(PreferenceError::Io { path, source }),
        };

        tracing::debug!(
            path = %path.display(),
            ratings = prefs.ratings.len(),
            favorites = prefs.favorites.len(),
            "Loaded preferences"
        );

        Ok(Self { path, prefs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.prefs
    }

    pub fn ratings(&self) -> &BTreeMap<String, u8> {
        &self.prefs.ratings
    }

    /// Currently-favorited ids. Every value is `true`.
    pub fn favorites(&self) -> &BTreeMap<String, bool> {
        &self.prefs.favorites
    }

    /// Set the rating for a recipe. Ratings outside 1..=5 are rejected before
    /// anything is written.
    pub fn set_rating(&mut self, id: &str, rating: i64) -> Result<(), PreferenceError> {
        let id = validate_id(id)?;
        let rating = u8::try_from(rating)
            .ok()
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
            .ok_or_else(|| {
                PreferenceError::InvalidRequest(format!(
                    "Rating must be between {} and {}, got {}",
                    MIN_RATING, MAX_RATING, rating
                ))
            })?;

        let mut next = self.prefs.clone();
        next.ratings.insert(id.to_string(), rating);
        self.commit(next)?;

        tracing::info!(recipe_id = id, rating, "Saved rating");
        Ok(())
    }

    /// Mark or unmark a recipe as a favorite.
    pub fn set_favorite(&mut self, id: &str, is_favorite: bool) -> Result<(), PreferenceError> {
        let id = validate_id(id)?;

        let mut next = self.prefs.clone();
        if is_favorite {
            next.favorites.insert(id.to_string(), true);
        } else {
            next.favorites.remove(id);
        }
        self.commit(next)?;

        tracing::info!(recipe_id = id, favorite = is_favorite, "Saved favorite");
        Ok(())
    }

    /// Persist `next`, then make it the live record.
    fn commit(&mut self, next: UserPreferences) -> Result<(), PreferenceError> {
        write_atomically(&self.path, &next).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.prefs = next;
        Ok(())
    }
}

fn validate_id(id: &str) -> Result<&str, PreferenceError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(PreferenceError::InvalidRequest(
            "Recipe id must not be empty".to_string(),
        ));
    }
    Ok(id)
}

fn write_atomically(path: &Path, prefs: &UserPreferences) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let json = serde_json::to_string_pretty(prefs)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
