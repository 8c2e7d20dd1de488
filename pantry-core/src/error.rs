use std::path::PathBuf;

use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Recipe generation is not configured: {0}")]
    Configuration(String),

    #[error("Recipe generation failed: {0}")]
    ExternalService(String),
}

impl SearchError {
    /// Message shown to the person who ran the search.
    ///
    /// Both generation failures collapse into a single "could not generate"
    /// message; invalid requests are reported as-is.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::InvalidRequest(msg) => msg.clone(),
            SearchError::Configuration(msg) | SearchError::ExternalService(msg) => {
                format!("Could not generate recipes: {}", msg)
            }
        }
    }
}

impl From<LlmError> for SearchError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured(msg) => SearchError::Configuration(msg),
            other => SearchError::ExternalService(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to access preference file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference file {} is not valid JSON: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate recipe id in catalog: {0}")]
    DuplicateId(String),

    #[error("Catalog contains no recipes")]
    Empty,
}
