//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests and local demos to run without network access or API costs.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// A fake LLM provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered substring.
/// If no match is found, returns a default response or error.
#[derive(Debug, Default)]
pub struct FakeProvider {
    /// Prompt substring -> response, checked in insertion order.
    responses: RwLock<Vec<(String, String)>>,
    /// Default response if no match found
    default_response: Option<String>,
    /// Artificial latency before answering.
    delay: Option<Duration>,
    calls: AtomicUsize,
}

const SAMPLE_RECIPES: &str = r#"[
  {
    "name": "Pantry Fried Rice",
    "image": "",
    "ingredients": ["2 cups cooked rice", "1 tbsp oil", "1 pinch salt"],
    "instructions": ["Heat the oil in a pan.", "Fry the rice until crisp.", "Season and serve."],
    "nutrition": {"calories": 380, "protein": "7g", "carbs": "70g"},
    "difficulty": "Easy",
    "time": 15,
    "dietary": ["Vegetarian", "Vegan"]
  }
]"#;

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((prompt_contains.to_string(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Wait this long before answering, to exercise timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// A provider that answers every prompt with one valid generated recipe.
    pub fn with_sample_recipes() -> Self {
        Self::new().with_default_response(SAMPLE_RECIPES)
    }

    /// Number of prompts this provider has been asked to complete.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let matched = {
            let responses = self
                .responses
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            // Find first matching pattern (case-insensitive)
            let prompt_lower = prompt.to_lowercase();
            responses
                .iter()
                .find(|(pattern, _)| prompt_lower.contains(&pattern.to_lowercase()))
                .map(|(_, response)| response.clone())
        };

        if let Some(response) = matched {
            return Ok(response);
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
