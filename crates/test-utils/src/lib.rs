//! Shared test doubles for the classmark pipeline.

use async_trait::async_trait;
use classmark::errors::ProviderError;
use classmark::providers::ai::AiProvider;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// A scriptable [`AiProvider`] for tests.
///
/// Responses are keyed by a unique substring of the system prompt, so one
/// mock can serve both the classification and metadata tasks. Every call is
/// recorded for assertion.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific task.
    /// The key should be a unique substring of the system prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded (system, user) prompt pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(ProviderError::AiApi(format!(
            "MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'"
        )))
    }
}

// --- Flaky AI Provider ---

/// A provider that fails a fixed number of times before succeeding, for
/// exercising the bounded retry path.
#[derive(Clone, Debug)]
pub struct FlakyAiProvider {
    failures_before_success: u32,
    response: String,
    attempts: Arc<Mutex<u32>>,
}

impl FlakyAiProvider {
    pub fn new(failures_before_success: u32, response: &str) -> Self {
        Self {
            failures_before_success,
            response: response.to_string(),
            attempts: Arc::new(Mutex::new(0)),
        }
    }

    /// How many times `generate` has been called.
    pub fn attempts(&self) -> u32 {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl AiProvider for FlakyAiProvider {
    async fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, ProviderError> {
        let mut attempts = self.attempts.lock().unwrap();
        *attempts += 1;
        if *attempts <= self.failures_before_success {
            return Err(ProviderError::AiApi(format!(
                "FlakyAiProvider: simulated failure on attempt {attempts}"
            )));
        }
        Ok(self.response.clone())
    }
}
