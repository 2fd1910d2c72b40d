
use serde::{Deserialize, Serialize};

use super::MealPlanRequest;
use crate::config::AdvisorConfig;

const SYSTEM_PROMPT: &str =
    "You are a dietary planner for a college student based on dining hall food options.";

/// Submits a user's meal selection to an OpenAI-compatible chat-completion
/// api and relays the generated plan.
///
/// Built once at startup and shared by every request; the credential is
/// resolved before the server binds.
#[derive(Clone)]
pub struct MealPlanAdvisor {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("completion api returned status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("completion api returned no choices")]
    NoChoices,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl MealPlanAdvisor {
    pub fn new(config: &AdvisorConfig, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    pub async fn suggest(&self, request: &MealPlanRequest) -> Result<String, AdvisorError> {
        let prompt = build_prompt(
            &request.available_food_options,
            &request.selected_food_options,
        );

        let response = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: self.model.clone(),
                messages: vec![
                    ChatMessage { role: "system", content: SYSTEM_PROMPT.into() },
                    ChatMessage { role: "user", content: prompt },
                ],
                max_tokens: self.max_tokens,
            })
            .send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status));
        }

        let completion: ChatResponse = response.json().await?;
        let reply = completion.choices.into_iter().next()
            .ok_or(AdvisorError::NoChoices)?
        .message.content;

        Ok(reply.trim().to_string())
    }
}

fn build_prompt(available: &[String], selected: &[String]) -> String {
    format!(
        "The dining hall offers the following food options: {}. \
         Out of everything available, I picked: {}. \
         Create a balanced meal plan from my picks in at most 100 words. \
         Answer with one line per food in the form \"food : portion\". \
         If my picks are unbalanced, add lines in the form \"replace X with Y\" \
         using only foods from the available options.",
        available.join(", "),
        selected.join(", "),
    )
}
