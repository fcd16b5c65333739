//! Chat completion provider client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatModel, ChatOutcome};
use crate::{Error, Result};

/// Fixed assistant persona sent as the system message
const SYSTEM_PROMPT: &str = "You are Saathi, a helpful voice assistant for delivery drivers. \
    Answer simply and briefly, in one or two short sentences a driver can listen to on the road. \
    When the driver speaks Hindi, reply in simple everyday Hinglish.";

/// Produces replies via the OpenAI chat completions API
pub struct ChatCompletion {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl ChatCompletion {
    /// Create a new chat completion client
    ///
    /// # Errors
    ///
    /// Returns error if API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenAI API key required for chat completions".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl ChatModel for ChatCompletion {
    async fn complete(&self, transcript: &str, language: &str) -> Result<ChatOutcome> {
        tracing::debug!(transcript, language, "starting chat completion");

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user",
                    content: transcript.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "chat request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "chat API error");
            return Err(Error::Chat(format!("chat API error {status}: {body}")));
        }

        let result: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse chat response");
            e
        })?;

        let text = result
            .choices
            .first()
            .and_then(|c| c.message.content.clone());

        tracing::info!(reply = text.as_deref().unwrap_or("<empty>"), "completion done");
        Ok(ChatOutcome {
            text,
            followup_action: None,
        })
    }

    fn name(&self) -> &'static str {
        "openai-chat"
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
