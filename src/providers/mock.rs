//! Canned mock providers for running without external services
//!
//! Useful for demos and local client development: the gateway answers
//! every query with a fixed earnings summary and a follow-up that leads
//! into the canned penalty conversation.

use async_trait::async_trait;

use super::{ChatModel, ChatOutcome, Transcriber};
use crate::Result;

const MOCK_REPLY_HI: &str =
    "Aaj aapne kul ₹1500 kamaye. Net ₹1050 bacha. Penalty ₹100 lagi.";
const MOCK_REPLY_EN: &str = "Today you earned ₹1500. Net ₹1050 after expenses.";

/// Transcriber that ignores the audio and returns a fixed question
pub struct MockTranscriber;

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &[u8], language: &str) -> Result<String> {
        tracing::debug!(language, "mock transcription");
        Ok("Aaj ki kamaai batao".to_string())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Chat model that returns a canned earnings summary
pub struct MockChat;

#[async_trait]
impl ChatModel for MockChat {
    async fn complete(&self, _transcript: &str, language: &str) -> Result<ChatOutcome> {
        let text = if language.starts_with("hi") {
            MOCK_REPLY_HI
        } else {
            MOCK_REPLY_EN
        };

        Ok(ChatOutcome {
            text: Some(text.to_string()),
            followup_action: Some("view_penalty".to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
