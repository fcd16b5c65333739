//! External AI provider clients
//!
//! Each pipeline stage sits behind a trait so the relay can be exercised
//! with fakes in tests and with the canned mock providers in demo mode.

mod chat;
mod mock;
mod stt;
mod tts;

pub use chat::ChatCompletion;
pub use mock::{MockChat, MockTranscriber};
pub use stt::SpeechToText;
pub use tts::TextToSpeech;

use async_trait::async_trait;

use crate::Result;

/// Outcome of a chat completion step
#[derive(Debug, Clone, Default)]
pub struct ChatOutcome {
    /// Reply text; `None` when the provider returned an empty choice
    pub text: Option<String>,

    /// Canned next conversational step, if the provider suggests one
    pub followup_action: Option<String>,
}

/// Transcribes uploaded audio to text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio bytes in the requested language
    ///
    /// # Errors
    ///
    /// Returns error if the provider call fails or returns a non-success status
    async fn transcribe(&self, audio: &[u8], language: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Produces an assistant reply from a transcript
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete the transcript into a reply
    ///
    /// # Errors
    ///
    /// Returns error if the provider call fails or returns a non-success status
    async fn complete(&self, transcript: &str, language: &str) -> Result<ChatOutcome>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Synthesizes speech audio from reply text
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize text to audio bytes (MP3)
    ///
    /// # Errors
    ///
    /// Returns error if the provider call fails or returns a non-success status
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
