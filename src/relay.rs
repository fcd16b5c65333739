//! Voice query relay
//!
//! The core pipeline: transcribe the uploaded audio, complete the
//! transcript into a reply, optionally synthesize the reply to an MP3
//! served under `/public`. Strictly sequential, no retries; the first
//! failing stage aborts the request.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::providers::{
    ChatCompletion, ChatModel, MockChat, MockTranscriber, SpeechSynthesizer, SpeechToText,
    TextToSpeech, Transcriber,
};
use crate::{Error, Result};

/// Literal reply used when the chat provider returns an empty choice
pub const FALLBACK_REPLY: &str = "No response";

/// Structured reply returned for voice queries and follow-ups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaathiReply {
    /// Text the client speaks or displays
    pub speech_text: String,

    /// Supplementary visual text
    pub visual: String,

    /// Identifier of a canned next conversational step
    pub followup_action: Option<String>,

    /// Relative URL of synthesized reply audio, when TTS ran
    pub audio_url: Option<String>,
}

/// Relays voice queries through STT, chat completion, and optional TTS
pub struct VoiceRelay {
    transcriber: Arc<dyn Transcriber>,
    chat: Arc<dyn ChatModel>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    public_dir: PathBuf,
}

impl VoiceRelay {
    /// Create a relay from explicit provider handles
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        chat: Arc<dyn ChatModel>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        public_dir: PathBuf,
    ) -> Self {
        Self {
            transcriber,
            chat,
            synthesizer,
            public_dir,
        }
    }

    /// Build provider clients from configuration
    ///
    /// # Errors
    ///
    /// Returns error if a required API key is missing or the STT provider
    /// name is unknown
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.mock {
            tracing::info!("mock mode: serving canned responses, no external calls");
            return Ok(Self::new(
                Arc::new(MockTranscriber),
                Arc::new(MockChat),
                None,
                config.public_dir.clone(),
            ));
        }

        let openai_key = || {
            config
                .api_keys
                .openai
                .clone()
                .ok_or_else(|| Error::Config("OPENAI_API_KEY is not set".to_string()))
        };

        let transcriber: Arc<dyn Transcriber> = match config.voice.stt_provider.as_str() {
            "whisper" => Arc::new(SpeechToText::new_whisper(
                openai_key()?,
                config.voice.stt_model.clone(),
            )?),
            "sarvam" => Arc::new(SpeechToText::new_sarvam(
                config
                    .api_keys
                    .sarvam
                    .clone()
                    .ok_or_else(|| Error::Config("SARVAM_API_KEY is not set".to_string()))?,
                config.voice.stt_model.clone(),
            )?),
            other => {
                return Err(Error::Config(format!("unknown STT provider: {other}")));
            }
        };

        let chat = Arc::new(ChatCompletion::new(
            openai_key()?,
            config.voice.chat_model.clone(),
        )?);

        let synthesizer: Option<Arc<dyn SpeechSynthesizer>> = if config.voice.tts_enabled {
            Some(Arc::new(TextToSpeech::new(
                openai_key()?,
                config.voice.tts_model.clone(),
                config.voice.tts_voice.clone(),
                config.voice.tts_speed,
            )?))
        } else {
            tracing::info!("TTS disabled, clients fall back to displaying reply text");
            None
        };

        Ok(Self::new(transcriber, chat, synthesizer, config.public_dir.clone()))
    }

    /// Run the full query pipeline for one uploaded audio clip
    ///
    /// # Errors
    ///
    /// Returns the first stage failure: `Stt`, `Chat`, `Tts`, or `Io` when
    /// writing the synthesized file fails
    pub async fn handle_query(
        &self,
        audio: &[u8],
        driver_id: Option<&str>,
        language: &str,
    ) -> Result<SaathiReply> {
        tracing::info!(
            driver_id = driver_id.unwrap_or("unknown"),
            language,
            audio_bytes = audio.len(),
            stt = self.transcriber.name(),
            "handling voice query"
        );

        let transcript = self.transcriber.transcribe(audio, language).await?;

        let outcome = self.chat.complete(&transcript, language).await?;
        let speech_text = outcome
            .text
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        let audio_url = match &self.synthesizer {
            Some(synth) => Some(self.write_reply_audio(synth.as_ref(), &speech_text).await?),
            None => None,
        };

        Ok(SaathiReply {
            visual: speech_text.clone(),
            speech_text,
            followup_action: outcome.followup_action,
            audio_url,
        })
    }

    /// Synthesize the reply and persist it under the public directory
    ///
    /// Files are named `tts-<uuid>.mp3` and never garbage-collected.
    async fn write_reply_audio(
        &self,
        synth: &dyn SpeechSynthesizer,
        text: &str,
    ) -> Result<String> {
        let audio = synth.synthesize(text).await?;

        let file_name = format!("tts-{}.mp3", Uuid::new_v4());
        std::fs::create_dir_all(&self.public_dir)?;
        std::fs::write(self.public_dir.join(&file_name), &audio)?;

        tracing::debug!(file_name, audio_bytes = audio.len(), "wrote reply audio");
        Ok(format!("/public/{file_name}"))
    }
}
