//! Configuration management for the Saathi gateway
//!
//! Everything comes from the process environment; there is no config file.

use std::path::PathBuf;

use crate::{Error, Result};

/// Default HTTP listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Default requested language for transcription and replies
pub const DEFAULT_LANGUAGE: &str = "hi-IN";

/// Saathi gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP API listens on
    pub port: u16,

    /// Directory synthesized audio is written to and served from
    pub public_dir: PathBuf,

    /// Language used when a query carries none
    pub default_language: String,

    /// API keys for external providers
    pub api_keys: ApiKeys,

    /// Voice pipeline configuration
    pub voice: VoiceConfig,

    /// Use canned mock providers instead of external services
    pub mock: bool,
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (Whisper, chat completions, TTS)
    pub openai: Option<String>,

    /// Sarvam API key (Saarika STT)
    pub sarvam: Option<String>,
}

/// Voice pipeline configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// STT backend: "whisper", "sarvam", or "mock"
    pub stt_provider: String,

    /// STT model identifier (e.g. "whisper-1", "saarika:v2")
    pub stt_model: String,

    /// Chat completion model identifier
    pub chat_model: String,

    /// TTS model identifier
    pub tts_model: String,

    /// TTS voice identifier
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f32,

    /// Whether replies are synthesized to audio at all
    pub tts_enabled: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            stt_provider: "whisper".to_string(),
            stt_model: "whisper-1".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            tts_model: "gpt-4o-mini-tts".to_string(),
            tts_voice: "alloy".to_string(),
            tts_speed: 1.0,
            tts_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable fails to parse
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("SAATHI_PORT").or_else(|_| std::env::var("PORT")) {
            Ok(s) => s
                .parse()
                .map_err(|_| Error::Config(format!("invalid port: {s}")))?,
            Err(_) => DEFAULT_PORT,
        };

        let api_keys = ApiKeys {
            openai: std::env::var("OPENAI_API_KEY").ok(),
            sarvam: std::env::var("SARVAM_API_KEY").ok(),
        };

        let defaults = VoiceConfig::default();
        let voice = VoiceConfig {
            stt_provider: std::env::var("SAATHI_STT_PROVIDER")
                .unwrap_or(defaults.stt_provider),
            stt_model: std::env::var("SAATHI_STT_MODEL").unwrap_or(defaults.stt_model),
            chat_model: std::env::var("SAATHI_CHAT_MODEL").unwrap_or(defaults.chat_model),
            tts_model: std::env::var("SAATHI_TTS_MODEL").unwrap_or(defaults.tts_model),
            tts_voice: std::env::var("SAATHI_TTS_VOICE").unwrap_or(defaults.tts_voice),
            tts_speed: match std::env::var("SAATHI_TTS_SPEED") {
                Ok(s) => s
                    .parse()
                    .map_err(|_| Error::Config(format!("invalid TTS speed: {s}")))?,
                Err(_) => defaults.tts_speed,
            },
            tts_enabled: !flag_set("SAATHI_DISABLE_TTS"),
        };

        let mock = flag_set("SAATHI_MOCK") || voice.stt_provider == "mock";

        Ok(Self {
            port,
            public_dir: std::env::var("SAATHI_PUBLIC_DIR")
                .map_or_else(|_| PathBuf::from("public"), PathBuf::from),
            default_language: std::env::var("SAATHI_DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            api_keys,
            voice,
            mock,
        })
    }
}

/// Check a boolean environment flag ("1" or "true")
fn flag_set(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
