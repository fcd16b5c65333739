//! Error types for the Saathi gateway

use thiserror::Error;

/// Result type alias for Saathi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Saathi gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid or missing client input (maps to HTTP 400)
    #[error("input error: {0}")]
    Input(String),

    /// Speech-to-text provider failure
    #[error("STT error: {0}")]
    Stt(String),

    /// Chat completion provider failure
    #[error("chat error: {0}")]
    Chat(String),

    /// Text-to-speech provider failure
    #[error("TTS error: {0}")]
    Tts(String),

    /// Local audio device error
    #[error("audio error: {0}")]
    Audio(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
