//! Saathi Gateway - voice relay for delivery-driver assistants
//!
//! A driver records a question, the gateway chains external AI services
//! and returns a structured reply:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              CLI client (`ask`)              │
//! │      mic capture │ upload │ playback         │
//! └────────────────────┬─────────────────────────┘
//!                      │ multipart / JSON
//! ┌────────────────────▼─────────────────────────┐
//! │               Saathi Gateway                 │
//! │   relay │ follow-up dispatch │ /public files │
//! └────────────────────┬─────────────────────────┘
//!                      │
//! ┌────────────────────▼─────────────────────────┐
//! │           External providers                 │
//! │     STT  │  chat completion  │  TTS          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The pipeline is deliberately thin: one strictly sequential
//! transcribe → complete → synthesize chain per request, no retries,
//! no persistence.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod followup;
pub mod providers;
pub mod relay;
pub mod voice;

pub use config::Config;
pub use error::{Error, Result};
pub use relay::{FALLBACK_REPLY, SaathiReply, VoiceRelay};
