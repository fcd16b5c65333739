//! Local audio for the CLI client
//!
//! Microphone capture and speaker playback. Transcription and synthesis
//! happen on the gateway; this module only moves samples.

mod capture;
mod playback;

pub use capture::{AudioCapture, SAMPLE_RATE, samples_to_wav};
pub use playback::AudioPlayback;
