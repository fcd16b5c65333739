//! Shared test utilities: fake providers and request builders

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use saathi_gateway::api::{ApiServer, ApiState};
use saathi_gateway::providers::{ChatModel, ChatOutcome, SpeechSynthesizer, Transcriber};
use saathi_gateway::{Error, Result, VoiceRelay};

/// Multipart boundary used by the request builders
pub const BOUNDARY: &str = "saathi-test-boundary";

/// Transcriber that echoes the uploaded bytes back as text
#[derive(Default)]
pub struct EchoTranscriber {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Transcriber for EchoTranscriber {
    async fn transcribe(&self, audio: &[u8], _language: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(String::from_utf8_lossy(audio).into_owned())
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

/// Transcriber that always fails like an upstream non-2xx
pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _audio: &[u8], _language: &str) -> Result<String> {
        Err(Error::Stt(
            "Whisper API error 502 Bad Gateway: upstream unavailable".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Chat model that wraps the transcript so tests can see the chaining
#[derive(Default)]
pub struct EchoChat {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ChatModel for EchoChat {
    async fn complete(&self, transcript: &str, _language: &str) -> Result<ChatOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ChatOutcome {
            text: Some(format!("heard: {transcript}")),
            followup_action: None,
        })
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

/// Chat model that returns an empty first choice
pub struct SilentChat;

#[async_trait]
impl ChatModel for SilentChat {
    async fn complete(&self, _transcript: &str, _language: &str) -> Result<ChatOutcome> {
        Ok(ChatOutcome::default())
    }

    fn name(&self) -> &'static str {
        "silent"
    }
}

/// Synthesizer that returns fixed bytes
pub struct FixedSynth(pub Vec<u8>);

#[async_trait]
impl SpeechSynthesizer for FixedSynth {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Build a router over a relay with the given fake providers
pub fn test_router(
    transcriber: Arc<dyn Transcriber>,
    chat: Arc<dyn ChatModel>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    public_dir: &Path,
) -> axum::Router {
    let relay = VoiceRelay::new(transcriber, chat, synthesizer, public_dir.to_path_buf());
    let state = Arc::new(ApiState {
        relay,
        default_language: "hi-IN".to_string(),
    });
    ApiServer::router(state, public_dir)
}

/// Build a multipart `POST /api/voice/query` request
pub fn query_request(
    audio: Option<&[u8]>,
    driver_id: Option<&str>,
    language: Option<&str>,
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    if let Some(audio) = audio {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"voice.wav\"\r\nContent-Type: audio/wav\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(audio);
        body.extend_from_slice(b"\r\n");
    }

    for (name, value) in [("driverId", driver_id), ("language", language)] {
        if let Some(value) = value {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                     name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/voice/query")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("failed to build query request")
}

/// Collect a response body as JSON
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}
