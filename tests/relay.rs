//! Relay pipeline integration tests
//!
//! Exercises the transcribe → complete → synthesize chain directly with
//! fake providers, no HTTP layer involved.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use saathi_gateway::providers::{MockChat, MockTranscriber};
use saathi_gateway::{Error, VoiceRelay, FALLBACK_REPLY};

mod common;
use common::{EchoChat, EchoTranscriber, FailingTranscriber, FixedSynth, SilentChat};

#[tokio::test]
async fn transcript_flows_into_chat_completion() {
    let public = tempfile::TempDir::new().unwrap();
    let relay = VoiceRelay::new(
        Arc::new(EchoTranscriber::default()),
        Arc::new(EchoChat::default()),
        None,
        public.path().to_path_buf(),
    );

    let reply = relay
        .handle_query(b"diesel ka kharcha", Some("D1"), "hi-IN")
        .await
        .unwrap();

    assert_eq!(reply.speech_text, "heard: diesel ka kharcha");
    assert_eq!(reply.visual, reply.speech_text);
    assert!(reply.followup_action.is_none());
    assert!(reply.audio_url.is_none());
}

#[tokio::test]
async fn empty_completion_substitutes_fallback_literal() {
    let public = tempfile::TempDir::new().unwrap();
    let relay = VoiceRelay::new(
        Arc::new(EchoTranscriber::default()),
        Arc::new(SilentChat),
        None,
        public.path().to_path_buf(),
    );

    let reply = relay.handle_query(b"hello", None, "en").await.unwrap();
    assert_eq!(reply.speech_text, FALLBACK_REPLY);
}

#[tokio::test]
async fn stt_failure_stops_the_pipeline() {
    let public = tempfile::TempDir::new().unwrap();
    let chat = Arc::new(EchoChat::default());
    let chat_calls = Arc::clone(&chat.calls);

    let relay = VoiceRelay::new(
        Arc::new(FailingTranscriber),
        chat,
        Some(Arc::new(FixedSynth(b"unused".to_vec()))),
        public.path().to_path_buf(),
    );

    let err = relay.handle_query(b"anything", None, "hi-IN").await.unwrap_err();
    assert!(matches!(err, Error::Stt(_)));

    // Later stages never ran
    assert_eq!(chat_calls.load(Ordering::SeqCst), 0);
    assert_eq!(std::fs::read_dir(public.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn each_reply_gets_its_own_audio_file() {
    let public = tempfile::TempDir::new().unwrap();
    let relay = VoiceRelay::new(
        Arc::new(EchoTranscriber::default()),
        Arc::new(EchoChat::default()),
        Some(Arc::new(FixedSynth(b"mp3".to_vec()))),
        public.path().to_path_buf(),
    );

    let first = relay.handle_query(b"one", None, "hi-IN").await.unwrap();
    let second = relay.handle_query(b"two", None, "hi-IN").await.unwrap();

    let first_url = first.audio_url.unwrap();
    let second_url = second.audio_url.unwrap();
    assert_ne!(first_url, second_url);
    assert_eq!(std::fs::read_dir(public.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn mock_providers_answer_in_requested_language() {
    let public = tempfile::TempDir::new().unwrap();
    let relay = VoiceRelay::new(
        Arc::new(MockTranscriber),
        Arc::new(MockChat),
        None,
        public.path().to_path_buf(),
    );

    let hindi = relay.handle_query(b"\0\0", Some("D1"), "hi-IN").await.unwrap();
    assert!(hindi.speech_text.contains("₹1500"));
    assert!(hindi.speech_text.contains("kamaye"));
    assert_eq!(hindi.followup_action.as_deref(), Some("view_penalty"));

    let english = relay.handle_query(b"\0\0", Some("D1"), "en-IN").await.unwrap();
    assert_eq!(
        english.speech_text,
        "Today you earned ₹1500. Net ₹1050 after expenses."
    );
}
