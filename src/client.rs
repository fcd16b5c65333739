//! CLI voice client
//!
//! The push-to-talk flow: record the microphone until Enter, upload the
//! clip to the gateway, print the reply, play the synthesized audio when
//! the gateway produced one, and walk the follow-up chain interactively.

use std::io::Write;

use crate::relay::SaathiReply;
use crate::voice::{samples_to_wav, AudioCapture, AudioPlayback, SAMPLE_RATE};

/// Placeholder bearer token; the gateway does not validate it
const DEMO_TOKEN: &str = "DEMO_TOKEN";

/// Options for one `ask` session
pub struct AskOptions {
    /// Gateway base URL, e.g. `http://localhost:3000`
    pub server: String,

    /// Driver identifier sent with every request
    pub driver_id: String,

    /// Requested transcription/reply language
    pub language: String,
}

/// Record one question and converse until the follow-up chain ends
///
/// # Errors
///
/// Returns error if recording, upload, or response parsing fails;
/// playback failures only warn, the reply text is already on screen.
pub async fn run_ask(opts: &AskOptions) -> anyhow::Result<()> {
    let wav = record_question()?;

    let client = reqwest::Client::new();
    println!("Sending to {} ...", opts.server);
    let reply = send_query(&client, opts, wav).await?;
    present_reply(&client, &opts.server, &reply).await;

    let mut next = reply.followup_action;
    while let Some(action) = next {
        if !confirm_followup(&action)? {
            break;
        }
        let reply = send_followup(&client, opts, &action).await?;
        present_reply(&client, &opts.server, &reply).await;
        next = reply.followup_action;
    }

    Ok(())
}

/// Record from the microphone until the user presses Enter
fn record_question() -> anyhow::Result<Vec<u8>> {
    let mut capture = AudioCapture::new()?;
    capture.start()?;

    println!("Recording... press Enter to stop.");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    capture.stop();
    let samples = capture.take_buffer();
    if samples.is_empty() {
        anyhow::bail!("no audio captured, check your microphone");
    }

    tracing::debug!(samples = samples.len(), "recorded question");
    Ok(samples_to_wav(&samples, SAMPLE_RATE)?)
}

/// Upload the recorded question as multipart form data
async fn send_query(
    client: &reqwest::Client,
    opts: &AskOptions,
    wav: Vec<u8>,
) -> anyhow::Result<SaathiReply> {
    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(wav)
                .file_name("voice.wav")
                .mime_str("audio/wav")?,
        )
        .text("driverId", opts.driver_id.clone())
        .text("language", opts.language.clone());

    let response = client
        .post(format!("{}/api/voice/query", opts.server))
        .header("Authorization", format!("Bearer {DEMO_TOKEN}"))
        .multipart(form)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("gateway error {status}: {body}");
    }

    Ok(response.json().await?)
}

/// Request a canned follow-up step
async fn send_followup(
    client: &reqwest::Client,
    opts: &AskOptions,
    action: &str,
) -> anyhow::Result<SaathiReply> {
    let response = client
        .post(format!("{}/api/voice/followup", opts.server))
        .header("Authorization", format!("Bearer {DEMO_TOKEN}"))
        .json(&serde_json::json!({
            "driverId": opts.driver_id,
            "action": action,
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        anyhow::bail!("follow-up failed with status {status}");
    }

    Ok(response.json().await?)
}

/// Print the reply and play its audio when the gateway synthesized one
async fn present_reply(client: &reqwest::Client, server: &str, reply: &SaathiReply) {
    println!("\nSaathi: {}", reply.speech_text);
    if reply.visual != reply.speech_text {
        println!("        {}", reply.visual);
    }

    match &reply.audio_url {
        Some(url) => {
            if let Err(e) = fetch_and_play(client, server, url).await {
                tracing::warn!(error = %e, "could not play reply audio");
            }
        }
        None => tracing::debug!("no reply audio, text only"),
    }
}

/// Download the synthesized MP3 and play it
async fn fetch_and_play(
    client: &reqwest::Client,
    server: &str,
    url: &str,
) -> anyhow::Result<()> {
    let audio = client
        .get(format!("{server}{url}"))
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    // Playback blocks until the clip finishes; fine for a serial CLI session
    AudioPlayback::new()?.play_mp3(&audio)?;
    Ok(())
}

/// Ask the user whether to take the offered follow-up action
fn confirm_followup(action: &str) -> anyhow::Result<bool> {
    print!("Follow up with '{action}'? [y/N] ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
