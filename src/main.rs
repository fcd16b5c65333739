use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use saathi_gateway::api::ApiServer;
use saathi_gateway::client::{self, AskOptions};
use saathi_gateway::config::DEFAULT_LANGUAGE;
use saathi_gateway::voice::{AudioCapture, AudioPlayback};
use saathi_gateway::{Config, VoiceRelay};

/// Saathi - voice relay gateway for delivery-driver assistants
#[derive(Parser)]
#[command(name = "saathi", version, about)]
struct Cli {
    /// Port to listen on (serve mode)
    #[arg(long, env = "SAATHI_PORT")]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the gateway (default)
    Serve,
    /// Record a question and relay it through the gateway
    Ask {
        /// Gateway base URL
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        /// Driver identifier sent with the query
        #[arg(long, default_value = "DUMMY_DRIVER_123")]
        driver: String,
        /// Query language (BCP 47 tag)
        #[arg(long, env = "SAATHI_DEFAULT_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test speaker output
    TestSpeaker,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,saathi_gateway=info",
        1 => "info,saathi_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None | Some(Command::Serve) => serve(cli.port).await,
        Some(Command::Ask {
            server,
            driver,
            language,
        }) => {
            client::run_ask(&AskOptions {
                server,
                driver_id: driver,
                language,
            })
            .await
        }
        Some(Command::TestMic { duration }) => test_mic(duration).await,
        Some(Command::TestSpeaker) => test_speaker(),
    }
}

/// Run the gateway server
async fn serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(port) = port_override {
        config.port = port;
    }

    tracing::info!(
        port = config.port,
        stt = %config.voice.stt_provider,
        mock = config.mock,
        default_language = %config.default_language,
        "starting saathi gateway"
    );

    let relay = VoiceRelay::from_config(&config)?;
    ApiServer::new(relay, &config).run().await?;
    Ok(())
}

/// Test microphone input with a simple level meter
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds, speak now...");

    let mut capture = AudioCapture::new()?;
    capture.start()?;

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.take_buffer();
        let rms = calculate_rms(&samples);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (rms * 100.0).min(40.0) as usize;
        println!("[{:2}s] RMS: {:.4} [{}]", i + 1, rms, "#".repeat(meter_len));
    }

    capture.stop();
    println!("If the meter never moved, check your input device.");
    Ok(())
}

/// Calculate RMS energy
#[allow(clippy::cast_precision_loss)]
fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Test speaker output with a short sine tone
fn test_speaker() -> anyhow::Result<()> {
    println!("Playing a 440Hz tone for 2 seconds...");

    let sample_rate = 24000_u32;
    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<f32> = (0..sample_rate * 2)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.3
        })
        .collect();

    AudioPlayback::new()?.play(samples)?;
    println!("If you heard the tone, your speakers are working.");
    Ok(())
}
