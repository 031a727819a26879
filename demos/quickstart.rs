//! Walks the token -> task -> start flow against the Qencode API.
//!
//! Run with:
//!   QENCODE_API_KEY=... QENCODE_SOURCE=https://... cargo run --example quickstart
//!
//! Set `RUST_LOG=qencode=debug` to see the requests being made.

use qencode::{ClientBuilder, Destination, Format, Query, StartTaskQuery, Stream, OUTPUT_HLS};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("QENCODE_API_KEY")?;
    let source = std::env::var("QENCODE_SOURCE")?;

    // -----------------------------------------------------------------------
    // 1. Create a client (QENCODE_API_URL overrides the endpoint)
    // -----------------------------------------------------------------------
    let client = ClientBuilder::new().build()?;

    // -----------------------------------------------------------------------
    // 2. Exchange the API key for an access token
    // -----------------------------------------------------------------------
    let token = client.get_token(&api_key).await?;
    println!("Token expires at {}", token.expires_at());

    // -----------------------------------------------------------------------
    // 3. Create a task
    // -----------------------------------------------------------------------
    let task = client.create_task(&token.token).await?;
    if task.error != 0 {
        eprintln!("create_task returned error code {}", task.error);
        return Ok(());
    }
    println!("Task {} (upload to {})", task.task_token, task.upload_url);

    // -----------------------------------------------------------------------
    // 4. Start it with an HLS ladder
    // -----------------------------------------------------------------------
    let stream = |height, audio_bitrate| Stream {
        video_codec: "libx264".into(),
        height,
        audio_bitrate,
        optimize_bitrate: true,
        chunklist_name: format!("{height}p.m3u8"),
    };

    let query = StartTaskQuery {
        query: Query {
            source,
            encoder_version: "2".into(),
            format: vec![Format {
                output: OUTPUT_HLS.into(),
                separate_audio: false,
                segment_duration: 6,
                destination: Destination {
                    url: std::env::var("QENCODE_DESTINATION_URL").unwrap_or_default(),
                    key: std::env::var("QENCODE_DESTINATION_KEY").unwrap_or_default(),
                    secret: std::env::var("QENCODE_DESTINATION_SECRET").unwrap_or_default(),
                },
                stream: vec![stream(1080, 128), stream(720, 128), stream(360, 64)],
                ..Default::default()
            }],
            ..Default::default()
        },
    };

    let started = client
        .start_task(&task.task_token, r#"{"source":"quickstart"}"#, &query)
        .await?;
    if started.error != 0 {
        eprintln!("start_task returned error code {}", started.error);
        return Ok(());
    }
    println!("Poll status at {}", started.status_url);

    Ok(())
}
