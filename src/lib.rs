//! # Qencode client for Rust
//!
//! Async client for the [Qencode](https://qencode.com) transcoding API: get an
//! access token, create a task and start it with an encoding query.
//!
//! Uploading media to the task's upload URL, polling the returned status URL
//! and receiving callbacks are left to the caller.
//!
//! ## Quick start
//!
//! ```no_run
//! use qencode::{Client, Destination, Format, Query, StartTaskQuery, Stream, OUTPUT_HLS};
//!
//! #[tokio::main]
//! async fn main() -> qencode::Result<()> {
//!     let client = Client::new();
//!
//!     let token = client.get_token("your_api_key").await?;
//!     let task = client.create_task(&token.token).await?;
//!     if task.error != 0 {
//!         eprintln!("task rejected with code {}", task.error);
//!         return Ok(());
//!     }
//!
//!     let query = StartTaskQuery {
//!         query: Query {
//!             source: "https://example.com/video.mp4".into(),
//!             format: vec![Format {
//!                 output: OUTPUT_HLS.into(),
//!                 segment_duration: 6,
//!                 destination: Destination {
//!                     url: "s3://us-west.s3.qencode.com/bucket/hls".into(),
//!                     key: "key".into(),
//!                     secret: "secret".into(),
//!                 },
//!                 stream: vec![Stream {
//!                     video_codec: "libx264".into(),
//!                     height: 720,
//!                     audio_bitrate: 128,
//!                     optimize_bitrate: true,
//!                     ..Default::default()
//!                 }],
//!                 ..Default::default()
//!             }],
//!             ..Default::default()
//!         },
//!     };
//!
//!     let started = client.start_task(&task.task_token, "{}", &query).await?;
//!     println!("poll {}", started.status_url);
//!     Ok(())
//! }
//! ```
//!
//! ## Builder pattern
//!
//! ```no_run
//! use qencode::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> qencode::Result<()> {
//! let client = ClientBuilder::new()
//!     .base_url("https://api.qencode.com")
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod client;
mod errors;
mod models;
mod query;

pub use client::{Client, ClientBuilder};
pub use errors::{QencodeError, Result};
pub use models::{
    AccessToken, CreateTaskResponse, StartTaskResponse, ExpireError, EXPIRE_FORMAT,
};
pub use query::{Destination, Format, Query, StartTaskQuery, Stream, OUTPUT_HLS};
