//! Encoding query sent with [`Client::start_task`](crate::Client::start_task).
//!
//! These types mirror the `query` object of Qencode's "starting a task" API and
//! carry no behavior. See <https://docs.qencode.com/api-reference/transcoding/#starting-a-task>.

use serde::{Deserialize, Serialize};

/// HLS output with adaptive streams.
pub const OUTPUT_HLS: &str = "advanced_hls";

/// Top-level object serialized into the `query` form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTaskQuery {
    pub query: Query,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub format: Vec<Format>,
    pub encoder_version: String,
    /// Media URL, or `tus:<file_uuid>` for uploaded files.
    pub source: String,
    pub callback_url: String,
}

/// One output of the encoding task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    /// e.g. [`OUTPUT_HLS`].
    pub output: String,
    #[serde(with = "int_flag")]
    pub separate_audio: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub video_codec: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub audio_bitrate: String,
    /// Seconds.
    pub segment_duration: i64,
    pub destination: Destination,
    pub stream: Vec<Stream>,
}

/// Where encoded files are delivered once the task completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub url: String,
    pub key: String,
    pub secret: String,
}

/// A single rendition of an adaptive stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub video_codec: String,
    pub height: i64,
    /// Kbps.
    pub audio_bitrate: i64,
    #[serde(with = "int_flag")]
    pub optimize_bitrate: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chunklist_name: String,
}

/// The API takes on/off switches as `0` / `1`.
mod int_flag {
    use serde::de::{self, Deserializer, Unexpected};
    use serde::{Deserialize, Serializer};

    pub fn serialize<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*flag))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::invalid_value(
                Unexpected::Unsigned(u64::from(other)),
                &"0 or 1",
            )),
        }
    }
}
