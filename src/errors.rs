use reqwest::StatusCode;
use thiserror::Error;

/// All errors that can occur when talking to the Qencode API.
#[derive(Error, Debug)]
pub enum QencodeError {
    /// The API answered with a status above 299.
    ///
    /// `body` holds the raw response bytes, untouched, so server-side
    /// diagnostics can be inspected.
    #[error("[{status_code} {}]: {message}", reason_phrase(.status_code))]
    Request {
        message: String,
        status_code: u16,
        body: Vec<u8>,
    },

    /// Building or executing the request failed before a usable response arrived.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response was successful but its payload could not be decoded.
    #[error("invalid response payload: {0}")]
    Decode(#[source] serde_json::Error),

    /// The encoding query could not be serialized. No request was sent.
    #[error("failed to serialize query: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl QencodeError {
    /// HTTP status of a [`QencodeError::Request`], `None` for every other kind.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Raw response body of a [`QencodeError::Request`].
    pub fn response_body(&self) -> Option<&[u8]> {
        match self {
            Self::Request { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Response body of a [`QencodeError::Request`] as (lossy) UTF-8.
    pub fn response_text(&self) -> Option<String> {
        self.response_body()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// `true` for a successful response whose payload could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// `true` when sending the request or reading its body failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

fn reason_phrase(status_code: &u16) -> &'static str {
    StatusCode::from_u16(*status_code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

/// A convenience alias for `Result<T, QencodeError>`.
pub type Result<T> = std::result::Result<T, QencodeError>;
