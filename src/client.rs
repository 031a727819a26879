use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::errors::{QencodeError, Result};
use crate::models::{AccessToken, CreateTaskResponse, StartTaskResponse};
use crate::query::StartTaskQuery;

const DEFAULT_BASE_URL: &str = "https://api.qencode.com";
const BASE_URL_ENV: &str = "QENCODE_API_URL";

const ACCESS_TOKEN_PATH: &str = "/v1/access_token";
const CREATE_TASK_PATH: &str = "/v1/create_task";
const START_TASK_PATH: &str = "/v1/start_encode2";

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use qencode::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> qencode::Result<()> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.qencode.com")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    http: Option<reqwest::Client>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the API endpoint (defaults to `https://api.qencode.com`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Use an existing HTTP client, sharing its connection pool and settings.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Per-request timeout for the HTTP client the builder creates.
    ///
    /// Ignored when [`http_client`](Self::http_client) is set. Without it no
    /// timeout is applied.
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = Some(d);
        self
    }

    /// Build the [`Client`].
    ///
    /// If no base URL was set via [`base_url`](Self::base_url), the builder
    /// reads the `QENCODE_API_URL` environment variable before falling back to
    /// the public endpoint.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(QencodeError::Http)?
            }
        };

        Ok(Client::from_parts(base_url, http))
    }
}

/// The Qencode API client.
///
/// Holds no state besides its endpoint and HTTP handle, so a single instance
/// (or cheap clones of it) can be shared across tasks. Tokens are never
/// stored: every call takes the token it needs.
///
/// Dropping a returned future cancels the underlying HTTP exchange, so calls
/// compose with `tokio::time::timeout` or `tokio::select!`.
///
/// # Example
///
/// ```no_run
/// use qencode::{Client, StartTaskQuery};
///
/// # async fn example(query: StartTaskQuery) -> qencode::Result<()> {
/// let client = Client::new();
///
/// let token = client.get_token("your_api_key").await?;
/// let task = client.create_task(&token.token).await?;
/// let started = client.start_task(&task.task_token, "", &query).await?;
/// println!("status: {}", started.status_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for the public endpoint with a default HTTP client.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    pub fn new() -> Self {
        Self::with_http_client(reqwest::Client::new())
    }

    /// Create a client for the public endpoint on top of `http`.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self::from_parts(DEFAULT_BASE_URL.to_string(), http)
    }

    fn from_parts(base_url: String, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// The API endpoint every request is sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange an API key for an [`AccessToken`].
    ///
    /// # Errors
    ///
    /// - [`QencodeError::Request`] if the API answers with a status above 299.
    /// - [`QencodeError::Decode`] if the body is not the expected JSON or
    ///   `expire` is not `YYYY-MM-DDThh:mm:ss`.
    /// - [`QencodeError::Http`] on network failure.
    #[instrument(skip_all)]
    pub async fn get_token(&self, api_key: &str) -> Result<AccessToken> {
        self.post_form(ACCESS_TOKEN_PATH, &[("api_key", api_key)], "error getting token")
            .await
    }

    /// Create a new encoding task.
    ///
    /// A non-zero [`CreateTaskResponse::error`] is returned as-is, not as an
    /// `Err`.
    #[instrument(skip_all)]
    pub async fn create_task(&self, token: &str) -> Result<CreateTaskResponse> {
        self.post_form(CREATE_TASK_PATH, &[("token", token)], "error creating task")
            .await
    }

    /// Start an encoding task.
    ///
    /// `task_token` comes from [`create_task`](Self::create_task). `payload`
    /// is opaque to the client; Qencode hands it back on callbacks, so a JSON
    /// object formatted as a string is typical. `query` describes the outputs.
    ///
    /// # Errors
    ///
    /// [`QencodeError::Serialize`] if `query` cannot be encoded; no request is
    /// sent in that case. Otherwise as for [`get_token`](Self::get_token).
    #[instrument(skip_all, fields(formats = query.query.format.len()))]
    pub async fn start_task(
        &self,
        task_token: &str,
        payload: &str,
        query: &StartTaskQuery,
    ) -> Result<StartTaskResponse> {
        let query = serde_json::to_string(query).map_err(QencodeError::Serialize)?;

        self.post_form(
            START_TASK_PATH,
            &[
                ("task_token", task_token),
                ("payload", payload),
                ("query", query.as_str()),
            ],
            "error starting task",
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// POST `fields` form-encoded to `path` and decode the JSON answer.
    ///
    /// The body is always read to the end, whatever the status, so the
    /// connection goes back to the pool.
    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        failure: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending request");

        let response = self.http.post(&url).form(fields).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if status.as_u16() > 299 {
            return Err(QencodeError::Request {
                message: failure.to_string(),
                status_code: status.as_u16(),
                body: body.to_vec(),
            });
        }

        serde_json::from_slice(&body).map_err(QencodeError::Decode)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
