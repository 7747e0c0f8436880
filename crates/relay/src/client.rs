use forsale_core::Inquiry;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Client for the third-party form-relay that forwards inquiries as email.
#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    endpoint: Url,
}

impl RelayClient {
    /// Creates a relay client posting to `endpoint`.
    pub fn new(endpoint: Url, http: Client) -> Self {
        Self { http, endpoint }
    }

    /// Parses `endpoint` and builds a client with default transport settings.
    pub fn from_endpoint(endpoint: &str) -> Result<Self, RelayError> {
        let endpoint = Url::parse(endpoint)?;
        let http = Client::builder().build()?;
        Ok(Self::new(endpoint, http))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts one inquiry as JSON. Any non-2xx answer is an error; no retry.
    pub async fn submit(&self, inquiry: &Inquiry) -> Result<(), RelayError> {
        debug!(stage = "relay", endpoint = %self.endpoint, "posting inquiry");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(inquiry)
            .send()
            .await?;

        ensure_success(response).await
    }
}

/// Errors produced by the relay client.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid relay endpoint: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay rejected inquiry with status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl RelayError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Http(_) => "transport",
            Self::Status { .. } => "status",
        }
    }
}

async fn ensure_success(response: Response) -> Result<(), RelayError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unavailable>"));
        return Err(RelayError::Status { status, body });
    }
    Ok(())
}
