use std::time::Duration;

use futures_util::StreamExt;
use geochat_logging::geochat_debug;
use url::Url;

use crate::decode::decode_reply;
use crate::{FailureKind, GeoPoint, RequestError, RequestId};

/// Form field carrying the user's text.
pub const USER_INPUT_FIELD: &str = "user_input";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub endpoint_path: String,
    /// `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            endpoint_path: "/process".to_string(),
            request_timeout: None,
            max_bytes: 1024 * 1024,
        }
    }
}

impl ClientSettings {
    /// Absolute URL of the processing endpoint.
    pub fn endpoint(&self) -> Result<Url, RequestError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(&self.endpoint_path))
            .map_err(|err| RequestError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait LocationSource: Send + Sync {
    async fn locate(
        &self,
        request_id: RequestId,
        user_input: &str,
    ) -> Result<Vec<GeoPoint>, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestLocationSource {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestLocationSource {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl LocationSource for ReqwestLocationSource {
    async fn locate(
        &self,
        request_id: RequestId,
        user_input: &str,
    ) -> Result<Vec<GeoPoint>, RequestError> {
        let endpoint = self.settings.endpoint()?;

        let response = self
            .client
            .post(endpoint)
            .form(&[(USER_INPUT_FIELD, user_input)])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(RequestError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(RequestError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        geochat_debug!("request {} received {} byte(s)", request_id, body.len());
        decode_reply(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() || err.is_body() {
        return RequestError::new(FailureKind::MalformedBody, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
