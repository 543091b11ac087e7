use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde_json::Value;
use url::Url;

use crate::{ApiError, ApiSettings, Endpoints, FailureKind};

/// Response header carrying the id a cancel request must quote.
pub const OPERATION_ID_HEADER: &str = "x-operation-id";

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ApiError>> + Send>>;

/// An accepted operation: its id (if the backend assigned one) and the SSE body.
pub struct OperationStream {
    pub operation_id: Option<String>,
    pub body: ByteStream,
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    fn endpoints(&self) -> &Endpoints;

    /// GET a JSON document. Non-success statuses are errors.
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    /// POST a JSON body and decode the JSON answer whatever the status; the answer decides.
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    /// POST a JSON body and return the streamed response. Non-success statuses are errors.
    async fn post_stream(&self, path: &str, body: &Value) -> Result<OperationStream, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ApiSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    fn endpoints(&self) -> &Endpoints {
        &self.settings.endpoints
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(self.url(path)?)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response)?;
        decode_json(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(self.url(path)?)
            .timeout(self.settings.request_timeout)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    async fn post_stream(&self, path: &str, body: &Value) -> Result<OperationStream, ApiError> {
        let response = self
            .client
            .post(self.url(path)?)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response)?;

        let operation_id = response
            .headers()
            .get(OPERATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(ToOwned::to_owned);
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_reqwest_error));

        Ok(OperationStream {
            operation_id,
            body: Box::pin(body),
        })
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("HTTP {status}"),
        ));
    }
    Ok(response)
}

async fn decode_json(response: reqwest::Response) -> Result<Value, ApiError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
