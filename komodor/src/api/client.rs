use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::common::{ApiQueryParams, ApiVersion, DEFAULT_ENDPOINT, DEFAULT_V2_ENDPOINT};
use super::error::ApiError;
use crate::config::ProviderConfig;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Komodor API client
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    endpoint: String,
    v2_endpoint: String,
    api_key: String,
    retry_config: RetryConfig,
}

/// Retry policy for 502 responses. Nothing else is retried.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// Status and body of a successful exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct ApiKeyResponse {
    valid: bool,
}

impl Client {
    /// Create a new API client against the public Komodor endpoints
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        Self::with_config(
            DEFAULT_ENDPOINT,
            DEFAULT_V2_ENDPOINT,
            api_key,
            RetryConfig::default(),
        )
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        Self::with_config(
            &config.endpoint,
            &config.v2_endpoint,
            &config.api_key,
            config.retry.clone(),
        )
    }

    /// Create a new API client with custom endpoints and retry configuration
    pub fn with_config(
        endpoint: &str,
        v2_endpoint: &str,
        api_key: &str,
        retry_config: RetryConfig,
    ) -> Result<Self, ApiError> {
        for base in [endpoint, v2_endpoint] {
            url::Url::parse(base)
                .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base, e)))?;
        }

        let http_client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                endpoint: endpoint.trim_end_matches('/').to_string(),
                v2_endpoint: v2_endpoint.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
                retry_config,
            }),
        })
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }

    /// Absolute URL for a path under the given API generation
    pub fn url(&self, version: ApiVersion, path: &str) -> String {
        let base = match version {
            ApiVersion::V1 => &self.inner.endpoint,
            ApiVersion::V2 => &self.inner.v2_endpoint,
        };
        format!("{}{}", base, path)
    }

    /// Send one request, retrying on 502.
    ///
    /// 200, 201 and 204 are returned as-is whatever the body holds. Any
    /// other status is an error carrying the status and the raw body.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<RawResponse, ApiError> {
        let max_attempts = self.inner.retry_config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::debug!("{} request to: {} (attempt {})", method, url, attempt);

            let mut request = self
                .inner
                .http_client
                .request(method.clone(), url)
                .header(API_KEY_HEADER, &self.inner.api_key)
                .header(CONTENT_TYPE, "application/json");
            if let Some(bytes) = body {
                request = request.body(bytes.to_vec());
            }

            let response = request.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?.to_vec();
            tracing::debug!("Response status: {}", status);

            match status {
                StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => {
                    return Ok(RawResponse {
                        status: status.as_u16(),
                        body: bytes,
                    });
                }
                StatusCode::BAD_GATEWAY if attempt < max_attempts => {
                    tracing::warn!(
                        "Retry attempt {}/{} for {} {} (status {})",
                        attempt,
                        max_attempts,
                        method,
                        url,
                        status.as_u16()
                    );
                    tokio::time::sleep(self.inner.retry_config.retry_delay).await;
                }
                StatusCode::BAD_GATEWAY => {
                    return Err(ApiError::RetriesExhausted {
                        attempts: attempt,
                        status: status.as_u16(),
                        body: String::from_utf8_lossy(&bytes).into_owned(),
                    });
                }
                _ => {
                    return Err(ApiError::Status {
                        status: status.as_u16(),
                        body: String::from_utf8_lossy(&bytes).into_owned(),
                    });
                }
            }
        }
    }

    /// Execute a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        version: ApiVersion,
        path: &str,
    ) -> Result<T, ApiError> {
        self.send_json::<T, ()>(Method::GET, version, path, None)
            .await
    }

    /// Execute a GET request with query parameters
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        version: ApiVersion,
        path: &str,
        params: &ApiQueryParams,
    ) -> Result<T, ApiError> {
        let full_path = format!("{}{}", path, params.to_query_string());
        self.get(version, &full_path).await
    }

    /// Execute a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        version: ApiVersion,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(Method::POST, version, path, Some(body)).await
    }

    /// Execute a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        version: ApiVersion,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(Method::PUT, version, path, Some(body)).await
    }

    /// Execute a PUT request and hand back the undecoded response body
    pub async fn put_raw<B: Serialize>(
        &self,
        version: ApiVersion,
        path: &str,
        body: &B,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self
            .execute_json(Method::PUT, version, path, Some(body))
            .await?;
        Ok(response.body)
    }

    /// Execute a DELETE request. The response body is discarded.
    pub async fn delete(&self, version: ApiVersion, path: &str) -> Result<(), ApiError> {
        self.execute_json::<()>(Method::DELETE, version, path, None)
            .await
            .map(|_| ())
    }

    /// Execute a DELETE request carrying a JSON body. The response body is discarded.
    pub async fn delete_with_body<B: Serialize>(
        &self,
        version: ApiVersion,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.execute_json(Method::DELETE, version, path, Some(body))
            .await
            .map(|_| ())
    }

    /// Check that the configured key is accepted by the API
    pub async fn validate_api_key(&self) -> Result<bool, ApiError> {
        let response: ApiKeyResponse = self.get(ApiVersion::V1, "/apikey/validate").await?;
        Ok(response.valid)
    }

    /// RBAC API operations
    pub fn rbac(&self) -> crate::api::rbac::RbacApi<'_> {
        crate::api::rbac::RbacApi::new(self)
    }

    /// Realtime monitor operations
    pub fn monitors(&self) -> crate::api::monitors::MonitorsApi<'_> {
        crate::api::monitors::MonitorsApi::new(self)
    }

    /// Kubernetes cluster integration operations
    pub fn kubernetes(&self) -> crate::api::kubernetes::KubernetesApi<'_> {
        crate::api::kubernetes::KubernetesApi::new(self)
    }

    /// User operations
    pub fn users(&self) -> crate::api::users::UsersApi<'_> {
        crate::api::users::UsersApi::new(self)
    }

    /// Workspace operations
    pub fn workspaces(&self) -> crate::api::workspaces::WorkspacesApi<'_> {
        crate::api::workspaces::WorkspacesApi::new(self)
    }

    /// Serialize `body`, send it to `path` and return the raw response
    pub async fn execute_json<B: Serialize>(
        &self,
        method: Method,
        version: ApiVersion,
        path: &str,
        body: Option<&B>,
    ) -> Result<RawResponse, ApiError> {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ApiError::Serialize)?;
        let url = self.url(version, path);

        self.execute(method, &url, payload.as_deref()).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        version: ApiVersion,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let response = self.execute_json(method, version, path, body).await?;
        parse_body(&response.body)
    }
}

/// Decode a success body. An empty body decodes as JSON `null`.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let source: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };

    serde_json::from_slice(source).map_err(|e| {
        let text = String::from_utf8_lossy(body).into_owned();
        tracing::error!("Failed to deserialize response: {}, body: {}", e, text);
        ApiError::Parse {
            message: e.to_string(),
            body: text,
        }
    })
}
