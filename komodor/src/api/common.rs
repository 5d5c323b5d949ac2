//! Common types and utilities for the Komodor API

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.komodor.com/mgmt/v1";
pub const DEFAULT_V2_ENDPOINT: &str = "https://api.komodor.com/api/v2";

/// Which API generation a resource lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// `/mgmt/v1`
    V1,
    /// `/api/v2`
    V2,
}

pub trait ApiResource {
    const VERSION: ApiVersion;

    fn api_path() -> &'static str;

    fn resource_path(id: &str) -> String {
        format!("{}/{}", Self::api_path(), urlencoding::encode(id))
    }
}

/// Body accepted by the v1 RBAC delete endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct IdBody<'a> {
    pub id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Default)]
pub struct ApiQueryParams {
    params: Vec<(String, String)>,
}

impl ApiQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(mut self, key: K, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.params.push((key.into(), v.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}
