//! Kubernetes cluster integrations

use crate::api::common::{ApiResource, ApiVersion};
use crate::api::{ApiError, Client};
use serde::{Deserialize, Serialize};

/// An installed cluster integration. Its id is the agent API key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubernetesIntegration {
    #[serde(rename = "apiKey")]
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewKubernetesIntegration<'a> {
    cluster_name: &'a str,
}

pub struct KubernetesApi<'a> {
    client: &'a Client,
}

impl ApiResource for KubernetesApi<'_> {
    const VERSION: ApiVersion = ApiVersion::V1;

    fn api_path() -> &'static str {
        "/integrations/kubernetes"
    }
}

impl<'a> KubernetesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /integrations/kubernetes/{cluster_name}
    pub async fn get(&self, cluster_name: &str) -> Result<KubernetesIntegration, ApiError> {
        self.client
            .get(Self::VERSION, &Self::resource_path(cluster_name))
            .await
    }

    /// POST /integrations/kubernetes
    pub async fn create(&self, cluster_name: &str) -> Result<KubernetesIntegration, ApiError> {
        self.client
            .post(
                Self::VERSION,
                Self::api_path(),
                &NewKubernetesIntegration { cluster_name },
            )
            .await
    }

    /// DELETE /integrations/kubernetes/{id}
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(Self::VERSION, &Self::resource_path(id))
            .await
    }
}
