//! Workspace API implementation

use crate::api::common::{ApiResource, ApiVersion};
use crate::api::rbac::policies::ResourcesScope;
use crate::api::{ApiError, Client};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scopes: Vec<ResourcesScope>,
    #[serde(rename = "AuthorEmail", default)]
    pub author_email: String,
    #[serde(rename = "LastUpdatedByEmail", default)]
    pub last_updated_by_email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_updated: String,
}

/// Request body for creating and updating workspaces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWorkspace {
    pub name: String,
    pub description: String,
    pub scopes: Vec<ResourcesScope>,
}

pub struct WorkspacesApi<'a> {
    client: &'a Client,
}

impl ApiResource for WorkspacesApi<'_> {
    const VERSION: ApiVersion = ApiVersion::V2;

    fn api_path() -> &'static str {
        "/workspaces"
    }
}

impl<'a> WorkspacesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /workspaces/{id}
    pub async fn get(&self, id: &str) -> Result<Workspace, ApiError> {
        self.client
            .get(Self::VERSION, &Self::resource_path(id))
            .await
    }

    /// POST /workspaces
    pub async fn create(&self, workspace: &NewWorkspace) -> Result<Workspace, ApiError> {
        self.client
            .post(Self::VERSION, Self::api_path(), workspace)
            .await
    }

    /// PUT /workspaces/{id}
    pub async fn update(&self, id: &str, workspace: &NewWorkspace) -> Result<Workspace, ApiError> {
        self.client
            .put(Self::VERSION, &Self::resource_path(id), workspace)
            .await
    }

    /// DELETE /workspaces/{id}
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(Self::VERSION, &Self::resource_path(id))
            .await
    }
}
