//! RBAC role API implementation

use crate::api::common::{ApiResource, ApiVersion, IdBody};
use crate::api::{ApiError, Client};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRole {
    pub name: String,
}

/// Roles API for role operations
pub struct RolesApi<'a> {
    client: &'a Client,
}

impl ApiResource for RolesApi<'_> {
    const VERSION: ApiVersion = ApiVersion::V1;

    fn api_path() -> &'static str {
        "/rbac/roles"
    }
}

impl<'a> RolesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /rbac/roles
    pub async fn list(&self) -> Result<Vec<Role>, ApiError> {
        self.client.get(Self::VERSION, Self::api_path()).await
    }

    /// GET /rbac/roles/{id}
    pub async fn get(&self, id: &str) -> Result<Role, ApiError> {
        self.client
            .get(Self::VERSION, &Self::resource_path(id))
            .await
    }

    /// Look a role up by its display name. The API has no name filter,
    /// so this lists every role.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Role>, ApiError> {
        let roles = self.list().await?;
        Ok(roles.into_iter().find(|role| role.name == name))
    }

    /// POST /rbac/roles
    pub async fn create(&self, role: &NewRole) -> Result<Role, ApiError> {
        let created: Role = self
            .client
            .post(Self::VERSION, Self::api_path(), role)
            .await?;
        tracing::info!("Role created successfully. Role Id: {}", created.id);
        Ok(created)
    }

    /// DELETE /rbac/roles with `{"id": ...}`
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete_with_body(Self::VERSION, Self::api_path(), &IdBody { id })
            .await
    }
}
