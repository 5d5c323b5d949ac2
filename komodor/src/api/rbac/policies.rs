//! RBAC policy API implementation

use crate::api::common::{ApiResource, ApiVersion, IdBody};
use crate::api::{ApiError, Client};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const POLICY_TYPE_V2: &str = "v2";

/// Legacy per-cluster scope of a statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub cluster: String,
    #[serde(default)]
    pub namespaces: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub include: String,
    pub exclude: String,
}

/// Selector `type` values the server documents. Others are passed through as-is.
pub const SELECTOR_TYPE_LABEL: &str = "label";
pub const SELECTOR_TYPE_ANNOTATION: &str = "annotation";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selector {
    pub key: String,
    #[serde(rename = "type")]
    pub selector_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorPattern {
    pub key: String,
    #[serde(rename = "type")]
    pub selector_type: String,
    pub value: Pattern,
}

/// Scope of a v2 statement. Also used as a workspace scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesScope {
    #[serde(default)]
    pub clusters: Vec<String>,
    #[serde(default)]
    pub namespaces: Vec<String>,
    #[serde(default)]
    pub clusters_patterns: Vec<Pattern>,
    #[serde(default)]
    pub namespaces_patterns: Vec<Pattern>,
    #[serde(default)]
    pub selectors: Vec<Selector>,
    #[serde(default)]
    pub selectors_patterns: Vec<SelectorPattern>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_scope: Option<ResourcesScope>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

/// Request body for creating and updating policies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPolicy {
    pub name: String,
    pub statements: Vec<Statement>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

impl NewPolicy {
    /// A scoped (`type = "v2"`) policy
    pub fn v2(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            name: name.into(),
            statements,
            policy_type: Some(POLICY_TYPE_V2.to_string()),
            tags: None,
        }
    }
}

/// Policies API for policy operations
pub struct PoliciesApi<'a> {
    client: &'a Client,
}

impl ApiResource for PoliciesApi<'_> {
    const VERSION: ApiVersion = ApiVersion::V1;

    fn api_path() -> &'static str {
        "/rbac/policies"
    }
}

impl<'a> PoliciesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /rbac/policies
    pub async fn list(&self) -> Result<Vec<Policy>, ApiError> {
        self.client.get(Self::VERSION, Self::api_path()).await
    }

    /// GET /rbac/policies/{id}
    pub async fn get(&self, id: &str) -> Result<Policy, ApiError> {
        self.client
            .get(Self::VERSION, &Self::resource_path(id))
            .await
    }

    /// POST /rbac/policies
    pub async fn create(&self, policy: &NewPolicy) -> Result<Policy, ApiError> {
        let created: Policy = self
            .client
            .post(Self::VERSION, Self::api_path(), policy)
            .await?;
        tracing::info!("Policy created successfully. Policy Id: {}", created.id);
        Ok(created)
    }

    /// PUT /rbac/policies/{id}
    pub async fn update(&self, id: &str, policy: &NewPolicy) -> Result<Policy, ApiError> {
        self.client
            .put(Self::VERSION, &Self::resource_path(id), policy)
            .await
    }

    /// DELETE /rbac/policies with `{"id": ...}`
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!("Deleting Policy: {}", id);
        self.client
            .delete_with_body(Self::VERSION, Self::api_path(), &IdBody { id })
            .await
    }
}
