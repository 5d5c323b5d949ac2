//! Attachment of policies to roles

use crate::api::common::{ApiResource, ApiVersion};
use crate::api::{ApiError, Client};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePolicy {
    pub role_id: String,
    pub policy_id: String,
}

#[derive(Debug, Deserialize)]
struct RolePoliciesResponse {
    #[serde(rename = "RolePolicy", default)]
    role_policy: Vec<RolePolicy>,
}

/// Role-policy attachment API
pub struct RolePoliciesApi<'a> {
    client: &'a Client,
}

impl ApiResource for RolePoliciesApi<'_> {
    const VERSION: ApiVersion = ApiVersion::V1;

    fn api_path() -> &'static str {
        "/rbac/roles/policies"
    }
}

impl<'a> RolePoliciesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// POST /rbac/roles/policies
    pub async fn attach(&self, policy_id: &str, role_id: &str) -> Result<(), ApiError> {
        let body = RolePolicy {
            role_id: role_id.to_string(),
            policy_id: policy_id.to_string(),
        };
        self.client
            .execute_json(reqwest::Method::POST, Self::VERSION, Self::api_path(), Some(&body))
            .await
            .map(|_| ())
    }

    /// DELETE /rbac/roles/policies
    pub async fn detach(&self, policy_id: &str, role_id: &str) -> Result<(), ApiError> {
        let body = RolePolicy {
            role_id: role_id.to_string(),
            policy_id: policy_id.to_string(),
        };
        self.client
            .delete_with_body(Self::VERSION, Self::api_path(), &body)
            .await
    }

    /// GET /rbac/roles/{role}/policies
    pub async fn list_for_role(&self, role_id: &str) -> Result<Vec<RolePolicy>, ApiError> {
        let path = format!("/rbac/roles/{}/policies", urlencoding::encode(role_id));
        let response: RolePoliciesResponse = self.client.get(Self::VERSION, &path).await?;
        tracing::debug!(
            "Policies attached to role {}: {:?}",
            role_id,
            response
                .role_policy
                .iter()
                .map(|rp| rp.policy_id.as_str())
                .collect::<Vec<_>>()
        );
        Ok(response.role_policy)
    }

    /// Attach each policy in turn, stopping at the first failure.
    pub async fn attach_many<S: AsRef<str>>(
        &self,
        role_id: &str,
        policy_ids: &[S],
    ) -> Result<(), ApiError> {
        for policy_id in policy_ids {
            let policy_id = policy_id.as_ref();
            self.attach(policy_id, role_id)
                .await
                .map_err(|e| ApiError::Attach {
                    policy_id: policy_id.to_string(),
                    role_id: role_id.to_string(),
                    source: Box::new(e),
                })?;
        }
        Ok(())
    }

    /// Detach each policy in turn, stopping at the first failure.
    pub async fn detach_many<S: AsRef<str>>(
        &self,
        role_id: &str,
        policy_ids: &[S],
    ) -> Result<(), ApiError> {
        for policy_id in policy_ids {
            let policy_id = policy_id.as_ref();
            self.detach(policy_id, role_id)
                .await
                .map_err(|e| ApiError::Detach {
                    policy_id: policy_id.to_string(),
                    role_id: role_id.to_string(),
                    source: Box::new(e),
                })?;
        }
        Ok(())
    }

    /// Move a role from the `old` policy set to the `new` one: detach what
    /// was dropped, then attach what was added.
    pub async fn sync<S: AsRef<str>>(
        &self,
        role_id: &str,
        old: &[S],
        new: &[S],
    ) -> Result<(), ApiError> {
        let (remove, add) = policy_diff(old, new);
        self.detach_many(role_id, remove.as_slice()).await?;
        self.attach_many(role_id, add.as_slice()).await
    }
}

/// Returns `(old \ new, new \ old)`, each sorted and without empty ids.
fn policy_diff<'s, S: AsRef<str>>(old: &'s [S], new: &'s [S]) -> (Vec<&'s str>, Vec<&'s str>) {
    let old: BTreeSet<&str> = old
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty())
        .collect();
    let new: BTreeSet<&str> = new
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty())
        .collect();

    (
        old.difference(&new).copied().collect(),
        new.difference(&old).copied().collect(),
    )
}
