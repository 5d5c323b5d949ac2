//! Custom Kubernetes RBAC actions

use crate::api::common::{ApiResource, ApiVersion};
use crate::api::{ApiError, Client};
use serde::{Deserialize, Serialize};

/// One Kubernetes RBAC rule granted by a custom action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct K8sRule {
    #[serde(default)]
    pub api_groups: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub verbs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomK8sAction {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "k8sRuleset", default)]
    pub ruleset: Vec<K8sRule>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Request body for creating and updating custom actions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCustomK8sAction {
    pub action: String,
    pub description: String,
    #[serde(rename = "k8sRuleset")]
    pub ruleset: Vec<K8sRule>,
}

pub struct CustomK8sActionsApi<'a> {
    client: &'a Client,
}

impl ApiResource for CustomK8sActionsApi<'_> {
    const VERSION: ApiVersion = ApiVersion::V1;

    fn api_path() -> &'static str {
        "/rbac/actions"
    }
}

impl<'a> CustomK8sActionsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /rbac/actions
    pub async fn list(&self) -> Result<Vec<CustomK8sAction>, ApiError> {
        self.client.get(Self::VERSION, Self::api_path()).await
    }

    /// GET /rbac/actions/{id}
    pub async fn get(&self, id: &str) -> Result<CustomK8sAction, ApiError> {
        self.client
            .get(Self::VERSION, &Self::resource_path(id))
            .await
    }

    /// POST /rbac/actions
    pub async fn create(&self, action: &NewCustomK8sAction) -> Result<CustomK8sAction, ApiError> {
        self.client
            .post(Self::VERSION, Self::api_path(), action)
            .await
    }

    /// PUT /rbac/actions/{id}
    pub async fn update(
        &self,
        id: &str,
        action: &NewCustomK8sAction,
    ) -> Result<CustomK8sAction, ApiError> {
        self.client
            .put(Self::VERSION, &Self::resource_path(id), action)
            .await
    }

    /// DELETE /rbac/actions/{id}
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(Self::VERSION, &Self::resource_path(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::create_test_client;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const ACTION_BODY: &str = r#"{
        "id": "a-1",
        "action": "restart-deployments",
        "description": "Restart deployments",
        "k8sRuleset": [
            {"apiGroups": ["apps"], "resources": ["deployments"], "verbs": ["patch"]}
        ],
        "createdAt": "2024-03-01T10:00:00Z",
        "updatedAt": "2024-03-01T10:00:00Z"
    }"#;

    fn new_action() -> NewCustomK8sAction {
        NewCustomK8sAction {
            action: "restart-deployments".to_string(),
            description: "Restart deployments".to_string(),
            ruleset: vec![K8sRule {
                api_groups: vec!["apps".to_string()],
                resources: vec!["deployments".to_string()],
                verbs: vec!["patch".to_string()],
            }],
        }
    }

    #[tokio::test]
    async fn create_action_sends_ruleset() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/mgmt/v1/rbac/actions")
            .match_body(Matcher::Json(json!({
                "action": "restart-deployments",
                "description": "Restart deployments",
                "k8sRuleset": [
                    {"apiGroups": ["apps"], "resources": ["deployments"], "verbs": ["patch"]}
                ]
            })))
            .with_status(201)
            .with_body(ACTION_BODY)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let created = client.rbac().actions().create(&new_action()).await.unwrap();

        assert_eq!(created.id, "a-1");
        assert_eq!(created.ruleset[0].verbs, vec!["patch"]);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn update_and_delete_use_resource_path() {
        let mut server = Server::new_async().await;
        let update = server
            .mock("PUT", "/mgmt/v1/rbac/actions/a-1")
            .with_body(ACTION_BODY)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/mgmt/v1/rbac/actions/a-1")
            .with_status(204)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let actions = client.rbac().actions();
        actions.update("a-1", &new_action()).await.unwrap();
        actions.delete("a-1").await.unwrap();

        update.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn list_actions() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/mgmt/v1/rbac/actions")
            .with_body(format!("[{}]", ACTION_BODY))
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let actions = client.rbac().actions().list().await.unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "restart-deployments");
    }

    #[tokio::test]
    async fn get_action_decodes_ruleset() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/mgmt/v1/rbac/actions/a-1")
            .with_body(ACTION_BODY)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let action = client.rbac().actions().get("a-1").await.unwrap();

        assert_eq!(action.id, "a-1");
        assert_eq!(action.description, "Restart deployments");
        assert_eq!(action.ruleset[0].api_groups, vec!["apps"]);
        assert_eq!(action.ruleset[0].resources, vec!["deployments"]);
        m.assert_async().await;
    }
}
