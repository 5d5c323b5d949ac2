//! User management API

use crate::api::common::{ApiQueryParams, ApiResource, ApiVersion};
use crate::api::{ApiError, Client};
use serde::{Deserialize, Serialize};

/// Single-user lookups still go through the v1 RBAC endpoint.
const USERS_V1_PATH: &str = "/rbac/users";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub display_name: String,
    pub email: String,
    pub restore_if_deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub display_name: String,
}

pub struct UsersApi<'a> {
    client: &'a Client,
}

impl ApiResource for UsersApi<'_> {
    const VERSION: ApiVersion = ApiVersion::V2;

    fn api_path() -> &'static str {
        "/users"
    }
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /users?isDeleted=false
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.search(None).await
    }

    /// First active user with the given email, if any
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let users = self.search(Some(email)).await?;
        Ok(users.into_iter().next())
    }

    /// GET /rbac/users/{id} (v1)
    ///
    /// A soft-deleted user is reported as a 404.
    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        let path = format!("{}/{}", USERS_V1_PATH, urlencoding::encode(id));
        let user: User = self.client.get(ApiVersion::V1, &path).await?;

        if user.deleted_at.is_some() {
            tracing::debug!("User {} is deleted", id);
            return Err(ApiError::not_found("user not found"));
        }

        Ok(user)
    }

    /// POST /users
    pub async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        self.client
            .post(Self::VERSION, Self::api_path(), user)
            .await
    }

    /// PUT /users/{id}
    pub async fn update(&self, id: &str, user: &UpdateUser) -> Result<User, ApiError> {
        self.client
            .put(Self::VERSION, &Self::resource_path(id), user)
            .await
    }

    /// DELETE /users/{id}
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(Self::VERSION, &Self::resource_path(id))
            .await
    }

    async fn search(&self, email: Option<&str>) -> Result<Vec<User>, ApiError> {
        let params = ApiQueryParams::new()
            .add_optional("email", email)
            .add("isDeleted", false);

        self.client
            .get_with_params(Self::VERSION, Self::api_path(), &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::create_test_client;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const USER_BODY: &str = r#"{
        "id": "u-1",
        "displayName": "Jane Ops",
        "email": "jane@example.com",
        "createdAt": "2024-02-01T00:00:00Z",
        "updatedAt": "2024-02-01T00:00:00Z"
    }"#;

    #[tokio::test]
    async fn list_users_excludes_deleted() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/v2/users")
            .match_query(Matcher::UrlEncoded("isDeleted".into(), "false".into()))
            .with_body(format!("[{}]", USER_BODY))
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let users = client.users().list().await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].display_name, "Jane Ops");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn get_by_email_returns_none_when_no_match() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/v2/users")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("email".into(), "nobody+x@example.com".into()),
                Matcher::UrlEncoded("isDeleted".into(), "false".into()),
            ]))
            .with_body("[]")
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let user = client
            .users()
            .get_by_email("nobody+x@example.com")
            .await
            .unwrap();

        assert!(user.is_none());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn get_user_uses_v1_endpoint() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/mgmt/v1/rbac/users/u-1")
            .with_body(USER_BODY)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let user = client.users().get("u-1").await.unwrap();

        assert_eq!(user.email, "jane@example.com");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn soft_deleted_user_reads_as_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/mgmt/v1/rbac/users/u-2")
            .with_body(
                r#"{"id": "u-2", "displayName": "Gone", "email": "gone@example.com",
                    "createdAt": "", "updatedAt": "", "deletedAt": "2024-04-01T00:00:00Z"}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let err = client.users().get("u-2").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.body(), Some("user not found"));
    }

    #[tokio::test]
    async fn create_update_delete_use_v2() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/api/v2/users")
            .match_body(Matcher::Json(json!({
                "displayName": "Jane Ops",
                "email": "jane@example.com",
                "restoreIfDeleted": true
            })))
            .with_status(201)
            .with_body(USER_BODY)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/api/v2/users/u-1")
            .match_body(Matcher::Json(json!({"displayName": "Jane O."})))
            .with_body(USER_BODY.replace("Jane Ops", "Jane O."))
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/api/v2/users/u-1")
            .with_status(204)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let users = client.users();

        let created = users
            .create(&NewUser {
                display_name: "Jane Ops".to_string(),
                email: "jane@example.com".to_string(),
                restore_if_deleted: true,
            })
            .await
            .unwrap();
        let updated = users
            .update(
                &created.id,
                &UpdateUser {
                    display_name: "Jane O.".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.display_name, "Jane O.");
        users.delete(&created.id).await.unwrap();

        create.assert_async().await;
        update.assert_async().await;
        delete.assert_async().await;
    }
}
