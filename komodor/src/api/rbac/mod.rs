//! RBAC API: policies, roles, their attachments and custom Kubernetes actions

pub mod actions;
pub mod policies;
pub mod role_policies;
pub mod roles;

use crate::api::Client;

/// RBAC API grouping the role-based access control endpoints
pub struct RbacApi<'a> {
    client: &'a Client,
}

impl<'a> RbacApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn policies(&self) -> policies::PoliciesApi<'a> {
        policies::PoliciesApi::new(self.client)
    }

    pub fn roles(&self) -> roles::RolesApi<'a> {
        roles::RolesApi::new(self.client)
    }

    pub fn role_policies(&self) -> role_policies::RolePoliciesApi<'a> {
        role_policies::RolePoliciesApi::new(self.client)
    }

    pub fn actions(&self) -> actions::CustomK8sActionsApi<'a> {
        actions::CustomK8sActionsApi::new(self.client)
    }
}
