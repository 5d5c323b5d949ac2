//! Client for the Komodor management API.
//!
//! Covers the entities managed by the Komodor Terraform provider: RBAC
//! policies, roles and their attachments, custom Kubernetes actions,
//! realtime monitors, Kubernetes cluster integrations, users and
//! workspaces.

pub mod api;
pub mod config;

pub use api::{ApiError, Client, RetryConfig};
pub use config::{ConfigError, ProviderConfig};
