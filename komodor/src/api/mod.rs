pub mod client;
pub mod common;
pub mod error;
pub mod kubernetes;
pub mod monitors;
pub mod rbac;
pub mod users;
pub mod workspaces;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use client::{Client, RawResponse, RetryConfig, API_KEY_HEADER};
pub use common::{ApiQueryParams, ApiResource, ApiVersion};
pub use error::ApiError;
