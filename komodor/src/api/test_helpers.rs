//! Test helpers for the Komodor API

use std::time::Duration;

use super::{Client, RetryConfig};

pub const TEST_API_KEY: &str = "0b9e4c2a-6f1d-4e3b-9a7c-5d8e2f1a3b4c";

/// Client pointed at a mock server, with a short retry delay.
pub fn create_test_client(url: &str) -> Client {
    Client::with_config(
        &format!("{}/mgmt/v1", url),
        &format!("{}/api/v2", url),
        TEST_API_KEY,
        RetryConfig {
            max_attempts: 3,
            retry_delay: Duration::from_millis(10),
        },
    )
    .unwrap()
}
