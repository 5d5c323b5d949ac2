//! Realtime monitor configuration API

use crate::api::common::{ApiResource, ApiVersion, DataEnvelope};
use crate::api::{ApiError, Client};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub cluster: String,
    #[serde(flatten)]
    pub filters: SensorFilters,
    /// Always sent, as `{}` when nothing is excluded.
    #[serde(default)]
    pub exclude: SensorFilters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_send: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notify_on: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerDutySink {
    pub channel: String,
    pub integration_key: String,
    pub pager_duty_account_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sinks {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slack: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opsgenie: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pagerduty: Vec<PagerDutySink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_webhook: Vec<String>,
}

/// Monitor-type specific thresholds. Which ones apply depends on the monitor type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorVariables {
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_available: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_job_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_after: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_after: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_creation_threshold: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub monitor_type: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<MonitorVariables>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sinks: Option<Sinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink_options: Option<SinkOptions>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub is_deleted: Option<bool>,
}

/// Request body for creating and updating monitors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMonitor {
    pub name: String,
    #[serde(rename = "type")]
    pub monitor_type: String,
    pub active: bool,
    pub sensors: Vec<Sensor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<MonitorVariables>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sinks: Option<Sinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sinks_options: Option<SinkOptions>,
    pub is_deleted: bool,
}

#[derive(Debug, Deserialize)]
struct MonitorList {
    #[serde(default)]
    monitors: Vec<Monitor>,
}

pub struct MonitorsApi<'a> {
    client: &'a Client,
}

impl ApiResource for MonitorsApi<'_> {
    const VERSION: ApiVersion = ApiVersion::V2;

    fn api_path() -> &'static str {
        "/realtime-monitors/config"
    }
}

impl<'a> MonitorsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /realtime-monitors/config
    pub async fn list(&self) -> Result<Vec<Monitor>, ApiError> {
        let response: DataEnvelope<MonitorList> =
            self.client.get(Self::VERSION, Self::api_path()).await?;
        Ok(response.data.monitors)
    }

    /// GET /realtime-monitors/config/{id}
    pub async fn get(&self, id: &str) -> Result<Monitor, ApiError> {
        self.client
            .get(Self::VERSION, &Self::resource_path(id))
            .await
    }

    /// POST /realtime-monitors/config
    pub async fn create(&self, monitor: &NewMonitor) -> Result<Monitor, ApiError> {
        self.client
            .post(Self::VERSION, Self::api_path(), monitor)
            .await
    }

    /// PUT /realtime-monitors/config/{id}. Returns the response body undecoded.
    pub async fn update(&self, id: &str, monitor: &NewMonitor) -> Result<Vec<u8>, ApiError> {
        self.client
            .put_raw(Self::VERSION, &Self::resource_path(id), monitor)
            .await
    }

    /// DELETE /realtime-monitors/config/{id}
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(Self::VERSION, &Self::resource_path(id))
            .await
    }
}
