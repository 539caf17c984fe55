//! Upstream resource shapes
//!
//! Every struct decodes leniently: missing fields fall back to their zero
//! value, and re-serialize with the upstream camelCase names so tool output
//! mirrors the provider's JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cloud.ru Container App
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerApp {
    pub project_id: String,
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub configuration: Configuration,
    pub template: Template,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub ingress: Ingress,
    pub auto_deployments: AutoDeployments,
    pub privileged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ingress {
    pub publicly_accessible: bool,
    pub public_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoDeployments {
    pub enabled: bool,
    pub pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    pub timeout: String,
    pub idle_timeout: String,
    pub protocol: String,
    pub scaling: Scaling,
    pub containers: Vec<Container>,
    pub init_containers: Vec<Value>,
    pub volumes: Vec<Volume>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scaling {
    pub min_instance_count: i64,
    pub max_instance_count: i64,
    pub rule: ScalingRule,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub value: ScalingThreshold,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingThreshold {
    pub soft: i64,
    pub hard: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub resources: Resources,
    pub container_port: i64,
    pub env: Vec<EnvVar>,
    pub command: Vec<Value>,
    pub args: Vec<Value>,
    pub volume_mounts: Vec<VolumeMount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub cpu: String,
    pub memory: String,
}

/// Container environment variable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub var_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    pub read_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Volume {
    pub name: String,
    #[serde(rename = "type")]
    pub volume_type: String,
    pub volume_attributes: VolumeAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeAttributes {
    pub bucket_name: String,
    pub tenant_id: String,
    pub region: String,
    pub read_only: String,
    pub entrypoint: String,
}

/// Cloud.ru Artifact Registry entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DockerRegistry {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub registry_type: String,
    pub retention_policy_is_enabled: bool,
    pub retention_policy: String,
    pub status: String,
    pub is_public: bool,
    pub quarantine_mode: String,
}

/// Image to build and push
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockerImage {
    pub registry_name: String,
    pub repository_name: String,
    pub image_version: String,
    pub dockerfile_path: String,
    pub dockerfile_target: String,
    pub dockerfile_folder: String,
}

/// `{"data": [...]}` envelope used by the log endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for DataEnvelope<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

pub type ContainerAppLogs = DataEnvelope<LogEntry>;
pub type ContainerAppSystemLogs = DataEnvelope<SystemLogEntry>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
    pub version_id: String,
    pub pod_name: String,
    pub level: String,
    pub container_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemLogEntry {
    pub event_type: String,
    pub component: String,
    pub reason: String,
    pub message: String,
    pub revision_name: String,
}

/// Image listed from a registry catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryImage {
    pub name: String,
    pub tag: String,
    pub digest: String,
    pub created_at: String,
    pub size: i64,
    pub media_type: String,
}
