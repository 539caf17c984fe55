//! Tool surface
//!
//! The fourteen tools exposed to agent callers. Each call resolves its
//! arguments through the [`fields::FieldTable`], validates them before any
//! network activity, runs a single upstream operation and renders the result
//! as text.

pub mod description;
pub mod fields;
mod handlers;

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cloudru::client::CloudClient;
use crate::cloudru::containerapps::ContainerAppsClient;
use crate::cloudru::registry::ArtifactRegistryClient;
use crate::config::Config;
use crate::docker::runner::CommandRunner;
use crate::docker::DockerCli;
use crate::error::{Error, Result};
use fields::FieldTable;

/// Static tool definition
#[derive(Debug, Clone, Copy)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [&'static str],
}

const APP_FIELDS: &[&str] = &["project_id", "containerapp_name"];

pub const TOOLS: &[ToolDef] = &[
    ToolDef {
        name: "cloudru_containerapps_description",
        description: "Returns usage instructions for Cloud.ru Container Apps MCP",
        fields: &[],
    },
    ToolDef {
        name: "cloudru_docker_login",
        description: "Login to Cloud.ru Artifact registry (Docker registry)",
        fields: &["registry_name"],
    },
    ToolDef {
        name: "cloudru_docker_build_and_push",
        description: "Build and push Docker image to Cloud.ru Artifact Registry (Docker registry)",
        fields: &[
            "registry_name",
            "repository_name",
            "image_version",
            "dockerfile_path",
            "dockerfile_target",
            "dockerfile_folder",
            "show_commands",
        ],
    },
    ToolDef {
        name: "cloudru_get_list_containerapps",
        description: "Get list of Container Apps from Cloud.ru. Project ID can be set via CLOUDRU_PROJECT_ID environment variable and obtained from console.cloud.ru",
        fields: &["project_id"],
    },
    ToolDef {
        name: "cloudru_get_containerapp",
        description: "Get a specific Container App from Cloud.ru by name. Project ID can be set via CLOUDRU_PROJECT_ID environment variable and obtained from console.cloud.ru",
        fields: APP_FIELDS,
    },
    ToolDef {
        name: "cloudru_create_containerapp",
        description: "Create a new Container App in Cloud.ru",
        fields: &[
            "project_id",
            "containerapp_name",
            "containerapp_port",
            "containerapp_image",
            "containerapp_auto_deployments_enabled",
            "containerapp_auto_deployments_pattern",
            "containerapp_privileged",
            "containerapp_idle_timeout",
            "containerapp_timeout",
            "containerapp_cpu",
            "containerapp_min_instance_count",
            "containerapp_max_instance_count",
            "containerapp_description",
            "containerapp_publicly_accessible",
            "containerapp_protocol",
            "containerapp_environment_variables",
            "containerapp_command",
            "containerapp_args",
        ],
    },
    ToolDef {
        name: "cloudru_delete_containerapp",
        description: "Delete a Container App from Cloud.ru. WARNING: This action cannot be undone!",
        fields: APP_FIELDS,
    },
    ToolDef {
        name: "cloudru_start_containerapp",
        description: "Start a Container App in Cloud.ru",
        fields: APP_FIELDS,
    },
    ToolDef {
        name: "cloudru_stop_containerapp",
        description: "Stop a Container App in Cloud.ru",
        fields: APP_FIELDS,
    },
    ToolDef {
        name: "cloudru_get_containerapp_logs",
        description: "Get logs for a specific Container App from Cloud.ru by name. Project ID can be set via CLOUDRU_PROJECT_ID environment variable and obtained from console.cloud.ru",
        fields: APP_FIELDS,
    },
    ToolDef {
        name: "cloudru_get_containerapp_system_logs",
        description: "Get system logs for a specific Container App from Cloud.ru by name. Project ID can be set via CLOUDRU_PROJECT_ID environment variable and obtained from console.cloud.ru",
        fields: APP_FIELDS,
    },
    ToolDef {
        name: "cloudru_get_list_docker_registries",
        description: "Get list of Docker Registries from Cloud.ru. Project ID can be set via CLOUDRU_PROJECT_ID environment variable and obtained from console.cloud.ru",
        fields: &["project_id"],
    },
    ToolDef {
        name: "cloudru_create_docker_registry",
        description: "Create a new Docker Registry in Cloud.ru",
        fields: &["project_id", "registry_name", "registry_is_public"],
    },
    ToolDef {
        name: "cloudru_get_registry_images",
        description: "Get list of images from a Docker registry in Cloud.ru",
        fields: &["registry_name"],
    },
];

/// Tool as advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Text result of a tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// All tools wired to their upstream clients
#[derive(Clone)]
pub struct Tools {
    fields: FieldTable,
    apps: ContainerAppsClient,
    registries: ArtifactRegistryClient,
    docker: DockerCli,
    description: String,
}

impl Tools {
    /// Tools backed by the real `docker` binary
    pub fn new(config: &Config) -> Result<Self> {
        let client = CloudClient::new(config)?;
        let docker = DockerCli::new(config, client.auth.clone(), client.http.clone());
        Ok(Self::assemble(config, client, docker))
    }

    /// Tools with a substitute command runner for Docker invocations
    pub fn with_runner(config: &Config, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        let client = CloudClient::new(config)?;
        let docker =
            DockerCli::with_runner(config, client.auth.clone(), client.http.clone(), runner);
        Ok(Self::assemble(config, client, docker))
    }

    fn assemble(config: &Config, client: CloudClient, docker: DockerCli) -> Self {
        Self {
            fields: FieldTable::from_config(config),
            apps: ContainerAppsClient::new(client.clone()),
            registries: ArtifactRegistryClient::new(client),
            docker,
            description: description::render(config),
        }
    }

    /// Usage text served by the description tool
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Descriptors for `tools/list`, in catalogue order
    pub fn list(&self) -> Vec<ToolDescriptor> {
        TOOLS
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name.to_string(),
                description: tool.description.to_string(),
                input_schema: self.fields.input_schema(tool.fields),
            })
            .collect()
    }

    /// Run a tool. Failures become error results, never panics.
    pub async fn call(&self, name: &str, args: &Map<String, Value>) -> ToolOutput {
        tracing::info!("Calling tool {}", name);
        match self.dispatch(name, args).await {
            Ok(text) => ToolOutput::success(text),
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", name, e);
                ToolOutput::error(e.to_string())
            }
        }
    }

    async fn dispatch(&self, name: &str, args: &Map<String, Value>) -> Result<String> {
        match name {
            "cloudru_containerapps_description" => Ok(self.description.clone()),
            "cloudru_docker_login" => self.docker_login(args).await,
            "cloudru_docker_build_and_push" => self.docker_build_and_push(args).await,
            "cloudru_get_list_containerapps" => self.list_containerapps(args).await,
            "cloudru_get_containerapp" => self.get_containerapp(args).await,
            "cloudru_create_containerapp" => self.create_containerapp(args).await,
            "cloudru_delete_containerapp" => self.delete_containerapp(args).await,
            "cloudru_start_containerapp" => self.start_containerapp(args).await,
            "cloudru_stop_containerapp" => self.stop_containerapp(args).await,
            "cloudru_get_containerapp_logs" => self.containerapp_logs(args).await,
            "cloudru_get_containerapp_system_logs" => self.containerapp_system_logs(args).await,
            "cloudru_get_list_docker_registries" => self.list_docker_registries(args).await,
            "cloudru_create_docker_registry" => self.create_docker_registry(args).await,
            "cloudru_get_registry_images" => self.registry_images(args).await,
            _ => Err(Error::UnknownTool(name.to_string())),
        }
    }
}
