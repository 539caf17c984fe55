//! Container Apps
//!
//! Lifecycle operations for Cloud.ru Container Apps. Every call fetches its
//! own token and issues exactly one request.

use reqwest::StatusCode;

use super::client::CloudClient;
use crate::error::Result;
use crate::mapper::CreateContainerAppRequest;
use crate::types::{ContainerApp, ContainerAppLogs, ContainerAppSystemLogs, DataEnvelope};

/// Container Apps API client
#[derive(Clone)]
pub struct ContainerAppsClient {
    client: CloudClient,
}

impl ContainerAppsClient {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    /// List all Container Apps in a project
    pub async fn list(&self, project_id: &str) -> Result<Vec<ContainerApp>> {
        let url = self.client.containers_url(
            "v1",
            &format!("?projectId={}", urlencoding::encode(project_id)),
        );
        let response = self
            .client
            .get("GetListContainerApps", &url)
            .await?
            .expect_status(&[StatusCode::OK])?;

        if response.body.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: DataEnvelope<ContainerApp> = response.json("containerapps")?;
        Ok(envelope.data)
    }

    /// Get a single Container App by name
    pub async fn get(&self, project_id: &str, name: &str) -> Result<ContainerApp> {
        let url = self.client.container_app_url("v1", name, "", project_id);
        self.client
            .get("GetContainerApp", &url)
            .await?
            .expect_status(&[StatusCode::OK])?
            .expect_body()?
            .json("containerapp")
    }

    /// Create a Container App
    pub async fn create(&self, request: CreateContainerAppRequest) -> Result<ContainerApp> {
        let payload = request.into_payload();
        tracing::info!(
            "Creating Container App {} in project {}",
            payload.name,
            payload.project_id
        );

        let url = self.client.containers_url("v2", "/");
        self.client
            .post("CreateContainerApp", &url, Some(&payload))
            .await?
            .expect_status(&[StatusCode::OK, StatusCode::CREATED])?
            .expect_body()?
            .json("containerapp")
    }

    /// Delete a Container App. Cannot be undone.
    pub async fn delete(&self, project_id: &str, name: &str) -> Result<()> {
        tracing::info!("Deleting Container App {} in project {}", name, project_id);
        let url = self.client.container_app_url("v2", name, "", project_id);
        self.client
            .delete("DeleteContainerApp", &url)
            .await?
            .expect_status(&[StatusCode::OK, StatusCode::NO_CONTENT])?;
        Ok(())
    }

    pub async fn start(&self, project_id: &str, name: &str) -> Result<()> {
        self.action("StartContainerApp", project_id, name, "start").await
    }

    pub async fn stop(&self, project_id: &str, name: &str) -> Result<()> {
        self.action("StopContainerApp", project_id, name, "stop").await
    }

    /// POST to `{name}:{action}`
    async fn action(&self, operation: &str, project_id: &str, name: &str, action: &str) -> Result<()> {
        tracing::info!("{}: {} in project {}", operation, name, project_id);
        let url = self
            .client
            .container_app_url("v2", name, &format!(":{}", action), project_id);
        self.client
            .post::<()>(operation, &url, None)
            .await?
            .expect_status(&[StatusCode::OK])?;
        Ok(())
    }

    /// Application logs of a Container App
    pub async fn logs(&self, project_id: &str, name: &str) -> Result<ContainerAppLogs> {
        let url = self.client.container_app_url("v2", name, "/logs", project_id);
        self.client
            .get("GetContainerAppLogs", &url)
            .await?
            .expect_status(&[StatusCode::OK])?
            .json("container app logs")
    }

    /// Platform events (scheduling, pulls, restarts) of a Container App
    pub async fn system_logs(&self, project_id: &str, name: &str) -> Result<ContainerAppSystemLogs> {
        let url = self
            .client
            .container_app_url("v2", name, "/systemLogs", project_id);
        self.client
            .get("GetContainerAppSystemLogs", &url)
            .await?
            .expect_status(&[StatusCode::OK])?
            .json("container app system logs")
    }
}
