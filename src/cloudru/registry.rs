//! Artifact Registry
//!
//! Listing and creation of Docker registries. Registries of other types
//! (Helm, generic, ...) are filtered out of listings.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::client::CloudClient;
use crate::error::Result;
use crate::types::DockerRegistry;

pub const DOCKER_REGISTRY_TYPE: &str = "DOCKER";

#[derive(Deserialize)]
struct RegistriesEnvelope {
    #[serde(default)]
    registries: Vec<DockerRegistry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRegistryPayload<'a> {
    name: &'a str,
    is_public: bool,
    registry_type: &'a str,
}

/// Keep only Docker registries, preserving order
pub fn docker_only(registries: Vec<DockerRegistry>) -> Vec<DockerRegistry> {
    registries
        .into_iter()
        .filter(|r| r.registry_type == DOCKER_REGISTRY_TYPE)
        .collect()
}

/// Artifact Registry API client
#[derive(Clone)]
pub struct ArtifactRegistryClient {
    client: CloudClient,
}

impl ArtifactRegistryClient {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    /// List Docker registries in a project
    pub async fn list(&self, project_id: &str) -> Result<Vec<DockerRegistry>> {
        let url = self.client.registries_url(project_id);
        let response = self
            .client
            .get("GetListDockerRegistries", &url)
            .await?
            .expect_status(&[StatusCode::OK])?;

        if response.body.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: RegistriesEnvelope = response.json("registries")?;
        Ok(docker_only(envelope.registries))
    }

    /// Create a Docker registry
    pub async fn create(
        &self,
        project_id: &str,
        name: &str,
        is_public: bool,
    ) -> Result<DockerRegistry> {
        tracing::info!("Creating Docker registry {} in project {}", name, project_id);

        let payload = CreateRegistryPayload {
            name,
            is_public,
            registry_type: DOCKER_REGISTRY_TYPE,
        };
        let url = self.client.registries_url(project_id);
        self.client
            .post("CreateDockerRegistry", &url, Some(&payload))
            .await?
            .expect_status(&[StatusCode::OK, StatusCode::CREATED])?
            .expect_body()?
            .json("registry")
    }
}
