//! Cloud.ru Client
//!
//! Combines authentication and HTTP functionality, and knows how to build the
//! URLs of each upstream API.

use super::auth::TokenProvider;
use super::http::{CloudHttpClient, RawResponse};
use crate::config::{ApiUrls, Config};
use crate::error::Result;
use serde::Serialize;

/// Main Cloud.ru client
#[derive(Clone)]
pub struct CloudClient {
    pub auth: TokenProvider,
    pub http: CloudHttpClient,
    pub api: ApiUrls,
}

impl CloudClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = CloudHttpClient::new()?;
        let auth = TokenProvider::new(config.credentials.clone(), http.clone(), &config.api.iam);

        Ok(Self {
            auth,
            http,
            api: config.api.clone(),
        })
    }

    /// Get a fresh access token
    pub async fn get_token(&self) -> Result<String> {
        self.auth.get_access_token().await
    }

    /// Authenticated GET
    pub async fn get(&self, operation: &str, url: &str) -> Result<RawResponse> {
        let token = self.get_token().await?;
        self.http.get(operation, url, &token).await
    }

    /// Authenticated POST
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        url: &str,
        body: Option<&B>,
    ) -> Result<RawResponse> {
        let token = self.get_token().await?;
        self.http.post(operation, url, &token, body).await
    }

    /// Authenticated DELETE
    pub async fn delete(&self, operation: &str, url: &str) -> Result<RawResponse> {
        let token = self.get_token().await?;
        self.http.delete(operation, url, &token).await
    }

    // =========================================================================
    // Container Apps API helpers
    // =========================================================================

    /// Build Container Apps API URL for a version and path
    pub fn containers_url(&self, version: &str, path: &str) -> String {
        format!("{}/{}/containers{}", self.api.containers, version, path)
    }

    /// Build a Container App URL scoped to a project, with an optional `:action` suffix
    pub fn container_app_url(
        &self,
        version: &str,
        name: &str,
        suffix: &str,
        project_id: &str,
    ) -> String {
        format!(
            "{}{}?projectId={}",
            self.containers_url(version, &format!("/{}", urlencoding::encode(name))),
            suffix,
            urlencoding::encode(project_id)
        )
    }

    // =========================================================================
    // Artifact Registry API helpers
    // =========================================================================

    /// Build Artifact Registry URL for a project's registries
    pub fn registries_url(&self, project_id: &str) -> String {
        format!(
            "{}/v1/projects/{}/registries",
            self.api.artifact,
            urlencoding::encode(project_id)
        )
    }
}
