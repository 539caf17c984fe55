//! Docker Integration
//!
//! Builds and pushes images to Cloud.ru Artifact Registry by shelling out to
//! the `docker` CLI, and reads registry catalogs over HTTP.

pub mod runner;

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::cloudru::auth::TokenProvider;
use crate::cloudru::http::CloudHttpClient;
use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::types::{DockerImage, RegistryImage};
use runner::{CommandRunner, SystemRunner};

pub const DOCKER: &str = "docker";
pub const PLATFORM: &str = "linux/amd64";
const MANIFEST_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

#[derive(Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    repositories: Vec<String>,
}

/// Full image reference: `registry.domain/repo:version`
pub fn image_tag(image: &DockerImage, registry_domain: &str) -> String {
    format!(
        "{}.{}/{}:{}",
        image.registry_name, registry_domain, image.repository_name, image.image_version
    )
}

/// Arguments for `docker build`
pub fn build_args(image: &DockerImage, tag: &str) -> Vec<String> {
    let mut args = vec![
        "build".to_string(),
        "--platform".to_string(),
        PLATFORM.to_string(),
        "-t".to_string(),
        tag.to_string(),
    ];

    if !image.dockerfile_target.is_empty() && image.dockerfile_target != "-" {
        args.push("--target".to_string());
        args.push(image.dockerfile_target.clone());
    }

    let context = if image.dockerfile_folder.is_empty() {
        "."
    } else {
        image.dockerfile_folder.as_str()
    };

    args.push("-f".to_string());
    args.push(image.dockerfile_path.clone());
    args.push(context.to_string());
    args
}

/// Arguments for `docker push`
pub fn push_args(tag: &str) -> Vec<String> {
    vec![
        "push".to_string(),
        "--platform".to_string(),
        PLATFORM.to_string(),
        tag.to_string(),
    ]
}

/// Render a docker invocation as a shell command line
pub fn command_line(args: &[String]) -> String {
    format!("{} {}", DOCKER, args.join(" "))
}

/// Convert a `/v2/_catalog` listing into image records.
/// The catalog carries no tag or digest information, so every entry is "latest".
pub fn images_from_catalog(repositories: Vec<String>) -> Vec<RegistryImage> {
    repositories
        .into_iter()
        .map(|name| RegistryImage {
            name,
            tag: "latest".to_string(),
            media_type: MANIFEST_MEDIA_TYPE.to_string(),
            ..Default::default()
        })
        .collect()
}

/// Docker CLI invoker
#[derive(Clone)]
pub struct DockerCli {
    registry_domain: String,
    credentials: Credentials,
    auth: TokenProvider,
    http: CloudHttpClient,
    runner: Arc<dyn CommandRunner>,
    catalog_base: Option<String>,
}

impl DockerCli {
    /// Create an invoker that runs the real `docker` binary
    pub fn new(config: &Config, auth: TokenProvider, http: CloudHttpClient) -> Self {
        Self::with_runner(config, auth, http, Arc::new(SystemRunner))
    }

    pub fn with_runner(
        config: &Config,
        auth: TokenProvider,
        http: CloudHttpClient,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            registry_domain: config.registry_domain.clone(),
            credentials: config.credentials.clone(),
            auth,
            http,
            runner,
            catalog_base: None,
        }
    }

    /// Serve catalog requests from `base` instead of `https://{registry}.{domain}`
    pub fn with_catalog_base(mut self, base: &str) -> Self {
        self.catalog_base = Some(base.trim_end_matches('/').to_string());
        self
    }

    /// Log in to `{registry}.{domain}`. The secret goes through stdin, never argv.
    pub async fn login(&self, registry_name: &str) -> Result<String> {
        let target = format!("{}.{}", registry_name, self.registry_domain);
        let args = vec![
            "login".to_string(),
            target.clone(),
            "-u".to_string(),
            self.credentials.key_id.clone(),
            "--password-stdin".to_string(),
        ];

        tracing::info!("Executing: docker login {}", target);
        let result = self
            .runner
            .run(DOCKER, &args, Some(&self.credentials.key_secret))
            .await?;

        if !result.success {
            return Err(Error::DockerLogin {
                target,
                status: result.status,
                output: result.output,
            });
        }

        Ok(target)
    }

    /// Log in, build and push. Returns the pushed tag.
    pub async fn build_and_push(&self, image: &DockerImage) -> Result<String> {
        self.login(&image.registry_name).await?;

        let tag = image_tag(image, &self.registry_domain);

        let build = build_args(image, &tag);
        tracing::info!("Executing: {}", command_line(&build));
        let result = self.runner.run(DOCKER, &build, None).await?;
        if !result.output.is_empty() {
            tracing::info!("Docker build output:\n{}", result.output);
        }
        if !result.success {
            return Err(Error::DockerBuild {
                tag,
                status: result.status,
                output: result.output,
            });
        }

        let push = push_args(&tag);
        tracing::info!("Executing: {}", command_line(&push));
        let result = self.runner.run(DOCKER, &push, None).await?;
        if !result.output.is_empty() {
            tracing::info!("Docker push output:\n{}", result.output);
        }
        if !result.success {
            return Err(Error::DockerPush {
                status: result.status,
                output: result.output,
            });
        }

        Ok(tag)
    }

    /// Log in, then return the build and push command lines without running them
    pub async fn show_commands(&self, image: &DockerImage) -> Result<(String, String)> {
        self.login(&image.registry_name).await?;

        let tag = image_tag(image, &self.registry_domain);
        Ok((
            command_line(&build_args(image, &tag)),
            command_line(&push_args(&tag)),
        ))
    }

    /// Registry root; every registry is its own `https` host under the domain
    pub fn catalog_base(&self, registry_name: &str) -> String {
        match &self.catalog_base {
            Some(base) => base.clone(),
            None => format!("https://{}.{}", registry_name, self.registry_domain),
        }
    }

    pub fn catalog_url(&self, registry_name: &str) -> String {
        format!("{}/v2/_catalog", self.catalog_base(registry_name))
    }

    /// List repositories from the registry catalog using the IAM bearer token
    pub async fn registry_images(&self, registry_name: &str) -> Result<Vec<RegistryImage>> {
        let token = self.auth.get_access_token().await?;
        let url = self.catalog_url(registry_name);
        tracing::debug!("GET {}", url);

        let request = self
            .http
            .request(Method::GET, &url, Some(&token))
            .header(reqwest::header::ACCEPT, "application/json");
        let response = self
            .http
            .send("GetRegistryImages", request, true)
            .await?
            .expect_status(&[StatusCode::OK])?;

        let catalog: CatalogResponse = response.json("catalog")?;
        Ok(images_from_catalog(catalog.repositories))
    }
}
