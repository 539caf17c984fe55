//! Configuration Management
//!
//! Runtime configuration for the MCP server. Values are parsed once at
//! startup (flags or `CLOUDRU_*` environment variables) and stay immutable for
//! the lifetime of the process.

use std::path::Path;

pub const DEFAULT_CONTAINERS_API: &str = "https://containers.api.cloud.ru";
pub const DEFAULT_IAM_API: &str = "https://iam.api.cloud.ru";
pub const DEFAULT_ARTIFACT_API: &str = "https://ar.api.cloud.ru";
pub const DEFAULT_REGISTRY_DOMAIN: &str = "cr.cloud.ru";

pub const ENV_REGISTRY_NAME: &str = "CLOUDRU_REGISTRY_NAME";
pub const ENV_REGISTRY_DOMAIN: &str = "CLOUDRU_REGISTRY_DOMAIN";
pub const ENV_KEY_ID: &str = "CLOUDRU_KEY_ID";
pub const ENV_KEY_SECRET: &str = "CLOUDRU_KEY_SECRET";
pub const ENV_REPOSITORY_NAME: &str = "CLOUDRU_REPOSITORY_NAME";
pub const ENV_PROJECT_ID: &str = "CLOUDRU_PROJECT_ID";
pub const ENV_CONTAINERAPP_NAME: &str = "CLOUDRU_CONTAINERAPP_NAME";
pub const ENV_DOCKERFILE: &str = "CLOUDRU_DOCKERFILE";
pub const ENV_DOCKERFILE_TARGET: &str = "CLOUDRU_DOCKERFILE_TARGET";
pub const ENV_DOCKERFILE_FOLDER: &str = "CLOUDRU_DOCKERFILE_FOLDER";
pub const ENV_CONTAINERS_API: &str = "CLOUDRU_CONTAINERS_API";
pub const ENV_IAM_API: &str = "CLOUDRU_IAM_API";
pub const ENV_ARTIFACT_API: &str = "CLOUDRU_ARTIFACT_API";

/// Message shown when the key pair is missing at startup
pub const MISSING_CREDENTIALS_HELP: &str = "CLOUDRU_KEY_ID and CLOUDRU_KEY_SECRET environment variables must be set.

To obtain access keys for authentication, please follow the instructions at:
https://cloud.ru/docs/console_api/ug/topics/quickstart

You will need a Key ID and Key Secret to use this service.";

/// Long-lived key pair exchanged for bearer tokens
#[derive(Clone)]
pub struct Credentials {
    pub key_id: String,
    pub key_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &crate::mapper::mask_sensitive(&self.key_id))
            .field("key_secret", &"***")
            .finish()
    }
}

/// Base URLs of the upstream APIs
#[derive(Debug, Clone)]
pub struct ApiUrls {
    pub containers: String,
    pub iam: String,
    pub artifact: String,
}

impl Default for ApiUrls {
    fn default() -> Self {
        Self {
            containers: DEFAULT_CONTAINERS_API.to_string(),
            iam: DEFAULT_IAM_API.to_string(),
            artifact: DEFAULT_ARTIFACT_API.to_string(),
        }
    }
}

impl ApiUrls {
    /// Build from optional overrides, trimming trailing slashes
    pub fn new(containers: Option<&str>, iam: Option<&str>, artifact: Option<&str>) -> Self {
        Self {
            containers: base_url(containers, DEFAULT_CONTAINERS_API),
            iam: base_url(iam, DEFAULT_IAM_API),
            artifact: base_url(artifact, DEFAULT_ARTIFACT_API),
        }
    }
}

fn base_url(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.trim_end_matches('/').to_string(),
        _ => fallback.to_string(),
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub registry_name: Option<String>,
    pub registry_domain: String,
    pub repository_name: Option<String>,
    pub project_id: Option<String>,
    pub containerapp_name: Option<String>,
    pub dockerfile: Option<String>,
    pub dockerfile_target: Option<String>,
    pub dockerfile_folder: Option<String>,
    /// Base name of the working directory at startup
    pub current_dir: String,
    pub api: ApiUrls,
}

impl Config {
    /// Minimal configuration with every optional value unset
    pub fn new(key_id: &str, key_secret: &str) -> Self {
        Self {
            credentials: Credentials {
                key_id: key_id.to_string(),
                key_secret: key_secret.to_string(),
            },
            registry_name: None,
            registry_domain: DEFAULT_REGISTRY_DOMAIN.to_string(),
            repository_name: None,
            project_id: None,
            containerapp_name: None,
            dockerfile: None,
            dockerfile_target: None,
            dockerfile_folder: None,
            current_dir: current_dir_name(),
            api: ApiUrls::default(),
        }
    }

    /// Point all three upstream APIs at the same base URL (used with mock servers)
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api = ApiUrls::new(Some(base), Some(base), Some(base));
        self
    }

    /// Dockerfile target, ignoring the "-" placeholder
    pub fn effective_target(&self) -> Option<&str> {
        non_empty(&self.dockerfile_target).filter(|t| *t != "-")
    }

    /// Repository name used when nothing is configured: directory name, plus target
    pub fn default_repository_name(&self) -> String {
        match self.effective_target() {
            Some(target) => format!("{}-{}", self.current_dir, target),
            None => self.current_dir.clone(),
        }
    }

    /// Example image reference advertised for the create tool
    pub fn example_image(&self) -> String {
        format!(
            "{}.{}/{}:latest",
            non_empty(&self.registry_name).unwrap_or_default(),
            self.registry_domain,
            non_empty(&self.repository_name).unwrap_or_default()
        )
    }
}

/// Treat empty strings the same as unset values
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Base name of the current working directory, "default" when unavailable
pub fn current_dir_name() -> String {
    std::env::current_dir()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "default".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_urls_trim_trailing_slash() {
        let urls = ApiUrls::new(Some("http://localhost:9000/"), None, Some("  "));
        assert_eq!(urls.containers, "http://localhost:9000");
        assert_eq!(urls.iam, DEFAULT_IAM_API);
        assert_eq!(urls.artifact, DEFAULT_ARTIFACT_API);
    }

    #[test]
    fn test_default_repository_name_uses_target() {
        let mut config = Config::new("id", "secret");
        config.current_dir = "shop".to_string();
        assert_eq!(config.default_repository_name(), "shop");

        config.dockerfile_target = Some("-".to_string());
        assert_eq!(config.default_repository_name(), "shop");

        config.dockerfile_target = Some("runtime".to_string());
        assert_eq!(config.default_repository_name(), "shop-runtime");
    }

    #[test]
    fn test_example_image() {
        let mut config = Config::new("id", "secret");
        config.registry_name = Some("acme".to_string());
        config.repository_name = Some("web".to_string());
        assert_eq!(config.example_image(), "acme.cr.cloud.ru/web:latest");
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let config = Config::new("key-identifier", "super-secret-value");
        let debug = format!("{:?}", config.credentials);
        assert!(!debug.contains("super-secret-value"));
        assert!(!debug.contains("key-identifier"));
    }
}
