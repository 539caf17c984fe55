//! Usage instructions returned by `cloudru_containerapps_description`

use crate::config::{non_empty, Config};
use crate::mapper::mask_sensitive;

use super::TOOLS;

const DOCS_URL: &str = "https://cloud.ru/docs/container-apps-evolution/ug/topics/tutorials__before-work";

/// Render the usage text. Key id and secret are masked.
pub fn render(config: &Config) -> String {
    let mut text = String::from(
        "Cloud.ru Container Apps MCP provides functions to interact with Cloud.ru Container Apps and Artifact Registry:\n\n",
    );

    for (i, tool) in TOOLS.iter().enumerate() {
        text.push_str(&format!(
            "{}. {}({}) - {}\n",
            i + 1,
            tool.name,
            tool.fields.join(", "),
            tool.description
        ));
    }

    text.push_str(
        "
Environment variables can be used as fallbacks for parameters. A value passed by the caller always wins.

**Required environment variables:**
- CLOUDRU_KEY_ID: Service account key ID for authentication (required)
- CLOUDRU_KEY_SECRET: Service account key secret for authentication (required)

To obtain access keys for authentication, please follow the instructions at:
https://cloud.ru/docs/console_api/ug/topics/quickstart

**Optional environment variables:**
- CLOUDRU_REGISTRY_NAME: Registry name
- CLOUDRU_REGISTRY_DOMAIN: Registry domain (defaults to \"cr.cloud.ru\")
- CLOUDRU_PROJECT_ID: Project ID for Container Apps (can be obtained from console.cloud.ru)
- CLOUDRU_CONTAINERAPP_NAME: Container App name (defaults to current directory name)
- CLOUDRU_REPOSITORY_NAME: Repository name (defaults to current directory name if not set)
- CLOUDRU_DOCKERFILE: Path to Dockerfile (defaults to \"Dockerfile\" if not set)
- CLOUDRU_DOCKERFILE_TARGET: Dockerfile target stage (defaults to \"-\" which means no target)
- CLOUDRU_DOCKERFILE_FOLDER: Dockerfile folder (build context, defaults to \".\" which means current directory)
",
    );

    let show = |value: &Option<String>| non_empty(value).unwrap_or_default().to_string();

    text.push_str(&format!(
        "
Current configuration values:
- CLOUDRU_REGISTRY_NAME: ({}) (Registry for storing Docker images)
- CLOUDRU_REGISTRY_DOMAIN: ({})
- CLOUDRU_REPOSITORY_NAME: ({}) (Name of the repository in the registry)
- CLOUDRU_PROJECT_ID: ({}) (Project ID for Container Apps)
- CLOUDRU_CONTAINERAPP_NAME: ({})
- CLOUDRU_DOCKERFILE: ({}) (Path to the Dockerfile to build the image, by default Dockerfile)
- CLOUDRU_KEY_ID: ({}) (Authentication key identifier)
- CLOUDRU_KEY_SECRET: ({}) (Authentication key secret)
- Current directory: {} (Name of the current working directory)

For more details see: {}",
        show(&config.registry_name),
        config.registry_domain,
        show(&config.repository_name),
        show(&config.project_id),
        show(&config.containerapp_name),
        show(&config.dockerfile),
        mask_sensitive(&config.credentials.key_id),
        mask_sensitive(&config.credentials.key_secret),
        config.current_dir,
        DOCS_URL,
    ));

    text
}
