use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cloudru_mcp::config::{self, ApiUrls, Config, Credentials};
use cloudru_mcp::server::CloudRuServer;
use cloudru_mcp::tools::Tools;
use rmcp::{transport::stdio, ServiceExt};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// MCP server for Cloud.ru Container Apps and Artifact Registry
#[derive(Parser, Debug)]
#[command(name = "cloudru-containerapps-mcp", version = cloudru_mcp::VERSION, about, long_about = None)]
struct Args {
    /// Service account key ID
    #[arg(long, env = config::ENV_KEY_ID, hide_env_values = true)]
    key_id: Option<String>,

    /// Service account key secret
    #[arg(long, env = config::ENV_KEY_SECRET, hide_env_values = true)]
    key_secret: Option<String>,

    /// Artifact Registry name used when a tool call omits it
    #[arg(long, env = config::ENV_REGISTRY_NAME)]
    registry_name: Option<String>,

    /// Domain appended to registry names
    #[arg(long, env = config::ENV_REGISTRY_DOMAIN, default_value = config::DEFAULT_REGISTRY_DOMAIN)]
    registry_domain: String,

    /// Project ID used when a tool call omits it
    #[arg(long, env = config::ENV_PROJECT_ID)]
    project_id: Option<String>,

    /// Container App name used when a tool call omits it
    #[arg(long, env = config::ENV_CONTAINERAPP_NAME)]
    containerapp_name: Option<String>,

    /// Repository name used when a tool call omits it
    #[arg(long, env = config::ENV_REPOSITORY_NAME)]
    repository_name: Option<String>,

    /// Path to the Dockerfile
    #[arg(long, env = config::ENV_DOCKERFILE)]
    dockerfile: Option<String>,

    /// Dockerfile target stage ("-" for none)
    #[arg(long, env = config::ENV_DOCKERFILE_TARGET)]
    dockerfile_target: Option<String>,

    /// Docker build context folder
    #[arg(long, env = config::ENV_DOCKERFILE_FOLDER)]
    dockerfile_folder: Option<String>,

    /// Container Apps API base URL
    #[arg(long, env = config::ENV_CONTAINERS_API, value_parser = parse_base_url)]
    containers_api: Option<String>,

    /// IAM API base URL
    #[arg(long, env = config::ENV_IAM_API, value_parser = parse_base_url)]
    iam_api: Option<String>,

    /// Artifact Registry API base URL
    #[arg(long, env = config::ENV_ARTIFACT_API, value_parser = parse_base_url)]
    artifact_api: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, env = "CLOUDRU_MCP_LOG_LEVEL", default_value = "off")]
    log_level: LogLevel,

    /// Log file path (defaults to the platform config directory)
    #[arg(long, env = "CLOUDRU_MCP_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn parse_base_url(value: &str) -> std::result::Result<String, String> {
    url::Url::parse(value)
        .map(|_| value.to_string())
        .map_err(|e| format!("invalid URL '{}': {}", value, e))
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let (Some(key_id), Some(key_secret)) = (non_empty(self.key_id), non_empty(self.key_secret))
        else {
            anyhow::bail!(config::MISSING_CREDENTIALS_HELP);
        };

        Ok(Config {
            credentials: Credentials { key_id, key_secret },
            registry_name: self.registry_name,
            registry_domain: self.registry_domain,
            repository_name: self.repository_name,
            project_id: self.project_id,
            containerapp_name: self.containerapp_name,
            dockerfile: self.dockerfile,
            dockerfile_target: self.dockerfile_target,
            dockerfile_folder: self.dockerfile_folder,
            current_dir: config::current_dir_name(),
            api: ApiUrls::new(
                self.containers_api.as_deref(),
                self.iam_api.as_deref(),
                self.artifact_api.as_deref(),
            ),
        })
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = log_file.unwrap_or_else(get_log_path);

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    // stdout carries the protocol stream, so logs only ever go to the file
    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cloudru-containerapps-mcp started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir
            .join("cloudru-containerapps-mcp")
            .join("cloudru-containerapps-mcp.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home
            .join(".cloudru-containerapps-mcp")
            .join("cloudru-containerapps-mcp.log");
    }
    PathBuf::from("cloudru-containerapps-mcp.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level, args.log_file.clone())?;

    let config = args.into_config()?;
    let tools = Tools::new(&config).context("Failed to initialize Cloud.ru clients")?;

    tracing::info!("{}", tools.description());

    let service = CloudRuServer::new(tools)
        .serve(stdio())
        .await
        .context("MCP handshake failed")?;
    let reason = service.waiting().await.context("MCP server stopped")?;
    tracing::info!("MCP server finished: {:?}", reason);

    Ok(())
}
