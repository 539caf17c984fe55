//! Cloud.ru Container Apps MCP server
//!
//! Exposes Cloud.ru Container Apps, Artifact Registry and local Docker
//! build/push as tools over the Model Context Protocol (JSON-RPC on stdio).

pub mod cloudru;
pub mod config;
pub mod docker;
pub mod error;
pub mod mapper;
pub mod server;
pub mod tools;
pub mod types;

/// Version injected at compile time via CLOUDRU_MCP_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("CLOUDRU_MCP_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
