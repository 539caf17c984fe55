//! Cloud.ru API interaction module
//!
//! This module provides the core functionality for interacting with the
//! Cloud.ru Evolution APIs, including authentication, HTTP client, and the
//! Container Apps and Artifact Registry clients.
//!
//! # Module Structure
//!
//! - [`auth`] - Key pair to bearer token exchange
//! - [`client`] - Main client combining auth, HTTP and URL builders
//! - [`http`] - HTTP utilities for REST API calls
//! - [`containerapps`] - Container App lifecycle and logs
//! - [`registry`] - Artifact Registry (Docker registries)
//!
//! # Example
//!
//! ```ignore
//! use cloudru_mcp::cloudru::{client::CloudClient, containerapps::ContainerAppsClient};
//!
//! async fn example(config: &cloudru_mcp::config::Config) -> cloudru_mcp::error::Result<()> {
//!     let apps = ContainerAppsClient::new(CloudClient::new(config)?);
//!     let list = apps.list("my-project-id").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod containerapps;
pub mod http;
pub mod registry;
