//! Cloud.ru Authentication
//!
//! Exchanges the service-account key pair for a short-lived bearer token.
//! Tokens are not cached: every authenticated operation asks for a new one.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::http::CloudHttpClient;
use crate::config::Credentials;
use crate::error::{Error, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    key_id: &'a str,
    secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
}

/// Token provider backed by the IAM API
#[derive(Clone)]
pub struct TokenProvider {
    credentials: Credentials,
    http: CloudHttpClient,
    token_url: String,
}

impl TokenProvider {
    pub fn new(credentials: Credentials, http: CloudHttpClient, iam_api: &str) -> Self {
        Self {
            credentials,
            http,
            token_url: format!("{}/api/v1/auth/token", iam_api),
        }
    }

    /// Request a fresh access token
    pub async fn get_access_token(&self) -> Result<String> {
        self.fetch_token().await.map_err(Error::auth)
    }

    async fn fetch_token(&self) -> Result<String> {
        let payload = TokenRequest {
            key_id: &self.credentials.key_id,
            secret: &self.credentials.key_secret,
        };

        tracing::debug!("POST {}", self.token_url);
        let request = self
            .http
            .request(Method::POST, &self.token_url, None)
            .json(&payload);

        let response = self
            .http
            .send("GetAccessToken", request, false)
            .await?
            .expect_status(&[StatusCode::OK])?
            .expect_body()?;

        let token: TokenResponse = response.json("token")?;
        if token.access_token.is_empty() {
            return Err(Error::MissingToken);
        }

        tracing::debug!("Access token obtained");
        Ok(token.access_token)
    }
}
