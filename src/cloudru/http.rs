//! HTTP utilities for Cloud.ru REST API calls

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;

use crate::error::{Error, Result};

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const USER_AGENT: &str = concat!("cloudru-containerapps-mcp/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Raw upstream response: status plus the full body text
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Fail unless the status is one of `accepted`
    pub fn expect_status(self, accepted: &[StatusCode]) -> Result<Self> {
        if accepted.contains(&self.status) {
            Ok(self)
        } else {
            Err(Error::Status {
                status: self.status.as_u16(),
                body: self.body,
            })
        }
    }

    /// Fail when the body is empty
    pub fn expect_body(self) -> Result<Self> {
        if self.body.is_empty() {
            Err(Error::EmptyBody(self.status.as_u16()))
        } else {
            Ok(self)
        }
    }

    /// Decode the body, reporting `what` on failure
    pub fn json<T: serde::de::DeserializeOwned>(&self, what: &'static str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| Error::parse(what, e, &self.body))
    }
}

/// HTTP client wrapper for Cloud.ru API calls
#[derive(Clone)]
pub struct CloudHttpClient {
    client: Client,
}

impl CloudHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Start a request with the JSON content type every upstream expects
    pub fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Send a request and read the whole body. Status codes are not checked here.
    ///
    /// Bodies are only logged when `log_body` is set; token responses must not be.
    pub async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
        log_body: bool,
    ) -> Result<RawResponse> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if log_body {
            tracing::debug!(
                "{} response - Status: {}, Body length: {}, Body: {}",
                operation,
                status.as_u16(),
                body.len(),
                sanitize_for_log(&body)
            );
        } else {
            tracing::debug!("{} response - Status: {}", operation, status.as_u16());
        }
        if !status.is_success() {
            tracing::warn!("{} failed: {}", operation, status);
        }

        Ok(RawResponse { status, body })
    }

    /// Make a GET request
    pub async fn get(&self, operation: &str, url: &str, token: &str) -> Result<RawResponse> {
        tracing::debug!("GET {}", url);
        self.send(operation, self.request(Method::GET, url, Some(token)), true)
            .await
    }

    /// Make a POST request with an optional JSON body
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        url: &str,
        token: &str,
        body: Option<&B>,
    ) -> Result<RawResponse> {
        tracing::debug!("POST {}", url);

        let mut request = self.request(Method::POST, url, Some(token));
        if let Some(body) = body {
            request = request.json(body);
        }

        self.send(operation, request, true).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, operation: &str, url: &str, token: &str) -> Result<RawResponse> {
        tracing::debug!("DELETE {}", url);
        self.send(operation, self.request(Method::DELETE, url, Some(token)), true)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(200)));
        assert!(sanitized.ends_with("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = "я".repeat(150);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated, 300 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_chars() {
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }

    #[test]
    fn test_expect_status() {
        let ok = RawResponse {
            status: StatusCode::CREATED,
            body: "{}".to_string(),
        };
        assert!(ok.expect_status(&[StatusCode::OK, StatusCode::CREATED]).is_ok());

        let failed = RawResponse {
            status: StatusCode::BAD_REQUEST,
            body: "bad".to_string(),
        };
        let err = failed.expect_status(&[StatusCode::OK]).unwrap_err();
        assert_eq!(err.to_string(), "API request failed with status 400: bad");
    }

    #[test]
    fn test_expect_body() {
        let empty = RawResponse {
            status: StatusCode::OK,
            body: String::new(),
        };
        assert!(matches!(empty.expect_body(), Err(Error::EmptyBody(200))));
    }
}
