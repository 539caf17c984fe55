//! Error types shared by the upstream clients, the Docker invoker and the
//! tool surface.

use thiserror::Error;

/// Hint appended when a registry login is rejected.
pub const LOGIN_HINT: &str = "Please ensure:\n\
1. The registry exists in Cloud.ru Evolution Artifact Registry\n\
2. You have created a registry and obtained access keys\n\
3. See documentation: https://cloud.ru/docs/container-apps-evolution/ug/topics/tutorials__before-work";

/// Hint appended when a push is rejected.
pub const PUSH_HINT: &str = "To resolve this issue:\n\
1. Ensure you are logged in to the Docker registry\n\
2. Run the cloudru_docker_login function\n\
3. See documentation: https://cloud.ru/docs/container-apps-evolution/ug/topics/tutorials__before-work";

#[derive(Debug, Error)]
pub enum Error {
    /// Connection, DNS or body-read failure
    #[error("failed to make request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API returned empty response body with status {0}")]
    EmptyBody(u16),

    #[error("failed to parse {what} response: {source} body length: {len} body: {body}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
        len: usize,
        body: String,
    },

    #[error("failed to get access token: {0}")]
    Auth(#[source] Box<Error>),

    #[error("authentication response did not contain an access token")]
    MissingToken,

    #[error("field {field} is empty: {description}")]
    MissingField {
        field: String,
        description: String,
    },

    #[error("field {field} must be 'true', 'false', '1', or '0', got: {value}")]
    InvalidBool { field: String, value: String },

    #[error("docker login to {target} failed: {status}\nOutput: {output}\n\n{}", LOGIN_HINT)]
    DockerLogin {
        target: String,
        status: String,
        output: String,
    },

    #[error("failed to build Docker image {tag}: {status}\nOutput: {output}")]
    DockerBuild {
        tag: String,
        status: String,
        output: String,
    },

    #[error("docker push failed: {status}\nOutput: {output}\n\n{}", PUSH_HINT)]
    DockerPush { status: String, output: String },

    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to format result: {0}")]
    Format(#[from] serde_json::Error),

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl Error {
    /// Wrap a token-acquisition failure
    pub fn auth(inner: Error) -> Self {
        Error::Auth(Box::new(inner))
    }

    /// Build a parse error carrying the raw body for diagnosis
    pub fn parse(what: &'static str, source: serde_json::Error, body: &str) -> Self {
        Error::Parse {
            what,
            source,
            len: body.len(),
            body: body.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_code_and_body() {
        let err = Error::Status {
            status: 404,
            body: "{\"message\":\"not found\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 404: {\"message\":\"not found\"}"
        );
    }

    #[test]
    fn test_parse_error_reports_length() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::parse("containerapp", source, "{oops");
        let msg = err.to_string();
        assert!(msg.starts_with("failed to parse containerapp response:"));
        assert!(msg.contains("body length: 5 body: {oops"));
    }

    #[test]
    fn test_auth_error_wraps_cause() {
        let err = Error::auth(Error::EmptyBody(200));
        assert_eq!(
            err.to_string(),
            "failed to get access token: API returned empty response body with status 200"
        );
    }

    #[test]
    fn test_login_error_includes_hint() {
        let err = Error::DockerLogin {
            target: "reg.cr.cloud.ru".to_string(),
            status: "exit status: 1".to_string(),
            output: "denied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("docker login to reg.cr.cloud.ru failed"));
        assert!(msg.contains("Output: denied"));
        assert!(!msg.contains("Run the cloudru_docker_login"));
        assert!(msg.contains("The registry exists"));
    }
}
