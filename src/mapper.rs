//! Request/response shaping
//!
//! Pure functions that turn loosely typed tool arguments into the payloads the
//! upstream APIs expect, plus the small helpers used to present results.

use serde::Serialize;

use crate::types::EnvVar;

/// CPU tiers accepted by Container Apps, with their fixed memory size
pub const CPU_TIERS: &[(&str, &str)] = &[("0.1", "256Mi"), ("0.2", "512Mi"), ("0.5", "1Gi"), ("1", "2Gi")];

/// Maximum number of system log entries returned to the caller
pub const SYSTEM_LOGS_LIMIT: usize = 200;

/// Resolve a CPU value to a `(cpu, memory)` pair.
///
/// Unknown values fall back to the smallest tier.
pub fn cpu_resources(cpu: &str) -> (&'static str, &'static str) {
    CPU_TIERS
        .iter()
        .find(|(tier, _)| *tier == cpu)
        .copied()
        .unwrap_or(CPU_TIERS[0])
}

/// Parse `name='value';name2='value2'` into plain environment variables.
///
/// Entries without `=` or without a name are dropped.
pub fn parse_env_vars(input: &str) -> Vec<EnvVar> {
    input
        .split(';')
        .filter_map(|entry| {
            let (name, value) = entry.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
                &value[1..value.len() - 1]
            } else {
                value
            };
            Some(EnvVar {
                name: name.to_string(),
                value: value.to_string(),
                var_type: "plain".to_string(),
            })
        })
        .collect()
}

/// Split a comma-separated list into trimmed tokens. Empty input yields no tokens.
pub fn split_list(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(',').map(|s| s.trim().to_string()).collect()
}

/// Keep at most `limit` leading elements
pub fn truncate<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.truncate(limit);
    items
}

/// Mask a credential for display: first and last three characters survive.
pub fn mask_sensitive(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    match chars.len() {
        0 => String::new(),
        1..=4 => "***".to_string(),
        n => {
            let start: String = chars[..3].iter().collect();
            let end: String = chars[n.saturating_sub(3)..].iter().collect();
            format!("{}***{}", start, end)
        }
    }
}

/// Lenient integer scan: leading whitespace, optional sign, then digits.
/// Anything unparseable scans to zero.
pub fn scan_int(input: &str) -> i64 {
    let s = input.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Lenient boolean parse: "true"/"1" and "false"/"0"
pub fn parse_bool(input: &str) -> Option<bool> {
    match input {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Indented JSON, as returned to tool callers
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> crate::error::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Typed input for creating a Container App
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateContainerAppRequest {
    pub project_id: String,
    pub name: String,
    pub port: i64,
    pub image: String,
    pub auto_deployments_enabled: bool,
    pub auto_deployments_pattern: String,
    pub privileged: bool,
    pub idle_timeout: String,
    pub timeout: String,
    pub cpu: String,
    pub min_instance_count: i64,
    pub max_instance_count: i64,
    pub description: String,
    pub publicly_accessible: bool,
    pub protocol: String,
    /// `name='value';...` string
    pub environment_variables: String,
    pub command: Vec<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContainerAppPayload {
    pub name: String,
    pub project_id: String,
    pub description: String,
    pub configuration: PayloadConfiguration,
    pub template: PayloadTemplate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadConfiguration {
    pub ingress: PayloadIngress,
    pub auto_deployments: PayloadAutoDeployments,
    pub privileged: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadIngress {
    pub publicly_accessible: bool,
}

#[derive(Debug, Serialize)]
pub struct PayloadAutoDeployments {
    pub enabled: bool,
    pub pattern: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadTemplate {
    pub timeout: String,
    pub idle_timeout: String,
    pub protocol: String,
    pub scaling: PayloadScaling,
    pub containers: Vec<PayloadContainer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadScaling {
    pub min_instance_count: i64,
    pub max_instance_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadContainer {
    pub name: String,
    pub image: String,
    pub container_port: i64,
    pub resources: PayloadResources,
    pub env: Vec<EnvVar>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PayloadResources {
    pub cpu: String,
    pub memory: String,
}

impl CreateContainerAppRequest {
    /// Apply client-side defaults and build the upstream payload
    pub fn into_payload(self) -> CreateContainerAppPayload {
        let max_instance_count = if self.max_instance_count == 0 {
            1
        } else {
            self.max_instance_count
        };
        let description = if self.description.is_empty() {
            format!("Container App {} created via MCP", self.name)
        } else {
            self.description
        };
        let protocol = if self.protocol.is_empty() {
            "http".to_string()
        } else {
            self.protocol
        };
        let (cpu, memory) = cpu_resources(&self.cpu);

        CreateContainerAppPayload {
            name: self.name.clone(),
            project_id: self.project_id,
            description,
            configuration: PayloadConfiguration {
                ingress: PayloadIngress {
                    publicly_accessible: self.publicly_accessible,
                },
                auto_deployments: PayloadAutoDeployments {
                    enabled: self.auto_deployments_enabled,
                    pattern: self.auto_deployments_pattern,
                },
                privileged: self.privileged,
            },
            template: PayloadTemplate {
                timeout: self.timeout,
                idle_timeout: self.idle_timeout,
                protocol,
                scaling: PayloadScaling {
                    min_instance_count: self.min_instance_count,
                    max_instance_count,
                },
                containers: vec![PayloadContainer {
                    name: self.name,
                    image: self.image,
                    container_port: self.port,
                    resources: PayloadResources {
                        cpu: cpu.to_string(),
                        memory: memory.to_string(),
                    },
                    env: parse_env_vars(&self.environment_variables),
                    command: self.command,
                    args: self.args,
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cpu_tiers() {
        assert_eq!(cpu_resources("0.1"), ("0.1", "256Mi"));
        assert_eq!(cpu_resources("0.2"), ("0.2", "512Mi"));
        assert_eq!(cpu_resources("0.5"), ("0.5", "1Gi"));
        assert_eq!(cpu_resources("1"), ("1", "2Gi"));
        assert_eq!(cpu_resources("2"), ("0.1", "256Mi"));
        assert_eq!(cpu_resources(""), ("0.1", "256Mi"));
    }

    #[test]
    fn test_parse_env_vars() {
        let vars = parse_env_vars("A='1';B='two words'");
        assert_eq!(vars.len(), 2);
        assert_eq!((vars[0].name.as_str(), vars[0].value.as_str()), ("A", "1"));
        assert_eq!((vars[1].name.as_str(), vars[1].value.as_str()), ("B", "two words"));
        assert!(vars.iter().all(|v| v.var_type == "plain"));
    }

    #[test]
    fn test_parse_env_vars_drops_malformed() {
        let vars = parse_env_vars("broken; C = 'x=y' ;;=orphan;D=bare;E=''");
        let pairs: Vec<(&str, &str)> = vars
            .iter()
            .map(|v| (v.name.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("C", "x=y"), ("D", "bare"), ("E", "")]);
    }

    #[test]
    fn test_single_quote_value_kept() {
        let vars = parse_env_vars("A='");
        assert_eq!(vars[0].value, "'");
    }

    #[test]
    fn test_split_list() {
        assert!(split_list("").is_empty());
        assert_eq!(split_list("python, -m ,app"), vec!["python", "-m", "app"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(vec![1, 2, 3], 2), vec![1, 2]);
        assert_eq!(truncate(vec![1], 5), vec![1]);
    }

    #[test]
    fn test_mask_sensitive_boundaries() {
        assert_eq!(mask_sensitive(""), "");
        assert_eq!(mask_sensitive("abcd"), "***");
        assert_eq!(mask_sensitive("abcde"), "abc***cde");
        assert_eq!(mask_sensitive("0123456789"), "012***789");
    }

    #[test]
    fn test_scan_int() {
        assert_eq!(scan_int("8080"), 8080);
        assert_eq!(scan_int(" 42abc"), 42);
        assert_eq!(scan_int("-3"), -3);
        assert_eq!(scan_int("abc"), 0);
        assert_eq!(scan_int(""), 0);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_payload_defaults() {
        let request = CreateContainerAppRequest {
            project_id: "p1".to_string(),
            name: "x".to_string(),
            port: 8080,
            image: "img:v1".to_string(),
            cpu: "3".to_string(),
            ..Default::default()
        };
        let payload = serde_json::to_value(request.into_payload()).unwrap();

        assert_eq!(payload["description"], "Container App x created via MCP");
        assert_eq!(payload["template"]["protocol"], "http");
        assert_eq!(payload["template"]["scaling"]["maxInstanceCount"], 1);
        assert_eq!(
            payload["template"]["containers"][0]["resources"],
            json!({"cpu": "0.1", "memory": "256Mi"})
        );
        assert_eq!(payload["template"]["containers"][0]["env"], json!([]));
        assert!(payload["template"]["containers"][0].get("command").is_none());
        assert!(payload["template"]["containers"][0].get("args").is_none());
    }

    #[test]
    fn test_payload_carries_command_and_env() {
        let request = CreateContainerAppRequest {
            name: "api".to_string(),
            cpu: "0.5".to_string(),
            protocol: "http_2".to_string(),
            max_instance_count: 3,
            environment_variables: "MODE='prod'".to_string(),
            command: split_list("python,-m,api"),
            args: split_list("--port, 8000"),
            auto_deployments_enabled: true,
            auto_deployments_pattern: "latest".to_string(),
            ..Default::default()
        };
        let payload = serde_json::to_value(request.into_payload()).unwrap();
        let container = &payload["template"]["containers"][0];

        assert_eq!(container["name"], "api");
        assert_eq!(container["resources"]["memory"], "1Gi");
        assert_eq!(container["env"], json!([{"name": "MODE", "value": "prod", "type": "plain"}]));
        assert_eq!(container["command"], json!(["python", "-m", "api"]));
        assert_eq!(container["args"], json!(["--port", "8000"]));
        assert_eq!(payload["template"]["protocol"], "http_2");
        assert_eq!(payload["template"]["scaling"]["maxInstanceCount"], 3);
        assert_eq!(payload["configuration"]["autoDeployments"]["enabled"], true);
    }
}
