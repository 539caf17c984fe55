//! Tool parameter catalogue
//!
//! Every parameter a tool can take is described once here. At startup the
//! static definitions are combined with configuration into a [`FieldTable`],
//! the lookup used to advertise schemas and to resolve call arguments.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::config::{non_empty, Config};
use crate::error::{Error, Result};
use crate::mapper::parse_bool;

/// Static parameter definition
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub description: &'static str,
    pub title: Option<&'static str>,
    pub default: Option<&'static str>,
    pub required: bool,
}

const fn field(name: &'static str, description: &'static str) -> FieldDef {
    FieldDef {
        name,
        description,
        title: None,
        default: None,
        required: false,
    }
}

impl FieldDef {
    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    const fn title(mut self, value: &'static str) -> Self {
        self.title = Some(value);
        self
    }
}

/// All tool parameters
pub const FIELDS: &[FieldDef] = &[
    field(
        "project_id",
        "Project ID for Container Apps (can be set via CLOUDRU_PROJECT_ID environment variable)",
    )
    .required(),
    field("registry_name", "Registry name").required(),
    field("registry_is_public", "Make registry public").default("false"),
    field("repository_name", "Repository name").required(),
    field("image_version", "Image version")
        .title("For example: latest or v0.0.1")
        .default("latest")
        .required(),
    field(
        "show_commands",
        "If true, return Docker build and push commands without executing them",
    )
    .default("true"),
    field("dockerfile_path", "Path to the Dockerfile").default("Dockerfile"),
    field("dockerfile_target", "Dockerfile target stage").default("-"),
    field("dockerfile_folder", "Dockerfile folder (build context)").default("."),
    field(
        "containerapp_name",
        "Container App name (can be set via CLOUDRU_CONTAINERAPP_NAME environment variable)",
    ),
    field("containerapp_port", "Container App port number")
        .title("You can use example: 8000")
        .required(),
    field("containerapp_image", "Container App image").required(),
    field("containerapp_auto_deployments_enabled", "Enable auto deployments").default("false"),
    field("containerapp_auto_deployments_pattern", "Auto deployments pattern").default("latest"),
    field("containerapp_privileged", "Run container in privileged mode").default("false"),
    field(
        "containerapp_idle_timeout",
        "Parameter defines how long a service stays active without receiving any requests before being shut down.",
    )
    .default("600s"),
    field(
        "containerapp_timeout",
        "Parameter that defines the maximum amount of time allowed for processing a request. If a complete response is not generated and sent within this period, the request is terminated.",
    )
    .default("60s"),
    field(
        "containerapp_cpu",
        "CPU allocation (0.1 CPU - 256 Mi RAM, 0.2 CPU - 512 Mi RAM, 0.5 CPU - 1 Gi RAM, 1 CPU - 2 Gi RAM)",
    )
    .title("Options: 0.1, 0.2, 0.5, 1")
    .default("0.1"),
    field("containerapp_min_instance_count", "Minimum number of instances for scaling").default("0"),
    field("containerapp_max_instance_count", "Maximum number of instances for scaling").default("1"),
    field("containerapp_description", "Description of the container app"),
    field(
        "containerapp_publicly_accessible",
        "Whether the container app is publicly accessible",
    )
    .default("true"),
    field("containerapp_protocol", "Protocol for the container app")
        .title("Options: http_1, http_2")
        .default("http_1"),
    field(
        "containerapp_environment_variables",
        "Environment variables in format <name>='<value>';<next_name>='value2'",
    ),
    field("containerapp_command", "Command to run in the container (comma-separated values)"),
    field("containerapp_args", "Arguments for the command (comma-separated values)"),
];

/// A parameter with its configuration-derived fallbacks
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub description: &'static str,
    pub title: Option<String>,
    pub env_value: Option<String>,
    pub default: Option<String>,
    pub required: bool,
}

impl Field {
    fn from_def(def: &FieldDef) -> Self {
        Self {
            name: def.name,
            description: def.description,
            title: def.title.map(str::to_string),
            env_value: None,
            default: def.default.map(str::to_string),
            required: def.required,
        }
    }

    /// Value advertised as the schema default: env value first, then the literal
    pub fn advertised_default(&self) -> Option<&str> {
        self.env_value.as_deref().or(self.default.as_deref())
    }

    /// JSON-Schema property for this parameter
    pub fn property_schema(&self) -> Value {
        let description = match self.advertised_default() {
            Some(default) => format!("{} (default: {})", self.description, default),
            None => self.description.to_string(),
        };

        let mut property = Map::new();
        property.insert("type".to_string(), json!("string"));
        property.insert("description".to_string(), json!(description));
        if let Some(title) = &self.title {
            property.insert("title".to_string(), json!(title));
        }
        if let Some(default) = self.advertised_default() {
            property.insert("default".to_string(), json!(default));
        }
        Value::Object(property)
    }

    /// Whether the caller must supply this parameter
    pub fn must_be_supplied(&self) -> bool {
        self.required && self.advertised_default().is_none()
    }
}

/// Lookup table from parameter name to its fallbacks
#[derive(Debug, Clone)]
pub struct FieldTable {
    fields: HashMap<&'static str, Field>,
}

impl FieldTable {
    /// Build the table from the static catalogue and configuration
    pub fn from_config(config: &Config) -> Self {
        let mut fields: HashMap<&'static str, Field> = FIELDS
            .iter()
            .map(|def| (def.name, Field::from_def(def)))
            .collect();

        let env_values = [
            ("project_id", non_empty(&config.project_id)),
            ("registry_name", non_empty(&config.registry_name)),
            ("repository_name", non_empty(&config.repository_name)),
            ("dockerfile_path", non_empty(&config.dockerfile)),
            ("dockerfile_target", non_empty(&config.dockerfile_target)),
            ("dockerfile_folder", non_empty(&config.dockerfile_folder)),
            ("containerapp_name", non_empty(&config.containerapp_name)),
        ];
        for (name, value) in env_values {
            if let (Some(field), Some(value)) = (fields.get_mut(name), value) {
                field.env_value = Some(value.to_string());
            }
        }

        if let Some(field) = fields.get_mut("repository_name") {
            field.default = Some(config.default_repository_name());
        }
        if let Some(field) = fields.get_mut("containerapp_name") {
            field.default = Some(config.current_dir.clone());
            field.title = Some(format!("You can use example: {}", config.current_dir));
        }
        if let Some(field) = fields.get_mut("containerapp_image") {
            field.title = Some(format!("Example image: {}", config.example_image()));
        }

        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// JSON-Schema object for a tool taking `names`
    pub fn input_schema(&self, names: &[&str]) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for name in names {
            let Some(field) = self.get(name) else {
                continue;
            };
            properties.insert(name.to_string(), field.property_schema());
            if field.must_be_supplied() {
                required.push(json!(name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Resolve a parameter: caller value, then environment, then literal default.
    ///
    /// Required parameters with nothing to fall back on are a validation error.
    pub fn resolve(&self, name: &str, args: &Map<String, Value>) -> Result<String> {
        if let Some(value) = arg_string(args, name).filter(|v| !v.is_empty()) {
            return Ok(value);
        }

        let Some(field) = self.get(name) else {
            return Ok(String::new());
        };

        if let Some(value) = field.advertised_default().filter(|v| !v.is_empty()) {
            return Ok(value.to_string());
        }

        if field.required {
            return Err(Error::MissingField {
                field: name.to_string(),
                description: field.description.to_string(),
            });
        }

        Ok(String::new())
    }

    /// Resolve a parameter as a lenient boolean
    pub fn resolve_bool(&self, name: &str, args: &Map<String, Value>) -> Result<bool> {
        let value = self.resolve(name, args)?;
        parse_bool(&value).ok_or_else(|| Error::InvalidBool {
            field: name.to_string(),
            value,
        })
    }
}

/// Read an argument as a string. Booleans and numbers are accepted as their text.
pub fn arg_string(args: &Map<String, Value>, name: &str) -> Option<String> {
    match args.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
