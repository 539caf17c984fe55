//! Per-tool argument resolution and result rendering

use serde_json::{Map, Value};

use super::Tools;
use crate::error::Result;
use crate::mapper::{
    scan_int, split_list, to_pretty_json, truncate, CreateContainerAppRequest, SYSTEM_LOGS_LIMIT,
};
use crate::types::{DataEnvelope, DockerImage};

type Args = Map<String, Value>;

impl Tools {
    fn app_target(&self, args: &Args) -> Result<(String, String)> {
        Ok((
            self.fields.resolve("project_id", args)?,
            self.fields.resolve("containerapp_name", args)?,
        ))
    }

    // =========================================================================
    // Docker
    // =========================================================================

    pub(super) async fn docker_login(&self, args: &Args) -> Result<String> {
        let registry_name = self.fields.resolve("registry_name", args)?;
        let target = self.docker.login(&registry_name).await?;
        Ok(format!(
            "Successfully login to Cloud.ru Artifact Registry: {}",
            target
        ))
    }

    pub(super) async fn docker_build_and_push(&self, args: &Args) -> Result<String> {
        let image = DockerImage {
            registry_name: self.fields.resolve("registry_name", args)?,
            repository_name: self.fields.resolve("repository_name", args)?,
            image_version: self.fields.resolve("image_version", args)?,
            dockerfile_path: self.fields.resolve("dockerfile_path", args)?,
            dockerfile_target: self.fields.resolve("dockerfile_target", args)?,
            dockerfile_folder: self.fields.resolve("dockerfile_folder", args)?,
        };
        let show_commands = self.fields.resolve_bool("show_commands", args)?;

        if show_commands {
            let (build, push) = self.docker.show_commands(&image).await?;
            return Ok(format!(
                "Run Docker build command:\n{}\n and then run docker push command:\n{}",
                build, push
            ));
        }

        let tag = self.docker.build_and_push(&image).await?;
        Ok(format!(
            "Successfully built and pushed Docker image to Cloud.ru Artifact Registry: {}",
            tag
        ))
    }

    pub(super) async fn registry_images(&self, args: &Args) -> Result<String> {
        let registry_name = self.fields.resolve("registry_name", args)?;
        let images = self.docker.registry_images(&registry_name).await?;
        to_pretty_json(&images)
    }

    // =========================================================================
    // Container Apps
    // =========================================================================

    pub(super) async fn list_containerapps(&self, args: &Args) -> Result<String> {
        let project_id = self.fields.resolve("project_id", args)?;
        let apps = self.apps.list(&project_id).await?;
        to_pretty_json(&apps)
    }

    pub(super) async fn get_containerapp(&self, args: &Args) -> Result<String> {
        let (project_id, name) = self.app_target(args)?;
        let app = self.apps.get(&project_id, &name).await?;
        to_pretty_json(&app)
    }

    pub(super) async fn create_containerapp(&self, args: &Args) -> Result<String> {
        let f = &self.fields;
        let request = CreateContainerAppRequest {
            project_id: f.resolve("project_id", args)?,
            name: f.resolve("containerapp_name", args)?,
            port: scan_int(&f.resolve("containerapp_port", args)?),
            image: f.resolve("containerapp_image", args)?,
            auto_deployments_enabled: f
                .resolve_bool("containerapp_auto_deployments_enabled", args)?,
            auto_deployments_pattern: f.resolve("containerapp_auto_deployments_pattern", args)?,
            privileged: f.resolve_bool("containerapp_privileged", args)?,
            idle_timeout: f.resolve("containerapp_idle_timeout", args)?,
            timeout: f.resolve("containerapp_timeout", args)?,
            cpu: f.resolve("containerapp_cpu", args)?,
            min_instance_count: scan_int(&f.resolve("containerapp_min_instance_count", args)?),
            max_instance_count: scan_int(&f.resolve("containerapp_max_instance_count", args)?),
            description: f.resolve("containerapp_description", args)?,
            // Unparseable input falls back to public
            publicly_accessible: f
                .resolve_bool("containerapp_publicly_accessible", args)
                .unwrap_or(true),
            protocol: f.resolve("containerapp_protocol", args)?,
            environment_variables: f.resolve("containerapp_environment_variables", args)?,
            command: split_list(&f.resolve("containerapp_command", args)?),
            args: split_list(&f.resolve("containerapp_args", args)?),
        };

        let name = request.name.clone();
        let app = self.apps.create(request).await?;
        Ok(format!(
            "Successfully created Container App: {}\n{}",
            name,
            to_pretty_json(&app)?
        ))
    }

    pub(super) async fn delete_containerapp(&self, args: &Args) -> Result<String> {
        let (project_id, name) = self.app_target(args)?;
        self.apps.delete(&project_id, &name).await?;
        Ok(format!("Successfully deleted Container App: {}", name))
    }

    pub(super) async fn start_containerapp(&self, args: &Args) -> Result<String> {
        let (project_id, name) = self.app_target(args)?;
        self.apps.start(&project_id, &name).await?;
        Ok(format!("Successfully started Container App: {}", name))
    }

    pub(super) async fn stop_containerapp(&self, args: &Args) -> Result<String> {
        let (project_id, name) = self.app_target(args)?;
        self.apps.stop(&project_id, &name).await?;
        Ok(format!("Successfully stopped Container App: {}", name))
    }

    pub(super) async fn containerapp_logs(&self, args: &Args) -> Result<String> {
        let (project_id, name) = self.app_target(args)?;
        let logs = self.apps.logs(&project_id, &name).await?;
        to_pretty_json(&logs)
    }

    pub(super) async fn containerapp_system_logs(&self, args: &Args) -> Result<String> {
        let (project_id, name) = self.app_target(args)?;
        let logs = self.apps.system_logs(&project_id, &name).await?;
        let limited = DataEnvelope {
            data: truncate(logs.data, SYSTEM_LOGS_LIMIT),
        };
        to_pretty_json(&limited)
    }

    // =========================================================================
    // Artifact Registry
    // =========================================================================

    pub(super) async fn list_docker_registries(&self, args: &Args) -> Result<String> {
        let project_id = self.fields.resolve("project_id", args)?;
        let registries = self.registries.list(&project_id).await?;
        to_pretty_json(&registries)
    }

    pub(super) async fn create_docker_registry(&self, args: &Args) -> Result<String> {
        let project_id = self.fields.resolve("project_id", args)?;
        let registry_name = self.fields.resolve("registry_name", args)?;
        let is_public = self.fields.resolve_bool("registry_is_public", args)?;

        let registry = self
            .registries
            .create(&project_id, &registry_name, is_public)
            .await?;
        Ok(format!(
            "Successfully created Docker Registry: {}\n{}",
            registry_name,
            to_pretty_json(&registry)?
        ))
    }
}
