mod config;
mod errors;
mod functions;
mod notify;
mod registry;
mod secret;
mod scaling;
mod state;

use std::collections::HashMap;

use async_trait::async_trait;
use deploy_defs::{CloudProvider, ImageRef, MonitorConfig, ScalingGroup};
use serde_json::Value;

/// AWS-backed provider. Persistent state lives as tags on the invoked
/// function's own ARN, which is the only per-invocation identity this
/// struct carries.
pub struct AwsCloud {
    function_arn: String,
}

impl AwsCloud {
    pub fn new(function_arn: String) -> Self {
        AwsCloud { function_arn }
    }
}

#[async_trait]
impl CloudProvider for AwsCloud {
    async fn list_images(&self, repository: &str) -> Result<Vec<ImageRef>, anyhow::Error> {
        registry::list_images(repository).await
    }

    async fn image_tags(
        &self,
        repository: &str,
        digest: &str,
    ) -> Result<Option<Vec<String>>, anyhow::Error> {
        registry::image_tags(repository, digest).await
    }

    async fn list_scaling_groups(&self) -> Result<Vec<ScalingGroup>, anyhow::Error> {
        scaling::list_scaling_groups().await
    }

    async fn describe_scaling_groups(
        &self,
        name: &str,
    ) -> Result<Vec<ScalingGroup>, anyhow::Error> {
        scaling::describe_scaling_groups(name).await
    }

    async fn start_instance_refresh(&self, group: &str) -> Result<(), anyhow::Error> {
        scaling::start_instance_refresh(group).await
    }

    async fn tag_scaling_group(
        &self,
        group: &str,
        key: &str,
        value: &str,
    ) -> Result<(), anyhow::Error> {
        scaling::tag_scaling_group(group, key, value).await
    }

    async fn set_desired_capacity(
        &self,
        group: &str,
        capacity: i32,
    ) -> Result<(), anyhow::Error> {
        scaling::set_desired_capacity(group, capacity).await
    }

    async fn list_resource_tags(&self) -> Result<HashMap<String, String>, anyhow::Error> {
        state::list_resource_tags(&self.function_arn).await
    }

    async fn put_resource_tag(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        state::put_resource_tag(&self.function_arn, key, value).await
    }

    async fn publish_message(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), anyhow::Error> {
        notify::publish_message(topic, subject, message).await
    }

    async fn invoke_function(
        &self,
        function: &str,
        payload: &Value,
    ) -> Result<Value, anyhow::Error> {
        functions::invoke_function(function, payload).await
    }

    async fn fetch_monitor_config(
        &self,
        application: &str,
        environment: &str,
    ) -> Result<MonitorConfig, anyhow::Error> {
        config::fetch_monitor_config(application, environment).await
    }

    async fn get_secret(&self, secret_id: &str) -> Result<String, anyhow::Error> {
        secret::get_secret(secret_id).await
    }
}
