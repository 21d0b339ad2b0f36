use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::{ImageRef, MonitorConfig, ScalingGroup};

/// Cloud capabilities the reconciliation and notification cores run against.
/// The production implementation lives in env_aws; tests use in-memory
/// fakes.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// All tagged images in a registry repository. Fails with
    /// `DeployError::RepositoryNotFound` when the repository does not exist,
    /// so callers can decide whether that is fatal.
    async fn list_images(&self, repository: &str) -> Result<Vec<ImageRef>, anyhow::Error>;

    /// Tags of the image with the given digest, or `None` when the registry
    /// has no entry for it.
    async fn image_tags(
        &self,
        repository: &str,
        digest: &str,
    ) -> Result<Option<Vec<String>>, anyhow::Error>;

    async fn list_scaling_groups(&self) -> Result<Vec<ScalingGroup>, anyhow::Error>;

    /// Scaling groups matching a name filter; may be empty or, with
    /// ambiguous filters, more than one.
    async fn describe_scaling_groups(
        &self,
        name: &str,
    ) -> Result<Vec<ScalingGroup>, anyhow::Error>;

    async fn start_instance_refresh(&self, group: &str) -> Result<(), anyhow::Error>;

    /// Upsert a propagate-at-launch tag on a scaling group.
    async fn tag_scaling_group(
        &self,
        group: &str,
        key: &str,
        value: &str,
    ) -> Result<(), anyhow::Error>;

    async fn set_desired_capacity(&self, group: &str, capacity: i32)
        -> Result<(), anyhow::Error>;

    /// Tags on the fixed resource identity that backs persistent state (the
    /// function's own ARN).
    async fn list_resource_tags(&self) -> Result<HashMap<String, String>, anyhow::Error>;

    async fn put_resource_tag(&self, key: &str, value: &str) -> Result<(), anyhow::Error>;

    /// Publish to a message topic in the caller's own account; `topic` is the
    /// bare topic name, address resolution is the implementation's job.
    async fn publish_message(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), anyhow::Error>;

    async fn invoke_function(
        &self,
        function: &str,
        payload: &Value,
    ) -> Result<Value, anyhow::Error>;

    async fn fetch_monitor_config(
        &self,
        application: &str,
        environment: &str,
    ) -> Result<MonitorConfig, anyhow::Error>;

    async fn get_secret(&self, secret_id: &str) -> Result<String, anyhow::Error>;
}
