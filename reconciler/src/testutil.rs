use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use deploy_defs::{
    CloudProvider, DeployError, DeployMode, ImageRef, MonitorConfig, MonitorItem, ScalingGroup,
};
use serde_json::Value;

use crate::ReconcileContext;

/// In-memory provider recording every mutation so tests can assert on the
/// exact side effects of a reconcile pass.
#[derive(Default)]
pub struct FakeCloud {
    pub images: HashMap<String, Vec<ImageRef>>,
    pub missing_repositories: HashSet<String>,
    pub monitor_config: Option<MonitorConfig>,
    pub groups: Mutex<Vec<ScalingGroup>>,
    pub resource_tags: Mutex<HashMap<String, String>>,
    pub refreshed: Mutex<Vec<String>>,
    pub group_tags: Mutex<Vec<(String, String, String)>>,
    pub invocations: Mutex<Vec<(String, Value)>>,
    pub published: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl CloudProvider for FakeCloud {
    async fn list_images(&self, repository: &str) -> Result<Vec<ImageRef>, anyhow::Error> {
        if self.missing_repositories.contains(repository) {
            return Err(DeployError::RepositoryNotFound(repository.to_string()).into());
        }
        Ok(self.images.get(repository).cloned().unwrap_or_default())
    }

    async fn image_tags(
        &self,
        _repository: &str,
        _digest: &str,
    ) -> Result<Option<Vec<String>>, anyhow::Error> {
        Ok(None)
    }

    async fn list_scaling_groups(&self) -> Result<Vec<ScalingGroup>, anyhow::Error> {
        Ok(self.groups.lock().unwrap().clone())
    }

    async fn describe_scaling_groups(
        &self,
        name: &str,
    ) -> Result<Vec<ScalingGroup>, anyhow::Error> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .filter(|group| group.name == name)
            .cloned()
            .collect())
    }

    async fn start_instance_refresh(&self, group: &str) -> Result<(), anyhow::Error> {
        self.refreshed.lock().unwrap().push(group.to_string());
        Ok(())
    }

    async fn tag_scaling_group(
        &self,
        group: &str,
        key: &str,
        value: &str,
    ) -> Result<(), anyhow::Error> {
        self.group_tags.lock().unwrap().push((
            group.to_string(),
            key.to_string(),
            value.to_string(),
        ));
        Ok(())
    }

    async fn set_desired_capacity(
        &self,
        group: &str,
        capacity: i32,
    ) -> Result<(), anyhow::Error> {
        for candidate in self.groups.lock().unwrap().iter_mut() {
            if candidate.name == group {
                candidate.desired_capacity = capacity;
            }
        }
        Ok(())
    }

    async fn list_resource_tags(&self) -> Result<HashMap<String, String>, anyhow::Error> {
        Ok(self.resource_tags.lock().unwrap().clone())
    }

    async fn put_resource_tag(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        self.resource_tags
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn publish_message(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), anyhow::Error> {
        self.published.lock().unwrap().push((
            topic.to_string(),
            subject.to_string(),
            message.to_string(),
        ));
        Ok(())
    }

    async fn invoke_function(
        &self,
        function: &str,
        payload: &Value,
    ) -> Result<Value, anyhow::Error> {
        self.invocations
            .lock()
            .unwrap()
            .push((function.to_string(), payload.clone()));
        Ok(Value::Null)
    }

    async fn fetch_monitor_config(
        &self,
        _application: &str,
        _environment: &str,
    ) -> Result<MonitorConfig, anyhow::Error> {
        self.monitor_config
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no monitor config configured in fake"))
    }

    async fn get_secret(&self, secret_id: &str) -> Result<String, anyhow::Error> {
        Err(anyhow::anyhow!("no secret {} in fake", secret_id))
    }
}

pub fn ctx() -> ReconcileContext {
    ReconcileContext {
        area: "Prod".to_string(),
        department: "Team".to_string(),
        config_application: "deploywatch".to_string(),
        deploy_group: "deploy-asg".to_string(),
    }
}

pub fn asg_item(docker_repo: &str) -> MonitorItem {
    MonitorItem {
        docker_repo: docker_repo.to_string(),
        mode: DeployMode::Asg,
    }
}

pub fn iac_item(docker_repo: &str) -> MonitorItem {
    MonitorItem {
        docker_repo: docker_repo.to_string(),
        mode: DeployMode::Iac,
    }
}

pub fn latest_image(digest: &str) -> ImageRef {
    ImageRef {
        digest: digest.to_string(),
        tag: "latest".to_string(),
    }
}

pub fn group(name: &str, desired_capacity: i32, tags: &[(&str, &str)]) -> ScalingGroup {
    ScalingGroup {
        name: name.to_string(),
        desired_capacity,
        tags: tags
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    }
}
