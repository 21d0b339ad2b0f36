use std::collections::BTreeMap;

use async_trait::async_trait;
use deploy_defs::{CloudProvider, DeployEvent, ImageRef, MonitorItem, ScalingGroup, Warning};
use log::{info, warn};

use crate::state::{deployed_entry, StateStore, STATE_TAG_PREFIX};
use crate::ReconcileContext;

/// Comma-separated package names a scaling group deploys.
pub const DEPLOY_PACKAGES_TAG: &str = "deploy.packages";
/// Owning department; combined with a package name it forms the repo key.
pub const DEPARTMENT_TAG: &str = "Department";

#[derive(Debug, Default)]
pub struct TriggerOutcome {
    pub deployed: Option<BTreeMap<String, String>>,
    pub warnings: Vec<Warning>,
}

impl TriggerOutcome {
    fn warning(message: String) -> Self {
        TriggerOutcome {
            deployed: None,
            warnings: vec![Warning::Message(message)],
        }
    }
}

/// One way of promoting a fresh image. Triggering records the digest and
/// announces "Started"; it never waits for the deployment to finish.
#[async_trait]
pub trait DeployStrategy: Send + Sync {
    async fn trigger(
        &self,
        provider: &dyn CloudProvider,
        ctx: &ReconcileContext,
        item: &MonitorItem,
        image: &ImageRef,
    ) -> Result<TriggerOutcome, anyhow::Error>;
}

/// Whether a scaling group declares ownership of the repository through its
/// department/package tags.
pub fn serves_repo(group: &ScalingGroup, docker_repo: &str) -> bool {
    let (Some(packages), Some(department)) = (
        group.tags.get(DEPLOY_PACKAGES_TAG),
        group.tags.get(DEPARTMENT_TAG),
    ) else {
        return false;
    };
    packages
        .split(',')
        .any(|package| docker_repo == format!("{}-{}", department.to_lowercase(), package.trim()))
}

async fn notify_started(
    provider: &dyn CloudProvider,
    ctx: &ReconcileContext,
    item: &MonitorItem,
    image: &ImageRef,
    message: &str,
) -> Result<(), anyhow::Error> {
    let event = DeployEvent::started(&item.docker_repo, &ctx.area, message, &image.digest);
    let function = format!("{}-deploy-notify", ctx.department.to_lowercase());
    let response = provider
        .invoke_function(&function, &serde_json::to_value(&event)?)
        .await?;
    info!("{} response: {}", function, response);
    Ok(())
}

/// Rolling refresh: every scaling group whose tags claim the repository gets
/// an instance refresh. Multiple matches are deliberate fan-out.
pub struct AsgRefresher;

#[async_trait]
impl DeployStrategy for AsgRefresher {
    async fn trigger(
        &self,
        provider: &dyn CloudProvider,
        ctx: &ReconcileContext,
        item: &MonitorItem,
        image: &ImageRef,
    ) -> Result<TriggerOutcome, anyhow::Error> {
        let groups = provider.list_scaling_groups().await?;

        let mut refreshed = Vec::new();
        for group in &groups {
            if serves_repo(group, &item.docker_repo) {
                info!("Instance Refresh: {}", group.name);
                provider.start_instance_refresh(&group.name).await?;
                refreshed.push(group.name.clone());
            }
        }

        StateStore::new(provider)
            .set(&item.docker_repo, &image.digest)
            .await?;

        let message = if refreshed.is_empty() {
            format!("No scaling groups currently serve {}", item.docker_repo)
        } else {
            format!("Instance Refresh: {}", refreshed.join(", "))
        };
        notify_started(provider, ctx, item, image, &message).await?;

        Ok(TriggerOutcome {
            deployed: Some(deployed_entry(&item.docker_repo, &image.digest)),
            warnings: Vec::new(),
        })
    }
}

/// Scale-from-zero bootstrap of the designated deploy group. The capacity
/// check is read-then-act and not atomic between invocations; because state
/// is left untouched on the "already deploying" path, the trigger simply
/// retries on the next poll.
pub struct BootstrapDeployer;

#[async_trait]
impl DeployStrategy for BootstrapDeployer {
    async fn trigger(
        &self,
        provider: &dyn CloudProvider,
        ctx: &ReconcileContext,
        item: &MonitorItem,
        image: &ImageRef,
    ) -> Result<TriggerOutcome, anyhow::Error> {
        let groups = provider.describe_scaling_groups(&ctx.deploy_group).await?;
        if groups.len() != 1 {
            warn!("No deploy ASG: {}", ctx.deploy_group);
            return Ok(TriggerOutcome::warning(format!(
                "No deploy ASG: {}",
                ctx.deploy_group
            )));
        }

        let group = &groups[0];
        if group.desired_capacity != 0 {
            warn!("{} already deploying", item.docker_repo);
            return Ok(TriggerOutcome::warning(format!(
                "{} Already deploying",
                item.docker_repo
            )));
        }

        provider
            .tag_scaling_group(
                &group.name,
                &format!("{}DOCKER_REPO", STATE_TAG_PREFIX),
                &item.docker_repo,
            )
            .await?;
        provider.set_desired_capacity(&group.name, 1).await?;

        StateStore::new(provider)
            .set(&item.docker_repo, &image.digest)
            .await?;
        notify_started(provider, ctx, item, image, "Scheduling IaC deployment").await?;

        Ok(TriggerOutcome {
            deployed: Some(deployed_entry(&item.docker_repo, &image.digest)),
            warnings: Vec::new(),
        })
    }
}
