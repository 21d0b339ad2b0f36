mod dispatch;
mod scanner;
mod state;
mod strategy;
#[cfg(test)]
pub(crate) mod testutil;

use deploy_defs::{CloudProvider, MonitorItem, ReconcileBody};
use serde_json::Value;

pub use dispatch::{reconcile, strategy_for};
pub use scanner::list_latest_images;
pub use state::{deployed_entry, state_key, StateStore, STATE_TAG_PREFIX};
pub use strategy::{
    serves_repo, AsgRefresher, BootstrapDeployer, DeployStrategy, TriggerOutcome,
    DEPARTMENT_TAG, DEPLOY_PACKAGES_TAG,
};

/// Everything an invocation needs to know about where it runs, resolved once
/// from the environment contract and threaded explicitly.
#[derive(Clone, Debug)]
pub struct ReconcileContext {
    pub area: String,
    pub department: String,
    /// Application name the monitor configuration document is filed under.
    pub config_application: String,
    /// The designated scale-from-zero group for IaC deployments.
    pub deploy_group: String,
}

impl ReconcileContext {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(ReconcileContext {
            area: required_env("AREA")?,
            department: required_env("DEPARTMENT")?,
            config_application: required_env("repoName")?,
            deploy_group: required_env("deployASG")?,
        })
    }
}

fn required_env(name: &str) -> Result<String, anyhow::Error> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable not set", name))
}

/// One reconciliation pass: resolve the monitor list, then strictly
/// sequentially scan and reconcile each item. A hard failure anywhere aborts
/// the rest of the batch and discards what was accumulated so far.
pub async fn handle_event(
    provider: &dyn CloudProvider,
    ctx: &ReconcileContext,
    event: &Value,
) -> Result<ReconcileBody, anyhow::Error> {
    let monitor: Vec<MonitorItem> = match event.get("monitor").filter(|value| !value.is_null()) {
        Some(value) => serde_json::from_value(value.clone())?,
        None => {
            provider
                .fetch_monitor_config(&ctx.config_application, &ctx.area.to_lowercase())
                .await?
                .monitor
        }
    };

    let mut body = ReconcileBody::default();
    for item in &monitor {
        let images =
            scanner::list_latest_images(provider, &ctx.area, &item.docker_repo, &mut body.warnings)
                .await?;
        for image in &images {
            dispatch::reconcile(provider, ctx, item, image, &mut body).await?;
        }
    }
    Ok(body)
}
