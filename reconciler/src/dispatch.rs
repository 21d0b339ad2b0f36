use deploy_defs::{CloudProvider, DeployMode, ImageRef, MonitorItem, ReconcileBody};
use log::info;

use crate::state::StateStore;
use crate::strategy::{AsgRefresher, BootstrapDeployer, DeployStrategy};

/// Closed dispatch over the two promotion strategies.
pub fn strategy_for(mode: &DeployMode) -> &'static dyn DeployStrategy {
    match mode {
        DeployMode::Asg => &AsgRefresher,
        DeployMode::Iac => &BootstrapDeployer,
    }
}

/// The idempotency gate: a digest we already triggered for is a no-op, with
/// no state mutation and no notification. Anything else is handed to the
/// strategy for the item's mode. The compare-then-trigger is not atomic
/// against concurrent invocations; acceptable at polling cadence.
pub async fn reconcile(
    provider: &dyn CloudProvider,
    ctx: &crate::ReconcileContext,
    item: &MonitorItem,
    image: &ImageRef,
    body: &mut ReconcileBody,
) -> Result<(), anyhow::Error> {
    let state = StateStore::new(provider);
    if state.get(&item.docker_repo).await?.as_deref() == Some(image.digest.as_str()) {
        info!("{} already at {}", item.docker_repo, image.digest);
        return Ok(());
    }

    let outcome = strategy_for(&item.mode)
        .trigger(provider, ctx, item, image)
        .await?;
    if let Some(entry) = outcome.deployed {
        body.deployed.push(entry);
    }
    body.warnings.extend(outcome.warnings);
    Ok(())
}
