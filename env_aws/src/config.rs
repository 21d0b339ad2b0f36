use anyhow::anyhow;
use deploy_defs::MonitorConfig;
use log::info;

use crate::errors::sdk_error;

const CONFIGURATION_NAME: &str = "config";
const CLIENT_ID: &str = "any-id";

/// Fetch the monitor document for one deployment area from the managed
/// configuration service.
pub async fn fetch_monitor_config(
    application: &str,
    environment: &str,
) -> Result<MonitorConfig, anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_appconfig::Client::new(&shared_config);

    let output = client
        .get_configuration()
        .application(application)
        .environment(environment)
        .configuration(CONFIGURATION_NAME)
        .client_id(CLIENT_ID)
        .send()
        .await
        .map_err(|err| sdk_error("GetConfiguration", err))?;

    let content = output
        .content()
        .ok_or_else(|| anyhow!("Monitor configuration for {} is empty", application))?;
    let config: MonitorConfig = serde_json::from_slice(content.as_ref())?;
    info!(
        "Loaded monitor configuration for {}/{}: {} item(s)",
        application,
        environment,
        config.monitor.len()
    );
    Ok(config)
}
