use deploy_defs::{happy_response, sad_response, DeployEvent, NotifyBody};
use env_aws::AwsCloud;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::{error, warn};
use notifier::handle_event;
use serde_json::Value;

async fn run(provider: &AwsCloud, event: Value) -> Result<NotifyBody, anyhow::Error> {
    let event: DeployEvent = serde_json::from_value(event)?;
    let git_organization = std::env::var("gitOrganization")
        .map_err(|_| anyhow::anyhow!("gitOrganization environment variable not set"))?;
    handle_event(provider, event, &git_organization).await
}

async fn func(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let (event, context) = event.into_parts();
    let provider = AwsCloud::new(context.invoked_function_arn.clone());

    match run(&provider, event).await {
        Ok(body) => {
            if !body.warnings.is_empty() {
                warn!(
                    "{}",
                    serde_json::to_string_pretty(&body).unwrap_or_default()
                );
            }
            Ok(happy_response(&body))
        }
        Err(err) => {
            error!("Notify failed: {:#}", err);
            Ok(sad_response(&err))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    deploy_utils::setup_logging()?;

    lambda_runtime::run(service_fn(func)).await?;

    Ok(())
}
