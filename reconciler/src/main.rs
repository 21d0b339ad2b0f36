use deploy_defs::{happy_response, sad_response};
use env_aws::AwsCloud;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::{error, warn};
use reconciler::{handle_event, ReconcileContext};
use serde_json::Value;

async fn func(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let (event, context) = event.into_parts();
    let provider = AwsCloud::new(context.invoked_function_arn.clone());

    let result = async {
        let ctx = ReconcileContext::from_env()?;
        handle_event(&provider, &ctx, &event).await
    }
    .await;

    match result {
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
            error!("Reconcile failed: {:#}", err);
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
