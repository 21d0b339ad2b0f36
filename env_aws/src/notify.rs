use anyhow::anyhow;
use log::info;

use crate::errors::sdk_error;

/// Publish to a topic owned by the current account, resolving the ARN from
/// the configured region and the STS caller identity.
pub async fn publish_message(
    topic: &str,
    subject: &str,
    message: &str,
) -> Result<(), anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let region = shared_config
        .region()
        .map(|region| region.to_string())
        .ok_or_else(|| anyhow!("No region configured"))?;

    let sts = aws_sdk_sts::Client::new(&shared_config);
    let identity = sts
        .get_caller_identity()
        .send()
        .await
        .map_err(|err| sdk_error("GetCallerIdentity", err))?;
    let account = identity
        .account()
        .ok_or_else(|| anyhow!("Account ID not found"))?;

    let topic_arn = format!("arn:aws:sns:{}:{}:{}", region, account, topic);

    let client = aws_sdk_sns::Client::new(&shared_config);
    let result = client
        .publish()
        .topic_arn(&topic_arn)
        .subject(subject)
        .message(message)
        .send()
        .await
        .map_err(|err| sdk_error("Publish", err))?;

    info!(
        "Published {:?} to {} as message {}",
        subject,
        topic_arn,
        result.message_id().unwrap_or("<none>")
    );
    Ok(())
}
