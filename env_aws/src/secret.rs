use anyhow::anyhow;

use crate::errors::sdk_error;

pub async fn get_secret(secret_id: &str) -> Result<String, anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_secretsmanager::Client::new(&shared_config);

    let output = client
        .get_secret_value()
        .secret_id(secret_id)
        .send()
        .await
        .map_err(|err| sdk_error("GetSecretValue", err))?;

    output
        .secret_string()
        .map(|secret| secret.to_string())
        .ok_or_else(|| anyhow!("Secret {} has no string value", secret_id))
}
