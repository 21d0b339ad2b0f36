use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use log::info;
use serde_json::Value;

use crate::errors::sdk_error;

pub async fn invoke_function(function: &str, payload: &Value) -> Result<Value, anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_lambda::Client::new(&shared_config);

    let payload_blob = Blob::new(serde_json::to_vec(payload)?);
    info!("Invoking {} with payload: {}", function, payload);

    let response = client
        .invoke()
        .function_name(function)
        .invocation_type(InvocationType::RequestResponse)
        .payload(payload_blob)
        .send()
        .await
        .map_err(|err| sdk_error("Invoke", err))?;

    match response.payload {
        Some(blob) => Ok(serde_json::from_slice(&blob.into_inner())?),
        None => Ok(Value::Null),
    }
}
