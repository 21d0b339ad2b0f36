use std::collections::HashMap;

use crate::errors::sdk_error;

pub async fn list_resource_tags(
    resource_arn: &str,
) -> Result<HashMap<String, String>, anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_lambda::Client::new(&shared_config);

    let output = client
        .list_tags()
        .resource(resource_arn)
        .send()
        .await
        .map_err(|err| sdk_error("ListTags", err))?;

    Ok(output.tags.unwrap_or_default())
}

pub async fn put_resource_tag(
    resource_arn: &str,
    key: &str,
    value: &str,
) -> Result<(), anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_lambda::Client::new(&shared_config);

    client
        .tag_resource()
        .resource(resource_arn)
        .tags(key, value)
        .send()
        .await
        .map_err(|err| sdk_error("TagResource", err))?;

    Ok(())
}
