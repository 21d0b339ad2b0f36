use aws_sdk_autoscaling::types::{AutoScalingGroup, Tag};
use deploy_defs::ScalingGroup;

use crate::errors::sdk_error;

fn from_sdk_group(group: &AutoScalingGroup) -> ScalingGroup {
    ScalingGroup {
        name: group.auto_scaling_group_name().to_string(),
        desired_capacity: group.desired_capacity(),
        tags: group
            .tags()
            .iter()
            .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
            .collect(),
    }
}

pub async fn list_scaling_groups() -> Result<Vec<ScalingGroup>, anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_autoscaling::Client::new(&shared_config);

    let output = client
        .describe_auto_scaling_groups()
        .send()
        .await
        .map_err(|err| sdk_error("DescribeAutoScalingGroups", err))?;

    Ok(output.auto_scaling_groups().iter().map(from_sdk_group).collect())
}

pub async fn describe_scaling_groups(name: &str) -> Result<Vec<ScalingGroup>, anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_autoscaling::Client::new(&shared_config);

    let output = client
        .describe_auto_scaling_groups()
        .auto_scaling_group_names(name)
        .send()
        .await
        .map_err(|err| sdk_error("DescribeAutoScalingGroups", err))?;

    Ok(output.auto_scaling_groups().iter().map(from_sdk_group).collect())
}

pub async fn start_instance_refresh(group: &str) -> Result<(), anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_autoscaling::Client::new(&shared_config);

    client
        .start_instance_refresh()
        .auto_scaling_group_name(group)
        .send()
        .await
        .map_err(|err| sdk_error("StartInstanceRefresh", err))?;

    Ok(())
}

pub async fn tag_scaling_group(
    group: &str,
    key: &str,
    value: &str,
) -> Result<(), anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_autoscaling::Client::new(&shared_config);

    let tag = Tag::builder()
        .resource_id(group)
        .resource_type("auto-scaling-group")
        .key(key)
        .value(value)
        .propagate_at_launch(true)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build tag for {}: {}", group, e))?;

    client
        .create_or_update_tags()
        .tags(tag)
        .send()
        .await
        .map_err(|err| sdk_error("CreateOrUpdateTags", err))?;

    Ok(())
}

pub async fn set_desired_capacity(group: &str, capacity: i32) -> Result<(), anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_autoscaling::Client::new(&shared_config);

    client
        .update_auto_scaling_group()
        .auto_scaling_group_name(group)
        .desired_capacity(capacity)
        .send()
        .await
        .map_err(|err| sdk_error("UpdateAutoScalingGroup", err))?;

    Ok(())
}
