use aws_sdk_ecr::types::{ImageIdentifier, ListImagesFilter, TagStatus};
use deploy_defs::{DeployError, ImageRef};

use crate::errors::sdk_error;

pub async fn list_images(repository: &str) -> Result<Vec<ImageRef>, anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_ecr::Client::new(&shared_config);

    let result = client
        .list_images()
        .repository_name(repository)
        .filter(
            ListImagesFilter::builder()
                .tag_status(TagStatus::Tagged)
                .build(),
        )
        .send()
        .await;

    let output = match result {
        Ok(output) => output,
        Err(err) => {
            let missing = matches!(
                err.as_service_error(),
                Some(e) if e.is_repository_not_found_exception()
            );
            if missing {
                return Err(DeployError::RepositoryNotFound(repository.to_string()).into());
            }
            return Err(sdk_error("ListImages", err));
        }
    };

    Ok(output
        .image_ids()
        .iter()
        .filter_map(|id| match (id.image_digest(), id.image_tag()) {
            (Some(digest), Some(tag)) => Some(ImageRef {
                digest: digest.to_string(),
                tag: tag.to_string(),
            }),
            _ => None,
        })
        .collect())
}

pub async fn image_tags(
    repository: &str,
    digest: &str,
) -> Result<Option<Vec<String>>, anyhow::Error> {
    let shared_config = aws_config::from_env().load().await;
    let client = aws_sdk_ecr::Client::new(&shared_config);

    let result = client
        .describe_images()
        .repository_name(repository)
        .image_ids(ImageIdentifier::builder().image_digest(digest).build())
        .send()
        .await;

    match result {
        Ok(output) => Ok(output
            .image_details()
            .first()
            .map(|detail| detail.image_tags().to_vec())),
        Err(err) => {
            let missing = matches!(
                err.as_service_error(),
                Some(e) if e.is_image_not_found_exception()
                    || e.is_repository_not_found_exception()
            );
            if missing {
                Ok(None)
            } else {
                Err(sdk_error("DescribeImages", err))
            }
        }
    }
}
