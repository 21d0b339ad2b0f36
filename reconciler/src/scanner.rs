use deploy_defs::{CloudProvider, DeployError, ImageRef, Warning};
use log::warn;

const LATEST_TAG: &str = "latest";

/// Latest-tagged images for one monitored repository. A repository that does
/// not exist in the registry is a warning plus an empty list so the rest of
/// the batch proceeds; every other failure propagates.
pub async fn list_latest_images(
    provider: &dyn CloudProvider,
    area: &str,
    repo: &str,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<ImageRef>, anyhow::Error> {
    let repository = format!("{}/{}", area.to_lowercase(), repo);
    match provider.list_images(&repository).await {
        Ok(images) => Ok(images
            .into_iter()
            .filter(|image| image.tag == LATEST_TAG)
            .collect()),
        Err(error) => {
            let not_found = matches!(
                error.downcast_ref::<DeployError>(),
                Some(DeployError::RepositoryNotFound(_))
            );
            if not_found {
                warn!("Could not find {}: {:#}", repo, error);
                warnings.push(Warning::Lookup {
                    msg: format!("Could not find {}", repo),
                    error: format!("{:#}", error),
                });
                Ok(Vec::new())
            } else {
                Err(error)
            }
        }
    }
}
