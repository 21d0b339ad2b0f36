use deploy_defs::{CloudProvider, DeployEvent};
use log::warn;

const GIT_TAG_MARKER: &str = "git_";
const COMBINED_TAG_MARKER: &str = "-git_";

/// Recover the commit SHA a build was tagged with: a plain `git_*` tag wins,
/// otherwise the suffix of a combined `ts_*-git_*` tag.
pub fn commit_sha_from_tags(tags: &[String]) -> Option<String> {
    if let Some(tag) = tags.iter().find(|tag| tag.starts_with(GIT_TAG_MARKER)) {
        return Some(tag[GIT_TAG_MARKER.len()..].to_string());
    }
    tags.iter()
        .find(|tag| tag.starts_with("ts_") && tag.contains(COMBINED_TAG_MARKER))
        .and_then(|tag| {
            tag.find(COMBINED_TAG_MARKER)
                .map(|pos| tag[pos + COMBINED_TAG_MARKER.len()..].to_string())
        })
}

/// Fill in the commit identity for the deployed image, in place. Lookup
/// misses are soft: fields stay unset, the outcome pipeline continues.
pub async fn populate_commit(
    provider: &dyn CloudProvider,
    event: &mut DeployEvent,
    organization: &str,
) -> Result<(), anyhow::Error> {
    let repository = format!("{}/{}", event.area.to_lowercase(), event.git_repo);
    match provider.image_tags(&repository, &event.image_digest).await? {
        Some(tags) => match commit_sha_from_tags(&tags) {
            Some(sha) => {
                event.commit_url = Some(format!(
                    "https://github.com/{}/{}/commit/{}",
                    organization, event.git_repo, sha
                ));
                event.commit_id = Some(sha.chars().take(7).collect());
                event.head_sha = Some(sha);
            }
            None => warn!("No GIT tag on image {}: {:?}", event.image_digest, tags),
        },
        None => warn!(
            "No image found for digest {} in {}",
            event.image_digest, repository
        ),
    }
    Ok(())
}
