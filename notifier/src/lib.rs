mod classify;
mod issues;
mod resolver;
#[cfg(test)]
pub(crate) mod testutil;

use deploy_defs::{CloudProvider, DeployEvent, NotifyBody};
use deploy_utils::decode_base64_text;
use log::info;

pub use classify::{
    classify, message_or_default, publish_outcome, subject, topic_suffix, StatusClass,
};
pub use issues::{issue_title, report_error};
pub use resolver::{commit_sha_from_tags, populate_commit};

/// Secret holding the source-hosting app credentials.
pub const GIT_SECRET_ID: &str = "DEPLOY_GIT";
/// Tag on the function's own ARN naming the owning department.
pub const DEPARTMENT_TAG: &str = "Department";

/// One outcome event: decode, resolve the commit, route the notification,
/// and for error-like statuses maintain the issue/check-run trail.
pub async fn handle_event(
    provider: &dyn CloudProvider,
    mut event: DeployEvent,
    git_organization: &str,
) -> Result<NotifyBody, anyhow::Error> {
    if event.message.is_none() {
        if let Some(encoded) = event.message_b64.take() {
            event.message = Some(decode_base64_text(&encoded)?);
        }
    }
    info!(
        "Outcome event for {}: status {:?}",
        event.git_repo, event.status
    );

    populate_commit(provider, &mut event, git_organization).await?;

    let tags = provider.list_resource_tags().await?;
    let department = tags
        .get(DEPARTMENT_TAG)
        .cloned()
        .unwrap_or_else(|| "unknown".to_string());

    let mut body = NotifyBody::new(&event.status, &event.area);
    publish_outcome(provider, &department, &event).await?;

    match classify(&event.status) {
        StatusClass::Ok | StatusClass::Started => {
            body.msg = Some(message_or_default(&event));
        }
        StatusClass::Error => {
            let secret = provider.get_secret(GIT_SECRET_ID).await?;
            let git = githost::installation_client(&secret, git_organization).await?;
            report_error(&git, git_organization, &event, &mut body).await?;
        }
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeCloud;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_ok_event_publishes_to_department_topic() {
        let mut fake = FakeCloud::default();
        fake.resource_tags
            .insert("Department".to_string(), "Team".to_string());
        fake.image_tag_index.insert(
            "sha256:abc".to_string(),
            vec!["latest".to_string(), "git_abc1234def".to_string()],
        );

        let mut event = DeployEvent::started("team-api", "Prod", "all done", "sha256:abc");
        event.status = "OK".to_string();

        let body = handle_event(&fake, event, "example").await.unwrap();

        let published = fake.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        let (topic, subject, message) = &published[0];
        assert_eq!(topic, "team-deploy-finished");
        assert_eq!(subject, "Deployed team-api to Prod #abc1234");
        assert_eq!(
            message,
            "Source Commit https://github.com/example/team-api/commit/abc1234def\n\nall done"
        );
        assert_eq!(body.msg.as_deref(), Some("all done"));
        assert_eq!(body.warnings.len(), 0);
    }

    #[tokio::test]
    async fn test_base64_message_is_decoded() {
        let fake = FakeCloud::default();

        let mut event = DeployEvent::started("team-api", "Prod", "ignored", "sha256:abc");
        event.message = None;
        event.message_b64 = Some("aGVsbG8=".to_string());

        let body = handle_event(&fake, event, "example").await.unwrap();
        assert_eq!(body.msg.as_deref(), Some("hello"));

        let published = fake.published.lock().unwrap();
        assert_eq!(published[0].2, "hello");
        // Department tag missing: topic falls back to the unknown department.
        assert_eq!(published[0].0, "unknown-deploy-start");
    }

    #[tokio::test]
    async fn test_missing_message_gets_placeholder() {
        let fake = FakeCloud::default();

        let mut event = DeployEvent::started("team-api", "Prod", "ignored", "sha256:abc");
        event.message = None;

        let body = handle_event(&fake, event, "example").await.unwrap();
        assert_eq!(body.msg.as_deref(), Some("Missing message"));
    }
}
