use deploy_defs::{CheckRunRequest, DeployEvent, GitProvider, NotifyBody, Warning};
use deploy_utils::title_case;
use log::{info, warn};

use crate::classify::message_or_default;

/// Deterministic dedup title: at most one open issue per (area, status).
pub fn issue_title(area: &str, status: &str) -> String {
    format!("Deploy to {} {}", title_case(area), title_case(status))
}

/// Error-path reporting: reuse the open issue for this (area, status) pair
/// by appending a comment, or open a new one; then attach a failed check-run
/// pointing at the issue when the commit is known. Never closes anything.
pub async fn report_error(
    git: &dyn GitProvider,
    organization: &str,
    event: &DeployEvent,
    body: &mut NotifyBody,
) -> Result<(), anyhow::Error> {
    let title = issue_title(&event.area, &event.status);
    let message = message_or_default(event);

    let issues = git.list_issues(organization, &event.git_repo).await?;
    let (issue_url, data) = match issues
        .iter()
        .find(|issue| issue.state == "open" && issue.title == title)
    {
        Some(existing) => {
            info!("Appending to issue #{} {:?}", existing.number, title);
            let comment = git
                .add_issue_comment(organization, &event.git_repo, existing.number, &message)
                .await?;
            (comment.issue_url.clone(), serde_json::to_value(&comment)?)
        }
        None => {
            info!("Creating issue {:?}", title);
            let issue = git
                .create_issue(organization, &event.git_repo, &title, &message)
                .await?;
            (issue.url.clone(), serde_json::to_value(&issue)?)
        }
    };
    body.msg = Some(message);
    body.data = Some(data);

    match &event.head_sha {
        Some(head_sha) => {
            let check = CheckRunRequest {
                name: title,
                head_sha: head_sha.clone(),
                details_url: issue_url,
                conclusion: "failure".to_string(),
            };
            git.create_check_run(organization, &event.git_repo, &check)
                .await?;
        }
        None => {
            warn!("No commit tag for {}; skipping check run", event.git_repo);
            body.warnings.push(Warning::Message("No GIT tag".to_string()));
        }
    }
    Ok(())
}
