use deploy_defs::{CloudProvider, DeployEvent};
use deploy_utils::title_case;
use log::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatusClass {
    Ok,
    Started,
    Error,
}

/// Case-insensitive, prefix-based: exactly "ok", anything starting with
/// "start", and everything else is error-like.
pub fn classify(status: &str) -> StatusClass {
    let lower = status.to_lowercase();
    if lower == "ok" {
        StatusClass::Ok
    } else if lower.starts_with("start") {
        StatusClass::Started
    } else {
        StatusClass::Error
    }
}

pub fn topic_suffix(class: StatusClass) -> &'static str {
    match class {
        StatusClass::Ok => "deploy-finished",
        StatusClass::Started => "deploy-start",
        StatusClass::Error => "deploy-error",
    }
}

pub fn subject(event: &DeployEvent) -> String {
    match classify(&event.status) {
        StatusClass::Ok => format!(
            "Deployed {} to {} #{}",
            event.git_repo,
            event.area,
            event.commit_display()
        ),
        StatusClass::Started => format!(
            "Deploying {} to {} #{}",
            event.git_repo,
            event.area,
            event.commit_display()
        ),
        StatusClass::Error => format!(
            "{} to deploy {} in {} #{}",
            title_case(&event.status),
            event.git_repo,
            event.area,
            event.commit_display()
        ),
    }
}

pub fn message_or_default(event: &DeployEvent) -> String {
    match &event.message {
        Some(message) => message.clone(),
        None => {
            warn!("Missing message on event for {}", event.git_repo);
            "Missing message".to_string()
        }
    }
}

/// Route the outcome to its department topic, prefixing the source commit
/// link when one was resolved.
pub async fn publish_outcome(
    provider: &dyn CloudProvider,
    department: &str,
    event: &DeployEvent,
) -> Result<(), anyhow::Error> {
    let subject = subject(event);
    let topic = format!(
        "{}-{}",
        department.to_lowercase(),
        topic_suffix(classify(&event.status))
    );
    info!("Publishing {:?} to {}", subject, topic);

    let mut message = message_or_default(event);
    if let Some(commit_url) = &event.commit_url {
        message = format!("Source Commit {}\n\n{}", commit_url, message);
    }

    provider.publish_message(&topic, &subject, &message).await
}
