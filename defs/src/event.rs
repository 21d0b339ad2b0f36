use serde::{Deserialize, Serialize};

/// A deployment outcome event as exchanged between the reconciler and the
/// notifier. Commit fields are filled in later from the registry image tags,
/// so they are absent on the wire coming in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeployEvent {
    #[serde(rename = "gitRepo")]
    pub git_repo: String,
    pub area: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        rename = "messageB64",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub message_b64: Option<String>,
    #[serde(rename = "imageDigest")]
    pub image_digest: String,
    #[serde(rename = "headSHA", default, skip_serializing_if = "Option::is_none")]
    pub head_sha: Option<String>,
    #[serde(rename = "commitURL", default, skip_serializing_if = "Option::is_none")]
    pub commit_url: Option<String>,
    #[serde(rename = "commitID", default, skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
}

impl DeployEvent {
    pub fn started(git_repo: &str, area: &str, message: &str, image_digest: &str) -> Self {
        DeployEvent {
            git_repo: git_repo.to_string(),
            area: area.to_string(),
            status: "Started".to_string(),
            message: Some(message.to_string()),
            message_b64: None,
            image_digest: image_digest.to_string(),
            head_sha: None,
            commit_url: None,
            commit_id: None,
        }
    }

    /// Short commit id for subject lines; placeholder until the resolver has
    /// recovered one from the image tags.
    pub fn commit_display(&self) -> &str {
        self.commit_id.as_deref().unwrap_or("<UNKNOWN>")
    }
}
