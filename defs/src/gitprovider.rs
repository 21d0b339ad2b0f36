use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IssueComment {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub url: String,
    pub issue_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CheckRunRequest {
    pub name: String,
    pub head_sha: String,
    pub details_url: String,
    pub conclusion: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Installation {
    pub id: u64,
    pub account: InstallationAccount,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InstallationAccount {
    pub login: String,
}

#[derive(Deserialize, Debug)]
pub struct AccessToken {
    pub token: String,
}

/// Credentials for the source-hosting app, as stored in the secret store.
/// The private key is base64-encoded PEM; the app id doubles as the JWT
/// issuer claim.
#[derive(Deserialize, Debug)]
pub struct AppSecret {
    #[serde(rename = "privateKey")]
    pub private_key: String,
    #[serde(rename = "appID")]
    pub app_id: String,
}

/// The source-hosting capabilities the outcome pipeline needs. Installation
/// listing and token minting are construction-time concerns of the concrete
/// client and are not part of this seam.
#[async_trait]
pub trait GitProvider: Send + Sync {
    async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>, anyhow::Error>;

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> Result<Issue, anyhow::Error>;

    async fn add_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<IssueComment, anyhow::Error>;

    async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        check: &CheckRunRequest,
    ) -> Result<Value, anyhow::Error>;
}
