use async_trait::async_trait;
use deploy_defs::{
    AccessToken, CheckRunRequest, DeployError, GitProvider, Installation, Issue, IssueComment,
};
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde_json::{json, Value};

const USER_AGENT: &str = "deploywatch/notifier";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3.full+json";

/// One concrete client for the source-hosting API. App-level (JWT) and
/// installation-level (token) access differ only in the authorization
/// header they carry.
pub struct GitHubClient {
    base_uri: String,
    http: reqwest::Client,
    authorization: String,
}

impl GitHubClient {
    pub fn with_token(base_uri: &str, token: &str) -> Result<Self, anyhow::Error> {
        Self::new(base_uri, format!("token {}", token))
    }

    pub fn with_jwt(base_uri: &str, jwt: &str) -> Result<Self, anyhow::Error> {
        Self::new(base_uri, format!("Bearer {}", jwt))
    }

    fn new(base_uri: &str, authorization: String) -> Result<Self, anyhow::Error> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(GitHubClient {
            base_uri: base_uri.to_string(),
            http,
            authorization,
        })
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
    ) -> Result<Value, anyhow::Error> {
        debug!("{} {}", method, path);
        let mut request = self
            .http
            .request(method.clone(), format!("{}{}", self.base_uri, path))
            .header(AUTHORIZATION, self.authorization.as_str())
            .header(ACCEPT, GITHUB_ACCEPT);
        if let Some(data) = data {
            request = request.json(data);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeployError::Api {
                code: status.as_u16(),
                message: format!("GitHub {} {} failed: {}", method, path, body),
            }
            .into());
        }
        Ok(response.json().await?)
    }

    async fn get(&self, path: &str) -> Result<Value, anyhow::Error> {
        self.call(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, data: Option<&Value>) -> Result<Value, anyhow::Error> {
        self.call(Method::POST, path, data).await
    }

    /// Installations of the app; requires JWT authorization.
    pub async fn list_installations(&self) -> Result<Vec<Installation>, anyhow::Error> {
        let value = self.get("/app/installations").await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Mint an installation access token; requires JWT authorization.
    pub async fn create_access_token(
        &self,
        installation_id: u64,
    ) -> Result<AccessToken, anyhow::Error> {
        let value = self
            .post(
                &format!("/app/installations/{}/access_tokens", installation_id),
                None,
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl GitProvider for GitHubClient {
    async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>, anyhow::Error> {
        let value = self.get(&format!("/repos/{}/{}/issues", owner, repo)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> Result<Issue, anyhow::Error> {
        let value = self
            .post(
                &format!("/repos/{}/{}/issues", owner, repo),
                Some(&json!({"title": title, "body": body})),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn add_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<IssueComment, anyhow::Error> {
        let value = self
            .post(
                &format!("/repos/{}/{}/issues/{}/comments", owner, repo, number),
                Some(&json!({"body": body})),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        check: &CheckRunRequest,
    ) -> Result<Value, anyhow::Error> {
        self.post(
            &format!("/repos/{}/{}/check-runs", owner, repo),
            Some(&serde_json::to_value(check)?),
        )
        .await
    }
}
