use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use deploy_defs::{
    CheckRunRequest, CloudProvider, GitProvider, ImageRef, Issue, IssueComment, MonitorConfig,
    ScalingGroup,
};
use serde_json::{json, Value};

/// In-memory cloud for the outcome pipeline: a digest→tags index, the
/// function's own tags, and a record of published messages.
#[derive(Default)]
pub struct FakeCloud {
    pub image_tag_index: HashMap<String, Vec<String>>,
    pub resource_tags: HashMap<String, String>,
    pub secret: Option<String>,
    pub published: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl CloudProvider for FakeCloud {
    async fn list_images(&self, _repository: &str) -> Result<Vec<ImageRef>, anyhow::Error> {
        Ok(Vec::new())
    }

    async fn image_tags(
        &self,
        _repository: &str,
        digest: &str,
    ) -> Result<Option<Vec<String>>, anyhow::Error> {
        Ok(self.image_tag_index.get(digest).cloned())
    }

    async fn list_scaling_groups(&self) -> Result<Vec<ScalingGroup>, anyhow::Error> {
        Ok(Vec::new())
    }

    async fn describe_scaling_groups(
        &self,
        _name: &str,
    ) -> Result<Vec<ScalingGroup>, anyhow::Error> {
        Ok(Vec::new())
    }

    async fn start_instance_refresh(&self, _group: &str) -> Result<(), anyhow::Error> {
        Ok(())
    }

    async fn tag_scaling_group(
        &self,
        _group: &str,
        _key: &str,
        _value: &str,
    ) -> Result<(), anyhow::Error> {
        Ok(())
    }

    async fn set_desired_capacity(
        &self,
        _group: &str,
        _capacity: i32,
    ) -> Result<(), anyhow::Error> {
        Ok(())
    }

    async fn list_resource_tags(&self) -> Result<HashMap<String, String>, anyhow::Error> {
        Ok(self.resource_tags.clone())
    }

    async fn put_resource_tag(&self, _key: &str, _value: &str) -> Result<(), anyhow::Error> {
        Ok(())
    }

    async fn publish_message(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), anyhow::Error> {
        self.published.lock().unwrap().push((
            topic.to_string(),
            subject.to_string(),
            message.to_string(),
        ));
        Ok(())
    }

    async fn invoke_function(
        &self,
        _function: &str,
        _payload: &Value,
    ) -> Result<Value, anyhow::Error> {
        Ok(Value::Null)
    }

    async fn fetch_monitor_config(
        &self,
        _application: &str,
        _environment: &str,
    ) -> Result<MonitorConfig, anyhow::Error> {
        Err(anyhow::anyhow!("no monitor config in fake"))
    }

    async fn get_secret(&self, secret_id: &str) -> Result<String, anyhow::Error> {
        self.secret
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no secret {} in fake", secret_id))
    }
}

/// In-memory issue tracker preserving the open/closed state the dedup logic
/// keys on.
#[derive(Default)]
pub struct FakeGit {
    pub issues: Mutex<Vec<Issue>>,
    pub comments: Mutex<Vec<(u64, String)>>,
    pub checks: Mutex<Vec<CheckRunRequest>>,
}

impl FakeGit {
    pub fn close_all(&self) {
        for issue in self.issues.lock().unwrap().iter_mut() {
            issue.state = "closed".to_string();
        }
    }
}

#[async_trait]
impl GitProvider for FakeGit {
    async fn list_issues(&self, _owner: &str, _repo: &str) -> Result<Vec<Issue>, anyhow::Error> {
        Ok(self.issues.lock().unwrap().clone())
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        _body: &str,
    ) -> Result<Issue, anyhow::Error> {
        let mut issues = self.issues.lock().unwrap();
        let issue = Issue {
            number: issues.len() as u64 + 1,
            title: title.to_string(),
            state: "open".to_string(),
            url: format!(
                "https://api.github.com/repos/{}/{}/issues/{}",
                owner,
                repo,
                issues.len() + 1
            ),
        };
        issues.push(issue.clone());
        Ok(issue)
    }

    async fn add_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<IssueComment, anyhow::Error> {
        let mut comments = self.comments.lock().unwrap();
        comments.push((number, body.to_string()));
        Ok(IssueComment {
            id: comments.len() as u64,
            url: format!(
                "https://api.github.com/repos/{}/{}/issues/comments/{}",
                owner,
                repo,
                comments.len()
            ),
            issue_url: format!(
                "https://api.github.com/repos/{}/{}/issues/{}",
                owner, repo, number
            ),
        })
    }

    async fn create_check_run(
        &self,
        _owner: &str,
        _repo: &str,
        check: &CheckRunRequest,
    ) -> Result<Value, anyhow::Error> {
        let mut checks = self.checks.lock().unwrap();
        checks.push(check.clone());
        Ok(json!({"id": checks.len()}))
    }
}
