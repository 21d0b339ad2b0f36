use std::collections::BTreeMap;

use deploy_defs::CloudProvider;

/// Namespace for the per-repository digest entries on the state resource.
pub const STATE_TAG_PREFIX: &str = "deploy.state/";

pub fn state_key(repo: &str) -> String {
    format!("{}{}", STATE_TAG_PREFIX, repo)
}

/// The tag map recorded in the response body for a triggered deployment.
pub fn deployed_entry(repo: &str, digest: &str) -> BTreeMap<String, String> {
    let mut entry = BTreeMap::new();
    entry.insert(state_key(repo), digest.to_string());
    entry
}

/// Last-triggered-digest store, backed by tags on a fixed resource identity
/// since the reconciler itself is stateless between invocations. Writes are
/// whole-tag upserts with last-write-wins semantics; a stored digest means a
/// deployment was *initiated* for it, not that it is live.
pub struct StateStore<'a> {
    provider: &'a dyn CloudProvider,
}

impl<'a> StateStore<'a> {
    pub fn new(provider: &'a dyn CloudProvider) -> Self {
        StateStore { provider }
    }

    pub async fn get(&self, repo: &str) -> Result<Option<String>, anyhow::Error> {
        let tags = self.provider.list_resource_tags().await?;
        Ok(tags.get(&state_key(repo)).cloned())
    }

    pub async fn set(&self, repo: &str, digest: &str) -> Result<(), anyhow::Error> {
        self.provider.put_resource_tag(&state_key(repo), digest).await
    }
}
