use std::time::{SystemTime, UNIX_EPOCH};

use deploy_defs::AppSecret;
use deploy_utils::decode_base64_text;
use jsonwebtoken::{encode, EncodingKey, Header};
use log::info;
use serde::{Deserialize, Serialize};

use crate::client::GitHubClient;

pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Claims for the app JWT.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iat: usize,
    exp: usize,
    iss: String,
}

/// JWT for app-level endpoints: valid ten minutes, issued a minute in the
/// past to absorb clock skew. The stored private key is base64 PEM with
/// incidental spaces.
pub fn create_app_jwt(secret: &AppSecret) -> Result<String, anyhow::Error> {
    let private_key_pem = decode_base64_text(&secret.private_key.replace(' ', ""))?;
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        iat: (now - 60) as usize,
        exp: (now + 10 * 60) as usize,
        iss: secret.app_id.clone(),
    };
    let header = Header::new(jsonwebtoken::Algorithm::RS256);
    let jwt = encode(
        &header,
        &claims,
        &EncodingKey::from_rsa_pem(private_key_pem.as_bytes())?,
    )?;
    Ok(jwt)
}

/// Build a token-authenticated client for the organization's installation:
/// app JWT, installation lookup by account login, then an installation
/// access token.
pub async fn installation_client(
    secret_json: &str,
    organization: &str,
) -> Result<GitHubClient, anyhow::Error> {
    let secret: AppSecret = serde_json::from_str(secret_json)?;
    let jwt = create_app_jwt(&secret)?;
    let app_client = GitHubClient::with_jwt(GITHUB_API_URL, &jwt)?;

    let installations = app_client.list_installations().await?;
    let installation = installations
        .into_iter()
        .find(|installation| installation.account.login.eq_ignore_ascii_case(organization))
        .ok_or_else(|| anyhow::anyhow!("No matching installation for {}", organization))?;
    info!(
        "Using installation {} for {}",
        installation.id, organization
    );

    let access = app_client.create_access_token(installation.id).await?;
    GitHubClient::with_token(GITHUB_API_URL, &access.token)
}
