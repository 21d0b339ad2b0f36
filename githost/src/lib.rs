mod app;
mod client;

pub use app::{create_app_jwt, installation_client, GITHUB_API_URL};
pub use client::GitHubClient;
