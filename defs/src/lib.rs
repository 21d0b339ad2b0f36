mod errors;
mod event;
mod gitprovider;
mod image;
mod monitor;
mod provider;
mod response;
mod scaling;

pub use errors::DeployError;
pub use event::DeployEvent;
pub use gitprovider::{
    AccessToken, AppSecret, CheckRunRequest, GitProvider, Installation, InstallationAccount,
    Issue, IssueComment,
};
pub use image::ImageRef;
pub use monitor::{DeployMode, MonitorConfig, MonitorItem};
pub use provider::CloudProvider;
pub use response::{happy_response, sad_response, NotifyBody, ReconcileBody, Warning};
pub use scaling::ScalingGroup;
