use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("repository {0} not found")]
    RepositoryNotFound(String),

    #[error("{message}")]
    Api { code: u16, message: String },
}

impl DeployError {
    /// Status code for the error envelope: the upstream status when it is a
    /// plausible HTTP code, 500 for everything else.
    pub fn status_code(&self) -> u16 {
        match self {
            DeployError::Api { code, .. } if (300..600).contains(code) => *code,
            _ => 500,
        }
    }
}
