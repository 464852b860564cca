use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to build request: {0}")]
    Build(String),
}
