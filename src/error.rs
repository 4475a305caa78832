use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown scale `{0}`")]
    UnknownScale(String),

    #[error("audio side did not become ready within {0:?}")]
    StartupTimeout(Duration),
}

pub type Result<T> = std::result::Result<T, Error>;
