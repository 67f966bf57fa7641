use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to start actor pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
