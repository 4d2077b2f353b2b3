use thiserror::Error;

use rivals_shared::errors::ApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Riot API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Usage: rivals <GameName#TAG>")]
    Usage,
}
