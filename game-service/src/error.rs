use game_types::{ErrorKind, GameError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Storage failure: {0}")]
    Storage(anyhow::Error),
}

impl ServiceError {
    /// Caller-facing category; storage failures have none
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ServiceError::Game(err) => Some(err.kind()),
            ServiceError::Storage(_) => None,
        }
    }
}

/// Repositories report some rule violations (duplicate names) through
/// `anyhow`; those keep their `GameError` kind.
impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<GameError>() {
            Ok(game_err) => ServiceError::Game(game_err),
            Err(err) => ServiceError::Storage(err),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        ServiceError::Storage(err.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
