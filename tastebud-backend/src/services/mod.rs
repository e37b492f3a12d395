mod ratings;
mod social;
mod song_logs;
mod users;

pub use ratings::RatingService;
pub use social::SocialService;
pub use song_logs::SongLogService;
pub use users::UserService;

use crate::domain::{User, UserId};
use crate::store::{Store, StoreError};

#[derive(thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PreconditionFailed(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl ServiceError {
    /// True when the caller, not the backend, is at fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::UnexpectedError(_))
    }
}

impl std::fmt::Debug for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NotFound(e.to_string()),
            StoreError::Conflict(message) => Self::Conflict(message),
            e => Self::UnexpectedError(anyhow::Error::new(e)),
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

fn require_user(store: &dyn Store, id: UserId) -> Result<User, ServiceError> {
    store
        .get_user(id)?
        .ok_or_else(|| ServiceError::NotFound(format!("User {} does not exist", id)))
}

fn require_preferences(user: &User) -> Result<(), ServiceError> {
    if user.preferences.is_empty() {
        Err(ServiceError::PreconditionFailed(format!(
            "User {} must set music preferences first",
            user.username
        )))
    } else {
        Ok(())
    }
}
