use actix::MailboxError;
use thiserror::Error;

/// Failure of the storage layer itself, as opposed to a rule rejecting the
/// request. Kept separate so `CoreError` stays a flat taxonomy.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Mailbox(#[from] MailboxError),
}

/// Every error a core operation can return to the dispatcher. All variants
/// except `StorageUnavailable` are expected, re-promptable conditions; none
/// of them carries display text, wording is the dispatcher's job.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("user is not registered")]
    NotRegistered,

    #[error("user is already registered")]
    AlreadyRegistered,

    #[error("only letters, digits, '-' and '_' are allowed")]
    InvalidCharacters,

    #[error("too short")]
    TooShort,

    #[error("too long")]
    TooLong,

    #[error("authors cannot vote on their own joke")]
    SelfVote,

    #[error("joke was already voted on")]
    DuplicateVote,

    #[error("no eligible joke left")]
    NoEligibleJoke,

    #[error("storage unavailable")]
    StorageUnavailable(#[source] StorageError),
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        CoreError::StorageUnavailable(err.into())
    }
}

impl From<MailboxError> for CoreError {
    fn from(err: MailboxError) -> Self {
        CoreError::StorageUnavailable(err.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
