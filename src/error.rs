use thiserror::Error;

/// Broad class of a failure, for callers that map errors to transport
/// responses without matching every variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input; the caller can correct the request and retry.
    Validation,
    /// Stale or repeated request; retrying as-is will fail again.
    Conflict,
    /// Access denied; never retried automatically.
    Auth,
    /// A collaborator (store) failed; treated as transient, no retry here.
    Collaborator,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("start date cannot be after end date")]
    InvalidRange,

    #[error("start and end time are required for this leave type")]
    MissingTimeWindow,

    #[error("reason must not be empty")]
    EmptyReason,

    #[error("already punched in for this date")]
    DuplicatePunch,

    #[error("no open punch-in found for this date")]
    NoOpenPunch,

    #[error("punch-out time precedes punch-in time")]
    NegativeDuration,

    #[error("leave request has already been decided")]
    AlreadyDecided,

    #[error("leave request not found")]
    NotFound,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("forbidden")]
    Forbidden,

    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidRange
            | EngineError::MissingTimeWindow
            | EngineError::EmptyReason => ErrorKind::Validation,
            EngineError::DuplicatePunch
            | EngineError::NoOpenPunch
            | EngineError::NegativeDuration
            | EngineError::AlreadyDecided
            | EngineError::NotFound => ErrorKind::Conflict,
            EngineError::InvalidToken | EngineError::Forbidden => ErrorKind::Auth,
            EngineError::Store(_) => ErrorKind::Collaborator,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_the_taxonomy() {
        assert_eq!(EngineError::InvalidRange.kind(), ErrorKind::Validation);
        assert_eq!(EngineError::EmptyReason.kind(), ErrorKind::Validation);
        assert_eq!(EngineError::DuplicatePunch.kind(), ErrorKind::Conflict);
        assert_eq!(EngineError::AlreadyDecided.kind(), ErrorKind::Conflict);
        assert_eq!(EngineError::Forbidden.kind(), ErrorKind::Auth);
        assert_eq!(
            EngineError::Store(anyhow::anyhow!("connection reset")).kind(),
            ErrorKind::Collaborator
        );
    }
}
