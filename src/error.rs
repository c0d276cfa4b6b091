use serde::Serialize;
use sqlx::Error as SqlxError;
use std::time::Duration;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RosterError {
    #[error("Cannot reach the student database: {0}")]
    Connection(#[source] SqlxError),

    #[error("Timed out connecting to the student database after {0:?}")]
    ConnectTimeout(Duration),

    #[error("Database query failed: {0}")]
    Query(#[source] SqlxError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Caller-side rejections, raised before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("mobile must not be empty")]
    EmptyMobile,

    #[error("unknown course {0:?}")]
    UnknownCourse(String),

    #[error("no record is selected")]
    NoSelection,

    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}

/// Coarse classification shown to users and asserted in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Connection,
    Query,
    Validation,
    Internal,
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::Connection(_) | RosterError::ConnectTimeout(_) => ErrorKind::Connection,
            RosterError::Query(_) => ErrorKind::Query,
            RosterError::Validation(_) => ErrorKind::Validation,
            RosterError::Config(_)
            | RosterError::UrlParse(_)
            | RosterError::RactorError(_)
            | RosterError::Io(_)
            | RosterError::Json(_) => ErrorKind::Internal,
        }
    }
}

impl RosterError {
    /// Classify a failure to check a connection out of the pool. Running out
    /// of time waiting is reported like a slow connect.
    pub fn pool_acquire(e: SqlxError, timeout: Duration) -> Self {
        match e {
            SqlxError::PoolTimedOut => RosterError::ConnectTimeout(timeout),
            other => RosterError::Connection(other),
        }
    }
}

impl From<SqlxError> for RosterError {
    fn from(e: SqlxError) -> Self {
        match e {
            SqlxError::Io(_)
            | SqlxError::Tls(_)
            | SqlxError::Protocol(_)
            | SqlxError::Configuration(_)
            | SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::WorkerCrashed => RosterError::Connection(e),
            _ => RosterError::Query(e),
        }
    }
}

impl From<figment::Error> for RosterError {
    fn from(e: figment::Error) -> Self {
        RosterError::Config(e.to_string())
    }
}
