use thiserror::Error;

/// Why a review result could not be mounted.
///
/// Both variants lead to the same outcome for the host (navigate back to the
/// entry view); they are kept apart so the log says which one happened.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no review result in handoff slot `{key}`")]
    NotFound { key: &'static str },
    #[error("review result payload is not valid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reading the SQLite handoff database itself.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("cannot open handoff database: {0}")]
    Open(#[from] rusqlite::Error),
    #[error("handoff database error: {0}")]
    Storage(#[from] tokio_rusqlite::Error),
}
