use thiserror::Error;

/// Failures that escape a console operation.
///
/// User mistakes (bad credentials, unknown CRN, declined confirmation) are not
/// errors; they are reported on the console and the operation returns normally.
#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store is closed")]
    StoreClosed,

    #[error("input closed")]
    InputClosed,
}

pub type Result<T, E = RegistrarError> = std::result::Result<T, E>;
