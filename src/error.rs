use thiserror::Error;

#[derive(Error, Debug)]
pub enum KoshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown transaction: #{0}")]
    UnknownTransaction(u32),

    #[error("Unknown message: #{0}")]
    UnknownMessage(u32),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KoshError>;
