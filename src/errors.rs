use thiserror::Error;

/// Error type for the collaborator layers around the cash-flow engine.
///
/// The engine stages themselves never fail; these variants cover config
/// storage, CSV interchange and caller-side input validation.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
