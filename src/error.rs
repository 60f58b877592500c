use thiserror::Error;

/// Problems with a single data row. Always fatal for the import; the parser
/// wraps them with the input line they came from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("expected at least {expected} columns, found {found}")]
    MissingColumn { expected: usize, found: usize },
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
    #[error("unrecognised date {0:?}")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid CSV file, unexpected headers: {0}")]
    Format(String),
    #[error("line {line}: {source}")]
    Row { line: u64, source: RowError },
    #[error("unable to decode input as {0}")]
    Encoding(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
